//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`, so subscribers see a consistent view of state
//! changes. Each event carries a full view of the part that changed.

use serde::Serialize;

use crate::state::View;
use crate::view::{CatalogView, ProblemView, SuggestorView};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The active screen changed
    ViewChanged { view: View },

    /// The problem list changed
    Catalog(CatalogView),

    /// The mounted problem session changed
    Problem(ProblemView),

    /// The mounted suggestor session changed
    Suggestor(SuggestorView),

    /// The engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Short name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::ViewChanged { .. } => "view_changed",
            EngineEvent::Catalog(_) => "catalog",
            EngineEvent::Problem(_) => "problem",
            EngineEvent::Suggestor(_) => "suggestor",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}

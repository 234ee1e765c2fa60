//! Headless mode - NDJSON event output driven by stdin commands
//!
//! Every state change is written to stdout as one JSON object per line.
//! Each event has an "event" field naming its type and a millisecond
//! "timestamp".
//!
//! # Example Output
//!
//! ```json
//! {"event":"ready","practice_url":"http://localhost:3001","suggestor_url":"http://localhost:3001/suggestor","timestamp":1704700001000}
//! {"event":"view_changed","view":"problem","timestamp":1704700002000}
//! {"event":"problem","data":{"id":"p1","phase":"loading",...},"timestamp":1704700002001}
//! ```

pub mod command;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use sqlbench_app::view::{CatalogView, ProblemView, SuggestorView};
use sqlbench_app::{EngineEvent, View};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Engine started
    Ready {
        practice_url: String,
        suggestor_url: String,
        timestamp: i64,
    },

    ViewChanged { view: View, timestamp: i64 },

    Catalog { data: CatalogView, timestamp: i64 },

    Problem { data: ProblemView, timestamp: i64 },

    Suggestor { data: SuggestorView, timestamp: i64 },

    /// A stdin line that could not be turned into a command
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one object per line, flushed immediately
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn ready(practice_url: &str, suggestor_url: &str) -> Self {
        Self::Ready {
            practice_url: practice_url.to_string(),
            suggestor_url: suggestor_url.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}

impl From<EngineEvent> for HeadlessEvent {
    fn from(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::ViewChanged { view } => Self::ViewChanged { view, timestamp },
            EngineEvent::Catalog(data) => Self::Catalog { data, timestamp },
            EngineEvent::Problem(data) => Self::Problem { data, timestamp },
            EngineEvent::Suggestor(data) => Self::Suggestor { data, timestamp },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbench_app::catalog::CatalogState;

    #[test]
    fn test_ready_serialization() {
        let event = HeadlessEvent::ready("http://a", "http://a/suggestor");
        let json = serde_json::to_string(&event).expect("serialization failed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "ready");
        assert_eq!(value["practice_url"], "http://a");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_engine_event_conversion() {
        let event: HeadlessEvent = EngineEvent::ViewChanged {
            view: View::Suggestor,
        }
        .into();
        let value = serde_json::to_value(&event).expect("serialization failed");
        assert_eq!(value["event"], "view_changed");
        assert_eq!(value["view"], "suggestor");

        let event: HeadlessEvent =
            EngineEvent::Catalog(CatalogView::derive(&CatalogState::default())).into();
        let value = serde_json::to_value(&event).expect("serialization failed");
        assert_eq!(value["event"], "catalog");
        assert_eq!(value["data"]["groups"]["status"], "idle");
    }

    #[test]
    fn test_error_serialization() {
        let event = HeadlessEvent::error("Unknown command: frob", false);
        let value = serde_json::to_value(&event).expect("serialization failed");
        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "Unknown command: frob");
        assert_eq!(value["fatal"], false);
    }
}

//! Application state (Model in TEA pattern)

use serde::Serialize;

use crate::catalog::CatalogState;
use crate::config::Settings;
use crate::request_gate::{EpochCounter, RequestTicket};
use crate::session::{LoadTickets, ProblemSession};
use crate::shortcuts::ShortcutRegistry;
use crate::suggestor::SuggestorSession;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Problem list
    #[default]
    Catalog,

    /// One open practice problem
    Problem,

    /// Movie/actor browser
    Suggestor,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub view: View,

    pub settings: Settings,

    pub catalog: CatalogState,

    /// Mounted only while the problem view is active
    pub problem: Option<ProblemSession>,

    /// Mounted only while the suggestor view is active
    pub suggestor: Option<SuggestorSession>,

    pub shortcuts: ShortcutRegistry,

    pub epochs: EpochCounter,

    quit_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            view: View::Catalog,
            settings,
            catalog: CatalogState::default(),
            problem: None,
            suggestor: None,
            shortcuts: ShortcutRegistry::new(),
            epochs: EpochCounter::default(),
            quit_requested: false,
        }
    }

    /// Open `id`: reuses a mounted problem session (keeping its shortcut
    /// listener) or mounts a new one. The suggestor is unmounted.
    pub fn open_problem(&mut self, id: &str) -> LoadTickets {
        self.suggestor = None;
        self.view = View::Problem;
        let epoch = self.epochs.next();
        match self.problem.as_mut() {
            Some(session) => session.reset_for(id, epoch),
            None => {
                let (session, tickets) = ProblemSession::mount(
                    id,
                    epoch,
                    &self.shortcuts,
                    self.settings.editor.use_starter_query,
                );
                self.problem = Some(session);
                tickets
            }
        }
    }

    /// Mount a fresh suggestor session; returns the genre load ticket.
    /// Any problem session is unmounted, which uninstalls its shortcuts.
    pub fn open_suggestor(&mut self) -> RequestTicket {
        self.problem = None;
        self.view = View::Suggestor;
        let epoch = self.epochs.next();
        let (session, ticket) = SuggestorSession::mount(epoch, self.settings.search.blur_grace());
        self.suggestor = Some(session);
        ticket
    }

    /// Return to the catalog, unmounting both sessions
    pub fn show_catalog(&mut self) {
        self.problem = None;
        self.suggestor = None;
        self.view = View::Catalog;
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reopening_problem_keeps_listener() {
        let mut state = AppState::new();
        let first = state.open_problem("p1");
        let second = state.open_problem("p2");
        assert_eq!(state.shortcuts.len(), 1);
        assert!(second.problem.epoch() > first.problem.epoch());
        assert_eq!(state.problem.as_ref().map(|p| p.id()), Some("p2"));
    }

    #[test]
    fn test_views_are_exclusive() {
        let mut state = AppState::new();
        state.open_problem("p1");
        state.open_suggestor();
        assert!(state.problem.is_none());
        assert!(state.shortcuts.is_empty());
        assert_eq!(state.view, View::Suggestor);

        state.open_problem("p1");
        assert!(state.suggestor.is_none());

        state.show_catalog();
        assert!(state.problem.is_none());
        assert_eq!(state.view, View::Catalog);
    }
}

//! SuggestorSession - actor autocomplete, movie paging and drill-down
//!
//! Composes the three independent controllers with the genre list. The
//! session shares nothing with the problem session and is rebuilt with a
//! fresh epoch on every mount.

pub mod debounced_search;
pub mod detail;
pub mod paginated_browser;

use std::time::Duration;

use tracing::{debug, warn};

use sqlbench_core::ActorSuggestion;

use crate::request_gate::{RequestGate, RequestTicket};

pub use debounced_search::{DebouncedSearch, SearchEffect, Suggestion, MIN_QUERY_LEN, QUIET_PERIOD};
pub use detail::{DetailPanel, DetailTarget, DetailView};
pub use paginated_browser::{MovieFilters, PaginatedBrowser, PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct SuggestorSession {
    epoch: u64,
    genres: Vec<String>,
    genres_gate: RequestGate,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub actor_search: DebouncedSearch<ActorSuggestion>,
    pub browser: PaginatedBrowser,
    pub detail: DetailPanel,
}

impl SuggestorSession {
    /// Mount a fresh session. Returns the ticket for the genre load.
    pub fn mount(epoch: u64, blur_grace: Duration) -> (Self, RequestTicket) {
        let mut session = Self {
            epoch,
            genres: Vec::new(),
            genres_gate: RequestGate::new(epoch),
            genre: None,
            year: None,
            actor_search: DebouncedSearch::new(epoch, blur_grace),
            browser: PaginatedBrowser::new(epoch),
            detail: DetailPanel::new(epoch),
        };
        let ticket = session.genres_gate.issue();
        (session, ticket)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Tolerated: a failed genre load arrives as an empty list.
    pub fn genres_loaded(&mut self, ticket: RequestTicket, genres: Vec<String>) -> bool {
        if !self.genres_gate.is_current(ticket) {
            debug!("Discarding stale genre list");
            return false;
        }
        if genres.is_empty() {
            warn!("No genres available");
        }
        self.genres = genres;
        true
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn set_genre(&mut self, genre: Option<String>) {
        self.genre = genre.filter(|g| !g.trim().is_empty());
    }

    pub fn set_year(&mut self, year: Option<String>) {
        self.year = year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty());
    }

    /// Current filter set: the picked actor's id, else whatever was typed.
    pub fn filters(&self) -> MovieFilters {
        let actor = match self.actor_search.resolved_id() {
            Some(id) => Some(id.to_string()),
            None => Some(self.actor_search.query().trim().to_string()).filter(|q| !q.is_empty()),
        };
        MovieFilters {
            genre: self.genre.clone(),
            actor,
            year: self.year.clone(),
        }
    }
}

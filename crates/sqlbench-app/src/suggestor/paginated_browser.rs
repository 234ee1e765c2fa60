//! PaginatedBrowser - filtered movie search with page-size based paging
//!
//! The backend never reports a total count, so "has more" is inferred from
//! the last page coming back full.

use serde::Serialize;
use tracing::{debug, warn};

use sqlbench_api::MovieQuery;
use sqlbench_core::prelude::*;
use sqlbench_core::MovieSummary;

use crate::request_gate::{RequestGate, RequestTicket};

pub const PAGE_SIZE: usize = 7;

/// Filters as edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieFilters {
    pub genre: Option<String>,
    /// Resolved actor id, or the raw actor text when nothing was picked
    pub actor: Option<String>,
    pub year: Option<String>,
}

impl MovieFilters {
    /// A non-empty year must be all ASCII digits
    pub fn validate(&self) -> Result<()> {
        match self.year.as_deref().map(str::trim) {
            Some(year) if !year.is_empty() && !year.chars().all(|c| c.is_ascii_digit()) => Err(
                Error::validation(format!("Year must be a number, got '{}'", year)),
            ),
            _ => Ok(()),
        }
    }

    fn to_query(&self, page: usize) -> MovieQuery {
        MovieQuery {
            genre: self.genre.clone(),
            actor_id: self.actor.clone(),
            year: self.year.clone(),
            limit: PAGE_SIZE,
            offset: (page - 1) * PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedBrowser {
    /// Filters of the last search; paging reuses them
    applied: MovieFilters,
    page: usize,
    items: Vec<MovieSummary>,
    has_more: bool,
    loading: bool,
    searched: bool,
    error: Option<String>,
    gate: RequestGate,
}

impl PaginatedBrowser {
    pub fn new(epoch: u64) -> Self {
        Self {
            applied: MovieFilters::default(),
            page: 1,
            items: Vec::new(),
            has_more: false,
            loading: false,
            searched: false,
            error: None,
            gate: RequestGate::new(epoch),
        }
    }

    /// Start a new search at page 1 with `filters`.
    ///
    /// A validation failure is stored inline and no request is issued. The
    /// refused search still supersedes any page request in flight.
    pub fn search(&mut self, filters: MovieFilters) -> Option<(RequestTicket, MovieQuery)> {
        if let Err(e) = filters.validate() {
            self.gate.invalidate();
            self.loading = false;
            self.error = Some(e.to_string());
            return None;
        }
        self.applied = filters;
        self.searched = true;
        Some(self.request(1))
    }

    /// Disabled unless the last fetched page came back full
    pub fn next_page(&mut self) -> Option<(RequestTicket, MovieQuery)> {
        if !self.has_more {
            return None;
        }
        Some(self.request(self.page + 1))
    }

    /// Clamped: a no-op on page 1
    pub fn previous_page(&mut self) -> Option<(RequestTicket, MovieQuery)> {
        if !self.searched || self.page <= 1 {
            return None;
        }
        Some(self.request(self.page - 1))
    }

    fn request(&mut self, page: usize) -> (RequestTicket, MovieQuery) {
        self.page = page.max(1);
        self.loading = true;
        self.has_more = false;
        self.error = None;
        debug!("Requesting movie page {}", self.page);
        (self.gate.issue(), self.applied.to_query(self.page))
    }

    /// Apply a page response. Returns false for a superseded request.
    pub fn page_loaded(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<Vec<MovieSummary>, String>,
    ) -> bool {
        if !self.gate.is_current(ticket) {
            debug!("Discarding stale movie page {:?}", ticket);
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.has_more = items.len() >= PAGE_SIZE;
                self.items = items;
            }
            Err(message) => {
                warn!("Movie search failed: {}", message);
                self.items.clear();
                self.has_more = false;
                self.error = Some(message);
            }
        }
        true
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn can_go_back(&self) -> bool {
        self.searched && self.page > 1
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn applied_filters(&self) -> &MovieFilters {
        &self.applied
    }
}

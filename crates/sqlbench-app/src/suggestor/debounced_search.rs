//! DebouncedSearch - rate-limited, latest-wins autocomplete
//!
//! Generic over the suggestion type. The controller never sleeps or fetches
//! itself: each operation returns a [`SearchEffect`] describing the timer the
//! caller must arm, and timer/fetch completions come back with the ticket
//! they were issued so superseded ones can be ignored.

use std::time::Duration;

use tracing::{debug, warn};

use sqlbench_core::ActorSuggestion;

use crate::request_gate::{RequestGate, RequestTicket};

/// Quiet period after the last edit before a lookup is issued
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Queries shorter than this (in characters, trimmed) never reach the backend
pub const MIN_QUERY_LEN: usize = 2;

/// Something that can be offered in a suggestion list
pub trait Suggestion: Clone {
    /// Identifier stored once the suggestion is picked
    fn id(&self) -> &str;

    /// Text that replaces the query when picked
    fn display_name(&self) -> &str;
}

impl Suggestion for ActorSuggestion {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Timer the caller must arm after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEffect {
    None,
    /// Post a lookup-due message carrying `ticket` after `delay`
    ScheduleLookup {
        ticket: RequestTicket,
        delay: Duration,
    },
    /// Post a close message carrying `ticket` after `delay`
    ScheduleClose {
        ticket: RequestTicket,
        delay: Duration,
    },
}

#[derive(Debug, Clone)]
pub struct DebouncedSearch<S> {
    query: String,
    resolved_id: Option<String>,
    suggestions: Vec<S>,
    open: bool,
    focused: bool,
    error: Option<String>,
    blur_grace: Duration,
    quiet: RequestGate,
    lookup: RequestGate,
    blur: RequestGate,
}

impl<S: Suggestion> DebouncedSearch<S> {
    pub fn new(epoch: u64, blur_grace: Duration) -> Self {
        Self {
            query: String::new(),
            resolved_id: None,
            suggestions: Vec::new(),
            open: false,
            focused: false,
            error: None,
            blur_grace,
            quiet: RequestGate::new(epoch),
            lookup: RequestGate::new(epoch),
            blur: RequestGate::new(epoch),
        }
    }

    /// The user edited the query text.
    ///
    /// Typing implies focus and drops any previously resolved id. Any lookup
    /// still in flight belongs to the old text and is superseded. A query
    /// below the minimum length also cancels the pending timer and clears
    /// the list immediately.
    pub fn input(&mut self, text: impl Into<String>) -> SearchEffect {
        self.query = text.into();
        self.resolved_id = None;
        self.focused = true;
        self.blur.invalidate();
        self.lookup.invalidate();

        if self.query.trim().chars().count() < MIN_QUERY_LEN {
            self.quiet.invalidate();
            self.suggestions.clear();
            self.open = false;
            self.error = None;
            return SearchEffect::None;
        }

        SearchEffect::ScheduleLookup {
            ticket: self.quiet.issue(),
            delay: QUIET_PERIOD,
        }
    }

    /// The quiet period for `ticket` elapsed. Returns the lookup to issue,
    /// or `None` if another edit happened since.
    pub fn lookup_due(&mut self, ticket: RequestTicket) -> Option<(RequestTicket, String)> {
        if !self.quiet.is_current(ticket) {
            return None;
        }
        self.quiet.invalidate();
        let query = self.query.trim().to_string();
        debug!("Issuing lookup for '{}'", query);
        Some((self.lookup.issue(), query))
    }

    /// Apply a lookup response. Returns false for a superseded lookup.
    pub fn suggestions_loaded(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<Vec<S>, String>,
    ) -> bool {
        if !self.lookup.is_current(ticket) {
            debug!("Discarding stale suggestions {:?}", ticket);
            return false;
        }
        match result {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                self.error = None;
            }
            Err(message) => {
                warn!("Suggestion lookup failed: {}", message);
                self.suggestions.clear();
                self.error = Some(message);
            }
        }
        self.open = self.focused && !self.suggestions.is_empty();
        true
    }

    /// Pick the suggestion at `index`
    pub fn select(&mut self, index: usize) -> Option<S> {
        let picked = self.suggestions.get(index)?.clone();
        self.query = picked.display_name().to_string();
        self.resolved_id = Some(picked.id().to_string());
        self.open = false;
        self.quiet.invalidate();
        self.lookup.invalidate();
        self.blur.invalidate();
        Some(picked)
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.blur.invalidate();
        self.open = !self.suggestions.is_empty();
    }

    /// Losing focus closes the list only after the grace delay, so a
    /// pointer-driven pick can still land.
    pub fn blur(&mut self) -> SearchEffect {
        self.focused = false;
        SearchEffect::ScheduleClose {
            ticket: self.blur.issue(),
            delay: self.blur_grace,
        }
    }

    pub fn blur_elapsed(&mut self, ticket: RequestTicket) -> bool {
        if !self.blur.is_current(ticket) {
            return false;
        }
        self.open = false;
        true
    }

    /// Drop everything and move to a new epoch
    pub fn reset(&mut self, epoch: u64) {
        let blur_grace = self.blur_grace;
        *self = Self::new(epoch, blur_grace);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn resolved_id(&self) -> Option<&str> {
        self.resolved_id.as_deref()
    }

    pub fn suggestions(&self) -> &[S] {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str, name: &str) -> ActorSuggestion {
        ActorSuggestion {
            id: id.to_string(),
            name: name.to_string(),
            birth_year: None,
        }
    }

    fn search() -> DebouncedSearch<ActorSuggestion> {
        DebouncedSearch::new(1, Duration::from_millis(150))
    }

    fn scheduled(effect: SearchEffect) -> RequestTicket {
        match effect {
            SearchEffect::ScheduleLookup { ticket, delay } => {
                assert_eq!(delay, QUIET_PERIOD);
                ticket
            }
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    /// Type `text` and let its quiet period elapse; returns the lookup ticket
    fn fire(s: &mut DebouncedSearch<ActorSuggestion>, text: &str) -> RequestTicket {
        let quiet = scheduled(s.input(text));
        s.lookup_due(quiet).unwrap().0
    }

    #[test]
    fn test_only_last_keystroke_issues_lookup() {
        let mut s = search();
        let t1 = scheduled(s.input("To"));
        let t2 = scheduled(s.input("Tom"));

        assert!(s.lookup_due(t1).is_none());
        let (_, query) = s.lookup_due(t2).unwrap();
        assert_eq!(query, "Tom");
        // A timer fires at most once
        assert!(s.lookup_due(t2).is_none());
    }

    #[test]
    fn test_short_query_clears_and_cancels() {
        let mut s = search();
        let t = scheduled(s.input("Tom"));
        let (lookup, _) = s.lookup_due(t).unwrap();
        assert!(s.suggestions_loaded(lookup, Ok(vec![actor("nm1", "Tom Hanks")])));
        assert!(s.is_open());

        let t2 = scheduled(s.input("Tom H"));
        assert_eq!(s.input("T"), SearchEffect::None);
        assert!(s.suggestions().is_empty());
        assert!(!s.is_open());
        // Neither the pending timer nor a late response may repopulate
        assert!(s.lookup_due(t2).is_none());
        assert!(!s.suggestions_loaded(lookup, Ok(vec![actor("nm1", "Tom Hanks")])));
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut s = search();
        let old = fire(&mut s, "Tom");
        let new = fire(&mut s, "Tom Cr");

        assert!(s.suggestions_loaded(new, Ok(vec![actor("nm2", "Tom Cruise")])));
        assert!(!s.suggestions_loaded(old, Ok(vec![actor("nm1", "Tom Hanks")])));
        assert_eq!(s.suggestions()[0].name, "Tom Cruise");
    }

    #[test]
    fn test_response_landing_during_next_quiet_period_is_discarded() {
        let mut s = search();
        let old = fire(&mut s, "Tom");
        let quiet = scheduled(s.input("Tom Han"));

        assert!(!s.suggestions_loaded(old, Ok(vec![actor("nm3", "Tom Selleck")])));
        assert!(s.suggestions().is_empty());
        assert!(!s.is_open());

        let (lookup, query) = s.lookup_due(quiet).unwrap();
        assert_eq!(query, "Tom Han");
        assert!(s.suggestions_loaded(lookup, Ok(vec![actor("nm1", "Tom Hanks")])));
        assert_eq!(s.suggestions()[0].name, "Tom Hanks");
    }

    #[test]
    fn test_select_resolves_and_closes() {
        let mut s = search();
        let t = fire(&mut s, "tom");
        s.suggestions_loaded(t, Ok(vec![actor("nm1", "Tom Hanks"), actor("nm2", "Tom Cruise")]));

        let picked = s.select(1).unwrap();
        assert_eq!(picked.id, "nm2");
        assert_eq!(s.query(), "Tom Cruise");
        assert_eq!(s.resolved_id(), Some("nm2"));
        assert!(!s.is_open());
        assert!(s.select(9).is_none());
    }

    #[test]
    fn test_editing_drops_resolved_id() {
        let mut s = search();
        let t = fire(&mut s, "tom");
        s.suggestions_loaded(t, Ok(vec![actor("nm1", "Tom Hanks")]));
        s.select(0);
        s.input("Tom Hank");
        assert_eq!(s.resolved_id(), None);
    }

    #[test]
    fn test_blur_closes_after_grace_unless_refocused() {
        let mut s = search();
        let t = fire(&mut s, "tom");
        s.suggestions_loaded(t, Ok(vec![actor("nm1", "Tom Hanks")]));

        let SearchEffect::ScheduleClose { ticket, delay } = s.blur() else {
            panic!("expected close timer");
        };
        assert_eq!(delay, Duration::from_millis(150));
        // Still open during the grace period
        assert!(s.is_open());
        s.focus();
        assert!(!s.blur_elapsed(ticket));
        assert!(s.is_open());

        let SearchEffect::ScheduleClose { ticket, .. } = s.blur() else {
            panic!("expected close timer");
        };
        assert!(s.blur_elapsed(ticket));
        assert!(!s.is_open());

        s.focus();
        assert!(s.is_open());
    }

    #[test]
    fn test_focus_with_no_suggestions_stays_closed() {
        let mut s = search();
        s.focus();
        assert!(!s.is_open());
    }

    #[test]
    fn test_lookup_error_is_kept_inline() {
        let mut s = search();
        let t = fire(&mut s, "tom");
        s.suggestions_loaded(t, Err("Request failed: 502".to_string()));
        assert_eq!(s.error(), Some("Request failed: 502"));
        assert!(!s.is_open());
    }
}

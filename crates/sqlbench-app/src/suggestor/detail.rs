//! Movie/actor drill-down panel
//!
//! One panel, one gate: opening either view supersedes the other, so at most
//! one detail is ever shown and a late response for the previous target
//! cannot replace the current one.

use serde::Serialize;
use tracing::{debug, warn};

use sqlbench_core::{ActorDetail, MovieDetail};

use crate::request_gate::{RequestGate, RequestTicket};

/// What the panel is showing or loading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DetailTarget {
    Movie { id: String },
    Actor { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "lowercase")]
pub enum DetailView {
    Movie(MovieDetail),
    Actor(ActorDetail),
}

#[derive(Debug, Clone)]
pub struct DetailPanel {
    gate: RequestGate,
    target: Option<DetailTarget>,
    view: Option<DetailView>,
    error: Option<String>,
}

impl DetailPanel {
    pub fn new(epoch: u64) -> Self {
        Self {
            gate: RequestGate::new(epoch),
            target: None,
            view: None,
            error: None,
        }
    }

    pub fn open_movie(&mut self, id: impl Into<String>) -> RequestTicket {
        self.open(DetailTarget::Movie { id: id.into() })
    }

    pub fn open_actor(&mut self, id: impl Into<String>) -> RequestTicket {
        self.open(DetailTarget::Actor { id: id.into() })
    }

    fn open(&mut self, target: DetailTarget) -> RequestTicket {
        debug!("Opening detail {:?}", target);
        self.target = Some(target);
        self.view = None;
        self.error = None;
        self.gate.issue()
    }

    pub fn movie_loaded(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<MovieDetail, String>,
    ) -> bool {
        self.apply(ticket, result.map(DetailView::Movie))
    }

    pub fn actor_loaded(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<ActorDetail, String>,
    ) -> bool {
        self.apply(ticket, result.map(DetailView::Actor))
    }

    fn apply(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<DetailView, String>,
    ) -> bool {
        if !self.gate.is_current(ticket) {
            debug!("Discarding stale detail {:?}", ticket);
            return false;
        }
        match result {
            Ok(view) => self.view = Some(view),
            Err(message) => {
                warn!("Detail fetch failed: {}", message);
                self.error = Some(message);
            }
        }
        true
    }

    pub fn close(&mut self) {
        self.gate.invalidate();
        self.target = None;
        self.view = None;
        self.error = None;
    }

    pub fn target(&self) -> Option<&DetailTarget> {
        self.target.as_ref()
    }

    pub fn view(&self) -> Option<&DetailView> {
        self.view.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.target.is_some() && self.view.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbench_core::{CastMember, MovieSummary};

    fn movie(id: &str) -> MovieDetail {
        MovieDetail {
            summary: MovieSummary {
                id: id.to_string(),
                title: "Heat".to_string(),
                year: Some(1995),
                genres: None,
                rating: None,
                votes: None,
            },
            actors: vec![CastMember {
                id: "nm0000199".to_string(),
                name: "Al Pacino".to_string(),
                category: "actor".to_string(),
            }],
        }
    }

    fn actor(id: &str) -> ActorDetail {
        ActorDetail {
            id: id.to_string(),
            name: "Al Pacino".to_string(),
            birth_year: Some(1940),
            top_films: vec![],
        }
    }

    #[test]
    fn test_opening_actor_closes_movie() {
        let mut panel = DetailPanel::new(1);
        let t = panel.open_movie("tt0113277");
        panel.movie_loaded(t, Ok(movie("tt0113277")));
        assert!(matches!(panel.view(), Some(DetailView::Movie(_))));

        let t = panel.open_actor("nm0000199");
        assert!(panel.view().is_none());
        assert!(panel.is_loading());
        panel.actor_loaded(t, Ok(actor("nm0000199")));
        assert!(matches!(panel.view(), Some(DetailView::Actor(_))));
    }

    #[test]
    fn test_late_movie_cannot_replace_actor() {
        let mut panel = DetailPanel::new(1);
        let movie_ticket = panel.open_movie("tt1");
        let actor_ticket = panel.open_actor("nm1");

        assert!(panel.actor_loaded(actor_ticket, Ok(actor("nm1"))));
        assert!(!panel.movie_loaded(movie_ticket, Ok(movie("tt1"))));
        assert!(matches!(panel.view(), Some(DetailView::Actor(_))));
    }

    #[test]
    fn test_close_discards_in_flight() {
        let mut panel = DetailPanel::new(1);
        let t = panel.open_movie("tt1");
        panel.close();
        assert!(!panel.movie_loaded(t, Ok(movie("tt1"))));
        assert!(panel.target().is_none());
        assert!(panel.view().is_none());
    }

    #[test]
    fn test_error_stays_inline() {
        let mut panel = DetailPanel::new(1);
        let t = panel.open_actor("nm404");
        panel.actor_loaded(t, Err("Request failed: 404".to_string()));
        assert_eq!(panel.error(), Some("Request failed: 404"));
        assert!(!panel.is_loading());
    }
}

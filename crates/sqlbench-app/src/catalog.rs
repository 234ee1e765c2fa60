//! Problem catalog state

use tracing::{debug, warn};

use sqlbench_core::{group_by_difficulty, DifficultyGroup, Problem};

use crate::request_gate::{RequestGate, RequestTicket};
use crate::session::SlotState;

/// The problem list, grouped for display
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    gate: RequestGate,
    pub state: SlotState<Vec<DifficultyGroup>>,
}

impl CatalogState {
    pub fn begin(&mut self) -> RequestTicket {
        self.state = SlotState::Pending;
        self.gate.issue()
    }

    pub fn loaded(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<Vec<Problem>, String>,
    ) -> bool {
        if !self.gate.is_current(ticket) {
            debug!("Discarding stale catalog response");
            return false;
        }
        self.state = match result {
            Ok(problems) => SlotState::Done {
                value: group_by_difficulty(&problems),
            },
            Err(message) => {
                warn!("Failed to load problems: {}", message);
                SlotState::Failed { message }
            }
        };
        true
    }

    pub fn problem_count(&self) -> usize {
        match &self.state {
            SlotState::Done { value } => value.iter().map(|g| g.problems.len()).sum(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbench_core::Difficulty;

    fn problem(id: &str, difficulty: Difficulty) -> Problem {
        Problem {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            difficulty,
            tables: vec![],
            starter_sql: None,
        }
    }

    #[test]
    fn test_loaded_groups_problems() {
        let mut catalog = CatalogState::default();
        let ticket = catalog.begin();
        assert!(catalog.loaded(
            ticket,
            Ok(vec![
                problem("h", Difficulty::Hard),
                problem("e", Difficulty::Easy)
            ])
        ));
        assert_eq!(catalog.problem_count(), 2);
        let SlotState::Done { value } = &catalog.state else {
            panic!("expected groups");
        };
        assert_eq!(value[0].problems[0].id, "e");
    }

    #[test]
    fn test_reload_supersedes_previous() {
        let mut catalog = CatalogState::default();
        let first = catalog.begin();
        let second = catalog.begin();
        assert!(!catalog.loaded(first, Ok(vec![])));
        assert!(catalog.loaded(second, Err("Request failed: 500".to_string())));
        assert!(matches!(catalog.state, SlotState::Failed { .. }));
    }
}

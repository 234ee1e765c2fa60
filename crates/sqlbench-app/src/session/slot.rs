//! Per-action transient result slot

use serde::Serialize;
use tracing::debug;

use crate::request_gate::{RequestGate, RequestTicket};

/// Lifecycle of one action's result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SlotState<T> {
    #[default]
    Idle,
    Pending,
    Done {
        value: T,
    },
    Failed {
        message: String,
    },
}

impl<T> SlotState<T> {
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> SlotState<U> {
        match self {
            SlotState::Idle => SlotState::Idle,
            SlotState::Pending => SlotState::Pending,
            SlotState::Done { value } => SlotState::Done { value: f(value) },
            SlotState::Failed { message } => SlotState::Failed {
                message: message.clone(),
            },
        }
    }
}

/// Result slot for a re-triggerable action (run, grade, hint, solution).
///
/// Starting the action clears only this slot and supersedes any request
/// still in flight for it; sibling slots are never touched.
#[derive(Debug, Clone, Default)]
pub struct ActionSlot<T> {
    gate: RequestGate,
    state: SlotState<T>,
}

impl<T> ActionSlot<T> {
    pub fn new(epoch: u64) -> Self {
        Self {
            gate: RequestGate::new(epoch),
            state: SlotState::Idle,
        }
    }

    /// Clear the previous result and issue a ticket for a new request
    pub fn begin(&mut self) -> RequestTicket {
        self.state = SlotState::Pending;
        self.gate.issue()
    }

    /// Refuse the action locally; no request is issued
    pub fn reject(&mut self, message: impl Into<String>) {
        self.gate.invalidate();
        self.state = SlotState::Failed {
            message: message.into(),
        };
    }

    /// Apply a completion. Returns false (and changes nothing) for a stale ticket.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<T, String>,
    ) -> bool {
        if !self.gate.is_current(ticket) {
            debug!("Discarding stale response {:?}", ticket);
            return false;
        }
        self.state = match result {
            Ok(value) => SlotState::Done { value },
            Err(message) => SlotState::Failed { message },
        };
        true
    }

    /// Drop everything and move to a new epoch
    pub fn reset(&mut self, epoch: u64) {
        self.gate.reset(epoch);
        self.state = SlotState::Idle;
    }

    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            SlotState::Done { value } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SlotState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_previous_value() {
        let mut slot = ActionSlot::new(1);
        let t = slot.begin();
        assert!(slot.complete(t, Ok(1)));
        assert_eq!(slot.value(), Some(&1));

        slot.begin();
        assert!(slot.is_pending());
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn test_last_issued_wins_regardless_of_arrival() {
        let mut slot = ActionSlot::new(1);
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.complete(second, Ok("second")));
        assert!(!slot.complete(first, Ok("first")));
        assert_eq!(slot.value(), Some(&"second"));
    }

    #[test]
    fn test_reject_supersedes_in_flight() {
        let mut slot: ActionSlot<u32> = ActionSlot::new(1);
        let t = slot.begin();
        slot.reject("empty");
        assert!(!slot.complete(t, Ok(5)));
        assert_eq!(slot.error(), Some("empty"));
    }

    #[test]
    fn test_reset_drops_result_and_tickets() {
        let mut slot = ActionSlot::new(1);
        let t = slot.begin();
        slot.reset(2);
        assert!(!slot.complete(t, Err::<u32, _>("late".to_string())));
        assert_eq!(*slot.state(), SlotState::Idle);
    }

    #[test]
    fn test_state_serializes_with_status_tag() {
        let state: SlotState<u32> = SlotState::Failed {
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, serde_json::json!({"status": "failed", "message": "boom"}));
    }
}

//! Practice problem session and its per-action result slots

pub mod problem;
pub mod slot;

pub use problem::{
    HintState, HintToggle, LoadTickets, ProblemPhase, ProblemSession, EMPTY_GRADE_MESSAGE,
    EMPTY_RUN_MESSAGE,
};
pub use slot::{ActionSlot, SlotState};

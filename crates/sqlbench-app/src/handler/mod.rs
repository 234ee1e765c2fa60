//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `problem`: Problem session handlers
//! - `suggestor`: Suggestor session handlers
//! - `keys`: Keyboard accelerator routing

pub(crate) mod keys;
pub(crate) mod problem;
pub(crate) mod suggestor;
pub(crate) mod update;


use std::time::Duration;

use sqlbench_api::MovieQuery;

use crate::message::Message;
use crate::request_gate::RequestTicket;
use crate::session::LoadTickets;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update.
///
/// Every network action carries the ticket its completion message must echo.
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Fetch the problem list
    LoadCatalog { ticket: RequestTicket },

    /// Fetch a problem, then its next-id and schema once it resolves
    LoadProblem { id: String, tickets: LoadTickets },

    RunQuery { ticket: RequestTicket, sql: String },

    GradeQuery {
        ticket: RequestTicket,
        problem_id: String,
        sql: String,
    },

    FetchHint {
        ticket: RequestTicket,
        problem_id: String,
    },

    FetchSolution {
        ticket: RequestTicket,
        problem_id: String,
    },

    LoadGenres { ticket: RequestTicket },

    /// Post `ActorLookupDue` after the quiet period
    ScheduleActorLookup {
        ticket: RequestTicket,
        delay: Duration,
    },

    SearchActors {
        ticket: RequestTicket,
        name: String,
        limit: usize,
    },

    /// Post `ActorBlurElapsed` after the blur grace delay
    ScheduleSuggestionClose {
        ticket: RequestTicket,
        delay: Duration,
    },

    FetchMovies {
        ticket: RequestTicket,
        query: MovieQuery,
    },

    FetchMovie { ticket: RequestTicket, id: String },

    FetchActor { ticket: RequestTicket, id: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}

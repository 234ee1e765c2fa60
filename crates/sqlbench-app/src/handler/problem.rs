//! Problem session handlers
//!
//! Everything except opening requires a mounted session; draft edits and
//! actions additionally require it to be Ready.

use tracing::debug;

use sqlbench_core::Problem;

use crate::message::{Fetched, Message};
use crate::request_gate::RequestTicket;
use crate::session::{HintToggle, ProblemSession};
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

fn ready_session(state: &mut AppState) -> Option<&mut ProblemSession> {
    state.problem.as_mut().filter(|session| session.is_ready())
}

/// Open (or switch to) a problem id
pub fn handle_open(state: &mut AppState, id: String) -> UpdateResult {
    let id = id.trim().to_string();
    if id.is_empty() {
        debug!("Ignoring open request with empty problem id");
        return UpdateResult::none();
    }
    let tickets = state.open_problem(&id);
    UpdateResult::action(UpdateAction::LoadProblem { id, tickets })
}

pub fn handle_problem_loaded(
    state: &mut AppState,
    ticket: RequestTicket,
    result: Fetched<Problem>,
) -> UpdateResult {
    match state.problem.as_mut() {
        Some(session) => {
            session.problem_loaded(ticket, result);
        }
        None => debug!("Problem response arrived after unmount"),
    }
    UpdateResult::none()
}

pub fn handle_edit_draft(state: &mut AppState, text: String) -> UpdateResult {
    if let Some(session) = ready_session(state) {
        session.set_draft(text);
    }
    UpdateResult::none()
}

pub fn handle_format_draft(state: &mut AppState) -> UpdateResult {
    if let Some(session) = ready_session(state) {
        session.format_draft();
    }
    UpdateResult::none()
}

pub fn handle_run(state: &mut AppState) -> UpdateResult {
    let Some(session) = ready_session(state) else {
        return UpdateResult::none();
    };
    match session.start_run() {
        Some((ticket, sql)) => UpdateResult::action(UpdateAction::RunQuery { ticket, sql }),
        None => UpdateResult::none(),
    }
}

pub fn handle_grade(state: &mut AppState) -> UpdateResult {
    let Some(session) = ready_session(state) else {
        return UpdateResult::none();
    };
    match session.start_grade() {
        Some((ticket, sql)) => UpdateResult::action(UpdateAction::GradeQuery {
            ticket,
            problem_id: session.id().to_string(),
            sql,
        }),
        None => UpdateResult::none(),
    }
}

pub fn handle_toggle_hint(state: &mut AppState) -> UpdateResult {
    let Some(session) = ready_session(state) else {
        return UpdateResult::none();
    };
    match session.toggle_hint() {
        HintToggle::Fetch(ticket) => UpdateResult::action(UpdateAction::FetchHint {
            ticket,
            problem_id: session.id().to_string(),
        }),
        HintToggle::Toggled | HintToggle::AlreadyLoading => UpdateResult::none(),
    }
}

pub fn handle_show_solution(state: &mut AppState) -> UpdateResult {
    let Some(session) = ready_session(state) else {
        return UpdateResult::none();
    };
    let ticket = session.start_solution();
    UpdateResult::action(UpdateAction::FetchSolution {
        ticket,
        problem_id: session.id().to_string(),
    })
}

/// Follow the next-problem pointer; disabled while it is unknown
pub fn handle_next_problem(state: &mut AppState) -> UpdateResult {
    match ready_session(state).and_then(|session| session.next_id.clone()) {
        Some(id) => UpdateResult::message(Message::OpenProblem { id }),
        None => UpdateResult::none(),
    }
}

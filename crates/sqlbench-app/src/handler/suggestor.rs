//! Suggestor session handlers

use crate::request_gate::RequestTicket;
use crate::state::AppState;
use crate::suggestor::SearchEffect;

use super::{UpdateAction, UpdateResult};

/// Turn a search controller effect into the timer action that realizes it
fn schedule(effect: SearchEffect) -> UpdateResult {
    match effect {
        SearchEffect::None => UpdateResult::none(),
        SearchEffect::ScheduleLookup { ticket, delay } => {
            UpdateResult::action(UpdateAction::ScheduleActorLookup { ticket, delay })
        }
        SearchEffect::ScheduleClose { ticket, delay } => {
            UpdateResult::action(UpdateAction::ScheduleSuggestionClose { ticket, delay })
        }
    }
}

pub fn handle_actor_input(state: &mut AppState, text: String) -> UpdateResult {
    match state.suggestor.as_mut() {
        Some(session) => schedule(session.actor_search.input(text)),
        None => UpdateResult::none(),
    }
}

pub fn handle_lookup_due(state: &mut AppState, ticket: RequestTicket) -> UpdateResult {
    let limit = state.settings.search.actor_limit;
    let Some(session) = state.suggestor.as_mut() else {
        return UpdateResult::none();
    };
    match session.actor_search.lookup_due(ticket) {
        Some((ticket, name)) => {
            UpdateResult::action(UpdateAction::SearchActors { ticket, name, limit })
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_actor_blur(state: &mut AppState) -> UpdateResult {
    match state.suggestor.as_mut() {
        Some(session) => schedule(session.actor_search.blur()),
        None => UpdateResult::none(),
    }
}

pub fn handle_select_actor(state: &mut AppState, index: usize) -> UpdateResult {
    if let Some(session) = state.suggestor.as_mut() {
        session.actor_search.select(index);
    }
    UpdateResult::none()
}

pub fn handle_search(state: &mut AppState) -> UpdateResult {
    let Some(session) = state.suggestor.as_mut() else {
        return UpdateResult::none();
    };
    let filters = session.filters();
    match session.browser.search(filters) {
        Some((ticket, query)) => UpdateResult::action(UpdateAction::FetchMovies { ticket, query }),
        None => UpdateResult::none(),
    }
}

pub fn handle_next_page(state: &mut AppState) -> UpdateResult {
    match state
        .suggestor
        .as_mut()
        .and_then(|session| session.browser.next_page())
    {
        Some((ticket, query)) => UpdateResult::action(UpdateAction::FetchMovies { ticket, query }),
        None => UpdateResult::none(),
    }
}

pub fn handle_previous_page(state: &mut AppState) -> UpdateResult {
    match state
        .suggestor
        .as_mut()
        .and_then(|session| session.browser.previous_page())
    {
        Some((ticket, query)) => UpdateResult::action(UpdateAction::FetchMovies { ticket, query }),
        None => UpdateResult::none(),
    }
}

pub fn handle_open_movie(state: &mut AppState, id: String) -> UpdateResult {
    match state.suggestor.as_mut() {
        Some(session) => {
            let ticket = session.detail.open_movie(id.clone());
            UpdateResult::action(UpdateAction::FetchMovie { ticket, id })
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_open_actor(state: &mut AppState, id: String) -> UpdateResult {
    match state.suggestor.as_mut() {
        Some(session) => {
            let ticket = session.detail.open_actor(id.clone());
            UpdateResult::action(UpdateAction::FetchActor { ticket, id })
        }
        None => UpdateResult::none(),
    }
}

//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in:
//! - `problem`: practice problem session
//! - `suggestor`: actor search, movie paging and detail drill-down

use tracing::info;

use crate::message::Message;
use crate::state::AppState;

use super::{keys::handle_key, problem, suggestor, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            info!("Quit requested");
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Catalog Messages
        // ─────────────────────────────────────────────────────────
        Message::LoadCatalog => {
            let ticket = state.catalog.begin();
            UpdateResult::action(UpdateAction::LoadCatalog { ticket })
        }

        Message::CatalogLoaded { ticket, result } => {
            state.catalog.loaded(ticket, result);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Problem Session Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenProblem { id } => problem::handle_open(state, id),
        Message::CloseProblem => {
            if state.problem.is_some() {
                state.show_catalog();
            }
            UpdateResult::none()
        }
        Message::ProblemLoaded { ticket, result } => {
            problem::handle_problem_loaded(state, ticket, result)
        }
        Message::NextProblemIdLoaded { ticket, next_id } => {
            if let Some(session) = state.problem.as_mut() {
                session.next_id_loaded(ticket, next_id);
            }
            UpdateResult::none()
        }
        Message::SchemaLoaded { ticket, schema } => {
            if let Some(session) = state.problem.as_mut() {
                session.schema_loaded(ticket, schema);
            }
            UpdateResult::none()
        }
        Message::EditDraft { text } => problem::handle_edit_draft(state, text),
        Message::FormatDraft => problem::handle_format_draft(state),
        Message::RunQuery => problem::handle_run(state),
        Message::QueryFinished { ticket, result } => {
            if let Some(session) = state.problem.as_mut() {
                session.run.complete(ticket, result);
            }
            UpdateResult::none()
        }
        Message::GradeQuery => problem::handle_grade(state),
        Message::GradeFinished { ticket, result } => {
            if let Some(session) = state.problem.as_mut() {
                session.grade.complete(ticket, result);
            }
            UpdateResult::none()
        }
        Message::ToggleHint => problem::handle_toggle_hint(state),
        Message::HintLoaded { ticket, result } => {
            if let Some(session) = state.problem.as_mut() {
                session.hint.slot.complete(ticket, result);
            }
            UpdateResult::none()
        }
        Message::ShowSolution => problem::handle_show_solution(state),
        Message::SolutionLoaded { ticket, result } => {
            if let Some(session) = state.problem.as_mut() {
                session.solution.complete(ticket, result);
            }
            UpdateResult::none()
        }
        Message::NextProblem => problem::handle_next_problem(state),

        // ─────────────────────────────────────────────────────────
        // Suggestor Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenSuggestor => {
            let ticket = state.open_suggestor();
            UpdateResult::action(UpdateAction::LoadGenres { ticket })
        }
        Message::CloseSuggestor => {
            if state.suggestor.is_some() {
                state.show_catalog();
            }
            UpdateResult::none()
        }
        Message::GenresLoaded { ticket, genres } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.genres_loaded(ticket, genres);
            }
            UpdateResult::none()
        }
        Message::ActorInput { text } => suggestor::handle_actor_input(state, text),
        Message::ActorLookupDue { ticket } => suggestor::handle_lookup_due(state, ticket),
        Message::ActorSuggestionsLoaded { ticket, result } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.actor_search.suggestions_loaded(ticket, result);
            }
            UpdateResult::none()
        }
        Message::ActorFocus => {
            if let Some(session) = state.suggestor.as_mut() {
                session.actor_search.focus();
            }
            UpdateResult::none()
        }
        Message::ActorBlur => suggestor::handle_actor_blur(state),
        Message::ActorBlurElapsed { ticket } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.actor_search.blur_elapsed(ticket);
            }
            UpdateResult::none()
        }
        Message::SelectActorSuggestion { index } => suggestor::handle_select_actor(state, index),
        Message::SetGenre { genre } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.set_genre(genre);
            }
            UpdateResult::none()
        }
        Message::SetYear { year } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.set_year(year);
            }
            UpdateResult::none()
        }
        Message::SearchMovies => suggestor::handle_search(state),
        Message::NextPage => suggestor::handle_next_page(state),
        Message::PreviousPage => suggestor::handle_previous_page(state),
        Message::MoviesLoaded { ticket, result } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.browser.page_loaded(ticket, result);
            }
            UpdateResult::none()
        }
        Message::OpenMovie { id } => suggestor::handle_open_movie(state, id),
        Message::OpenActor { id } => suggestor::handle_open_actor(state, id),
        Message::MovieLoaded { ticket, result } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.detail.movie_loaded(ticket, result);
            }
            UpdateResult::none()
        }
        Message::ActorLoaded { ticket, result } => {
            if let Some(session) = state.suggestor.as_mut() {
                session.detail.actor_loaded(ticket, result);
            }
            UpdateResult::none()
        }
        Message::CloseDetail => {
            if let Some(session) = state.suggestor.as_mut() {
                session.detail.close();
            }
            UpdateResult::none()
        }
    }
}

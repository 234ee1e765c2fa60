//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Each action becomes one spawned task holding a gateway clone and a
//! message sender. Tasks never touch state; they post a completion message
//! carrying the ticket they were issued.

use tokio::sync::mpsc;
use tracing::debug;

use sqlbench_api::ApiGateway;

use crate::handler::UpdateAction;
use crate::message::Message;

pub(crate) mod problem;
pub(crate) mod suggestor;

/// Execute an action by spawning a background task
pub fn handle_action<G>(action: UpdateAction, gateway: &G, msg_tx: mpsc::Sender<Message>)
where
    G: ApiGateway + Clone + Send + Sync + 'static,
{
    match action {
        UpdateAction::LoadCatalog { ticket } => {
            problem::spawn_load_catalog(gateway.clone(), msg_tx, ticket);
        }

        UpdateAction::LoadProblem { id, tickets } => {
            problem::spawn_load_problem(gateway.clone(), msg_tx, id, tickets);
        }

        UpdateAction::RunQuery { ticket, sql } => {
            problem::spawn_run_query(gateway.clone(), msg_tx, ticket, sql);
        }

        UpdateAction::GradeQuery {
            ticket,
            problem_id,
            sql,
        } => {
            problem::spawn_grade(gateway.clone(), msg_tx, ticket, problem_id, sql);
        }

        UpdateAction::FetchHint { ticket, problem_id } => {
            problem::spawn_fetch_hint(gateway.clone(), msg_tx, ticket, problem_id);
        }

        UpdateAction::FetchSolution { ticket, problem_id } => {
            problem::spawn_fetch_solution(gateway.clone(), msg_tx, ticket, problem_id);
        }

        // ─────────────────────────────────────────────────────────
        // Suggestor
        // ─────────────────────────────────────────────────────────
        UpdateAction::LoadGenres { ticket } => {
            suggestor::spawn_load_genres(gateway.clone(), msg_tx, ticket);
        }

        UpdateAction::ScheduleActorLookup { ticket, delay } => {
            suggestor::spawn_timer(msg_tx, delay, Message::ActorLookupDue { ticket });
        }

        UpdateAction::SearchActors {
            ticket,
            name,
            limit,
        } => {
            suggestor::spawn_search_actors(gateway.clone(), msg_tx, ticket, name, limit);
        }

        UpdateAction::ScheduleSuggestionClose { ticket, delay } => {
            suggestor::spawn_timer(msg_tx, delay, Message::ActorBlurElapsed { ticket });
        }

        UpdateAction::FetchMovies { ticket, query } => {
            suggestor::spawn_fetch_movies(gateway.clone(), msg_tx, ticket, query);
        }

        UpdateAction::FetchMovie { ticket, id } => {
            suggestor::spawn_fetch_movie(gateway.clone(), msg_tx, ticket, id);
        }

        UpdateAction::FetchActor { ticket, id } => {
            suggestor::spawn_fetch_actor(gateway.clone(), msg_tx, ticket, id);
        }
    }
}

/// Post a completion message; a closed channel means the engine is gone
pub(crate) async fn post(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        debug!("Engine channel closed, dropping completion");
    }
}

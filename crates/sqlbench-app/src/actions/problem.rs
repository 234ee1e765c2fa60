//! Problem catalog and problem session requests

use tokio::sync::mpsc;
use tracing::{error, warn};

use sqlbench_api::ApiGateway;
use sqlbench_core::SchemaInfo;

use crate::message::Message;
use crate::request_gate::RequestTicket;
use crate::session::LoadTickets;

use super::post;

pub fn spawn_load_catalog<G>(gateway: G, msg_tx: mpsc::Sender<Message>, ticket: RequestTicket)
where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.list_problems().await.map_err(|e| {
            error!("Failed to list problems: {}", e);
            e.to_string()
        });
        post(&msg_tx, Message::CatalogLoaded { ticket, result }).await;
    });
}

/// Fetch the problem; once it resolves, fetch its next-id and schema
/// concurrently. The two follow-ups are tolerated: failures degrade to
/// "no next" and an empty schema.
pub fn spawn_load_problem<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    id: String,
    tickets: LoadTickets,
) where
    G: ApiGateway + Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let problem = gateway.get_problem(&id).await;
        let tables = match &problem {
            Ok(problem) => Some(problem.tables.clone()),
            Err(e) => {
                error!("Failed to load problem '{}': {}", id, e);
                None
            }
        };
        post(
            &msg_tx,
            Message::ProblemLoaded {
                ticket: tickets.problem,
                result: problem.map_err(|e| e.to_string()),
            },
        )
        .await;

        let Some(tables) = tables else {
            return;
        };

        let next = {
            let gateway = gateway.clone();
            let msg_tx = msg_tx.clone();
            let id = id.clone();
            async move {
                let next_id = gateway.get_next_problem_id(&id).await.unwrap_or_else(|e| {
                    warn!("Next problem lookup for '{}' failed: {}", id, e);
                    None
                });
                post(
                    &msg_tx,
                    Message::NextProblemIdLoaded {
                        ticket: tickets.next_id,
                        next_id,
                    },
                )
                .await;
            }
        };

        let schema = async {
            let schema = gateway.get_schema(&tables).await.unwrap_or_else(|e| {
                warn!("Schema lookup for {:?} failed: {}", tables, e);
                SchemaInfo::default()
            });
            post(
                &msg_tx,
                Message::SchemaLoaded {
                    ticket: tickets.schema,
                    schema,
                },
            )
            .await;
        };

        tokio::join!(next, schema);
    });
}

pub fn spawn_run_query<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    sql: String,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.run_query(&sql).await.map_err(|e| {
            error!("Query failed: {}", e);
            e.to_string()
        });
        post(&msg_tx, Message::QueryFinished { ticket, result }).await;
    });
}

pub fn spawn_grade<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    problem_id: String,
    sql: String,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.grade(&problem_id, &sql).await.map_err(|e| {
            error!("Grading '{}' failed: {}", problem_id, e);
            e.to_string()
        });
        post(&msg_tx, Message::GradeFinished { ticket, result }).await;
    });
}

pub fn spawn_fetch_hint<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    problem_id: String,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.get_hint(&problem_id).await.map_err(|e| {
            error!("Hint for '{}' failed: {}", problem_id, e);
            e.to_string()
        });
        post(&msg_tx, Message::HintLoaded { ticket, result }).await;
    });
}

pub fn spawn_fetch_solution<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    problem_id: String,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.get_solution(&problem_id).await.map_err(|e| {
            error!("Solution for '{}' failed: {}", problem_id, e);
            e.to_string()
        });
        post(&msg_tx, Message::SolutionLoaded { ticket, result }).await;
    });
}

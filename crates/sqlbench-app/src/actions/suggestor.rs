//! Suggestor requests and timers

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, warn};

use sqlbench_api::{ApiGateway, MovieQuery};

use crate::message::Message;
use crate::request_gate::RequestTicket;

use super::post;

/// Post `message` after `delay`. Superseded timers still fire; the gate
/// check on arrival ignores them.
pub fn spawn_timer(msg_tx: mpsc::Sender<Message>, delay: Duration, message: Message) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        post(&msg_tx, message).await;
    });
}

/// Tolerated: a failure degrades to an empty genre list
pub fn spawn_load_genres<G>(gateway: G, msg_tx: mpsc::Sender<Message>, ticket: RequestTicket)
where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let genres = gateway.list_genres().await.unwrap_or_else(|e| {
            warn!("Genre lookup failed: {}", e);
            Vec::new()
        });
        post(&msg_tx, Message::GenresLoaded { ticket, genres }).await;
    });
}

pub fn spawn_search_actors<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    name: String,
    limit: usize,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.search_actors(&name, limit).await.map_err(|e| {
            error!("Actor search for '{}' failed: {}", name, e);
            e.to_string()
        });
        post(&msg_tx, Message::ActorSuggestionsLoaded { ticket, result }).await;
    });
}

pub fn spawn_fetch_movies<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    query: MovieQuery,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.search_movies(&query).await.map_err(|e| {
            error!("Movie search failed: {}", e);
            e.to_string()
        });
        post(&msg_tx, Message::MoviesLoaded { ticket, result }).await;
    });
}

pub fn spawn_fetch_movie<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    id: String,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.get_movie(&id).await.map_err(|e| {
            error!("Movie '{}' failed to load: {}", id, e);
            e.to_string()
        });
        post(&msg_tx, Message::MovieLoaded { ticket, result }).await;
    });
}

pub fn spawn_fetch_actor<G>(
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    ticket: RequestTicket,
    id: String,
) where
    G: ApiGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.get_actor(&id).await.map_err(|e| {
            error!("Actor '{}' failed to load: {}", id, e);
            e.to_string()
        });
        post(&msg_tx, Message::ActorLoaded { ticket, result }).await;
    });
}

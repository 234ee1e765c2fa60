//! Headless mode runner - main event loop without a UI
//!
//! Reads line commands from stdin, drives the engine, and forwards every
//! engine event to stdout as NDJSON.

use tokio::sync::{broadcast, mpsc};

use sqlbench_api::ApiGateway;
use sqlbench_app::config::Settings;
use sqlbench_app::{Engine, EngineEvent, Message};
use sqlbench_core::prelude::*;

use super::command::parse_command;
use super::HeadlessEvent;

/// Run in headless mode until `quit` or stdin closes
pub async fn run_headless<G>(settings: Settings, gateway: G) -> Result<()>
where
    G: ApiGateway + Clone + Send + Sync + 'static,
{
    info!(
        practice = %settings.api.base_url,
        suggestor = %settings.api.resolved_suggestor_url(),
        "Starting headless session"
    );

    HeadlessEvent::ready(
        &settings.api.base_url,
        &settings.api.resolved_suggestor_url(),
    )
    .emit();

    let mut engine = Engine::new(settings, gateway);
    let mut events = engine.subscribe();

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    // The catalog is the landing view
    engine.process_message(Message::LoadCatalog);
    forward_events(&mut events);

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown();
    forward_events(&mut events);

    info!("sqlbench headless mode exiting");
    result
}

async fn headless_event_loop<G>(
    engine: &mut Engine<G>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    G: ApiGateway + Clone + Send + Sync + 'static,
{
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        if !engine.process_next().await {
            info!("Message channel closed");
            break;
        }
        forward_events(events);
    }

    Ok(())
}

/// Emit everything the engine broadcast since the last call
fn forward_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from(event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Blocking stdin reader; runs on its own thread
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stdin read failed: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(msg)) => {
                if msg_tx.blocking_send(msg).is_err() {
                    // Engine is gone
                    return;
                }
            }
            Ok(None) => {}
            Err(message) => {
                warn!("Stdin: {}", message);
                HeadlessEvent::error(message, false).emit();
            }
        }
    }

    info!("Stdin closed, quitting");
    let _ = msg_tx.blocking_send(Message::Quit);
}

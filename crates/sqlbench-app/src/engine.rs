//! Engine - owns the state, the message channel and the gateway
//!
//! Frontends feed messages in (user commands directly, request completions
//! through `msg_rx`) and subscribe to [`EngineEvent`]s for what changed.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use sqlbench_api::ApiGateway;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::state::{AppState, View};
use crate::view::{CatalogView, ProblemView, SuggestorView};

/// Snapshot of the derived views for change detection.
///
/// Captured before message processing, compared after to decide which
/// events to emit.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    view: View,
    catalog: CatalogView,
    problem: Option<ProblemView>,
    suggestor: Option<SuggestorView>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            view: state.view,
            catalog: CatalogView::derive(&state.catalog),
            problem: state.problem.as_ref().map(ProblemView::derive),
            suggestor: state.suggestor.as_ref().map(SuggestorView::derive),
        }
    }
}

/// Orchestration engine for sqlbench.
pub struct Engine<G> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the message channel. Spawned requests and timers
    /// post their completions here.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel. The frontend drains it.
    pub msg_rx: mpsc::Receiver<Message>,

    gateway: G,

    /// Event broadcaster for external consumers
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<G> Engine<G>
where
    G: ApiGateway + Clone + Send + Sync + 'static,
{
    /// Create an engine with a message channel (capacity 256) and an event
    /// broadcaster (capacity 256).
    pub fn new(settings: Settings, gateway: G) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);
        Self {
            state: AppState::with_settings(settings),
            msg_tx,
            msg_rx,
            gateway,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind, older events are dropped
    /// (`RecvError::Lagged`).
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);
        process::process_message(&mut self.state, msg, &self.gateway, &self.msg_tx);
        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next completion and process it. Returns false if the
    /// channel closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Unmount everything and notify subscribers
    pub fn shutdown(&mut self) {
        info!("Engine shutting down");
        self.state.show_catalog();
        self.emit(EngineEvent::Shutdown);
    }

    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.view != post.view {
            self.emit(EngineEvent::ViewChanged { view: post.view });
        }
        if pre.catalog != post.catalog {
            self.emit(EngineEvent::Catalog(post.catalog.clone()));
        }
        if let Some(problem) = &post.problem {
            if pre.problem.as_ref() != Some(problem) {
                self.emit(EngineEvent::Problem(problem.clone()));
            }
        }
        if let Some(suggestor) = &post.suggestor {
            if pre.suggestor.as_ref() != Some(suggestor) {
                self.emit(EngineEvent::Suggestor(suggestor.clone()));
            }
        }
    }

    /// send() fails only when nobody is subscribed, which is fine
    fn emit(&self, event: EngineEvent) {
        debug!("Emitting {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

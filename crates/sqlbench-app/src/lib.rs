//! sqlbench-app - Session state machines and orchestration for sqlbench
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the two
//! interactive tools: the SQL practice session and the movie/actor
//! suggestor. Stale responses are suppressed explicitly with per-context
//! request gates (see [`request_gate`]).

pub mod actions;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod request_gate;
pub mod session;
pub mod shortcuts;
pub mod state;
pub mod suggestor;
pub mod view;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use request_gate::{RequestGate, RequestTicket};
pub use session::{ProblemPhase, ProblemSession, SlotState};
pub use state::{AppState, View};
pub use suggestor::SuggestorSession;

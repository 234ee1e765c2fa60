//! Keyboard accelerator routing

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert a key into a message.
///
/// Installed draft shortcuts get the first look; global keys follow.
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = state.shortcuts.dispatch(&key) {
        return Some(msg);
    }
    match key {
        InputKey::Esc if state.suggestor.is_some() => Some(Message::CloseDetail),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

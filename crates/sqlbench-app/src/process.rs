//! Message processing: the TEA update loop plus action dispatch

use tokio::sync::mpsc;

use sqlbench_api::ApiGateway;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function, following any
/// chained messages and dispatching every resulting action.
pub fn process_message<G>(
    state: &mut AppState,
    message: Message,
    gateway: &G,
    msg_tx: &mpsc::Sender<Message>,
) where
    G: ApiGateway + Clone + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, gateway, msg_tx.clone());
        }

        msg = result.message;
    }
}

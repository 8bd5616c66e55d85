use tracing::debug;
use crate::models::SelectMessage;
use crate::relay::BroadcastRelay;

/// Handle SelectMessage
///
/// An unknown student (usually one that disconnected in flight) is logged by
/// the relay and otherwise ignored; the teacher socket stays open.
pub async fn handle_select_message(select_msg: SelectMessage, relay: &BroadcastRelay) {
    if relay.handle_select(&select_msg.id).await.is_err() {
        debug!("Selection of {} dropped", select_msg.id);
    }
}

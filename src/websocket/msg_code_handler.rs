use tracing::warn;
use crate::models::CodeMessage;
use crate::relay::BroadcastRelay;
use crate::services::auth_service::Identity;

/// Handle CodeMessage
///
/// The socket's identity decides whose snapshot is updated. A frame that
/// names a different student is dropped.
pub async fn handle_code_message(code_msg: CodeMessage, identity: &Identity, relay: &BroadcastRelay) -> bool {
    if let Some(claimed) = code_msg.id.as_deref() {
        if claimed != identity.id {
            warn!("Student {} sent code for {}; dropping", identity.id, claimed);
            return false;
        }
    }

    relay.handle_code(&identity.id, code_msg.editor).await
}

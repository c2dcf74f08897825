use rjecnik_core::Session;
use rjecnik_core::quickfill::QuickFill;
use rjecnik_types::{BridgeAction, BridgeMessage, EntryDraft};

use super::Reply;
use super::assist::prefill;
use super::entries::handle_add;

/// Requests from the companion page: prefill the input or save directly
pub fn handle_bridge_message(session: &mut Session, message: BridgeMessage) -> Reply {
    tracing::info!("Bridge {:?}: '{}'", message.action, message.word);

    match message.action {
        BridgeAction::Prefill => {
            let fill = QuickFill {
                word: Some(message.word),
                translation: Some(message.translation).filter(|t| !t.trim().is_empty()),
            };
            Ok(vec![prefill(session, fill)])
        }
        BridgeAction::Save => handle_add(session, EntryDraft::new(message.word, message.translation)),
    }
}

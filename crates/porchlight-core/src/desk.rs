//! Front desk: owns every active conversation and produces replies.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use parking_lot::{Mutex, RwLock};
use porchlight_protocol::SessionId;

use crate::dialogue::Conversation;
use crate::error::DeskError;
use crate::inventory::Inventory;
use crate::notify::ConfirmationNotifier;

/// Conversation registry plus the shared services every reply needs.
///
/// Conversations are keyed by session id and created on first contact.
pub struct FrontDesk {
    // TODO: evict idle conversations once a TTL policy is decided.
    conversations: RwLock<HashMap<SessionId, Arc<Mutex<Conversation>>>>,
    inventory: Inventory,
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl FrontDesk {
    /// Create a front desk over an inventory and a confirmation notifier.
    pub fn new(inventory: Inventory, notifier: Arc<dyn ConfirmationNotifier>) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            inventory,
            notifier,
        }
    }

    /// Produce the reply to one inbound message. Messages for the same
    /// session step one shared conversation, in arrival order.
    pub fn respond(&self, session_id: &SessionId, message: &str) -> Result<String, DeskError> {
        let conversation = {
            let mut conversations = self.conversations.write();
            conversations
                .entry(session_id.clone())
                .or_insert_with(|| {
                    info!("conversation opened (session_id={})", session_id);
                    Arc::new(Mutex::new(Conversation::new()))
                })
                .clone()
        };
        let mut conversation = conversation.lock();
        conversation.advance(message, &self.inventory, self.notifier.as_ref())
    }

    /// Number of conversations currently held.
    pub fn conversation_count(&self) -> usize {
        self.conversations.read().len()
    }
}

//! Wire shape of the conversation sent to chat-completion backends

use crate::types::ChatMessage;
use serde_json::{Value, json};

pub struct MessageAdapter;

impl MessageAdapter {
    /// `[{"role": "...", "content": "..."}]`, order preserved.
    pub fn to_chat_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|message| json!({ "role": message.role.as_str(), "content": message.content }))
            .collect()
    }
}

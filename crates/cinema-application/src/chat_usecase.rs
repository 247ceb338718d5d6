//! AI recommendation chat and its panel preference.

use cinema_core::Result;
use cinema_core::api::ChatApi;
use cinema_core::chat::{ChatReply, ChatRequest, clamp_opacity};
use cinema_core::store::SessionStore;
use std::sync::Arc;

pub struct ChatUseCase {
    chat: Arc<dyn ChatApi>,
    store: Arc<dyn SessionStore>,
}

impl ChatUseCase {
    pub fn new(chat: Arc<dyn ChatApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { chat, store }
    }

    pub async fn ask(&self, question: &str) -> Result<ChatReply> {
        let request = ChatRequest::new(question)?;
        Ok(self.chat.ask(&request).await?)
    }

    pub fn opacity(&self) -> u8 {
        self.store.chat_opacity()
    }

    /// Stores the panel opacity, clamped into 0–100, and returns it.
    pub fn set_opacity(&self, value: i64) -> Result<u8> {
        let value = clamp_opacity(value);
        self.store.set_chat_opacity(value)?;
        Ok(value)
    }
}

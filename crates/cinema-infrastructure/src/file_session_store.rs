//! `SessionStore` backed by [`LocalStorage`].

use crate::storage::LocalStorage;
use cinema_core::Result;
use cinema_core::chat::{DEFAULT_CHAT_OPACITY, clamp_opacity};
use cinema_core::search::SearchHistory;
use cinema_core::store::SessionStore;
use cinema_core::user::Session;

pub const SESSION_KEY: &str = "cinema_user";
pub const TOKEN_KEY: &str = "cinema_token";
pub const CHAT_OPACITY_KEY: &str = "chatOpacity";

/// Key holding one user's search history.
pub fn history_key(user_id: &str) -> String {
    format!("search_history_{}", user_id)
}

/// Persists client state as one JSON file per storage key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    storage: LocalStorage,
}

impl FileSessionStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        self.storage.get::<Session>(SESSION_KEY).or_log(SESSION_KEY)
    }

    fn save(&self, session: Option<&Session>) -> Result<()> {
        match session {
            Some(session) => {
                tracing::debug!("[SessionStore] Saving session for user {}", session.user_id);
                self.storage.set(SESSION_KEY, session)?;
            }
            None => {
                tracing::debug!("[SessionStore] Clearing session");
                self.storage.remove(SESSION_KEY)?;
            }
        }
        Ok(())
    }

    fn history(&self, user_id: &str) -> Vec<String> {
        let key = history_key(user_id);
        self.storage
            .get::<Vec<String>>(&key)
            .or_log(&key)
            .map(|entries| SearchHistory::from_entries(entries).into_entries())
            .unwrap_or_default()
    }

    fn add_history_entry(&self, user_id: &str, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }
        self.storage
            .update::<Vec<String>, _>(&history_key(user_id), |entries| {
                let mut history = SearchHistory::from_entries(std::mem::take(entries));
                history.push(query);
                *entries = history.into_entries();
            })?;
        Ok(())
    }

    fn load_token(&self) -> Option<String> {
        self.storage
            .get::<String>(TOKEN_KEY)
            .or_log(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    fn save_token(&self, token: Option<&str>) -> Result<()> {
        match token {
            Some(token) => self.storage.set(TOKEN_KEY, &token.to_string())?,
            None => self.storage.remove(TOKEN_KEY)?,
        }
        Ok(())
    }

    fn chat_opacity(&self) -> u8 {
        self.storage
            .get::<i64>(CHAT_OPACITY_KEY)
            .or_log(CHAT_OPACITY_KEY)
            .map(clamp_opacity)
            .unwrap_or(DEFAULT_CHAT_OPACITY)
    }

    fn set_chat_opacity(&self, value: u8) -> Result<()> {
        let value = clamp_opacity(i64::from(value));
        self.storage.set(CHAT_OPACITY_KEY, &i64::from(value))?;
        Ok(())
    }
}

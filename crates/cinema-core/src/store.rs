//! Local client state contract.

use crate::error::Result;
use crate::user::Session;

/// Persisted session, token, search history, and UI preferences.
///
/// Reads never fail: absent or malformed data is reported as "no data" so a
/// corrupted local file cannot take the client down. Writes report storage
/// errors to the caller.
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or `None` if absent or malformed.
    fn load(&self) -> Option<Session>;

    /// `None` clears the stored session; `Some` overwrites it entirely.
    fn save(&self, session: Option<&Session>) -> Result<()>;

    /// Most-recent-first search history for a user, at most 10 entries.
    fn history(&self, user_id: &str) -> Vec<String>;

    /// Records a query. Whitespace-only queries are ignored.
    fn add_history_entry(&self, user_id: &str, query: &str) -> Result<()>;

    fn load_token(&self) -> Option<String>;

    fn save_token(&self, token: Option<&str>) -> Result<()>;

    /// Chat panel opacity, 0–100.
    fn chat_opacity(&self) -> u8;

    fn set_chat_opacity(&self, value: u8) -> Result<()>;
}

//! Client configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_BASE_URL: &str = "http://localhost:8000/ai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings read from `config.toml`.
///
/// Every field is optional in the file; missing values take the defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the catalog REST backend, without trailing slash
    pub api_base_url: String,
    /// Base URL of the AI chat service
    pub chat_base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Strips trailing slashes so paths can be appended verbatim.
    pub fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.chat_base_url = self.chat_base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("api_base_url = \"https://movies.example/\"").unwrap();
        let config = config.normalized();
        assert_eq!(config.api_base_url, "https://movies.example");
        assert_eq!(config.chat_base_url, DEFAULT_CHAT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }
}

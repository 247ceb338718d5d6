//! AI movie-recommendation chat.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: u32 = 5;
pub const DEFAULT_MAX_RESULTS: u32 = 3;
pub const DEFAULT_CHAT_OPACITY: u8 = 100;

/// Body of `POST {chat}/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub top_k: u32,
    pub max_results: u32,
}

impl ChatRequest {
    /// Builds a request with the default result counts.
    pub fn new(question: &str) -> Result<Self, ValidationError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self {
            question: question.to_string(),
            top_k: DEFAULT_TOP_K,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }
}

/// A recommendation drawn from the external movie database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMovie {
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl ChatMovie {
    /// Four-digit release year, if the date is usable.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| d.len() >= 4 && d.is_char_boundary(4))
            .map(|d| &d[..4])
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Response of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub movies: Vec<ChatMovie>,
    #[serde(default)]
    pub gpt_suggestions: Vec<String>,
}

/// Clamps a chat panel opacity into 0–100.
pub fn clamp_opacity(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

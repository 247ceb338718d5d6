//! Review domain model and input rules.

use crate::error::ValidationError;
use crate::user::Session;
use crate::wire::{id_string, timestamp_or_epoch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_RATING: u8 = 10;
pub const MAX_REVIEW_CHARS: usize = 200;

/// Review as it arrives from the server, before timestamp coercion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReview {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub movie_id: String,
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    #[serde(default)]
    pub author: String,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Value,
    #[serde(default)]
    pub movie_title: Option<String>,
}

/// A user review of one movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub movie_id: String,
    pub user_id: String,
    pub author: String,
    /// 2–10 in steps of 2 (five half-width stars)
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
}

impl From<WireReview> for Review {
    fn from(wire: WireReview) -> Self {
        Self {
            created_at: timestamp_or_epoch(&wire.created_at),
            id: wire.id,
            movie_id: wire.movie_id,
            user_id: wire.user_id,
            author: wire.author,
            rating: wire.rating,
            text: wire.text,
            movie_title: wire.movie_title,
        }
    }
}

impl Review {
    /// Only the author may edit or delete a review.
    pub fn is_owned_by(&self, session: &Session) -> bool {
        self.user_id == session.user_id
    }

    /// Number of filled stars out of five.
    pub fn stars(&self) -> u8 {
        self.rating.div_ceil(2)
    }
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub movie_id: String,
    pub user_id: String,
    pub author: String,
    pub rating: u8,
    pub text: String,
}

impl ReviewDraft {
    /// Builds a draft authored by the session's user.
    pub fn by(session: &Session, movie_id: impl Into<String>, rating: u8, text: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            user_id: session.user_id.clone(),
            author: session.display_name.clone(),
            rating,
            text: text.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_review(self.rating, &self.text)
    }
}

/// Body of `PUT /api/reviews/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewEdit {
    pub rating: u8,
    pub text: String,
}

impl ReviewEdit {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_review(self.rating, &self.text)
    }
}

/// Checks a star rating and review body before submission.
pub fn validate_review(rating: u8, text: &str) -> Result<(), ValidationError> {
    if rating < 2 || rating > MAX_RATING || rating % 2 != 0 {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyReviewText);
    }
    let actual = text.chars().count();
    if actual > MAX_REVIEW_CHARS {
        return Err(ValidationError::ReviewTextTooLong {
            max: MAX_REVIEW_CHARS,
            actual,
        });
    }
    Ok(())
}

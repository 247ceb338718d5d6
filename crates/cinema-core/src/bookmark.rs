//! Bookmark relation between a user and a movie.
//!
//! Bookmarks have no identity of their own; existence is checked with a
//! dedicated lookup before toggling.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/bookmarks/{userId}/check/{movieId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkStatus {
    pub bookmarked: bool,
}

//! Admin crawl requests that import movies into the catalog.

use crate::error::ValidationError;
use crate::wire::{id_string, opt_text};
use serde::{Deserialize, Serialize};

/// Shortest title query the crawler accepts.
pub const MIN_CRAWL_QUERY_CHARS: usize = 2;

/// One search hit offered for import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlCandidate {
    #[serde(deserialize_with = "id_string")]
    pub movie_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub detail_url: Option<String>,
}

/// Response of `POST /api/crawl/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSearchResult {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<CrawlCandidate>,
}

/// Response of the crawl-by-id and crawl-by-title endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(deserialize_with = "id_string")]
    pub movie_id: String,
    #[serde(default)]
    pub movie_title: Option<String>,
    #[serde(default)]
    pub already_exists: bool,
}

/// Trims a crawl query and checks its length.
pub fn normalize_crawl_query(query: &str) -> Result<String, ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if trimmed.chars().count() < MIN_CRAWL_QUERY_CHARS {
        return Err(ValidationError::QueryTooShort {
            min: MIN_CRAWL_QUERY_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_crawl_query() {
        assert_eq!(normalize_crawl_query("  "), Err(ValidationError::EmptyQuery));
        assert_eq!(
            normalize_crawl_query(" 괴 "),
            Err(ValidationError::QueryTooShort { min: 2 })
        );
        assert_eq!(normalize_crawl_query(" 괴물 ").unwrap(), "괴물");
    }

    #[test]
    fn test_outcome_existing() {
        let outcome: CrawlOutcome = serde_json::from_value(json!({
            "message": "exists",
            "movie_id": 1234,
            "already_exists": true
        }))
        .unwrap();
        assert!(outcome.already_exists);
        assert_eq!(outcome.movie_id, "1234");
        assert!(outcome.movie_title.is_none());
    }
}

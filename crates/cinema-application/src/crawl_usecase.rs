//! Admin movie import through the crawl service.

use cinema_core::api::CrawlApi;
use cinema_core::crawl::{CrawlOutcome, CrawlSearchResult, normalize_crawl_query};
use cinema_core::{Result, ValidationError};
use std::sync::Arc;

pub struct CrawlUseCase {
    crawl: Arc<dyn CrawlApi>,
}

impl CrawlUseCase {
    pub fn new(crawl: Arc<dyn CrawlApi>) -> Self {
        Self { crawl }
    }

    /// Lists import candidates for a title query.
    pub async fn search(&self, query: &str) -> Result<CrawlSearchResult> {
        let query = normalize_crawl_query(query)?;
        let result = self.crawl.search_candidates(&query).await?;
        tracing::debug!(
            "[CrawlUseCase] {} candidates for '{}'",
            result.results.len(),
            query
        );
        Ok(result)
    }

    /// Imports one candidate picked from [`search`](Self::search).
    pub async fn crawl_by_id(&self, movie_id: &str, movie_title: &str) -> Result<CrawlOutcome> {
        let movie_id = movie_id.trim();
        if movie_id.is_empty() {
            return Err(ValidationError::missing("movie_id").into());
        }
        let outcome = self.crawl.crawl_by_id(movie_id, movie_title.trim()).await?;
        log_outcome(&outcome);
        Ok(outcome)
    }

    /// Imports the best match for a title.
    pub async fn crawl_by_title(&self, title: &str) -> Result<CrawlOutcome> {
        let title = normalize_crawl_query(title)?;
        let outcome = self.crawl.crawl_by_title(&title).await?;
        log_outcome(&outcome);
        Ok(outcome)
    }
}

fn log_outcome(outcome: &CrawlOutcome) {
    if outcome.already_exists {
        tracing::info!("[CrawlUseCase] Movie {} already in catalog", outcome.movie_id);
    } else {
        tracing::info!("[CrawlUseCase] Imported movie {}", outcome.movie_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockCrawl;

    #[tokio::test]
    async fn test_short_query_is_rejected_without_request() {
        let crawl = Arc::new(MockCrawl::default());
        let usecase = CrawlUseCase::new(crawl.clone());

        assert!(usecase.search(" a ").await.unwrap_err().is_validation());
        assert!(usecase.crawl_by_title("").await.unwrap_err().is_validation());
        assert!(usecase.crawl_by_id(" ", "x").await.unwrap_err().is_validation());
        assert!(crawl.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_created_vs_existing() {
        let crawl = Arc::new(MockCrawl::default());
        let usecase = CrawlUseCase::new(crawl.clone());

        assert!(usecase.crawl_by_title(" 괴물 ").await.unwrap().already_exists);
        let outcome = usecase.crawl_by_id("196854", "괴물").await.unwrap();
        assert!(!outcome.already_exists);
        assert_eq!(outcome.movie_id, "196854");

        let result = usecase.search("  괴물  ").await.unwrap();
        assert_eq!(result.query, "괴물");
    }
}

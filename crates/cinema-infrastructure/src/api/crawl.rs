use super::client::{HttpApiClient, RequestBody};
use async_trait::async_trait;
use cinema_core::api::{ApiResult, CrawlApi};
use cinema_core::crawl::{CrawlOutcome, CrawlSearchResult};
use reqwest::Method;

#[async_trait]
impl CrawlApi for HttpApiClient {
    async fn search_candidates(&self, query: &str) -> ApiResult<CrawlSearchResult> {
        self.fetch(
            &["api", "crawl", "search"],
            Method::POST,
            &[],
            RequestBody::form([("query", query)]),
        )
        .await
    }

    async fn crawl_by_id(&self, movie_id: &str, movie_title: &str) -> ApiResult<CrawlOutcome> {
        self.fetch(
            &["api", "crawl", "movie-by-id"],
            Method::POST,
            &[],
            RequestBody::form([("movie_id", movie_id), ("movie_title", movie_title)]),
        )
        .await
    }

    async fn crawl_by_title(&self, title: &str) -> ApiResult<CrawlOutcome> {
        self.fetch(
            &["api", "crawl", "movie"],
            Method::POST,
            &[],
            RequestBody::form([("title", title)]),
        )
        .await
    }
}

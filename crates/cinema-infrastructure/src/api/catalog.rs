use super::client::{HttpApiClient, RequestBody};
use async_trait::async_trait;
use cinema_core::api::{ApiResult, CatalogApi, MovieQuery};
use cinema_core::bookmark::BookmarkStatus;
use cinema_core::movie::{FilterOptions, Movie, MovieCount, MovieFilter, MovieUpdate};
use cinema_core::review::{ReviewDraft, ReviewEdit, WireReview};
use reqwest::Method;
use serde_json::Value;

#[async_trait]
impl CatalogApi for HttpApiClient {
    async fn list_movies(&self, query: &MovieQuery) -> ApiResult<Vec<Movie>> {
        self.fetch(&["api", "movies"], Method::GET, &query.query_pairs(), RequestBody::None)
            .await
    }

    async fn count_movies(&self, search: Option<&str>) -> ApiResult<u64> {
        let query: Vec<(&str, String)> = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        let count: MovieCount = self
            .fetch(&["api", "movies", "count"], Method::GET, &query, RequestBody::None)
            .await?;
        Ok(count.total)
    }

    async fn movie(&self, movie_id: &str) -> ApiResult<Movie> {
        self.fetch(
            &["api", "movies", movie_id],
            Method::GET,
            &[],
            RequestBody::None,
        )
        .await
    }

    async fn filter_options(&self) -> ApiResult<FilterOptions> {
        self.fetch(&["api", "movies", "filter-options"], Method::GET, &[], RequestBody::None)
            .await
    }

    async fn filter_movies(&self, filter: &MovieFilter) -> ApiResult<Vec<Movie>> {
        self.fetch(
            &["api", "movies", "filter"],
            Method::GET,
            &filter.query_pairs(),
            RequestBody::None,
        )
        .await
    }

    async fn update_movie(&self, update: &MovieUpdate) -> ApiResult<()> {
        self.request(
            &["api", "movies", update.id.as_str()],
            Method::PUT,
            RequestBody::json(update)?,
        )
        .await
        .map(drop)
    }

    async fn delete_movie(&self, movie_id: &str) -> ApiResult<()> {
        self.request(
            &["api", "movies", movie_id],
            Method::DELETE,
            RequestBody::None,
        )
        .await
        .map(drop)
    }

    async fn reviews(&self, movie_id: &str) -> ApiResult<Vec<WireReview>> {
        self.fetch(
            &["api", "reviews", movie_id],
            Method::GET,
            &[],
            RequestBody::None,
        )
        .await
    }

    async fn all_reviews(&self, search: Option<&str>) -> ApiResult<Vec<WireReview>> {
        let query: Vec<(&str, String)> = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        self.fetch(&["api", "reviews", "all"], Method::GET, &query, RequestBody::None)
            .await
    }

    async fn create_review(&self, draft: &ReviewDraft) -> ApiResult<WireReview> {
        self.fetch(&["api", "reviews"], Method::POST, &[], RequestBody::json(draft)?)
            .await
    }

    async fn update_review(&self, review_id: &str, edit: &ReviewEdit) -> ApiResult<WireReview> {
        self.fetch(
            &["api", "reviews", review_id],
            Method::PUT,
            &[],
            RequestBody::json(edit)?,
        )
        .await
    }

    async fn delete_review(&self, review_id: &str) -> ApiResult<()> {
        self.request(
            &["api", "reviews", review_id],
            Method::DELETE,
            RequestBody::None,
        )
        .await
        .map(drop)
    }

    async fn bookmarks(&self, user_id: &str) -> ApiResult<Vec<Movie>> {
        self.fetch(
            &["api", "bookmarks", user_id],
            Method::GET,
            &[],
            RequestBody::None,
        )
        .await
    }

    async fn add_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<()> {
        self.request(
            &["api", "bookmarks"],
            Method::POST,
            RequestBody::form([("user_id", user_id), ("movie_id", movie_id)]),
        )
        .await
        .map(drop)
    }

    async fn remove_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<()> {
        self.request(
            &["api", "bookmarks", user_id, movie_id],
            Method::DELETE,
            RequestBody::None,
        )
        .await
        .map(drop)
    }

    async fn check_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<BookmarkStatus> {
        self.fetch(
            &["api", "bookmarks", user_id, "check", movie_id],
            Method::GET,
            &[],
            RequestBody::None,
        )
        .await
    }

    async fn search_history(&self, user_id: &str) -> ApiResult<Vec<String>> {
        let value = self
            .request(
                &["api", "users", user_id, "search-history"],
                Method::GET,
                RequestBody::None,
            )
            .await?;
        Ok(match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        })
    }

    async fn add_search_history(&self, user_id: &str, query: &str) -> ApiResult<()> {
        self.request_with_query(
            &["api", "users", user_id, "search-history"],
            Method::POST,
            &[("query", query.to_string())],
            RequestBody::None,
        )
        .await
        .map(drop)
    }
}

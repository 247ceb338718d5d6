//! Remote service contracts.
//!
//! These traits decouple the application layer from the HTTP transport.
//! Every failure is a [`RequestError`]; callers decide whether to degrade or
//! propagate.

use crate::bookmark::BookmarkStatus;
use crate::chat::{ChatReply, ChatRequest};
use crate::crawl::{CrawlOutcome, CrawlSearchResult};
use crate::error::RequestError;
use crate::movie::{FilterOptions, Movie, MovieFilter, MovieUpdate};
use crate::pager::{PageState, SortKey};
use crate::review::{ReviewDraft, ReviewEdit, WireReview};
use crate::user::{LoginResponse, Registration};
use async_trait::async_trait;

pub type ApiResult<T> = std::result::Result<T, RequestError>;

/// Parameters of `GET /api/movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub skip: Option<u64>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortKey>,
    pub query: Option<String>,
}

impl MovieQuery {
    /// Free-text search over all movies.
    pub fn search(text: &str) -> Self {
        let text = text.trim();
        Self {
            query: (!text.is_empty()).then(|| text.to_string()),
            ..Default::default()
        }
    }

    /// The page a pager currently points at.
    pub fn page(state: &PageState) -> Self {
        Self {
            skip: Some(state.skip()),
            limit: Some(state.page_size),
            sort_by: Some(state.sort_key),
            query: None,
        }
    }

    /// Top `limit` movies by rating.
    pub fn top_rated(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            sort_by: Some(SortKey::Rating),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, text: Option<&str>) -> Self {
        self.query = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_string()));
        }
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        pairs
    }
}

/// Movies, reviews, bookmarks, and server-side search history.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_movies(&self, query: &MovieQuery) -> ApiResult<Vec<Movie>>;

    async fn count_movies(&self, search: Option<&str>) -> ApiResult<u64>;

    async fn movie(&self, movie_id: &str) -> ApiResult<Movie>;

    async fn filter_options(&self) -> ApiResult<FilterOptions>;

    async fn filter_movies(&self, filter: &MovieFilter) -> ApiResult<Vec<Movie>>;

    /// Admin only.
    async fn update_movie(&self, update: &MovieUpdate) -> ApiResult<()>;

    /// Admin only.
    async fn delete_movie(&self, movie_id: &str) -> ApiResult<()>;

    async fn reviews(&self, movie_id: &str) -> ApiResult<Vec<WireReview>>;

    /// Admin only.
    async fn all_reviews(&self, search: Option<&str>) -> ApiResult<Vec<WireReview>>;

    async fn create_review(&self, draft: &ReviewDraft) -> ApiResult<WireReview>;

    async fn update_review(&self, review_id: &str, edit: &ReviewEdit) -> ApiResult<WireReview>;

    async fn delete_review(&self, review_id: &str) -> ApiResult<()>;

    async fn bookmarks(&self, user_id: &str) -> ApiResult<Vec<Movie>>;

    async fn add_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<()>;

    async fn remove_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<()>;

    async fn check_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<BookmarkStatus>;

    async fn search_history(&self, user_id: &str) -> ApiResult<Vec<String>>;

    async fn add_search_history(&self, user_id: &str, query: &str) -> ApiResult<()>;
}

/// Account endpoints. All bodies are sent as form fields.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, login_id: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn register(&self, form: &Registration) -> ApiResult<()>;

    /// Returns the server's message, which quotes the login id.
    async fn find_id(&self, email: &str, phone: &str) -> ApiResult<String>;

    async fn request_password_reset(&self, login_id: &str, email: &str) -> ApiResult<String>;

    async fn reset_password(&self, login_id: &str, email: &str, new_password: &str)
    -> ApiResult<()>;
}

/// Admin crawl endpoints.
#[async_trait]
pub trait CrawlApi: Send + Sync {
    async fn search_candidates(&self, query: &str) -> ApiResult<CrawlSearchResult>;

    async fn crawl_by_id(&self, movie_id: &str, movie_title: &str) -> ApiResult<CrawlOutcome>;

    async fn crawl_by_title(&self, title: &str) -> ApiResult<CrawlOutcome>;
}

/// AI recommendation chat.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn ask(&self, request: &ChatRequest) -> ApiResult<ChatReply>;
}

//! Call-recording test doubles for the service traits.

use async_trait::async_trait;
use cinema_core::Result;
use cinema_core::RequestError;
use cinema_core::api::{ApiResult, AuthApi, CatalogApi, ChatApi, CrawlApi, MovieQuery};
use cinema_core::bookmark::BookmarkStatus;
use cinema_core::chat::{ChatReply, ChatRequest, DEFAULT_CHAT_OPACITY};
use cinema_core::crawl::{CrawlOutcome, CrawlSearchResult};
use cinema_core::movie::{FilterOptions, Movie, MovieFilter, MovieUpdate};
use cinema_core::notify::{NoticeLevel, Notifier};
use cinema_core::review::{ReviewDraft, ReviewEdit, WireReview};
use cinema_core::search::SearchHistory;
use cinema_core::store::SessionStore;
use cinema_core::user::{AuthUser, LoginResponse, Registration, Session};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub fn session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_string(),
        login_id: format!("login-{}", user_id),
        display_name: format!("User {}", user_id),
        email: format!("{}@example.com", user_id),
        created_at: None,
        phone: None,
    }
}

pub fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

/// Catalog backend kept in memory.
#[derive(Default)]
pub struct MockCatalog {
    pub calls: Mutex<Vec<String>>,
    pub movies: Mutex<Vec<Movie>>,
    pub total: Mutex<u64>,
    pub reviews: Mutex<Vec<Value>>,
    pub bookmarks: Mutex<HashSet<(String, String)>>,
    pub remote_history: Mutex<Vec<String>>,
    pub failure: Mutex<Option<RequestError>>,
    /// Fails only `count_movies`
    pub count_failure: Mutex<Option<RequestError>>,
    /// Delays `list_movies` for the given skip value
    pub slow_skip: Mutex<Option<(u64, Duration)>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let mock = Self::new();
        *mock.total.lock().unwrap() = movies.len() as u64;
        *mock.movies.lock().unwrap() = movies;
        mock
    }

    pub fn fail_with(&self, err: RequestError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn review_from(&self, id: &str, movie_id: &str, user_id: &str, author: &str, rating: u8, text: &str) -> WireReview {
        serde_json::from_value(json!({
            "id": id,
            "movieId": movie_id,
            "userId": user_id,
            "author": author,
            "rating": rating,
            "text": text,
            "createdAt": "2024-05-01T12:00:00"
        }))
        .unwrap()
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn list_movies(&self, query: &MovieQuery) -> ApiResult<Vec<Movie>> {
        let pairs: Vec<String> = query
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        self.record(format!("list_movies?{}", pairs.join("&")))?;

        let delay = *self.slow_skip.lock().unwrap();
        if let Some((skip, duration)) = delay {
            if query.skip == Some(skip) {
                tokio::time::sleep(duration).await;
            }
        }

        let movies = self.movies.lock().unwrap().clone();
        let skip = query.skip.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(movies.len());
        Ok(movies
            .into_iter()
            .filter(|m| match &query.query {
                Some(text) => m.title.contains(text.as_str()),
                None => true,
            })
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn count_movies(&self, search: Option<&str>) -> ApiResult<u64> {
        self.record(format!("count_movies({})", search.unwrap_or("")))?;
        if let Some(err) = self.count_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(*self.total.lock().unwrap())
    }

    async fn movie(&self, movie_id: &str) -> ApiResult<Movie> {
        self.record(format!("movie({})", movie_id))?;
        self.movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == movie_id)
            .cloned()
            .ok_or_else(|| RequestError::http(404, "not found"))
    }

    async fn filter_options(&self) -> ApiResult<FilterOptions> {
        self.record("filter_options")?;
        Ok(FilterOptions {
            genres: vec!["Drama".to_string()],
            ..Default::default()
        })
    }

    async fn filter_movies(&self, filter: &MovieFilter) -> ApiResult<Vec<Movie>> {
        self.record(format!("filter_movies({})", filter.query_pairs().len()))?;
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn update_movie(&self, update: &MovieUpdate) -> ApiResult<()> {
        self.record(format!("update_movie({})", update.id))
    }

    async fn delete_movie(&self, movie_id: &str) -> ApiResult<()> {
        self.record(format!("delete_movie({})", movie_id))
    }

    async fn reviews(&self, movie_id: &str) -> ApiResult<Vec<WireReview>> {
        self.record(format!("reviews({})", movie_id))?;
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap())
            .collect())
    }

    async fn all_reviews(&self, search: Option<&str>) -> ApiResult<Vec<WireReview>> {
        self.record(format!("all_reviews({})", search.unwrap_or("")))?;
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap())
            .collect())
    }

    async fn create_review(&self, draft: &ReviewDraft) -> ApiResult<WireReview> {
        self.record(format!("create_review({})", draft.movie_id))?;
        Ok(self.review_from("r-new", &draft.movie_id, &draft.user_id, &draft.author, draft.rating, &draft.text))
    }

    async fn update_review(&self, review_id: &str, edit: &ReviewEdit) -> ApiResult<WireReview> {
        self.record(format!("update_review({})", review_id))?;
        Ok(self.review_from(review_id, "m1", "u1", "User u1", edit.rating, &edit.text))
    }

    async fn delete_review(&self, review_id: &str) -> ApiResult<()> {
        self.record(format!("delete_review({})", review_id))
    }

    async fn bookmarks(&self, user_id: &str) -> ApiResult<Vec<Movie>> {
        self.record(format!("bookmarks({})", user_id))?;
        let marked = self.bookmarks.lock().unwrap().clone();
        Ok(self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| marked.contains(&(user_id.to_string(), m.id.clone())))
            .cloned()
            .collect())
    }

    async fn add_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<()> {
        self.record(format!("add_bookmark({},{})", user_id, movie_id))?;
        self.bookmarks
            .lock()
            .unwrap()
            .insert((user_id.to_string(), movie_id.to_string()));
        Ok(())
    }

    async fn remove_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<()> {
        self.record(format!("remove_bookmark({},{})", user_id, movie_id))?;
        self.bookmarks
            .lock()
            .unwrap()
            .remove(&(user_id.to_string(), movie_id.to_string()));
        Ok(())
    }

    async fn check_bookmark(&self, user_id: &str, movie_id: &str) -> ApiResult<BookmarkStatus> {
        self.record(format!("check_bookmark({},{})", user_id, movie_id))?;
        Ok(BookmarkStatus {
            bookmarked: self
                .bookmarks
                .lock()
                .unwrap()
                .contains(&(user_id.to_string(), movie_id.to_string())),
        })
    }

    async fn search_history(&self, user_id: &str) -> ApiResult<Vec<String>> {
        self.record(format!("search_history({})", user_id))?;
        Ok(self.remote_history.lock().unwrap().clone())
    }

    async fn add_search_history(&self, user_id: &str, query: &str) -> ApiResult<()> {
        self.record(format!("add_search_history({},{})", user_id, query))?;
        self.remote_history.lock().unwrap().insert(0, query.to_string());
        Ok(())
    }
}

/// In-memory session store.
#[derive(Default)]
pub struct MemoryStore {
    pub session: Mutex<Option<Session>>,
    pub token: Mutex<Option<String>>,
    pub histories: Mutex<HashMap<String, SearchHistory>>,
    pub opacity: Mutex<Option<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_in(user_id: &str) -> Self {
        let store = Self::new();
        *store.session.lock().unwrap() = Some(session(user_id));
        store
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    fn save(&self, session: Option<&Session>) -> Result<()> {
        *self.session.lock().unwrap() = session.cloned();
        Ok(())
    }

    fn history(&self, user_id: &str) -> Vec<String> {
        self.histories
            .lock()
            .unwrap()
            .get(user_id)
            .map(|h| h.entries().to_vec())
            .unwrap_or_default()
    }

    fn add_history_entry(&self, user_id: &str, query: &str) -> Result<()> {
        self.histories
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(query);
        Ok(())
    }

    fn load_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save_token(&self, token: Option<&str>) -> Result<()> {
        *self.token.lock().unwrap() = token.map(str::to_string);
        Ok(())
    }

    fn chat_opacity(&self) -> u8 {
        self.opacity.lock().unwrap().unwrap_or(DEFAULT_CHAT_OPACITY)
    }

    fn set_chat_opacity(&self, value: u8) -> Result<()> {
        *self.opacity.lock().unwrap() = Some(value.min(100));
        Ok(())
    }
}

/// Collects every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == NoticeLevel::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

/// Auth backend accepting one fixed account.
#[derive(Default)]
pub struct MockAuth {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl AuthApi for MockAuth {
    async fn login(&self, login_id: &str, password: &str) -> ApiResult<LoginResponse> {
        self.calls.lock().unwrap().push(format!("login({})", login_id));
        if login_id != "alice" || password != "secret1" {
            return Err(RequestError::http(400, "invalid credentials"));
        }
        Ok(LoginResponse {
            access_token: "tok-alice".to_string(),
            token_type: Some("bearer".to_string()),
            user: AuthUser {
                id: "u1".to_string(),
                user_id: "alice".to_string(),
                username: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                created_at: Some("2025. 01. 02.".to_string()),
            },
        })
    }

    async fn register(&self, form: &Registration) -> ApiResult<()> {
        self.calls.lock().unwrap().push(format!("register({})", form.login_id));
        Ok(())
    }

    async fn find_id(&self, email: &str, _phone: &str) -> ApiResult<String> {
        self.calls.lock().unwrap().push(format!("find_id({})", email));
        Ok("회원님의 아이디는 'alice' 입니다.".to_string())
    }

    async fn request_password_reset(&self, login_id: &str, _email: &str) -> ApiResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("request_password_reset({})", login_id));
        Ok("verified".to_string())
    }

    async fn reset_password(&self, login_id: &str, _email: &str, _new_password: &str) -> ApiResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("reset_password({})", login_id));
        Ok(())
    }
}

/// Crawl backend where "괴물" already exists.
#[derive(Default)]
pub struct MockCrawl {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl CrawlApi for MockCrawl {
    async fn search_candidates(&self, query: &str) -> ApiResult<CrawlSearchResult> {
        self.calls.lock().unwrap().push(format!("search({})", query));
        Ok(CrawlSearchResult {
            query: query.to_string(),
            count: 0,
            results: Vec::new(),
        })
    }

    async fn crawl_by_id(&self, movie_id: &str, movie_title: &str) -> ApiResult<CrawlOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("crawl_by_id({},{})", movie_id, movie_title));
        Ok(CrawlOutcome {
            message: "created".to_string(),
            movie_id: movie_id.to_string(),
            movie_title: Some(movie_title.to_string()),
            already_exists: false,
        })
    }

    async fn crawl_by_title(&self, title: &str) -> ApiResult<CrawlOutcome> {
        self.calls.lock().unwrap().push(format!("crawl_by_title({})", title));
        Ok(CrawlOutcome {
            message: "exists".to_string(),
            movie_id: "1".to_string(),
            movie_title: Some(title.to_string()),
            already_exists: title == "괴물",
        })
    }
}

/// Chat service that echoes the question.
#[derive(Default)]
pub struct MockChat {
    pub requests: Mutex<Vec<ChatRequest>>,
}

#[async_trait]
impl ChatApi for MockChat {
    async fn ask(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ChatReply {
            answer: format!("about {}", request.question),
            movies: Vec::new(),
            gpt_suggestions: Vec::new(),
        })
    }
}

//! Domain operations combining the catalog API with local session state.
//!
//! Read paths are best effort: failures are logged, surfaced through the
//! [`Notifier`] where the user asked for the data, and degrade to empty
//! results. Write paths validate input, require a session, and propagate
//! failures to the caller.

use cinema_core::api::{CatalogApi, MovieQuery};
use cinema_core::movie::{FilterOptions, Movie, MovieFilter, assign_positional_rank};
use cinema_core::notify::Notifier;
use cinema_core::review::{Review, ReviewDraft, ReviewEdit};
use cinema_core::store::SessionStore;
use cinema_core::user::Session;
use cinema_core::{CinemaError, Result};
use std::sync::Arc;

/// Size of the weekly ranking.
pub const RANKING_SIZE: u32 = 10;

pub const LOGIN_REQUIRED: &str = "login required";

pub struct DataManager {
    api: Arc<dyn CatalogApi>,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl DataManager {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    pub fn api(&self) -> &Arc<dyn CatalogApi> {
        &self.api
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    // ----- session -----

    pub fn current_user(&self) -> Option<Session> {
        self.store.load()
    }

    fn require_session(&self) -> Result<Session> {
        self.store.load().ok_or(CinemaError::NotAuthenticated)
    }

    /// Stores a freshly authenticated session and its access token.
    pub fn login(&self, session: &Session, token: Option<&str>) -> Result<()> {
        self.store.save(Some(session))?;
        self.store.save_token(token)?;
        tracing::info!("[DataManager] Logged in as {}", session.login_id);
        Ok(())
    }

    /// Overwrites the stored session, e.g. after a profile edit.
    pub fn update_session(&self, session: &Session) -> Result<()> {
        self.store.save(Some(session))
    }

    /// Clears the session and access token.
    pub fn logout(&self) -> Result<()> {
        self.store.save(None)?;
        self.store.save_token(None)?;
        tracing::info!("[DataManager] Logged out");
        Ok(())
    }

    // ----- movies -----

    /// Free-text movie search. A blank query lists everything.
    pub async fn search_movies(&self, query: &str) -> Vec<Movie> {
        match self.api.list_movies(&MovieQuery::search(query)).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!("[DataManager] Search for '{}' failed: {}", query, e);
                self.notifier.error(&e.message);
                Vec::new()
            }
        }
    }

    pub async fn movie_by_id(&self, movie_id: &str) -> Option<Movie> {
        match self.api.movie(movie_id).await {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!("[DataManager] Movie {} unavailable: {}", movie_id, e);
                None
            }
        }
    }

    /// Top-rated movies with positional ranks.
    pub async fn weekly_ranking(&self) -> Vec<Movie> {
        match self.api.list_movies(&MovieQuery::top_rated(RANKING_SIZE)).await {
            Ok(movies) => assign_positional_rank(movies),
            Err(e) => {
                tracing::warn!("[DataManager] Ranking unavailable: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn filter_options(&self) -> FilterOptions {
        self.api.filter_options().await.unwrap_or_else(|e| {
            tracing::warn!("[DataManager] Filter options unavailable: {}", e);
            FilterOptions::default()
        })
    }

    pub async fn filter_movies(&self, filter: &MovieFilter) -> Vec<Movie> {
        match self.api.filter_movies(filter).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!("[DataManager] Filtering failed: {}", e);
                self.notifier.error(&e.message);
                Vec::new()
            }
        }
    }

    // ----- reviews -----

    /// Reviews of one movie. Malformed timestamps are coerced to the epoch.
    pub async fn movie_reviews(&self, movie_id: &str) -> Vec<Review> {
        match self.api.reviews(movie_id).await {
            Ok(reviews) => reviews.into_iter().map(Review::from).collect(),
            Err(e) => {
                tracing::warn!("[DataManager] Reviews for {} unavailable: {}", movie_id, e);
                Vec::new()
            }
        }
    }

    pub async fn add_review(&self, movie_id: &str, rating: u8, text: &str) -> Result<Review> {
        let session = self.require_session()?;
        let draft = ReviewDraft::by(&session, movie_id, rating, text.trim());
        draft.validate()?;
        let review = self.api.create_review(&draft).await?;
        Ok(review.into())
    }

    pub async fn update_review(&self, review_id: &str, rating: u8, text: &str) -> Result<Review> {
        let edit = ReviewEdit {
            rating,
            text: text.trim().to_string(),
        };
        edit.validate()?;
        self.require_session()?;
        let review = self.api.update_review(review_id, &edit).await?;
        Ok(review.into())
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<()> {
        self.require_session()?;
        self.api.delete_review(review_id).await?;
        Ok(())
    }

    /// Finds a review on a movie and checks that the current user wrote it.
    pub async fn owned_review(&self, movie_id: &str, review_id: &str) -> Result<Review> {
        let session = self.require_session()?;
        let reviews = self.api.reviews(movie_id).await?;
        let review = reviews
            .into_iter()
            .map(Review::from)
            .find(|r| r.id == review_id)
            .ok_or_else(|| cinema_core::RequestError::http(404, "review not found"))?;
        if !review.is_owned_by(&session) {
            return Err(CinemaError::NotReviewAuthor);
        }
        Ok(review)
    }

    // ----- bookmarks -----

    pub async fn check_bookmark(&self, movie_id: &str) -> bool {
        let Some(session) = self.store.load() else {
            return false;
        };
        match self.api.check_bookmark(&session.user_id, movie_id).await {
            Ok(status) => status.bookmarked,
            Err(e) => {
                tracing::warn!("[DataManager] Bookmark check for {} failed: {}", movie_id, e);
                false
            }
        }
    }

    /// Flips the bookmark on `movie_id` and returns the new state.
    ///
    /// `None` means the toggle did not happen: there is no session (no request
    /// is issued) or a remote call failed. Both cases notify the user.
    pub async fn toggle_bookmark(&self, movie_id: &str) -> Option<bool> {
        let Some(session) = self.store.load() else {
            self.notifier.error(LOGIN_REQUIRED);
            return None;
        };
        let user_id = session.user_id.as_str();

        let result = async {
            let current = self.api.check_bookmark(user_id, movie_id).await?.bookmarked;
            if current {
                self.api.remove_bookmark(user_id, movie_id).await?;
            } else {
                self.api.add_bookmark(user_id, movie_id).await?;
            }
            Ok::<bool, cinema_core::RequestError>(!current)
        }
        .await;

        match result {
            Ok(bookmarked) => {
                tracing::debug!("[DataManager] Bookmark {} -> {}", movie_id, bookmarked);
                Some(bookmarked)
            }
            Err(e) => {
                tracing::warn!("[DataManager] Bookmark toggle for {} failed: {}", movie_id, e);
                self.notifier.error(&e.message);
                None
            }
        }
    }

    pub async fn my_bookmarks(&self) -> Vec<Movie> {
        let Some(session) = self.store.load() else {
            return Vec::new();
        };
        match self.api.bookmarks(&session.user_id).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!("[DataManager] Bookmarks unavailable: {}", e);
                self.notifier.error(&e.message);
                Vec::new()
            }
        }
    }

    // ----- search history -----

    /// The current user's recent queries; empty without a session.
    pub fn search_history(&self) -> Vec<String> {
        self.store
            .load()
            .map(|session| self.store.history(&session.user_id))
            .unwrap_or_default()
    }

    /// Records a query locally and mirrors it to the server.
    ///
    /// Without a session nothing is recorded.
    pub async fn record_search(&self, query: &str) -> Result<()> {
        let query = query.trim();
        let Some(session) = self.store.load() else {
            return Ok(());
        };
        if query.is_empty() {
            return Ok(());
        }
        self.store.add_history_entry(&session.user_id, query)?;
        if let Err(e) = self.api.add_search_history(&session.user_id, query).await {
            tracing::warn!("[DataManager] Remote search history not updated: {}", e);
        }
        Ok(())
    }

    /// Seeds an empty local history from the server's copy.
    pub async fn sync_search_history(&self) {
        let Some(session) = self.store.load() else {
            return;
        };
        if !self.store.history(&session.user_id).is_empty() {
            return;
        }
        match self.api.search_history(&session.user_id).await {
            Ok(remote) => {
                for query in remote.iter().rev() {
                    if let Err(e) = self.store.add_history_entry(&session.user_id, query) {
                        tracing::warn!("[DataManager] Failed to store history entry: {}", e);
                        return;
                    }
                }
            }
            Err(e) => tracing::warn!("[DataManager] Remote search history unavailable: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, MockCatalog, RecordingNotifier, movie};
    use cinema_core::RequestError;
    use serde_json::json;

    fn manager(
        catalog: MockCatalog,
        store: MemoryStore,
    ) -> (DataManager, Arc<MockCatalog>, Arc<MemoryStore>, Arc<RecordingNotifier>) {
        let catalog = Arc::new(catalog);
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::default());
        let manager = DataManager::new(catalog.clone(), store.clone(), notifier.clone());
        (manager, catalog, store, notifier)
    }

    #[tokio::test]
    async fn test_toggle_without_session_issues_no_calls() {
        let (manager, catalog, _, notifier) = manager(MockCatalog::new(), MemoryStore::new());
        assert_eq!(manager.toggle_bookmark("m1").await, None);
        assert!(catalog.calls().is_empty());
        assert_eq!(notifier.errors(), vec![LOGIN_REQUIRED]);
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let (manager, catalog, _, _) = manager(MockCatalog::new(), MemoryStore::logged_in("u1"));

        assert!(!manager.check_bookmark("m1").await);
        assert_eq!(manager.toggle_bookmark("m1").await, Some(true));
        assert_eq!(manager.toggle_bookmark("m1").await, Some(false));

        assert_eq!(
            catalog.calls(),
            vec![
                "check_bookmark(u1,m1)",
                "check_bookmark(u1,m1)",
                "add_bookmark(u1,m1)",
                "check_bookmark(u1,m1)",
                "remove_bookmark(u1,m1)",
            ]
        );
    }

    #[tokio::test]
    async fn test_toggle_failure_returns_none() {
        let (manager, catalog, _, notifier) = manager(MockCatalog::new(), MemoryStore::logged_in("u1"));
        catalog.fail_with(RequestError::network());
        assert_eq!(manager.toggle_bookmark("m1").await, None);
        assert_eq!(notifier.errors(), vec!["network error"]);
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_empty() {
        let catalog = MockCatalog::with_movies(vec![movie("1", "Heat")]);
        catalog.fail_with(RequestError::generic(500));
        let (manager, _, _, notifier) = manager(catalog, MemoryStore::new());

        assert!(manager.search_movies("heat").await.is_empty());
        assert_eq!(notifier.errors(), vec!["request failed"]);
        assert!(manager.movie_by_id("1").await.is_none());
    }

    #[tokio::test]
    async fn test_search_and_detail() {
        let catalog = MockCatalog::with_movies(vec![movie("1", "Heat"), movie("2", "Alien")]);
        let (manager, catalog, _, _) = manager(catalog, MemoryStore::new());

        let found = manager.search_movies(" Ali ").await;
        assert_eq!(found.len(), 1);
        assert_eq!(catalog.calls(), vec!["list_movies?query=Ali"]);

        assert_eq!(manager.movie_by_id("2").await.unwrap().title, "Alien");
        assert!(manager.movie_by_id("404").await.is_none());
    }

    #[tokio::test]
    async fn test_weekly_ranking_is_positional() {
        let mut low = movie("a", "Low");
        low.rating = Some(1.0);
        let mut high = movie("b", "High");
        high.rating = Some(9.0);
        let (manager, catalog, _, _) =
            manager(MockCatalog::with_movies(vec![low, high]), MemoryStore::new());

        let ranked = manager.weekly_ranking().await;
        assert_eq!(ranked[0].id, "a");
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[1].rank, Some(2));
        assert_eq!(catalog.calls(), vec!["list_movies?limit=10&sort_by=rating"]);
    }

    #[tokio::test]
    async fn test_reviews_keep_entries_with_bad_dates() {
        let catalog = MockCatalog::new();
        *catalog.reviews.lock().unwrap() = vec![
            json!({"id": "r1", "movieId": "m1", "userId": "u1", "rating": 8, "text": "a", "createdAt": "garbage"}),
            json!({"id": "r2", "movieId": "m1", "userId": "u2", "rating": 4, "text": "b", "createdAt": 1_700_000_000_000_i64}),
        ];
        let (manager, _, _, _) = manager(catalog, MemoryStore::new());

        let reviews = manager.movie_reviews("m1").await;
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].created_at.timestamp(), 0);
        assert_eq!(reviews[1].created_at.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_review_validation_precedes_network() {
        let (manager, catalog, _, _) = manager(MockCatalog::new(), MemoryStore::logged_in("u1"));

        let err = manager.add_review("m1", 7, "fine").await.unwrap_err();
        assert!(err.is_validation());
        let err = manager.add_review("m1", 12, "fine").await.unwrap_err();
        assert!(err.is_validation());
        let err = manager.add_review("m1", 8, &"x".repeat(201)).await.unwrap_err();
        assert!(err.is_validation());
        let err = manager.update_review("r1", 0, "fine").await.unwrap_err();
        assert!(err.is_validation());
        assert!(catalog.calls().is_empty());

        let review = manager.add_review("m1", 8, "  great  ").await.unwrap();
        assert_eq!(review.user_id, "u1");
        assert_eq!(review.text, "great");
        assert_eq!(catalog.calls(), vec!["create_review(m1)"]);
    }

    #[tokio::test]
    async fn test_review_writes_require_session_and_propagate() {
        let (manager, catalog, store, _) = manager(MockCatalog::new(), MemoryStore::new());
        let err = manager.add_review("m1", 8, "good").await.unwrap_err();
        assert!(err.is_not_authenticated());
        assert!(manager.delete_review("r1").await.unwrap_err().is_not_authenticated());
        assert!(catalog.calls().is_empty());

        *store.session.lock().unwrap() = Some(crate::test_support::session("u1"));
        catalog.fail_with(RequestError::http(403, "forbidden"));
        let err = manager.delete_review("r1").await.unwrap_err();
        assert_eq!(err.user_message(), "forbidden");
    }

    #[tokio::test]
    async fn test_owned_review() {
        let catalog = MockCatalog::new();
        *catalog.reviews.lock().unwrap() = vec![
            json!({"id": "r1", "movieId": "m1", "userId": "u1", "rating": 8, "text": "a"}),
            json!({"id": "r2", "movieId": "m1", "userId": "u2", "rating": 4, "text": "b"}),
        ];
        let (manager, _, _, _) = manager(catalog, MemoryStore::logged_in("u1"));

        assert_eq!(manager.owned_review("m1", "r1").await.unwrap().id, "r1");
        assert!(matches!(
            manager.owned_review("m1", "r2").await,
            Err(CinemaError::NotReviewAuthor)
        ));
        assert!(manager.owned_review("m1", "r9").await.is_err());
    }

    #[tokio::test]
    async fn test_search_history_per_session() {
        let (manager, catalog, store, _) = manager(MockCatalog::new(), MemoryStore::new());
        manager.record_search("heat").await.unwrap();
        assert!(manager.search_history().is_empty());
        assert!(catalog.calls().is_empty());

        *store.session.lock().unwrap() = Some(crate::test_support::session("u1"));
        manager.record_search("heat").await.unwrap();
        manager.record_search("   ").await.unwrap();
        manager.record_search("alien").await.unwrap();
        manager.record_search("heat").await.unwrap();
        assert_eq!(manager.search_history(), vec!["heat", "alien"]);
        assert_eq!(catalog.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_remote_history_failure_still_records_locally() {
        let (manager, catalog, _, _) = manager(MockCatalog::new(), MemoryStore::logged_in("u1"));
        catalog.fail_with(RequestError::network());
        manager.record_search("heat").await.unwrap();
        assert_eq!(manager.search_history(), vec!["heat"]);
    }

    #[tokio::test]
    async fn test_sync_seeds_empty_history() {
        let catalog = MockCatalog::new();
        *catalog.remote_history.lock().unwrap() = vec!["newest".to_string(), "older".to_string()];
        let (manager, _, _, _) = manager(catalog, MemoryStore::logged_in("u1"));

        manager.sync_search_history().await;
        assert_eq!(manager.search_history(), vec!["newest", "older"]);
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let (manager, _, store, _) = manager(MockCatalog::new(), MemoryStore::new());
        let session = crate::test_support::session("u7");
        manager.login(&session, Some("tok")).unwrap();
        assert_eq!(manager.current_user(), Some(session));
        assert_eq!(store.load_token().as_deref(), Some("tok"));

        manager.logout().unwrap();
        assert!(manager.current_user().is_none());
        assert!(store.load_token().is_none());
    }

    #[tokio::test]
    async fn test_bookmarks_without_session_are_empty() {
        let (manager, catalog, _, _) = manager(MockCatalog::new(), MemoryStore::new());
        assert!(manager.my_bookmarks().await.is_empty());
        assert!(!manager.check_bookmark("m1").await);
        assert!(catalog.calls().is_empty());
    }
}

//! Admin console: catalog statistics, movie table, and moderation.

use crate::list_view::MovieListView;
use cinema_core::api::CatalogApi;
use cinema_core::movie::{Movie, MovieUpdate};
use cinema_core::notify::Notifier;
use cinema_core::pager::SortKey;
use cinema_core::review::Review;
use cinema_core::{Result, ValidationError};
use std::sync::Arc;

/// Dashboard numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminStats {
    pub total_movies: u64,
    pub total_reviews: usize,
}

pub struct AdminUseCase {
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
}

impl AdminUseCase {
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn stats(&self) -> Result<AdminStats> {
        let total_movies = self.api.count_movies(None).await?;
        let total_reviews = self.api.all_reviews(None).await?.len();
        Ok(AdminStats {
            total_movies,
            total_reviews,
        })
    }

    /// A paged movie table sharing the grid pager rules.
    pub fn movie_table(&self, page_size: u32, sort_key: SortKey) -> MovieListView {
        MovieListView::new(self.api.clone(), self.notifier.clone(), page_size, sort_key)
    }

    /// Loads a movie into the edit form.
    pub async fn edit_form(&self, movie_id: &str) -> Result<MovieUpdate> {
        let movie: Movie = self.api.movie(movie_id).await?;
        Ok(MovieUpdate::from_movie(&movie))
    }

    pub async fn update_movie(&self, update: &MovieUpdate) -> Result<()> {
        if update.id.trim().is_empty() {
            return Err(ValidationError::missing("id").into());
        }
        if update.title.trim().is_empty() {
            return Err(ValidationError::missing("title").into());
        }
        self.api.update_movie(update).await?;
        tracing::info!("[AdminUseCase] Updated movie {}", update.id);
        Ok(())
    }

    pub async fn delete_movie(&self, movie_id: &str) -> Result<()> {
        self.api.delete_movie(movie_id).await?;
        tracing::info!("[AdminUseCase] Deleted movie {}", movie_id);
        Ok(())
    }

    /// Every review, optionally filtered server-side by `search`.
    pub async fn reviews(&self, search: Option<&str>) -> Result<Vec<Review>> {
        let reviews = self.api.all_reviews(search).await?;
        Ok(reviews.into_iter().map(Review::from).collect())
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<()> {
        self.api.delete_review(review_id).await?;
        tracing::info!("[AdminUseCase] Deleted review {}", review_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_view::FetchOutcome;
    use crate::test_support::{MockCatalog, RecordingNotifier, movie};
    use cinema_core::RequestError;
    use serde_json::json;

    fn admin(catalog: &Arc<MockCatalog>) -> AdminUseCase {
        AdminUseCase::new(catalog.clone(), Arc::new(RecordingNotifier::default()))
    }

    #[tokio::test]
    async fn test_stats() {
        let catalog = Arc::new(MockCatalog::with_movies(vec![movie("1", "A"), movie("2", "B")]));
        *catalog.reviews.lock().unwrap() = vec![json!({
            "id": "r1", "movieId": "1", "userId": "u1", "rating": 6, "text": "ok",
            "movieTitle": "A"
        })];
        let stats = admin(&catalog).stats().await.unwrap();
        assert_eq!(stats, AdminStats { total_movies: 2, total_reviews: 1 });

        let reviews = admin(&catalog).reviews(Some("ok")).await.unwrap();
        assert_eq!(reviews[0].movie_title.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_edit_and_update_movie() {
        let catalog = Arc::new(MockCatalog::with_movies(vec![movie("7", "Heat")]));
        let admin = admin(&catalog);

        let form = admin.edit_form("7").await.unwrap().with_minutes(170);
        admin.update_movie(&form).await.unwrap();

        let mut blank = form.clone();
        blank.title = " ".to_string();
        assert!(admin.update_movie(&blank).await.unwrap_err().is_validation());
        assert_eq!(catalog.calls(), vec!["movie(7)", "update_movie(7)"]);
    }

    #[tokio::test]
    async fn test_delete_failure_propagates() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.fail_with(RequestError::http(404, "movie not found"));
        let err = admin(&catalog).delete_movie("x").await.unwrap_err();
        assert_eq!(err.user_message(), "movie not found");
        assert!(admin(&catalog).delete_review("r").await.is_err());
    }

    #[tokio::test]
    async fn test_movie_table_pages() {
        let catalog = Arc::new(MockCatalog::with_movies(
            (1..=12).map(|i| movie(&i.to_string(), "M")).collect(),
        ));
        let table = admin(&catalog).movie_table(5, SortKey::Title);
        assert_eq!(table.load().await, FetchOutcome::Applied(5));
        assert_eq!(table.snapshot().total_pages, 3);
        assert_eq!(table.go_to_page(3).await, FetchOutcome::Applied(2));
    }
}

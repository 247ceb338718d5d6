//! Catalog browsing: search, paged list, detail, ranking, filters.

use super::Reported;
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;
use cinema_application::{FetchOutcome, MovieListView};
use cinema_core::movie::MovieFilter;
use colored::Colorize;

pub async fn search(app: &App, out: Output, query: &str) -> Result<()> {
    let movies = app.data.search_movies(query).await;
    if let Err(e) = app.data.record_search(query).await {
        tracing::warn!("[search] History not recorded: {}", e);
    }
    out.emit(&movies, render::movie_list(&movies))
}

/// Loads `page` of the catalog (or of the search results) in one fetch.
pub async fn browse(
    app: &App,
    out: Output,
    view: &MovieListView,
    page: i64,
    query: Option<&str>,
) -> Result<()> {
    let outcome = match query {
        Some(text) => view.search_at(Some(text), page).await,
        None => view.load_at(page).await,
    };
    if let FetchOutcome::Failed(e) = outcome {
        tracing::debug!("[browse] {:?}", e);
        return Err(Reported.into());
    }

    let snapshot = view.snapshot();
    if i64::from(snapshot.page.page_index) != page {
        app.notifier
            .info(&format!("Showing page {} of {}", snapshot.page.page_index, snapshot.total_pages));
    }
    let mut lines = render::movie_list(&snapshot.movies);
    lines.push(String::new());
    lines.push(render::pager(&snapshot));
    out.emit(&snapshot.movies, lines)
}

pub async fn detail(app: &App, out: Output, movie_id: &str) -> Result<()> {
    let Some(movie) = app.data.movie_by_id(movie_id).await else {
        app.notifier.error(&format!("movie {} not found", movie_id));
        return Err(Reported.into());
    };
    let (reviews, bookmarked) = tokio::join!(
        app.data.movie_reviews(movie_id),
        app.data.check_bookmark(movie_id)
    );
    let viewer = app.data.current_user();

    let mut lines = render::movie_detail(&movie, viewer.as_ref().map(|_| bookmarked));
    lines.push(String::new());
    lines.push(format!("Reviews ({})", reviews.len()).bold().to_string());
    lines.extend(render::reviews(&reviews, viewer.as_ref()));

    let value = serde_json::json!({ "movie": movie, "reviews": reviews, "bookmarked": bookmarked });
    out.emit(&value, lines)
}

pub async fn ranking(app: &App, out: Output) -> Result<()> {
    let movies = app.data.weekly_ranking().await;
    out.emit(&movies, render::ranking(&movies))
}

pub async fn filter_options(app: &App, out: Output) -> Result<()> {
    let options = app.data.filter_options().await;
    out.emit(&options, render::filter_options(&options))
}

pub async fn filter(app: &App, out: Output, filter: &MovieFilter) -> Result<()> {
    let movies = app.data.filter_movies(filter).await;
    out.emit(&movies, render::movie_list(&movies))
}

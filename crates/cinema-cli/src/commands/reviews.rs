//! Review listing and the author-only write operations.

use super::user_error;
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;

pub async fn list(app: &App, out: Output, movie_id: &str) -> Result<()> {
    let reviews = app.data.movie_reviews(movie_id).await;
    let viewer = app.data.current_user();
    out.emit(&reviews, render::reviews(&reviews, viewer.as_ref()))
}

pub async fn add(app: &App, out: Output, movie_id: &str, rating: u8, text: &str) -> Result<()> {
    let review = app
        .data
        .add_review(movie_id, rating, text)
        .await
        .map_err(user_error)?;
    app.notifier.success("Review posted");
    let viewer = app.data.current_user();
    out.emit(&review, render::reviews(std::slice::from_ref(&review), viewer.as_ref()))
}

pub async fn edit(
    app: &App,
    out: Output,
    movie_id: &str,
    review_id: &str,
    rating: u8,
    text: &str,
) -> Result<()> {
    app.data
        .owned_review(movie_id, review_id)
        .await
        .map_err(user_error)?;
    let review = app
        .data
        .update_review(review_id, rating, text)
        .await
        .map_err(user_error)?;
    app.notifier.success("Review updated");
    let viewer = app.data.current_user();
    out.emit(&review, render::reviews(std::slice::from_ref(&review), viewer.as_ref()))
}

pub async fn delete(app: &App, out: Output, movie_id: &str, review_id: &str) -> Result<()> {
    app.data
        .owned_review(movie_id, review_id)
        .await
        .map_err(user_error)?;
    app.data.delete_review(review_id).await.map_err(user_error)?;
    out.status(format!("Deleted review #{}", review_id));
    Ok(())
}

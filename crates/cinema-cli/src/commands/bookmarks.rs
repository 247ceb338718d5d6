use super::Reported;
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;
use cinema_application::data_manager::LOGIN_REQUIRED;

pub async fn toggle(app: &App, out: Output, movie_id: &str) -> Result<()> {
    let Some(bookmarked) = app.data.toggle_bookmark(movie_id).await else {
        return Err(Reported.into());
    };
    let message = if bookmarked {
        format!("Bookmarked movie {}", movie_id)
    } else {
        format!("Removed bookmark on movie {}", movie_id)
    };
    app.notifier.success(&message);
    out.emit(&serde_json::json!({ "movie_id": movie_id, "bookmarked": bookmarked }), Vec::new())
}

pub async fn list(app: &App, out: Output) -> Result<()> {
    if app.data.current_user().is_none() {
        app.notifier.error(LOGIN_REQUIRED);
        return Err(Reported.into());
    }
    let movies = app.data.my_bookmarks().await;
    out.emit(&movies, render::movie_list(&movies))
}

//! Admin console commands.

use super::user_error;
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;
use cinema_core::movie::MovieUpdate;

/// Fields given on the command line; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct MovieEdits {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<String>,
    pub minutes: Option<u32>,
    pub synopsis: Option<String>,
}

impl MovieEdits {
    pub fn apply(self, mut form: MovieUpdate) -> MovieUpdate {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(genre) = self.genre {
            form.genre = genre;
        }
        if let Some(director) = self.director {
            form.director = director;
        }
        if let Some(year) = self.release_year {
            form.release_year = year;
        }
        if let Some(synopsis) = self.synopsis {
            form.synopsis = synopsis;
        }
        match self.minutes {
            Some(minutes) => form.with_minutes(minutes),
            None => form,
        }
    }
}

pub async fn stats(app: &App, out: Output) -> Result<()> {
    let stats = app.admin.stats().await.map_err(user_error)?;
    let value = serde_json::json!({
        "total_movies": stats.total_movies,
        "total_reviews": stats.total_reviews,
    });
    out.emit(&value, render::admin_stats(&stats))
}

pub async fn reviews(app: &App, out: Output, search: Option<&str>) -> Result<()> {
    let reviews = app.admin.reviews(search).await.map_err(user_error)?;
    out.emit(&reviews, render::reviews(&reviews, None))
}

pub async fn update_movie(app: &App, out: Output, movie_id: &str, edits: MovieEdits) -> Result<()> {
    let form = app.admin.edit_form(movie_id).await.map_err(user_error)?;
    let form = edits.apply(form);
    app.admin.update_movie(&form).await.map_err(user_error)?;
    app.notifier.success(&format!("Updated {}", render::clean(&form.title)));
    out.emit(&form, Vec::new())
}

pub async fn delete_movie(app: &App, out: Output, movie_id: &str) -> Result<()> {
    app.admin.delete_movie(movie_id).await.map_err(user_error)?;
    out.status(format!("Deleted movie {}", movie_id));
    Ok(())
}

pub async fn delete_review(app: &App, out: Output, review_id: &str) -> Result<()> {
    app.admin.delete_review(review_id).await.map_err(user_error)?;
    out.status(format!("Deleted review #{}", review_id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_keep_unset_fields() {
        let form = MovieUpdate {
            id: "7".to_string(),
            title: "Old".to_string(),
            genre: "Drama".to_string(),
            duration: "100분".to_string(),
            ..Default::default()
        };
        let edits = MovieEdits {
            title: Some("New".to_string()),
            minutes: Some(95),
            ..Default::default()
        };
        let form = edits.apply(form);
        assert_eq!(form.title, "New");
        assert_eq!(form.genre, "Drama");
        assert_eq!(form.duration, "95분");
        assert_eq!(form.id, "7");
    }
}

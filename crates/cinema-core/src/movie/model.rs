//! Movie domain model.
//!
//! Movies are owned by the server. The client only reads them, apart from
//! the explicit admin update.

use super::RatingTheme;
use crate::wire::{id_string, opt_text, text_list};
use serde::{Deserialize, Serialize};

/// A movie as returned by the list, detail, bookmark, and ranking endpoints.
///
/// List endpoints return a summary, so everything beyond id/title is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critic_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Positional rank, only set on ranking results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

impl Movie {
    /// Rating shown on cards: the combined rating, falling back to the
    /// critic rating, then the audience rating, then zero.
    pub fn display_rating(&self) -> f64 {
        positive(self.rating)
            .or_else(|| positive(self.critic_rating))
            .or_else(|| positive(self.audience_rating))
            .unwrap_or(0.0)
    }

    /// Site rating on the backend's 0–10 scale: the users' own rating when
    /// present, otherwise the combined rating.
    pub fn site_rating(&self) -> f64 {
        positive(self.user_rating)
            .or(self.rating)
            .unwrap_or(0.0)
    }

    /// [`site_rating`](Self::site_rating) on the 0–5 scale the themes use.
    pub fn theme_rating(&self) -> f64 {
        self.site_rating() / 2.0
    }

    pub fn theme(&self) -> RatingTheme {
        RatingTheme::from_rating(self.theme_rating())
    }
}

/// Assigns 1-based ranks from array position.
///
/// The input is assumed to be already ordered by the server; ratings are not
/// consulted.
pub fn assign_positional_rank(movies: Vec<Movie>) -> Vec<Movie> {
    movies
        .into_iter()
        .enumerate()
        .map(|(index, mut movie)| {
            movie.rank = Some(index as u32 + 1);
            movie
        })
        .collect()
}

/// Response of `GET /api/movies/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCount {
    pub total: u64,
}

/// Values offered by the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default, deserialize_with = "text_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub years: Vec<String>,
}

/// Filter panel selection. Empty fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub genre: Option<String>,
    pub country: Option<String>,
    pub year: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub query: Option<String>,
    pub limit: Option<u32>,
}

impl MovieFilter {
    /// Query parameters for `GET /api/movies/filter`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        fn text(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let mut pairs = Vec::new();
        if let Some(genre) = text(&self.genre) {
            pairs.push(("genre", genre));
        }
        if let Some(country) = text(&self.country) {
            pairs.push(("country", country));
        }
        if let Some(year) = text(&self.year) {
            pairs.push(("year", year));
        }
        if let Some(min) = self.min_rating {
            pairs.push(("min_rating", min.to_string()));
        }
        if let Some(max) = self.max_rating {
            pairs.push(("max_rating", max.to_string()));
        }
        if let Some(query) = text(&self.query) {
            pairs.push(("query", query));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Admin edit form for `PUT /api/movies/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub director: String,
    pub release_year: String,
    pub duration: String,
    pub synopsis: String,
}

impl MovieUpdate {
    /// Prefills the edit form from the current movie.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            genre: movie.genre.clone().unwrap_or_default(),
            director: movie.director.clone().unwrap_or_default(),
            release_year: movie.release_year.clone().unwrap_or_default(),
            duration: movie.duration.clone().unwrap_or_default(),
            synopsis: movie.synopsis.clone().unwrap_or_default(),
        }
    }

    /// Sets the running time in minutes using the server's `"<n>분"` form.
    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.duration = format!("{}분", minutes);
        self
    }
}

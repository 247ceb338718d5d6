//! Movie domain module.
//!
//! - `model`: Movie projections, filters, and admin edits
//! - `theme`: Rating tiers

mod model;
mod theme;

pub use model::{
    assign_positional_rank, FilterOptions, Movie, MovieCount, MovieFilter, MovieUpdate,
};
pub use theme::RatingTheme;

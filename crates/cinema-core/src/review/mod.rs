//! Review domain module.

mod model;

pub use model::{
    validate_review, Review, ReviewDraft, ReviewEdit, WireReview, MAX_RATING, MAX_REVIEW_CHARS,
};

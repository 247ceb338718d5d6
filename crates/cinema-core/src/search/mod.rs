//! Search domain module.

mod history;

pub use history::{SearchHistory, HISTORY_LIMIT};

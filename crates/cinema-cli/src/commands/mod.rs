//! Subcommand handlers.
//!
//! Handlers fetch through the application layer and print with
//! [`crate::render`]. Failures the notifier already showed are returned as
//! [`Reported`] so `main` only sets the exit status.

pub mod account;
pub mod admin;
pub mod bookmarks;
pub mod chat;
pub mod crawl;
pub mod movies;
pub mod reviews;

use cinema_core::CinemaError;
use std::fmt;

/// A failure that has already been shown to the user.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failure already reported")
    }
}

impl std::error::Error for Reported {}

/// Converts a domain error into its user-facing message.
pub fn user_error(err: CinemaError) -> anyhow::Error {
    tracing::debug!("[cli] {:?}", err);
    anyhow::anyhow!(err.user_message())
}

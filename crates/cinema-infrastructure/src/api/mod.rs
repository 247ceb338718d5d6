//! HTTP implementation of the remote service traits.
//!
//! # Module Structure
//!
//! - `client`: request core, body encoding, error normalization
//! - `catalog`: movies, reviews, bookmarks, search history
//! - `auth`: account endpoints
//! - `crawl`: admin crawl endpoints
//! - `chat`: AI recommendation chat

mod auth;
mod catalog;
mod chat;
mod client;
mod crawl;

pub use client::{HttpApiClient, RequestBody, error_from_body, message_field};

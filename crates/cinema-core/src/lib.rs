//! Domain layer of the Cinema client.
//!
//! Types, rules, and service contracts shared by the infrastructure and
//! application crates. Nothing here performs I/O.

pub mod api;
pub mod bookmark;
pub mod chat;
pub mod config;
pub mod crawl;
pub mod error;
pub mod movie;
pub mod notify;
pub mod pager;
pub mod review;
pub mod search;
pub mod store;
pub mod user;
pub mod wire;

pub use error::{CinemaError, RequestError, Result, ValidationError};

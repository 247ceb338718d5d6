//! Application layer for the Cinema client.
//!
//! Use cases that coordinate the domain rules in `cinema-core` with the
//! remote services and local session state behind its traits.

pub mod admin_usecase;
pub mod auth_usecase;
pub mod chat_usecase;
pub mod crawl_usecase;
pub mod data_manager;
pub mod generation;
pub mod list_view;

#[cfg(test)]
mod test_support;

pub use admin_usecase::{AdminStats, AdminUseCase};
pub use auth_usecase::AuthUseCase;
pub use chat_usecase::ChatUseCase;
pub use crawl_usecase::CrawlUseCase;
pub use data_manager::DataManager;
pub use generation::{RequestGeneration, Ticket};
pub use list_view::{FetchOutcome, ListSnapshot, MovieListView};

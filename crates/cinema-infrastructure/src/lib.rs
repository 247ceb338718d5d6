//! Infrastructure layer of the Cinema client.
//!
//! Implements the core service traits against real I/O: the REST backend
//! over `reqwest`, local state as JSON files, and configuration as TOML.

pub mod api;
pub mod config_service;
pub mod file_session_store;
pub mod paths;
pub mod storage;

pub use api::{HttpApiClient, RequestBody};
pub use config_service::ConfigService;
pub use file_session_store::FileSessionStore;
pub use paths::CinemaPaths;
pub use storage::LocalStorage;

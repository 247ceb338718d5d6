//! File-backed local storage.
//!
//! - `atomic_json`: crash-safe single-file reads and writes
//! - `local_storage`: key-value store, one JSON file per key

pub mod atomic_json;
pub mod local_storage;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use local_storage::{LocalStorage, StoredValue};

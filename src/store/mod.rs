//! Key-value persistence boundary
//!
//! Entity collections are persisted as JSON strings under plain string
//! keys. The repository only ever sees this trait; the backends are a
//! mutexed map for tests and ephemeral sessions, and a file-per-key
//! store for the CLI. There are no transactions; every `set` replaces
//! the whole value for its key.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Async get/set-by-key string store.
///
/// `get` returns `Ok(None)` for a key that was never written. Backend
/// failures surface as `StoreError`; callers decide whether a failed
/// read is recoverable (the repository treats it as an empty
/// collection) while failed writes propagate.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

//! Player record persistence
//!
//! One JSON value under one key: `{ "bestScore": n, "score": n, "level": n }`.
//! Read once at startup, written once per game over. Anything unreadable is
//! treated as a new player and overwritten with a zero record.

pub mod record;
pub mod store;

pub use record::{LoadedRecord, PlayerRecord};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
pub use store::{MemoryStore, RecordStore};

/// Persistence errors
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// No key-value storage available
    #[error("storage unavailable")]
    Unavailable,

    /// Stored value is not a player record
    #[error("malformed player record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Storage refused the write
    #[error("storage write failed: {0}")]
    Write(String),
}

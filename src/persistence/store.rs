//! Key-value backends for the player record

use super::PersistenceError;

/// Single-key string storage
pub trait RecordStore {
    /// Stored value, `None` when the key was never written
    fn read(&self) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<String>,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            writes: 0,
        }
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), PersistenceError> {
        self.value = Some(value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Browser LocalStorage under a fixed key
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open(key: &'static str) -> Result<Self, PersistenceError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)?;
        Ok(Self { storage, key })
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        self.storage
            .get_item(self.key)
            .map_err(|_| PersistenceError::Unavailable)
    }

    fn write(&mut self, value: &str) -> Result<(), PersistenceError> {
        self.storage
            .set_item(self.key, value)
            .map_err(|e| PersistenceError::Write(format!("{:?}", e)))
    }
}

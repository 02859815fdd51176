//! Single-slot high score storage
//!
//! The backing store is one named slot holding a decimal-string encoded
//! non-negative integer. Absent or unparseable content reads as 0, and
//! a failed write degrades to an in-memory score for the session -
//! persistence problems must never reach gameplay.

use std::fmt;

/// Storage slot name (LocalStorage key on the web build)
pub const STORAGE_KEY: &str = "pixel-game-highscore";

/// Failure writing the slot. Reads never fail - they default to 0.
#[derive(Debug)]
pub enum StoreError {
    /// No backing storage exists in this environment
    Unavailable,
    /// The backend rejected the write
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::Backend(detail) => write!(f, "storage write failed: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A place to keep the one persisted integer.
pub trait HighScoreStore {
    /// Read the stored high score; absent or junk content is 0.
    fn read(&self) -> u32;
    /// Replace the stored high score.
    fn write(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Decode a raw slot value. Junk decodes to 0 rather than erroring.
pub fn parse_slot(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// In-memory store: the native default and the degradation mode when no
/// real storage is reachable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> u32 {
        self.value
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = score;
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn read(&self) -> u32 {
        let raw = Self::storage().and_then(|s| s.get_item(STORAGE_KEY).ok()).flatten();
        parse_slot(raw.as_deref())
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(STORAGE_KEY, &score.to_string())
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }
}

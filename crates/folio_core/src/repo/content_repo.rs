//! Content aggregate repository.
//!
//! # Responsibility
//! - Serialize `AppData` to JSON text and keep it under one storage key.
//! - Report unreadable persisted copies as `RepoError::InvalidData`.
//!
//! # Invariants
//! - The whole aggregate is written in one `set_item`; there are no partial
//!   section writes.
//! - `load` never substitutes defaults; that policy belongs to the store.

use crate::model::content::AppData;
use crate::storage::{KvStore, StorageError, CONTENT_KEY};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for aggregate load/save.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl RepoError {
    /// Whether the failure is a storage capacity rejection.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Storage(StorageError::QuotaExceeded { .. }))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode content: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted content: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence contract for the content aggregate.
pub trait ContentRepository {
    /// Returns the persisted aggregate, or `None` when nothing is stored.
    fn load(&self) -> RepoResult<Option<AppData>>;
    /// Replaces the persisted aggregate.
    fn save(&mut self, data: &AppData) -> RepoResult<()>;
}

/// `ContentRepository` over any key-value store.
pub struct KvContentRepository<S: KvStore> {
    storage: S,
}

impl<S: KvStore> KvContentRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KvStore> ContentRepository for KvContentRepository<S> {
    fn load(&self) -> RepoResult<Option<AppData>> {
        let Some(text) = self.storage.get_item(CONTENT_KEY)? else {
            return Ok(None);
        };
        let data = decode_app_data(&text)?;
        Ok(Some(data))
    }

    fn save(&mut self, data: &AppData) -> RepoResult<()> {
        let text = encode_app_data(data)?;
        self.storage.set_item(CONTENT_KEY, &text)?;
        Ok(())
    }
}

/// Encodes the aggregate as persisted JSON text.
pub fn encode_app_data(data: &AppData) -> RepoResult<String> {
    serde_json::to_string(data).map_err(RepoError::Encode)
}

/// Decodes persisted JSON text into a fully populated aggregate.
pub fn decode_app_data(text: &str) -> RepoResult<AppData> {
    serde_json::from_str(text).map_err(|err| {
        RepoError::InvalidData(format!(
            "line {} column {}: {}",
            err.line(),
            err.column(),
            err
        ))
    })
}

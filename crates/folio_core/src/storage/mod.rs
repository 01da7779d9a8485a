//! Durable key-value storage abstractions.
//!
//! # Responsibility
//! - Define the local-storage style contract the content repository and the
//!   admin session persist through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque UTF-8 text; callers own serialization.
//! - A write that would push total usage past the quota fails with
//!   `StorageError::QuotaExceeded` and leaves the previous value in place.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Storage key holding the serialized content aggregate.
pub const CONTENT_KEY: &str = "folio_data";
/// Storage key holding the admin session flag.
pub const AUTH_KEY: &str = "auth";
/// Default byte budget, in line with browser local storage.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a key-value storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Backend transport failure.
    Db(DbError),
    /// Write rejected because it would exceed the configured byte budget.
    QuotaExceeded { required_bytes: u64, quota_bytes: u64 },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded {
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded: {required_bytes} bytes required, {quota_bytes} allowed"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Local-storage style key-value contract.
pub trait KvStore {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Inserts or replaces one value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes one value. Removing an absent key is a no-op.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Byte cost of one stored entry for quota accounting.
pub(crate) fn entry_bytes(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// Checks a prospective total against an optional quota.
pub(crate) fn check_quota(required_bytes: u64, quota_bytes: Option<u64>) -> StorageResult<()> {
    match quota_bytes {
        Some(quota_bytes) if required_bytes > quota_bytes => Err(StorageError::QuotaExceeded {
            required_bytes,
            quota_bytes,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{check_quota, entry_bytes, StorageError};

    #[test]
    fn entry_bytes_counts_utf8_bytes() {
        assert_eq!(entry_bytes("k", "é"), 3);
    }

    #[test]
    fn check_quota_allows_exact_fit_and_rejects_overflow() {
        check_quota(10, Some(10)).expect("exact fit should pass");
        check_quota(u64::MAX, None).expect("no quota should always pass");
        let err = check_quota(11, Some(10)).expect_err("overflow must fail");
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required_bytes: 11,
                quota_bytes: 10
            }
        ));
    }
}

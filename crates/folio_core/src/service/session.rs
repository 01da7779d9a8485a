//! Admin session gate.
//!
//! # Responsibility
//! - Gate the admin surface behind the demo password.
//! - Keep the "logged in" flag in durable storage across runs.
//!
//! # Invariants
//! - This is a demonstration gate, not a security boundary: the credential is
//!   a fixed literal and the flag is plain text.
//! - The flag counts as set only when the stored value is exactly `"true"`.
//! - Passwords are never logged.

use crate::storage::{KvStore, StorageResult, AUTH_KEY};
use log::{info, warn};

/// Fixed demo password accepted by `AdminSession::login`.
pub const DEMO_ADMIN_PASSWORD: &str = "admin123";

const AUTH_FLAG_VALUE: &str = "true";

/// Session flag accessor over a key-value store.
pub struct AdminSession<S: KvStore> {
    storage: S,
}

impl<S: KvStore> AdminSession<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Whether the admin flag is currently set.
    ///
    /// Unreadable storage counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        match self.storage.get_item(AUTH_KEY) {
            Ok(value) => value.as_deref() == Some(AUTH_FLAG_VALUE),
            Err(err) => {
                warn!("event=session_check module=session status=error error={err}");
                false
            }
        }
    }

    /// Sets the flag when `password` matches the demo credential.
    ///
    /// Returns `Ok(false)` on a wrong password; storage is left untouched.
    pub fn login(&mut self, password: &str) -> StorageResult<bool> {
        if password != DEMO_ADMIN_PASSWORD {
            info!("event=session_login module=session status=rejected");
            return Ok(false);
        }
        self.storage.set_item(AUTH_KEY, AUTH_FLAG_VALUE)?;
        info!("event=session_login module=session status=ok");
        Ok(true)
    }

    /// Clears the flag. Logging out twice is harmless.
    pub fn logout(&mut self) -> StorageResult<()> {
        self.storage.remove_item(AUTH_KEY)?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

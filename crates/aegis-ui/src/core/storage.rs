//! Credential persistence.
//!
//! # Design
//! - Every read and write of session credentials goes through [`CredentialStore`].
//! - The backend is a plain key-value seam so the browser uses `localStorage`
//!   while tests and native hosts use [`MemoryStore`].
//! - Writes are synchronous, so a clear is visible to the next reader.

use crate::core::auth::Credential;
use aegis_api_models::UserInfo;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Storage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key holding the JSON-serialized user info.
pub const USER_INFO_KEY: &str = "user_info";

/// Failure writing to a key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backend refused the write (quota, privacy mode, ...).
    #[error("storage write failed")]
    WriteFailed {
        /// Key being written.
        key: String,
        /// Backend-provided detail.
        detail: String,
    },
    /// Value could not be serialized for storage.
    #[error("storage value could not be serialized")]
    Serialize {
        /// Key being written.
        key: String,
        /// Serializer detail.
        detail: String,
    },
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteFailed`] when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete `key`; missing keys are ignored.
    fn remove(&self, key: &str);
}

/// In-memory backend for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Single owner of the persisted access token and cached identity.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Rc<dyn KeyValueStore>,
}

impl CredentialStore {
    /// Wrap a key-value backend.
    #[must_use]
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    /// Current non-blank access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.backend
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    /// Cached identity; unreadable entries are treated as absent.
    #[must_use]
    pub fn user_info(&self) -> Option<UserInfo> {
        let raw = self.backend.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(info) => Some(info),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable cached user info");
                None
            }
        }
    }

    /// Full credential when a token is present.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        let access_token = self.access_token()?;
        Some(Credential {
            access_token,
            user_info: self.user_info(),
        })
    }

    /// Whether a usable token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Persist a full credential, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when either entry cannot be written.
    pub fn store(&self, credential: &Credential) -> Result<(), StorageError> {
        self.backend.set(ACCESS_TOKEN_KEY, &credential.access_token)?;
        match &credential.user_info {
            Some(info) => self.set_user_info(info),
            None => {
                self.backend.remove(USER_INFO_KEY);
                Ok(())
            }
        }
    }

    /// Replace the cached identity, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the identity cannot be serialized or written.
    pub fn set_user_info(&self, info: &UserInfo) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(info).map_err(|err| StorageError::Serialize {
            key: USER_INFO_KEY.to_string(),
            detail: err.to_string(),
        })?;
        self.backend.set(USER_INFO_KEY, &encoded)
    }

    /// Remove the token and cached identity.
    pub fn clear(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(USER_INFO_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::Role;

    fn alice() -> UserInfo {
        UserInfo {
            username: "alice".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn store_then_read_back_credential() -> Result<(), StorageError> {
        let store = CredentialStore::in_memory();
        assert!(store.credential().is_none());
        store.store(&Credential {
            access_token: "tok".to_string(),
            user_info: Some(alice()),
        })?;
        let credential = store.credential();
        assert_eq!(credential.as_ref().map(|c| c.access_token.as_str()), Some("tok"));
        assert_eq!(credential.and_then(|c| c.role()), Some(Role::Admin));
        Ok(())
    }

    #[test]
    fn clear_is_visible_to_next_read() -> Result<(), StorageError> {
        let backend = Rc::new(MemoryStore::new());
        let writer = CredentialStore::new(backend.clone());
        let reader = CredentialStore::new(backend);
        writer.store(&Credential {
            access_token: "tok".to_string(),
            user_info: Some(alice()),
        })?;
        assert!(reader.is_authenticated());
        writer.clear();
        assert!(!reader.is_authenticated());
        assert!(reader.user_info().is_none());
        Ok(())
    }

    #[test]
    fn blank_token_counts_as_unauthenticated() -> Result<(), StorageError> {
        let backend = Rc::new(MemoryStore::new());
        backend.set(ACCESS_TOKEN_KEY, "   ")?;
        let store = CredentialStore::new(backend);
        assert!(!store.is_authenticated());
        assert!(store.credential().is_none());
        Ok(())
    }

    #[test]
    fn corrupt_user_info_is_ignored() -> Result<(), StorageError> {
        let backend = Rc::new(MemoryStore::new());
        backend.set(ACCESS_TOKEN_KEY, "tok")?;
        backend.set(USER_INFO_KEY, "{not json")?;
        let store = CredentialStore::new(backend);
        let credential = store.credential();
        assert!(credential.is_some());
        assert_eq!(credential.and_then(|c| c.user_info), None);
        Ok(())
    }

    #[test]
    fn storing_without_identity_drops_stale_user_info() -> Result<(), StorageError> {
        let store = CredentialStore::in_memory();
        store.store(&Credential {
            access_token: "old".to_string(),
            user_info: Some(alice()),
        })?;
        store.store(&Credential {
            access_token: "new".to_string(),
            user_info: None,
        })?;
        assert_eq!(store.access_token().as_deref(), Some("new"));
        assert!(store.user_info().is_none());
        Ok(())
    }
}

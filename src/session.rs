//! Session state shared by the navigation guard and the response interceptor.
//!
//! [`SessionStore`] is the single handle through which both entry points
//! touch persisted session entries. The guard only calls
//! [`read`](SessionStore::read); the interceptor only calls
//! [`clear`](SessionStore::clear).

use serde::Deserialize;

use crate::profile::{UserProfile, UserType, VerificationRecord};
use crate::storage::Storage;

/// Storage keys holding the three session entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Presence-only authentication token
    pub token: String,
    /// JSON-encoded [`UserProfile`]
    pub user: String,
    /// JSON-encoded [`VerificationRecord`]
    pub verification: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "authToken".to_string(),
            user: "user".to_string(),
            verification: "verification_status".to_string(),
        }
    }
}

/// Immutable view of the session taken for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    /// Whether an authentication token is present
    pub is_authenticated: bool,
    /// Cached profile, if present and decodable
    pub user: Option<UserProfile>,
    /// Cached verification statuses; empty if absent or malformed
    pub verification: VerificationRecord,
}

impl SessionSnapshot {
    /// A snapshot with no token, no user and no verified documents.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the user's account type, if a profile is cached.
    pub fn user_type(&self) -> Option<UserType> {
        self.user.as_ref().map(|u| u.user_type)
    }
}

/// Handle over the persisted session entries.
///
/// # Example
///
/// ```
/// use ride_guard::{MemoryStorage, SessionStore, Storage};
///
/// let session = SessionStore::new(MemoryStorage::new());
/// assert!(!session.read().is_authenticated);
///
/// session.storage().set("authToken", "token-1");
/// assert!(session.read().is_authenticated);
///
/// session.clear();
/// assert!(!session.read().is_authenticated);
/// ```
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    keys: StorageKeys,
}

impl<S: Storage> SessionStore<S> {
    /// Creates a store using the default storage keys.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    /// Creates a store using custom storage keys.
    pub fn with_keys(storage: S, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// Returns the storage keys in use.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Returns the backing storage.
    ///
    /// Login and verification flows outside this crate write through this.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads a fresh snapshot. Never fails.
    ///
    /// A missing or empty token reads as unauthenticated. A profile that does
    /// not decode reads as absent, and a verification record that does not
    /// decode reads as empty.
    pub fn read(&self) -> SessionSnapshot {
        let is_authenticated = self
            .storage
            .get(&self.keys.token)
            .is_some_and(|token| !token.is_empty());

        let user = self.storage.get(&self.keys.user).and_then(|raw| {
            let decoded = UserProfile::from_json(&raw);
            if decoded.is_none() {
                tracing::debug!(key = %self.keys.user, "stored user profile did not decode");
            }
            decoded
        });

        let verification = match self.storage.get(&self.keys.verification) {
            Some(raw) => VerificationRecord::from_json(&raw),
            None => VerificationRecord::new(),
        };

        SessionSnapshot {
            is_authenticated,
            user,
            verification,
        }
    }

    /// Removes all three session entries. Safe to call on an empty session.
    pub fn clear(&self) {
        self.storage.remove(&self.keys.token);
        self.storage.remove(&self.keys.user);
        self.storage.remove(&self.keys.verification);
    }
}

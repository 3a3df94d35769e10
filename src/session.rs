//! Session credential ownership.
//!
//! The console holds one opaque bearer token for its whole lifetime. Rather
//! than ad hoc reads of ambient storage before every request, the token
//! lives in a [`Session`] that is threaded into the [`crate::client::ApiClient`]
//! at construction. Login fills it, logout clears it; every request reads
//! it synchronously. An empty session is not an error — the backend decides
//! authorization.

use std::sync::{Arc, RwLock};

/// Shared owner of the opaque bearer credential.
///
/// Cloning is cheap; clones observe the same token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// A session with no credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token obtained at login.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Drop the credential (logout).
    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    /// The current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    /// Whether a credential is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

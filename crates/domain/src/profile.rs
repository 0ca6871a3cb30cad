//! User profile — account data stored under `users/{uid}`.
//!
//! Fallbacks (username derived from the email, absent profile image) are
//! resolved once when the stored record is loaded, not re-derived at every
//! call site. A stored record may predate the profile-image feature, so the
//! image is an explicit `Option` end to end.

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};

/// The `users/{uid}` record as written to the keyed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    /// Durable download locator of the profile picture, if one was ever
    /// uploaded.
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

impl UserProfile {
    /// Resolve a loadable profile from what the store returned.
    ///
    /// A missing record, or a record with an empty username, falls back to
    /// the local part of the signed-in email. This is the only place the
    /// fallback is computed.
    #[must_use]
    pub fn resolve(stored: Option<Self>, email: &str) -> Self {
        let fallback_username = || email.split('@').next().unwrap_or(email).to_string();
        match stored {
            Some(mut profile) => {
                if profile.username.is_empty() {
                    profile.username = fallback_username();
                }
                profile
            }
            None => Self {
                username: fallback_username(),
                email: email.to_string(),
                profile_image: None,
            },
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when `username` is empty.
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.username.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Replace the stored image locator.
    #[must_use]
    pub fn with_image(mut self, locator: impl Into<String>) -> Self {
        self.profile_image = Some(locator.into());
        self
    }
}

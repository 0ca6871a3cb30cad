//! Account service — profile load/save and session teardown.

use lumen_domain::error::{AuthError, LumenError};
use lumen_domain::profile::UserProfile;

use crate::ports::{
    BlobStore, IdentityProvider, MediaPicker, PickedImage, Principal, ProfileRepository,
};

/// Application service for the signed-in user's account.
pub struct AccountService<I, P, B, M> {
    identity: I,
    profiles: P,
    blobs: B,
    picker: M,
}

impl<I, P, B, M> AccountService<I, P, B, M>
where
    I: IdentityProvider,
    P: ProfileRepository,
    B: BlobStore,
    M: MediaPicker,
{
    /// Create a new service backed by the given ports.
    pub fn new(identity: I, profiles: P, blobs: B, picker: M) -> Self {
        Self {
            identity,
            profiles,
            blobs,
            picker,
        }
    }

    /// The signed-in principal.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] when nobody is signed in, or a
    /// provider error.
    pub async fn principal(&self) -> Result<Principal, LumenError> {
        self.identity
            .current_user()
            .await?
            .ok_or_else(|| AuthError::NotSignedIn.into())
    }

    /// Load the signed-in user's profile, applying fallbacks exactly once.
    ///
    /// A missing record or empty username resolves to the email's local
    /// part; a missing image stays `None` for the caller to default.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Auth`] when nobody is signed in, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn load_profile(&self) -> Result<UserProfile, LumenError> {
        let principal = self.principal().await?;
        let stored = self.profiles.get(&principal.uid).await?;
        Ok(UserProfile::resolve(stored, &principal.email))
    }

    /// Let the user choose a new profile image. `None` means cancelled.
    ///
    /// # Errors
    ///
    /// Returns a provider error from the media picker.
    pub async fn pick_profile_image(&self) -> Result<Option<PickedImage>, LumenError> {
        self.picker.pick_image().await
    }

    /// Save the profile, uploading a newly picked image if there is one.
    ///
    /// An image-upload failure degrades rather than aborts: the previous
    /// image reference is kept and the rest of the record is still saved.
    /// The write is a full overwrite of `users/{uid}`.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for an empty username,
    /// [`LumenError::Auth`] when nobody is signed in, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self, new_image), fields(has_new_image = new_image.is_some()))]
    pub async fn save_profile(
        &self,
        username: String,
        new_image: Option<PickedImage>,
    ) -> Result<UserProfile, LumenError> {
        let principal = self.principal().await?;
        let current = UserProfile::resolve(
            self.profiles.get(&principal.uid).await?,
            &principal.email,
        );

        let profile_image = match new_image {
            Some(image) => {
                let key = format!("profile_pics/{}.jpg", principal.uid);
                match self.blobs.upload(&key, image.bytes).await {
                    Ok(locator) => Some(locator),
                    Err(err) => {
                        tracing::warn!(error = %err, %key, "image upload failed, keeping previous image");
                        current.profile_image
                    }
                }
            }
            None => current.profile_image,
        };

        let profile = UserProfile {
            username,
            email: principal.email,
            profile_image,
        };
        profile.validate()?;
        self.profiles.set(&principal.uid, profile).await
    }

    /// Sign the current user out.
    ///
    /// # Errors
    ///
    /// Returns a provider error from the identity provider.
    #[tracing::instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), LumenError> {
        self.identity.sign_out().await
    }
}

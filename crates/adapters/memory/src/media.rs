//! Fixed media picker — returns a preconfigured image, or cancels.

use lumen_app::ports::{MediaPicker, PickedImage};
use lumen_domain::error::LumenError;

/// Media picker that always yields the same image.
///
/// There is no user to ask in a headless process, so the choice is made
/// at construction time. [`FixedMediaPicker::cancelled`] models the user
/// backing out.
#[derive(Debug, Default, Clone)]
pub struct FixedMediaPicker {
    image: Option<PickedImage>,
}

impl FixedMediaPicker {
    /// A picker that yields `image` on every call.
    #[must_use]
    pub fn with_image(image: PickedImage) -> Self {
        Self { image: Some(image) }
    }

    /// A picker that always reports cancellation.
    #[must_use]
    pub fn cancelled() -> Self {
        Self { image: None }
    }
}

impl MediaPicker for FixedMediaPicker {
    async fn pick_image(&self) -> Result<Option<PickedImage>, LumenError> {
        Ok(self.image.clone())
    }
}

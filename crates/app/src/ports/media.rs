//! Media picker port — user-chosen local images.

use std::future::Future;

use lumen_domain::error::LumenError;

/// An image the user picked from local media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// Local resource locator (for display before upload).
    pub uri: String,
    /// Raw image bytes to upload.
    pub bytes: Vec<u8>,
}

/// Local media chooser.
pub trait MediaPicker {
    /// Let the user choose an image. `None` means they cancelled.
    fn pick_image(
        &self,
    ) -> impl Future<Output = Result<Option<PickedImage>, LumenError>> + Send;
}

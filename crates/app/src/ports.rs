//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod auth;
pub mod blob;
pub mod feed;
pub mod media;
pub mod storage;

pub use auth::{IdentityProvider, Principal};
pub use blob::BlobStore;
pub use feed::{ChangeEvent, ChangePublisher};
pub use media::{MediaPicker, PickedImage};
pub use storage::{DeviceRepository, LogStore, ProfileRepository};

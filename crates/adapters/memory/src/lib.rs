//! # lumen-adapter-memory
//!
//! In-memory implementations of every outbound port: keyed store
//! (devices, profiles, logs), blob store, identity provider, and media
//! picker. Backed by `tokio::sync::RwLock` maps so one instance can be
//! shared across handlers.
//!
//! Suited for demos and tests; nothing survives a restart.
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

mod blob;
mod identity;
mod media;
mod storage;

pub use blob::MemoryBlobStore;
pub use identity::StaticIdentity;
pub use media::FixedMediaPicker;
pub use storage::{MemoryDeviceRepository, MemoryLogStore, MemoryProfileRepository};

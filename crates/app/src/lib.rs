//! # lumen-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — point read/write on device records
//!   - `ProfileRepository` — read/overwrite of the `users/{uid}` record
//!   - `LogStore` — append & query the append-only usage log
//!   - `BlobStore` — upload and locator resolution for binary blobs
//!   - `IdentityProvider` — signed-in principal and sign-out
//!   - `MediaPicker` — user-chosen local image, or cancellation
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService` — device edits with save-time status snapshots
//!   - `AccountService` — profile load/save with resolve-once fallbacks
//!   - `ReportService` — formatted log rows and usage aggregation
//! - Provide **in-process infrastructure** (change feed) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `lumen-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod feed;
pub mod ports;
pub mod services;

//! # lumen-domain
//!
//! Pure domain model for the lumen smart-light system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Schedules** (on/off time windows with weekday recurrence) and
//!   the evaluator that derives a light's status from them
//! - Define **Devices** (smart lights in manual or automatic mode)
//! - Define **Log entries** (immutable usage records) and report aggregation
//! - Define **Profiles** (account data with resolve-once fallbacks)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod log;
pub mod profile;
pub mod report;
pub mod schedule;

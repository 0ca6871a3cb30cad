//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LumenError`]
//! via `#[from]`. Validation failures surface before any external write is
//! attempted; collaborator failures arrive as [`StorageError`] or
//! [`AuthError`] from the adapter in use.

/// Top-level error for the lumen workspace.
#[derive(Debug, thiserror::Error)]
pub enum LumenError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The identity provider failed or no principal is signed in.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A display name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// Automatic mode requires at least one selected day.
    #[error("automatic mode requires at least one selected day")]
    NoDaysSelected,

    /// Automatic mode requires a schedule with on/off times.
    #[error("automatic mode requires a schedule")]
    MissingSchedule,

    /// A time-of-day component was out of range.
    #[error("invalid time of day: {hour}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// A `H:MM` string could not be parsed.
    #[error("malformed time of day: {0:?}")]
    MalformedTime(String),

    /// The manual toggle was used on a device in automatic mode.
    #[error("manual toggle is not available in automatic mode")]
    NotManual,
}

/// A record lookup failed.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"Device"`.
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

/// Failure reported by the backing store adapter.
#[derive(Debug, thiserror::Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

/// Failure reported by the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No user is currently signed in.
    #[error("no signed-in user")]
    NotSignedIn,
    /// The provider rejected the operation.
    #[error("identity provider error: {0}")]
    Provider(String),
}

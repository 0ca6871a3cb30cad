//! Identity port — signed-in principal lookup and sign-out.

use std::future::Future;

use lumen_domain::error::LumenError;
use lumen_domain::id::Uid;

/// The signed-in user as reported by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable, externally assigned user identifier.
    pub uid: Uid,
    /// Email address the principal signed in with.
    pub email: String,
}

/// External identity provider.
pub trait IdentityProvider {
    /// The currently signed-in principal, or `None` when signed out.
    fn current_user(
        &self,
    ) -> impl Future<Output = Result<Option<Principal>, LumenError>> + Send;

    /// Terminate the current session.
    fn sign_out(&self) -> impl Future<Output = Result<(), LumenError>> + Send;
}

//! Static identity provider — one fixed principal per process.

use std::sync::Arc;

use lumen_app::ports::{IdentityProvider, Principal};
use lumen_domain::error::LumenError;
use lumen_domain::id::Uid;
use tokio::sync::RwLock;

/// Identity provider holding a single configured principal.
///
/// `sign_out` drops the session; there is no sign-in path, so a new
/// instance is needed to start a fresh session.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    session: Arc<RwLock<Option<Principal>>>,
}

impl StaticIdentity {
    /// A provider with the given user already signed in.
    #[must_use]
    pub fn signed_in(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(Principal {
                uid: Uid::new(uid),
                email: email.into(),
            }))),
        }
    }

    /// A provider with no session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Result<Option<Principal>, LumenError> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_out(&self) -> Result<(), LumenError> {
        let mut session = self.session.write().await;
        *session = None;
        Ok(())
    }
}

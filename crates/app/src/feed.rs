//! In-process change feed backed by a tokio broadcast channel.
//!
//! Subscribing returns an explicit [`Subscription`] handle; dropping the
//! handle is the one and only teardown path, so a subscriber cannot leak a
//! listener or tear the same one down twice.

use std::future::Future;

use tokio::sync::broadcast;

use lumen_domain::error::LumenError;

use crate::ports::{ChangeEvent, ChangePublisher};

/// In-process change feed using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the change is simply dropped).
pub struct InProcessFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl InProcessFeed {
    /// Create a new feed with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to changes published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ChangePublisher for InProcessFeed {
    fn publish(&self, event: ChangeEvent) -> impl Future<Output = Result<(), LumenError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — the change is simply dropped.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

/// Handle to a live feed subscription. Dropping it unsubscribes.
pub struct Subscription {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// The next change, or `None` once the feed has shut down.
    ///
    /// A subscriber that falls behind the channel capacity skips the
    /// overwritten changes and resumes with the oldest retained one.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "feed subscriber lagged, skipping changes");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

//! Change feed port — publish/subscribe for live record changes.

use std::future::Future;

use lumen_domain::device::Device;
use lumen_domain::error::LumenError;
use lumen_domain::log::LogEntry;

/// A change to a watched record, delivered to live subscribers.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    /// A device record was overwritten.
    DeviceUpdated(Device),
    /// A usage-log entry was appended.
    LogAppended(LogEntry),
}

/// Publishes record changes to interested subscribers.
pub trait ChangePublisher {
    /// Publish a change to all current subscribers.
    fn publish(&self, event: ChangeEvent) -> impl Future<Output = Result<(), LumenError>> + Send;
}

impl<T: ChangePublisher + Send + Sync> ChangePublisher for std::sync::Arc<T> {
    fn publish(&self, event: ChangeEvent) -> impl Future<Output = Result<(), LumenError>> + Send {
        (**self).publish(event)
    }
}

//! Change-notification plumbing
//!
//! # Overview
//!
//! Backends that can push "data changed" signals do so through a
//! [`ChangeNotifier`]: a listener is registered per resource identifier and
//! receives zero-payload events. The toolkit ships [`ChannelNotifier`], an
//! in-process implementation over a tokio broadcast channel; production
//! transports (webhooks, sockets) implement the same trait.
//!
//! Connect and disconnect are logged for observability only; the adapter
//! contract carries no obligation beyond invoking the callback once per
//! notification.

use crate::error::{Error, Result};
use crate::types::UpdateCallback;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};


/// Default broadcast capacity for [`ChannelNotifier`]
const DEFAULT_CAPACITY: usize = 64;

/// A zero-payload change event for one resource
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Identifier of the resource that changed
    pub resource: String,
    /// When the notifier accepted the event
    pub received_at: DateTime<Utc>,
}

/// Push-notification boundary: register a listener keyed by a resource
/// identifier.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Start listening for changes to `resource`, invoking `on_change`
    /// once per notification.
    ///
    /// The returned handle owns the listener; disposing (or dropping) it
    /// unregisters the listener.
    async fn subscribe(&self, resource: &str, on_change: UpdateCallback)
        -> Result<SubscriptionHandle>;
}

/// Handle to an active change subscription.
///
/// Exclusively owned by one backend adapter at a time. Disposal is
/// idempotent and also runs on drop, so an abandoned adapter cannot leak
/// its listener task.
pub struct SubscriptionHandle {
    resource: String,
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    /// The resource this subscription listens to
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Whether the listener is still installed
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Stop listening. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(resource = %self.resource, "subscription disposed");
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("resource", &self.resource)
            .field("active", &self.is_active())
            .finish()
    }
}

/// In-process notifier over a tokio broadcast channel.
///
/// [`notify`](ChannelNotifier::notify) fans one event out to every
/// subscriber of the matching resource.
pub struct ChannelNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChannelNotifier {
    /// Create a notifier with the default event capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a notifier holding up to `capacity` undelivered events
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a change event for `resource`.
    ///
    /// Returns the number of listeners that will observe it (zero when
    /// nobody is subscribed, which is not an error).
    pub fn notify(&self, resource: &str) -> usize {
        let event = ChangeEvent {
            resource: resource.to_string(),
            received_at: Utc::now(),
        };
        self.tx.send(event).unwrap_or(0)
    }

    /// Number of currently installed listeners (across all resources)
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeNotifier for ChannelNotifier {
    async fn subscribe(
        &self,
        resource: &str,
        on_change: UpdateCallback,
    ) -> Result<SubscriptionHandle> {
        if resource.is_empty() {
            return Err(Error::subscription("resource identifier is empty"));
        }

        let mut rx = self.tx.subscribe();
        let resource = resource.to_string();
        let listened = resource.clone();

        let task = tokio::spawn(async move {
            debug!(resource = %listened, "subscription connected");
            loop {
                match rx.recv().await {
                    Ok(event) if event.resource == listened => {
                        debug!(
                            resource = %listened,
                            received_at = %event.received_at,
                            "change notification"
                        );
                        on_change();
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Collapse the backlog into one callback.
                        warn!(resource = %listened, missed, "notifications lagged");
                        on_change();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            debug!(resource = %listened, "subscription disconnected");
        });

        Ok(SubscriptionHandle {
            resource,
            task: Some(task),
        })
    }
}

impl std::fmt::Debug for ChannelNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelNotifier")
            .field("listeners", &self.tx.receiver_count())
            .finish()
    }
}

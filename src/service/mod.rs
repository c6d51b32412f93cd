//! The paged data service contract
//!
//! # Overview
//!
//! [`PagedDataService`] is the capability set every backend adapter
//! implements: bidirectional page navigation, page-size changes, and a
//! direct total-count query. [`SubscribableDataService`] is the optional
//! second capability for backends that can push change notifications.
//!
//! Consumers discover the optional capability at runtime through
//! [`PagedDataService::as_subscribable`]; `None` simply means "this backend
//! has no live updates" and is never an error.

use crate::error::Result;
use crate::types::{Page, UpdateCallback};
use async_trait::async_trait;

#[cfg(test)]
mod tests;

/// Core contract for paged data backends.
///
/// `next` and `prev` deliberately return a well-formed (possibly empty)
/// page instead of a fault: adapter implementations swallow backend fetch
/// errors so the consumer always has something renderable. `total_count`
/// propagates faults — a failed count means "unknown total", which the
/// caller must handle.
#[async_trait]
pub trait PagedDataService<T>: Send + std::fmt::Debug {
    /// Move to the next page (or stay on the last one once the source is
    /// drained) and return it
    async fn next(&mut self) -> Page<T>;

    /// Move to the previous page, clamped at the first, and return it
    async fn prev(&mut self) -> Page<T>;

    /// Whether a further page is cached or might still be fetched
    fn has_next(&self) -> bool;

    /// Whether a previous page exists
    fn has_prev(&self) -> bool;

    /// 1-based current page number; 0 before the first fetch
    fn current_page(&self) -> usize;

    /// Change the page size.
    ///
    /// Discards the current cursor and cache entirely; navigation restarts
    /// before page 1. Position is never preserved across a size change.
    fn set_page_size(&mut self, size: usize);

    /// Total number of items in the backing source, via a direct count
    /// query (never derived from fetched pages)
    async fn total_count(&self) -> Result<u64>;

    /// Runtime capability query for change subscriptions.
    ///
    /// Default is `None`: the backend has no live updates.
    fn as_subscribable(&mut self) -> Option<&mut dyn SubscribableDataService> {
        None
    }
}

/// Optional capability: push-based change notification.
#[async_trait]
pub trait SubscribableDataService: Send {
    /// Register a callback invoked once per backend change notification.
    ///
    /// Replaces any previous subscription. Setup failure is propagated:
    /// the caller must treat it as "live updates unavailable".
    async fn setup_subscription(&mut self, on_update: UpdateCallback) -> Result<()>;

    /// Tear down the current subscription, if any. Idempotent.
    fn dispose_subscription(&mut self);
}

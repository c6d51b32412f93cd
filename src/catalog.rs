//! Memoized list catalog
//!
//! Configuration surfaces need the set of available lists (for pickers and
//! validation) far more often than that set changes, so the catalog is
//! process-scoped memoized state: loaded once, shared by every caller, and
//! refreshed only on explicit invalidation. Concurrent callers share a
//! single in-flight load.

use crate::error::Result;
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// One selectable list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInfo {
    /// Backend identifier of the list
    pub id: String,
    /// Display title
    pub title: String,
}

impl ListInfo {
    /// Create a list entry
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Process-scoped memoized list catalog.
///
/// Load failures are not cached: the next caller retries.
pub struct CatalogCache {
    state: Mutex<Option<Arc<Vec<ListInfo>>>>,
}

impl CatalogCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Return the cached catalog, loading it with `load` on first use.
    ///
    /// The lock is held across the load, so concurrent callers wait for
    /// one fetch instead of racing their own. Entries come back sorted by
    /// title.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<Vec<ListInfo>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ListInfo>>>,
    {
        let mut state = self.state.lock().await;
        if let Some(lists) = state.as_ref() {
            return Ok(lists.clone());
        }

        let mut lists = load().await?;
        lists.sort_by(|a, b| a.title.cmp(&b.title));
        debug!(lists = lists.len(), "list catalog loaded");

        let lists = Arc::new(lists);
        *state = Some(lists.clone());
        Ok(lists)
    }

    /// Drop the cached catalog; the next `get_or_load` fetches fresh
    pub async fn invalidate(&self) {
        *self.state.lock().await = None;
    }

    /// Invalidate and reload in one step
    pub async fn refresh<F, Fut>(&self, load: F) -> Result<Arc<Vec<ListInfo>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ListInfo>>>,
    {
        self.invalidate().await;
        self.get_or_load(load).await
    }

    /// Whether a catalog is currently cached
    pub async fn is_loaded(&self) -> bool {
        self.state.lock().await.is_some()
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-global catalog instance
pub static CATALOG: Lazy<CatalogCache> = Lazy::new(CatalogCache::new);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Vec<ListInfo> {
        vec![
            ListInfo::new("b", "Invoices"),
            ListInfo::new("a", "Tasks"),
            ListInfo::new("c", "Archive"),
        ]
    }

    #[tokio::test]
    async fn test_load_once_and_sort() {
        let cache = CatalogCache::new();
        let loads = AtomicUsize::new(0);

        let lists = cache
            .get_or_load(|| async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(sample())
            })
            .await
            .unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        let titles: Vec<&str> = lists.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Archive", "Invoices", "Tasks"]);

        // Second call is a cache hit.
        let again = cache
            .get_or_load(|| async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            })
            .await
            .unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(lists, again);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = CatalogCache::new();

        let err = cache
            .get_or_load(|| async { Err(Error::config("backend down")) })
            .await;
        assert!(err.is_err());
        assert!(!cache.is_loaded().await);

        let lists = cache.get_or_load(|| async { Ok(sample()) }).await.unwrap();
        assert_eq!(lists.len(), 3);
        assert!(cache.is_loaded().await);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache = CatalogCache::new();
        let loads = AtomicUsize::new(0);

        let load = || {
            loads.fetch_add(1, Ordering::SeqCst);
            async { Ok(vec![ListInfo::new("a", "Tasks")]) }
        };

        cache.get_or_load(load).await.unwrap();
        cache.invalidate().await;
        assert!(!cache.is_loaded().await);

        cache.get_or_load(load).await.unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh() {
        let cache = CatalogCache::new();
        cache
            .get_or_load(|| async { Ok(vec![ListInfo::new("a", "Old")]) })
            .await
            .unwrap();

        let fresh = cache
            .refresh(|| async { Ok(vec![ListInfo::new("a", "New")]) })
            .await
            .unwrap();
        assert_eq!(fresh[0].title, "New");
    }
}

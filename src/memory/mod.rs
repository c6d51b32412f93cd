//! In-memory backend adapter
//!
//! A paged data service over a fixed JSON item set, chunked into pages of
//! the configured size. Useful for demos and tests: the factory can hand
//! out a fully functional service with no network behind it. The
//! subscription capability works through the same notifier seam as the
//! REST backend.

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::notify::{ChangeNotifier, SubscriptionHandle};
use crate::pager::AsyncPager;
use crate::service::{PagedDataService, SubscribableDataService};
use crate::types::{Page, PageStream, UpdateCallback};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;


/// Fallback resource identifier for subscriptions
const DEFAULT_RESOURCE: &str = "memory";

/// Paged data service over a fixed in-memory item set
pub struct MemoryListService<T> {
    items: Arc<Vec<Value>>,
    resource: String,
    page_size: usize,
    pager: AsyncPager<T>,
    notifier: Option<Arc<dyn ChangeNotifier>>,
    subscription: Option<SubscriptionHandle>,
}

impl<T> MemoryListService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Create a service over `items`, `page_size` items per page
    pub fn new(
        items: Vec<Value>,
        page_size: usize,
        notifier: Option<Arc<dyn ChangeNotifier>>,
    ) -> Self {
        let items = Arc::new(items);
        let pager = AsyncPager::new(build_source(items.clone(), page_size));
        Self {
            items,
            resource: DEFAULT_RESOURCE.to_string(),
            page_size,
            pager,
            notifier,
            subscription: None,
        }
    }

    /// Create a service from a declarative [`ServiceConfig`]
    pub fn from_config(
        config: &ServiceConfig,
        notifier: Option<Arc<dyn ChangeNotifier>>,
    ) -> Result<Self> {
        let items = config
            .items
            .as_ref()
            .ok_or_else(|| Error::missing_field("items"))?;

        let mut service = Self::new(items.clone(), config.query.page_size, notifier);
        if let Some(path) = &config.list_path {
            service.resource = path.clone();
        }
        Ok(service)
    }

    /// The resource identifier used for change subscriptions
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

/// Chunk the item set into pages; decode failures surface on the page
/// that contains the offending item.
fn build_source<T>(items: Arc<Vec<Value>>, page_size: usize) -> PageStream<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let pages: Vec<Result<Page<T>>> = items
        .chunks(page_size.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .cloned()
                .map(|v| serde_json::from_value(v).map_err(Error::from))
                .collect::<Result<Vec<T>>>()
                .map(Page::new)
        })
        .collect();

    Box::pin(futures::stream::iter(pages))
}

#[async_trait]
impl<T> PagedDataService<T> for MemoryListService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn next(&mut self) -> Page<T> {
        match self.pager.advance().await {
            Ok(page) => page,
            Err(e) => {
                warn!(resource = %self.resource, error = %e, "page decode failed, returning empty page");
                Page::empty()
            }
        }
    }

    async fn prev(&mut self) -> Page<T> {
        self.pager.retreat()
    }

    fn has_next(&self) -> bool {
        self.pager.has_next()
    }

    fn has_prev(&self) -> bool {
        self.pager.has_prev()
    }

    fn current_page(&self) -> usize {
        self.pager.current_page_number()
    }

    fn set_page_size(&mut self, size: usize) {
        self.page_size = size;
        self.pager = AsyncPager::new(build_source(self.items.clone(), size));
    }

    async fn total_count(&self) -> Result<u64> {
        Ok(self.items.len() as u64)
    }

    fn as_subscribable(&mut self) -> Option<&mut dyn SubscribableDataService> {
        if self.notifier.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

#[async_trait]
impl<T> SubscribableDataService for MemoryListService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn setup_subscription(&mut self, on_update: UpdateCallback) -> Result<()> {
        let notifier = self
            .notifier
            .as_ref()
            .ok_or_else(|| Error::subscription("backend has no change notifier"))?
            .clone();

        self.dispose_subscription();
        let handle = notifier.subscribe(&self.resource, on_update).await?;
        self.subscription = Some(handle);
        Ok(())
    }

    fn dispose_subscription(&mut self) {
        if let Some(mut handle) = self.subscription.take() {
            handle.dispose();
        }
    }
}

impl<T> std::fmt::Debug for MemoryListService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryListService")
            .field("resource", &self.resource)
            .field("items", &self.items.len())
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

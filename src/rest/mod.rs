//! REST list backend adapter
//!
//! # Overview
//!
//! [`RestListService`] implements the paged service contract over an
//! offset-paged list endpoint: the configured query (filter, ordering,
//! page size, current-user scoping) becomes query parameters, each pull of
//! the page source fetches one page at the next offset, and the total
//! comes from a separate count endpoint.
//!
//! `next` and `prev` swallow backend faults into an empty page (logged at
//! warn); `total_count` and subscription setup propagate theirs.

use crate::config::ServiceConfig;
use crate::decode::{extract_count, extract_records};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::notify::{ChangeNotifier, SubscriptionHandle};
use crate::pager::AsyncPager;
use crate::query::ListQuery;
use crate::service::{PagedDataService, SubscribableDataService};
use crate::types::{Page, PageStream, UpdateCallback};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};


/// Runtime configuration for a REST list service
#[derive(Clone)]
pub struct RestListConfig {
    /// Transport configuration (base URL, headers, retry budget)
    pub http: HttpClientConfig,
    /// Path of the list endpoint
    pub list_path: String,
    /// Path of the count endpoint
    pub count_path: String,
    /// Dot path to the record array in list responses
    pub record_path: String,
    /// Dot path to the total in count responses (bare number when unset)
    pub total_path: Option<String>,
    /// The paged query
    pub query: ListQuery,
    /// Change notifier; enables the subscription capability
    pub notifier: Option<Arc<dyn ChangeNotifier>>,
}

/// Paged data service over an offset-paged REST list endpoint
pub struct RestListService<T> {
    client: HttpClient,
    list_path: String,
    count_path: String,
    record_path: String,
    total_path: Option<String>,
    query: ListQuery,
    pager: AsyncPager<T>,
    notifier: Option<Arc<dyn ChangeNotifier>>,
    subscription: Option<SubscriptionHandle>,
}

impl<T> RestListService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Create a service from runtime configuration
    pub fn new(config: RestListConfig) -> Self {
        let client = HttpClient::with_config(config.http);
        let pager = AsyncPager::new(build_source(
            client.clone(),
            config.list_path.clone(),
            config.record_path.clone(),
            config.query.clone(),
        ));

        Self {
            client,
            list_path: config.list_path,
            count_path: config.count_path,
            record_path: config.record_path,
            total_path: config.total_path,
            query: config.query,
            pager,
            notifier: config.notifier,
            subscription: None,
        }
    }

    /// Create a service from a declarative [`ServiceConfig`]
    pub fn from_config(
        config: &ServiceConfig,
        notifier: Option<Arc<dyn ChangeNotifier>>,
    ) -> Result<Self> {
        let base_url = config
            .base_url
            .as_ref()
            .ok_or_else(|| Error::missing_field("base_url"))?;
        let list_path = config
            .list_path
            .as_ref()
            .ok_or_else(|| Error::missing_field("list_path"))?;
        let count_path = config
            .effective_count_path()
            .ok_or_else(|| Error::missing_field("list_path"))?;

        let mut http = HttpClientConfig::default().base_url(base_url.clone());
        http.default_headers = config.headers.clone();

        Ok(Self::new(RestListConfig {
            http,
            list_path: list_path.clone(),
            count_path,
            record_path: config.record_path.clone(),
            total_path: config.total_path.clone(),
            query: config.query.to_list_query()?,
            notifier,
        }))
    }

    /// Rebuild the pager over a fresh source (used after query changes)
    fn rebuild_pager(&mut self) {
        self.pager = AsyncPager::new(build_source(
            self.client.clone(),
            self.list_path.clone(),
            self.record_path.clone(),
            self.query.clone(),
        ));
    }
}

/// Build the forward-only page source for one cursor.
///
/// Each pull fetches one page at the running offset. A short page marks
/// the end of the list; a fetch or decode error is yielded once and then
/// the source completes (forward-only sources cannot rewind past a fault).
fn build_source<T>(
    client: HttpClient,
    list_path: String,
    record_path: String,
    query: ListQuery,
) -> PageStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    struct FetchState {
        client: HttpClient,
        list_path: String,
        record_path: String,
        query: ListQuery,
        skip: usize,
        done: bool,
    }

    let state = FetchState {
        client,
        list_path,
        record_path,
        query,
        skip: 0,
        done: false,
    };

    Box::pin(futures::stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }

        let fetch = async {
            let request = RequestConfig::new().queries(state.query.page_params(state.skip));
            let body: Value = state.client.get_json(&state.list_path, request).await?;
            let records = extract_records(&body, &state.record_path)?;
            records
                .into_iter()
                .map(|r| serde_json::from_value(r).map_err(Error::from))
                .collect::<Result<Vec<T>>>()
        };

        match fetch.await {
            Ok(items) if items.is_empty() => None,
            Ok(items) => {
                debug!(
                    path = %state.list_path,
                    skip = state.skip,
                    items = items.len(),
                    "fetched list page"
                );
                state.done = items.len() < state.query.page_size;
                state.skip += items.len();
                Some((Ok(Page::new(items)), state))
            }
            Err(e) => {
                state.done = true;
                Some((Err(e), state))
            }
        }
    }))
}

#[async_trait]
impl<T> PagedDataService<T> for RestListService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn next(&mut self) -> Page<T> {
        match self.pager.advance().await {
            Ok(page) => page,
            Err(e) => {
                warn!(path = %self.list_path, error = %e, "page fetch failed, returning empty page");
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
        self.query.page_size = size;
        // The old cursor and its cache are discarded, not reused.
        self.rebuild_pager();
    }

    async fn total_count(&self) -> Result<u64> {
        let request = RequestConfig::new().queries(self.query.count_params());
        let body: Value = self.client.get_json(&self.count_path, request).await?;
        extract_count(&body, self.total_path.as_deref())
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
impl<T> SubscribableDataService for RestListService<T>
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
        let handle = notifier.subscribe(&self.list_path, on_update).await?;
        self.subscription = Some(handle);
        Ok(())
    }

    fn dispose_subscription(&mut self) {
        if let Some(mut handle) = self.subscription.take() {
            handle.dispose();
        }
    }
}

impl<T> std::fmt::Debug for RestListService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestListService")
            .field("list_path", &self.list_path)
            .field("page_size", &self.query.page_size)
            .field("current_page", &self.pager.current_page_number())
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

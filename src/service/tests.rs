//! Tests for the service contract

use super::*;
use crate::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Minimal backend with no subscription capability
#[derive(Debug)]
struct PlainService {
    page: usize,
}

#[async_trait]
impl PagedDataService<u32> for PlainService {
    async fn next(&mut self) -> Page<u32> {
        self.page += 1;
        Page::new(vec![self.page as u32])
    }

    async fn prev(&mut self) -> Page<u32> {
        self.page = self.page.saturating_sub(1).max(1);
        Page::new(vec![self.page as u32])
    }

    fn has_next(&self) -> bool {
        true
    }

    fn has_prev(&self) -> bool {
        self.page > 1
    }

    fn current_page(&self) -> usize {
        self.page
    }

    fn set_page_size(&mut self, _size: usize) {
        self.page = 0;
    }

    async fn total_count(&self) -> Result<u64> {
        Err(Error::count("no backing store"))
    }
}

/// Backend that also supports subscriptions
#[derive(Debug)]
struct PushService {
    inner: PlainService,
    subscribed: bool,
    disposals: Arc<AtomicUsize>,
}

#[async_trait]
impl PagedDataService<u32> for PushService {
    async fn next(&mut self) -> Page<u32> {
        self.inner.next().await
    }

    async fn prev(&mut self) -> Page<u32> {
        self.inner.prev().await
    }

    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn has_prev(&self) -> bool {
        self.inner.has_prev()
    }

    fn current_page(&self) -> usize {
        self.inner.current_page()
    }

    fn set_page_size(&mut self, size: usize) {
        self.inner.set_page_size(size);
    }

    async fn total_count(&self) -> Result<u64> {
        Ok(42)
    }

    fn as_subscribable(&mut self) -> Option<&mut dyn SubscribableDataService> {
        Some(self)
    }
}

#[async_trait]
impl SubscribableDataService for PushService {
    async fn setup_subscription(&mut self, on_update: UpdateCallback) -> Result<()> {
        self.subscribed = true;
        on_update();
        Ok(())
    }

    fn dispose_subscription(&mut self) {
        if self.subscribed {
            self.subscribed = false;
        }
        self.disposals.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_capability_absent_by_default() {
    let mut service: Box<dyn PagedDataService<u32>> = Box::new(PlainService { page: 0 });
    assert!(service.as_subscribable().is_none());
}

#[tokio::test]
async fn test_capability_present_when_implemented() {
    let disposals = Arc::new(AtomicUsize::new(0));
    let mut service: Box<dyn PagedDataService<u32>> = Box::new(PushService {
        inner: PlainService { page: 0 },
        subscribed: false,
        disposals: disposals.clone(),
    });

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let sub = service.as_subscribable().expect("push backend");
    sub.setup_subscription(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }))
    .await
    .unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Disposal is idempotent: calling twice is safe.
    sub.dispose_subscription();
    sub.dispose_subscription();
    assert_eq!(disposals.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_trait_object_navigation() {
    let mut service: Box<dyn PagedDataService<u32>> = Box::new(PlainService { page: 0 });
    let page = service.next().await;
    assert_eq!(page.items(), &[1]);
    assert_eq!(service.current_page(), 1);
    assert!(service.total_count().await.is_err());
}

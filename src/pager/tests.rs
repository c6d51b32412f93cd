//! Tests for the lazy page cache

use super::*;
use crate::error::Error;
use crate::types::{Page, PageStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a page source from fixed batches
fn source_of(batches: Vec<Vec<&'static str>>) -> PageStream<&'static str> {
    Box::pin(futures::stream::iter(
        batches.into_iter().map(|b| Ok(Page::new(b))),
    ))
}

/// Page source that counts how many times it is pulled
fn counting_source(
    batches: Vec<Vec<&'static str>>,
) -> (PageStream<&'static str>, Arc<AtomicUsize>) {
    let pulls = Arc::new(AtomicUsize::new(0));
    let counter = pulls.clone();
    let stream = futures::stream::iter(batches).map(move |b| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Page::new(b))
    });
    (Box::pin(stream), pulls)
}

// ============================================================================
// Fresh pager
// ============================================================================

#[tokio::test]
async fn test_fresh_pager_state() {
    let pager = AsyncPager::new(source_of(vec![vec!["a"]]));
    assert_eq!(pager.current_page_number(), 0);
    assert!(pager.has_next());
    assert!(!pager.has_prev());
    assert!(pager.current().is_empty());
    assert_eq!(pager.cached_pages(), 0);
}

#[tokio::test]
async fn test_retreat_before_first_advance() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"]]));
    let page = pager.retreat();
    assert!(page.is_empty());
    assert!(!pager.has_prev());
    assert_eq!(pager.current_page_number(), 0);
}

// ============================================================================
// Forward traversal
// ============================================================================

#[tokio::test]
async fn test_advance_walks_pages_in_order() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a", "b"], vec!["c", "d"]]));

    let first = pager.advance().await.unwrap();
    assert_eq!(first.items(), &["a", "b"]);
    assert_eq!(pager.current_page_number(), 1);
    assert!(!pager.has_prev());

    let second = pager.advance().await.unwrap();
    assert_eq!(second.items(), &["c", "d"]);
    assert_eq!(pager.current_page_number(), 2);
    assert!(pager.has_prev());
}

#[tokio::test]
async fn test_spec_scenario_three_pages() {
    // Source yields [[a,b],[c,d],[e]] then completes.
    let mut pager = AsyncPager::new(source_of(vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]));

    assert_eq!(pager.advance().await.unwrap().items(), &["a", "b"]);
    assert_eq!(pager.advance().await.unwrap().items(), &["c", "d"]);
    assert_eq!(pager.advance().await.unwrap().items(), &["e"]);

    // Exhaustion is discovered lazily, so has_next stays optimistic here.
    assert!(pager.has_next());

    // 4th advance: exhaustion reached, cursor parks on the last page.
    assert_eq!(pager.advance().await.unwrap().items(), &["e"]);
    assert!(!pager.has_next());
    assert_eq!(pager.current_page_number(), 3);

    let back = pager.retreat();
    assert_eq!(back.items(), &["c", "d"]);
    assert_eq!(pager.current_page_number(), 2);
}

#[tokio::test]
async fn test_empty_source() {
    // Source yields zero pages then completes immediately.
    let mut pager = AsyncPager::new(source_of(vec![]));

    let page = pager.advance().await.unwrap();
    assert!(page.is_empty());
    assert!(!pager.has_next());
    assert!(!pager.has_prev());
    assert_eq!(pager.current_page_number(), 0);
}

// ============================================================================
// Exhaustion
// ============================================================================

#[tokio::test]
async fn test_exhaustion_is_monotonic() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"]]));
    pager.advance().await.unwrap();

    for _ in 0..5 {
        let page = pager.advance().await.unwrap();
        assert_eq!(page.items(), &["a"]);
        assert_eq!(pager.current_page_number(), 1);
    }
    assert!(pager.is_exhausted());
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_has_next_after_drain_and_retreat() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"], vec!["b"]]));
    pager.advance().await.unwrap();
    pager.advance().await.unwrap();
    pager.advance().await.unwrap(); // discovers exhaustion
    assert!(!pager.has_next());

    // A cached page beyond the cursor still counts as "next".
    pager.retreat();
    assert!(pager.has_next());
    assert_eq!(pager.advance().await.unwrap().items(), &["b"]);
    assert!(!pager.has_next());
}

// ============================================================================
// Cache behavior
// ============================================================================

#[tokio::test]
async fn test_revisit_never_pulls_source() {
    let (source, pulls) = counting_source(vec![vec!["a"], vec!["b"], vec!["c"]]);
    let mut pager = AsyncPager::new(source);

    pager.advance().await.unwrap();
    pager.advance().await.unwrap();
    pager.advance().await.unwrap();
    assert_eq!(pulls.load(Ordering::SeqCst), 3);

    // Walk back and forth over cached pages.
    pager.retreat();
    pager.retreat();
    pager.advance().await.unwrap();
    pager.advance().await.unwrap();
    pager.retreat();
    assert_eq!(pulls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_advance_then_retreat_round_trip() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"], vec!["b"], vec!["c"]]));

    pager.advance().await.unwrap();
    let before = pager.current();
    let advanced = pager.advance().await.unwrap();
    assert_ne!(before, advanced);

    let back = pager.retreat();
    assert_eq!(back, before);
    assert_eq!(pager.current(), before);
}

#[tokio::test]
async fn test_retreat_clamps_at_first_page() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"], vec!["b"]]));
    pager.advance().await.unwrap();
    pager.advance().await.unwrap();

    pager.retreat();
    assert_eq!(pager.current_page_number(), 1);

    // Already on the first page: retreat stays put and re-returns it.
    let page = pager.retreat();
    assert_eq!(page.items(), &["a"]);
    assert_eq!(pager.current_page_number(), 1);
    assert!(!pager.has_prev());
}

#[tokio::test]
async fn test_has_prev_iff_page_number_above_one() {
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"], vec!["b"], vec!["c"]]));
    assert_eq!(pager.has_prev(), pager.current_page_number() > 1);

    for _ in 0..4 {
        pager.advance().await.unwrap();
        assert_eq!(pager.has_prev(), pager.current_page_number() > 1);
    }
    for _ in 0..4 {
        pager.retreat();
        assert_eq!(pager.has_prev(), pager.current_page_number() > 1);
    }
}

// ============================================================================
// Fetch errors
// ============================================================================

#[tokio::test]
async fn test_fetch_error_propagates_and_preserves_cursor() {
    let stream = futures::stream::iter(vec![
        Ok(Page::new(vec!["a"])),
        Err(Error::http_status(500, "boom")),
        Ok(Page::new(vec!["b"])),
    ]);
    let mut pager: AsyncPager<&str> = AsyncPager::new(Box::pin(stream));

    assert_eq!(pager.advance().await.unwrap().items(), &["a"]);

    let err = pager.advance().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));

    // Cursor and cache untouched: still on page 1, retry pulls the next item.
    assert_eq!(pager.current_page_number(), 1);
    assert_eq!(pager.cached_pages(), 1);
    assert_eq!(pager.advance().await.unwrap().items(), &["b"]);
    assert_eq!(pager.current_page_number(), 2);
}

#[test]
fn test_pager_debug_omits_source() {
    let pager = AsyncPager::new(source_of(vec![vec!["a"]]));
    let dbg = format!("{pager:?}");
    assert!(dbg.contains("cursor"));
    assert!(dbg.contains("exhausted"));
}

#[test]
fn test_block_on_advance() {
    // The pager does not require a multi-thread runtime.
    let mut pager = AsyncPager::new(source_of(vec![vec!["a"]]));
    let page = tokio_test::block_on(pager.advance()).unwrap();
    assert_eq!(page.items(), &["a"]);
}

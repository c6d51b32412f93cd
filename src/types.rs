//! Common types used throughout pagerkit
//!
//! This module contains the page type, the page-stream alias consumed by
//! the pager, and small shared enums and callbacks.

use crate::error::Result;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;

// ============================================================================
// Page
// ============================================================================

/// A bounded, ordered batch of items returned by one fetch.
///
/// Pages are produced once and then immutable; clones share the underlying
/// item buffer, so handing a page to a caller never copies items.
#[derive(Debug)]
pub struct Page<T> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for Page<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Page<T> {
    /// Create a page from a batch of items
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// The empty page, returned whenever a cursor has nothing to show
    pub fn empty() -> Self {
        Self {
            items: Arc::new(Vec::new()),
        }
    }

    /// Items in this page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for Page<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> From<Vec<T>> for Page<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Page stream
// ============================================================================

/// A forward-only asynchronous producer of pages.
///
/// Single pass: the stream ending is the explicit "no more pages" signal.
/// The pager is the sole consumer advancing it.
pub type PageStream<T> = Pin<Box<dyn Stream<Item = Result<Page<T>>> + Send + Sync>>;

// ============================================================================
// Update callback
// ============================================================================

/// Zero-payload change notification callback.
///
/// The contract is "something changed, re-fetch if you care" — invoked
/// exactly once per notification, never with a diff.
pub type UpdateCallback = Arc<dyn Fn() + Send + Sync>;

// ============================================================================
// Sort direction
// ============================================================================

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order
    #[default]
    Ascending,
    /// Descending order
    Descending,
}

impl SortDirection {
    /// True for descending order
    pub fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_basics() {
        let page = Page::new(vec![1, 2, 3]);
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert_eq!(page.items(), &[1, 2, 3]);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<String> = Page::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_page_clone_shares_items() {
        let page = Page::new(vec!["a", "b"]);
        let clone = page.clone();
        assert_eq!(page, clone);
        assert!(std::ptr::eq(page.items().as_ptr(), clone.items().as_ptr()));
    }

    #[test]
    fn test_sort_direction_serde() {
        let dir: SortDirection = serde_json::from_str("\"descending\"").unwrap();
        assert!(dir.is_descending());
        assert!(!SortDirection::default().is_descending());
    }
}

//! The lazy page cache
//!
//! # Overview
//!
//! [`AsyncPager`] adapts a forward-only asynchronous page source into a
//! bidirectional cursor. Every page pulled from the source is appended to
//! an internal cache, so revisiting an already-seen page is a pure cache
//! hit and never touches the source again. The source is forward-only and
//! single-pass; the pager is its exclusive consumer.
//!
//! The cursor starts *before* the first page ([`AsyncPager::current_page_number`]
//! returns 0). Advancing past the end of the source is a no-op, not an
//! error: the cursor parks on the last real page and keeps returning it.

use crate::error::Result;
use crate::types::{Page, PageStream};
use futures::StreamExt;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Bidirectional page cursor over a forward-only asynchronous source.
///
/// The cache is append-only: pages are never re-ordered or dropped for the
/// lifetime of the pager. Exhaustion is monotonic: once the source reports
/// completion the flag never reverts.
///
/// Only [`advance`](AsyncPager::advance) can suspend. Exclusive access via
/// `&mut self` rules out overlapping advances on the same pager.
pub struct AsyncPager<T> {
    source: PageStream<T>,
    pages: Vec<Page<T>>,
    /// Cursor into `pages`; `None` means "before the first page".
    cursor: Option<usize>,
    exhausted: bool,
}

impl<T> AsyncPager<T> {
    /// Create a pager over a page source
    pub fn new(source: PageStream<T>) -> Self {
        Self {
            source,
            pages: Vec::new(),
            cursor: None,
            exhausted: false,
        }
    }

    /// Move the cursor one step forward.
    ///
    /// Cache hits return instantly. On a cache miss the source is pulled
    /// once; if it reports completion the cursor stays on the last real
    /// page and the pager is marked exhausted. Out of range resolves to an
    /// empty page, never an error.
    ///
    /// A source fetch error is propagated with the cursor and cache
    /// untouched, so the same step can be retried.
    pub async fn advance(&mut self) -> Result<Page<T>> {
        let next = self.cursor.map_or(0, |i| i + 1);

        if let Some(page) = self.pages.get(next) {
            debug!(page = next + 1, "page cache hit");
            self.cursor = Some(next);
            return Ok(page.clone());
        }

        if !self.exhausted {
            match self.source.next().await {
                Some(Ok(page)) => {
                    debug!(page = next + 1, items = page.len(), "fetched page");
                    self.pages.push(page.clone());
                    self.cursor = Some(next);
                    return Ok(page);
                }
                Some(Err(e)) => return Err(e),
                None => {
                    debug!(pages = self.pages.len(), "source exhausted");
                    self.exhausted = true;
                }
            }
        }

        Ok(self.current())
    }

    /// Move the cursor one step back, clamped at the first page.
    ///
    /// Never suspends: retreating only ever lands on cached pages. Before
    /// the first page (or on it) this returns the first cached page, or an
    /// empty page while the cache is still empty.
    pub fn retreat(&mut self) -> Page<T> {
        match self.cursor {
            Some(i) if i >= 1 => {
                self.cursor = Some(i - 1);
                self.pages[i - 1].clone()
            }
            _ => self.pages.first().cloned().unwrap_or_default(),
        }
    }

    /// The page under the cursor, or an empty page before the first fetch
    pub fn current(&self) -> Page<T> {
        self.cursor
            .and_then(|i| self.pages.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// 1-based page number for display; 0 before any page has been fetched
    pub fn current_page_number(&self) -> usize {
        self.cursor.map_or(0, |i| i + 1)
    }

    /// Whether a further page is cached or might still be fetched.
    ///
    /// Intentionally optimistic: this can report `true` even when the next
    /// [`advance`](AsyncPager::advance) immediately discovers exhaustion.
    pub fn has_next(&self) -> bool {
        self.cursor.map_or(0, |i| i + 1) < self.pages.len() || !self.exhausted
    }

    /// Whether the cursor can move back
    pub fn has_prev(&self) -> bool {
        self.cursor.is_some_and(|i| i > 0)
    }

    /// Number of pages fetched so far
    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    /// Whether the source has been fully drained
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<T> std::fmt::Debug for AsyncPager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncPager")
            .field("cursor", &self.cursor)
            .field("cached_pages", &self.pages.len())
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

//! Page struct and methods for pagination responses.

use crate::constants::{HEADER_NEXT_CURSOR, HEADER_PREV_CURSOR, HEADER_TOTAL};

/// One page of rows plus the cursors to continue from it.
///
/// Rows are always in the query's natural order, whatever the traversal
/// direction of the request.
///
/// # Example
///
/// ```
/// use cursor_paginate::Page;
///
/// let page = Page {
///     items: vec![1, 2],
///     next_cursor: Some("abc".to_string()),
///     prev_cursor: None,
///     total_count: Some(6),
/// };
/// assert!(page.has_next());
/// assert!(!page.has_prev());
/// assert_eq!(
///     page.headers(),
///     vec![("X-Next-Cursor", "abc".to_string()), ("X-Total", "6".to_string())]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows of this page.
    pub items: Vec<T>,
    /// Cursor to fetch the following page.
    pub next_cursor: Option<String>,
    /// Cursor to fetch the preceding page.
    pub prev_cursor: Option<String>,
    /// Total row count, when requested.
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// Whether there are rows after this page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether there are rows before this page.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.prev_cursor.is_some()
    }

    /// Number of rows on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the rows, keeping cursors and total.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            prev_cursor: self.prev_cursor,
            total_count: self.total_count,
        }
    }

    /// Take the rows.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Response headers for hosts that surface pagination out of band.
    ///
    /// Only present values are emitted.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(3);
        if let Some(next) = &self.next_cursor {
            headers.push((HEADER_NEXT_CURSOR, next.clone()));
        }
        if let Some(prev) = &self.prev_cursor {
            headers.push((HEADER_PREV_CURSOR, prev.clone()));
        }
        if let Some(total) = self.total_count {
            headers.push((HEADER_TOTAL, total.to_string()));
        }
        headers
    }
}

//! Error types for pagination requests.
//!
//! Every failure aborts the whole request: the resolver only reads, so there
//! is no partial page to return. Hosts map errors to HTTP responses with
//! [`PaginateError::status_code`].

use thiserror::Error;

use crate::pagination::CursorError;

/// Boxed error reported by a [`PageSource`](crate::PageSource).
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`paginate`](crate::paginate) and by request option parsing.
///
/// # Example
///
/// ```
/// use cursor_paginate::{PaginateError, PaginateOptions};
///
/// let err = PaginateOptions::builder().per_page(0).build().unwrap_err();
/// assert!(matches!(err, PaginateError::InvalidPerPage { .. }));
/// assert!(err.is_client_error());
/// assert_eq!(err.status_code(), 400);
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaginateError {
    /// The cursor token could not be decoded.
    #[error("malformed cursor: {0}")]
    MalformedCursor(#[from] CursorError),

    /// The cursor decoded, but its fields disagree with the query's order.
    #[error("cursor fields {found:?} do not match order columns {expected:?}")]
    CursorMismatch {
        /// Order columns of the query, in order.
        expected: Vec<String>,
        /// Field names carried by the cursor, in order.
        found: Vec<String>,
    },

    /// The query has no order and no primary key to fall back on.
    #[error("query has no order and no primary key to order by")]
    EmptyOrderSpec,

    /// `per_page` is not a positive integer or exceeds the allowed maximum.
    #[error("invalid per_page '{value}'")]
    InvalidPerPage {
        /// The rejected value as supplied.
        value: String,
    },

    /// `direction` is neither `forward` nor `backward`.
    #[error("invalid direction '{value}' (expected 'forward' or 'backward')")]
    InvalidDirection {
        /// The rejected value as supplied.
        value: String,
    },

    /// A boolean request flag could not be parsed.
    #[error("invalid value '{value}' for flag '{name}'")]
    InvalidFlag {
        /// Parameter name.
        name: &'static str,
        /// The rejected value as supplied.
        value: String,
    },

    /// A fetched row lacks one of the order columns, so no cursor can be built.
    #[error("row has no value for order column '{column}'")]
    MissingColumn {
        /// The column that was missing.
        column: String,
    },

    /// A boundary row's order values do not fit in a cursor token.
    #[error("cannot issue cursor: {0}")]
    CursorOverflow(#[source] CursorError),

    /// The underlying query failed.
    #[error("query source failed: {0}")]
    Source(#[source] SourceError),
}

impl PaginateError {
    /// Wrap a failure reported by the query layer.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }

    /// Returns `true` if the request itself was at fault.
    ///
    /// Includes `MalformedCursor`, `CursorMismatch`, `InvalidPerPage`,
    /// `InvalidDirection` and `InvalidFlag`.
    #[inline]
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedCursor(_)
                | Self::CursorMismatch { .. }
                | Self::InvalidPerPage { .. }
                | Self::InvalidDirection { .. }
                | Self::InvalidFlag { .. }
        )
    }

    /// Returns `true` for errors caused by how the query was configured.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyOrderSpec | Self::MissingColumn { .. } | Self::CursorOverflow(_)
        )
    }

    /// HTTP status a host should answer with.
    #[inline]
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

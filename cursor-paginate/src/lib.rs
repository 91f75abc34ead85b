// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs
#![allow(clippy::missing_errors_doc)] // Errors are documented on PaginateError
#![allow(clippy::missing_panics_doc)] // Identifier panics are documented per builder
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Fluent builder methods
#![allow(clippy::format_push_string)] // String building style preference
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs

//! # cursor-paginate - Keyset Pagination with Opaque Cursors
//!
//! Pages through any ordered, filterable, countable query with stable
//! cursors instead of offsets. A cursor is the base64 of a JSON array holding
//! the order-column values of a boundary row; the next request turns it into
//! a strict lexicographic `WHERE` predicate, so inserts and deletes elsewhere
//! never shift or duplicate rows.
//!
//! ## Quick Start
//!
//! ```
//! # use cursor_paginate::prelude::*;
//! # use std::collections::BTreeMap;
//! let rows: Vec<BTreeMap<String, Value>> = (0..6)
//!     .map(|i| {
//!         BTreeMap::from([
//!             ("id".to_string(), Value::Int(i + 1)),
//!             ("display_index".to_string(), Value::Int(i)),
//!         ])
//!     })
//!     .collect();
//! let posts = MemorySource::new(rows)
//!     .sort("display_index", SortDir::Asc)
//!     .primary_key("id");
//!
//! let options = PaginateOptions::from_query(
//!     PaginateDefaults::new(20, 100),
//!     [("per_page", "2"), ("with_total", "true")],
//! )
//! .unwrap();
//! let page = paginate(&posts, &options).unwrap();
//!
//! assert_eq!(page.len(), 2);
//! assert_eq!(page.total_count, Some(6));
//! let next = Cursor::decode(page.next_cursor.as_deref().unwrap()).unwrap();
//! assert_eq!(next, Cursor::new().int("display_index", 1).int("id", 2));
//! ```
//!
//! ## SQL Sources
//!
//! [`SqlQuery`] renders the bounded fetch and the count for a [`PageSource`]
//! that runs them on its own connection:
//!
//! ```
//! # use cursor_paginate::prelude::*;
//! let query = postgres("posts")
//!     .fields(&["id", "display_index"])
//!     .sort("display_index", SortDir::Asc)
//!     .primary_key("id");
//!
//! let order = OrderSpec::resolve(query.order(), query.primary_key_column(), &AliasMap::new())
//!     .unwrap();
//! let keyset = KeysetCondition::new(&order, vec![Value::Int(1), Value::Int(2)], Direction::Forward)
//!     .unwrap();
//! let result = query.fetch_sql(&FetchRequest {
//!     condition: Some(keyset.to_filter_expr()),
//!     order: order.fetch_order(Direction::Forward),
//!     limit: 3,
//! });
//!
//! assert_eq!(
//!     result.sql,
//!     "SELECT id, display_index FROM posts \
//!      WHERE (display_index > $1 OR (display_index = $2 AND id > $3)) \
//!      ORDER BY display_index ASC NULLS FIRST, id ASC NULLS FIRST LIMIT 3"
//! );
//! ```
//!
//! ## Errors
//!
//! | Error             | Cause                                        | Status |
//! |-------------------|----------------------------------------------|--------|
//! | `MalformedCursor` | Token is not base64 / JSON / the right shape | 400    |
//! | `CursorMismatch`  | Token was issued for a different order       | 400    |
//! | `InvalidPerPage`  | `per_page` not positive or above the maximum | 400    |
//! | `EmptyOrderSpec`  | Query has no order and no primary key        | 500    |
//! | `CursorOverflow`  | Boundary values too large for a cursor token | 500    |
//! | `Source`          | The query failed                             | 500    |

mod builder;
pub mod constants;
mod dialect;
mod error;
mod pagination;
mod validate;

pub use builder::{
    CompoundFilter, Direction, Filter, FilterExpr, LogicalOp, Operator, QueryResult, SortDir,
    SortField, SqlQuery, Value, and, not, or, simple,
};
pub use dialect::{Dialect, Postgres, Sqlite};
pub use error::{PaginateError, SourceError};
pub use pagination::{
    AliasMap, Cursor, CursorError, FetchRequest, KeysetCondition, MemorySource, OrderKey,
    OrderSpec, Page, PageSource, PaginateDefaults, PaginateOptions, PaginateOptionsBuilder, Row,
    paginate,
};
pub use validate::{assert_valid_sql_identifier, is_valid_sql_identifier};

/// Build a paginated query for Postgres.
///
/// Convenience function that creates a `SqlQuery` with Postgres dialect.
#[must_use]
pub fn postgres(table: &str) -> SqlQuery<Postgres> {
    SqlQuery::new(Postgres, table)
}

/// Build a paginated query for `SQLite`.
///
/// Convenience function that creates a `SqlQuery` with `SQLite` dialect.
#[must_use]
pub fn sqlite(table: &str) -> SqlQuery<Sqlite> {
    SqlQuery::new(Sqlite, table)
}

/// Prelude module for convenient imports.
///
/// ```
/// use cursor_paginate::prelude::*;
/// // Now paginate(), PaginateOptions, Cursor, postgres(), sqlite(), etc. are available
/// let query = sqlite("posts").primary_key("id");
/// assert_eq!(query.primary_key_column(), Some("id"));
/// ```
pub mod prelude {
    pub use crate::{
        AliasMap, CompoundFilter, Cursor, CursorError, Dialect, Direction, FetchRequest, Filter,
        FilterExpr, KeysetCondition, LogicalOp, MemorySource, Operator, OrderKey, OrderSpec, Page,
        PageSource, PaginateDefaults, PaginateError, PaginateOptions, Postgres, QueryResult, Row,
        SortDir, SortField, SqlQuery, Sqlite, Value, and, not, or, paginate, postgres, simple,
        sqlite,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================

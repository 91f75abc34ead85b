//! Cursor-based (keyset) pagination.
//!
//! # Request Flow
//!
//! | Step | Module     | What happens                                            |
//! |------|------------|---------------------------------------------------------|
//! | 1    | `order`    | Declared order + primary key become the total order     |
//! | 2    | `codec`    | The cursor token decodes to ordered `(name, value)` pairs |
//! | 3    | `order`    | Cursor names are checked against the order (via aliases) |
//! | 4    | `keyset`   | Boundary values become a strict lexicographic predicate |
//! | 5    | `source`   | One fetch of `per_page + 1` rows, one optional count    |
//! | 6    | `resolver` | Rows are re-oriented and boundary rows become cursors   |
//!
//! # Example
//!
//! ```
//! use cursor_paginate::{Direction, MemorySource, PaginateOptions, SortDir, Value, paginate};
//! use std::collections::BTreeMap;
//!
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
//! let first = paginate(&posts, &PaginateOptions::builder().per_page(2).build().unwrap()).unwrap();
//! assert_eq!(
//!     first.next_cursor.as_deref(),
//!     Some("W3siZGlzcGxheV9pbmRleCI6MX0seyJpZCI6Mn1d")
//! );
//!
//! // Walk back from the second page
//! let options = PaginateOptions::builder()
//!     .per_page(2)
//!     .cursor(first.next_cursor.unwrap())
//!     .build()
//!     .unwrap();
//! let second = paginate(&posts, &options).unwrap();
//! let options = PaginateOptions::builder()
//!     .per_page(2)
//!     .cursor(second.prev_cursor.unwrap())
//!     .direction(Direction::Backward)
//!     .build()
//!     .unwrap();
//! let back = paginate(&posts, &options).unwrap();
//! assert_eq!(back.items, first.items);
//! ```

mod alias;
mod codec;
mod keyset;
mod memory;
mod options;
mod order;
mod page;
mod resolver;
mod source;

// Re-export all public items
pub use alias::AliasMap;
pub use codec::{Cursor, CursorError};
pub use keyset::KeysetCondition;
pub use memory::MemorySource;
pub use options::{PaginateDefaults, PaginateOptions, PaginateOptionsBuilder};
pub use order::{OrderKey, OrderSpec};
pub use page::Page;
pub use resolver::paginate;
pub use source::{FetchRequest, PageSource, Row};

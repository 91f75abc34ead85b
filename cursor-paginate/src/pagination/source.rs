//! The query abstraction the resolver drives.

use std::collections::{BTreeMap, HashMap};
use std::error::Error;

use crate::builder::{FilterExpr, SortField, Value};

/// A fetched row that exposes column values by name.
///
/// Rows are looked up by the caller-facing name of each order column first,
/// then by the real column name.
pub trait Row {
    /// The value of `column`, or `None` if the row has no such column.
    fn value(&self, column: &str) -> Option<Value>;
}

impl Row for BTreeMap<String, Value> {
    fn value(&self, column: &str) -> Option<Value> {
        self.get(column).cloned()
    }
}

impl<S: std::hash::BuildHasher> Row for HashMap<String, Value, S> {
    fn value(&self, column: &str) -> Option<Value> {
        self.get(column).cloned()
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn value(&self, column: &str) -> Option<Value> {
        (**self).value(column)
    }
}

/// One bounded, ordered fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Keyset predicate, combined with the source's own filter using AND.
    pub condition: Option<FilterExpr>,
    /// Full ORDER BY on real columns, already reversed for backward fetches.
    pub order: Vec<SortField>,
    /// Maximum number of rows to return.
    pub limit: usize,
}

/// An ordered, filterable query the resolver can page through.
///
/// Implementations own their connection (or data) and run whatever the
/// resolver asks for; a fetch must apply `condition`, `order`, and `limit`
/// exactly, and `count` must ignore any cursor.
///
/// # Example
///
/// ```
/// use cursor_paginate::{MemorySource, PageSource, SortField, Value};
/// use std::collections::BTreeMap;
///
/// let rows: Vec<BTreeMap<String, Value>> = (1..=3)
///     .map(|id| BTreeMap::from([("id".to_string(), Value::Int(id))]))
///     .collect();
/// let source = MemorySource::new(rows).primary_key("id");
/// assert_eq!(PageSource::primary_key(&source), Some("id"));
/// assert_eq!(source.count().unwrap(), 3);
/// ```
pub trait PageSource {
    /// Row type yielded by fetches.
    type Row: Row;
    /// Backend error.
    type Error: Error + Send + Sync + 'static;

    /// The query's declared order, possibly empty.
    fn order(&self) -> &[SortField];

    /// The primary key column, if the query has one.
    fn primary_key(&self) -> Option<&str>;

    /// Run one bounded fetch.
    fn fetch(&self, request: &FetchRequest) -> Result<Vec<Self::Row>, Self::Error>;

    /// Count every row the query matches, ignoring any cursor.
    fn count(&self) -> Result<u64, Self::Error>;
}

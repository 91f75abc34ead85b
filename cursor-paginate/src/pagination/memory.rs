//! In-memory page source.

use std::cmp::Ordering;
use std::convert::Infallible;

use crate::builder::{FilterExpr, SortDir, SortField, Value};

use super::source::{FetchRequest, PageSource, Row};

/// A [`PageSource`] over rows held in memory.
///
/// Evaluates filters with SQL semantics (a comparison against NULL never
/// matches) and sorts NULLs first, so it behaves like a small `SQLite` table.
/// Useful for tests and for paginating data that is already loaded.
#[derive(Debug, Clone)]
pub struct MemorySource<R> {
    rows: Vec<R>,
    order: Vec<SortField>,
    primary_key: Option<String>,
    filter: Option<FilterExpr>,
}

impl<R: Row + Clone> MemorySource<R> {
    /// Wrap `rows`. No declared order, no primary key, no filter.
    pub const fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            order: Vec::new(),
            primary_key: None,
            filter: None,
        }
    }

    /// Add a column to the declared order.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.order.push(SortField::new(field, dir));
        self
    }

    /// Set the primary key column.
    #[must_use]
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    /// Set a base filter applied to fetches and counts.
    #[must_use]
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filter = Some(expr);
        self
    }

    /// The rows this source holds, unfiltered and unsorted.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    fn base_matches(&self, row: &R) -> bool {
        self.filter.as_ref().is_none_or(|expr| expr.matches(row))
    }
}

impl<R: Row + Clone> PageSource for MemorySource<R> {
    type Row = R;
    type Error = Infallible;

    fn order(&self) -> &[SortField] {
        &self.order
    }

    fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    fn fetch(&self, request: &FetchRequest) -> Result<Vec<R>, Infallible> {
        let mut rows: Vec<&R> = self
            .rows
            .iter()
            .filter(|row| self.base_matches(row))
            .filter(|row| request.condition.as_ref().is_none_or(|c| c.matches(*row)))
            .collect();
        rows.sort_by(|a, b| compare_rows(*a, *b, &request.order));
        Ok(rows.into_iter().take(request.limit).cloned().collect())
    }

    fn count(&self) -> Result<u64, Infallible> {
        let matching = self.rows.iter().filter(|row| self.base_matches(row)).count();
        Ok(matching as u64)
    }
}

fn compare_rows<R: Row>(a: &R, b: &R, order: &[SortField]) -> Ordering {
    for sort in order {
        let left = a.value(&sort.field).unwrap_or(Value::Null);
        let right = b.value(&sort.field).unwrap_or(Value::Null);
        let ordering = match sort.dir {
            SortDir::Asc => left.sort_cmp(&right),
            SortDir::Desc => right.sort_cmp(&left),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

//! In-memory evaluation of filter expressions against rows.
//!
//! Mirrors the SQL rendering in `filter.rs`: a comparison involving NULL is
//! never true, `= NULL` means `IS NULL`, and `!= NULL` means `IS NOT NULL`.

use super::types::{CompoundFilter, Filter, FilterExpr, LogicalOp, Operator, Value};
use crate::pagination::Row;

impl FilterExpr {
    /// Evaluate this expression against a row.
    ///
    /// Columns the row does not have are treated as NULL.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use cursor_paginate::{Operator, Value, simple};
    ///
    /// let row = BTreeMap::from([("id".to_string(), Value::Int(5))]);
    /// assert!(simple("id", Operator::Gt, 3i64).matches(&row));
    /// assert!(!simple("id", Operator::Lt, 3i64).matches(&row));
    /// ```
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.eval(row) == Some(true)
    }

    /// Three-valued result: `None` is SQL UNKNOWN.
    fn eval<R: Row + ?Sized>(&self, row: &R) -> Option<bool> {
        match self {
            Self::Simple(filter) => filter.eval(row),
            Self::Compound(compound) => compound.eval(row),
        }
    }
}

impl CompoundFilter {
    fn eval<R: Row + ?Sized>(&self, row: &R) -> Option<bool> {
        match self.op {
            LogicalOp::And => connective(&self.filters, row, false),
            LogicalOp::Or => connective(&self.filters, row, true),
            LogicalOp::Not => self.filters.first().and_then(|f| f.eval(row)).map(|b| !b),
        }
    }
}

/// AND (`decisive = false`) or OR (`decisive = true`) over SQL truth values.
fn connective<R: Row + ?Sized>(filters: &[FilterExpr], row: &R, decisive: bool) -> Option<bool> {
    let mut unknown = false;
    for filter in filters {
        match filter.eval(row) {
            Some(b) if b == decisive => return Some(decisive),
            Some(_) => {},
            None => unknown = true,
        }
    }
    if unknown { None } else { Some(!decisive) }
}

impl Filter {
    fn eval<R: Row + ?Sized>(&self, row: &R) -> Option<bool> {
        let actual = row.value(&self.field).unwrap_or(Value::Null);
        match (self.op, &self.value) {
            (Operator::Eq, Value::Null) => Some(actual.is_null()),
            (Operator::Ne, Value::Null) => Some(!actual.is_null()),
            (op, expected) => actual.compare(expected).map(|ordering| op.accepts(ordering)),
        }
    }
}

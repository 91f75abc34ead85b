//! Keyset predicate generation.

use crate::builder::{CompoundFilter, Direction, Filter, FilterExpr, Operator, SortDir, Value};

use super::order::{OrderKey, OrderSpec};

/// Keyset pagination condition.
///
/// Selects the rows strictly after (forward) or strictly before (backward) a
/// boundary row in the query's natural order. NULL counts as the smallest
/// value of a column, matching how [`MemorySource`](super::MemorySource) and
/// `SQLite` sort and how [`SqlQuery`](crate::SqlQuery) orders on Postgres.
#[derive(Debug, Clone, PartialEq)]
pub struct KeysetCondition {
    /// Order columns with their natural directions.
    pub keys: Vec<OrderKey>,
    /// Boundary values, one per column.
    pub values: Vec<Value>,
    /// Which side of the boundary to select.
    pub direction: Direction,
}

impl KeysetCondition {
    /// Build the condition for `order` seeking from `values`.
    ///
    /// Returns `None` when the value count does not match the order; callers
    /// get bound values from [`OrderSpec::bind`], which already checks this.
    #[must_use]
    pub fn new(order: &OrderSpec, values: Vec<Value>, direction: Direction) -> Option<Self> {
        if order.keys().is_empty() || order.keys().len() != values.len() {
            return None;
        }
        Some(Self {
            keys: order.keys().to_vec(),
            values,
            direction,
        })
    }

    /// Convert to a filter expression.
    ///
    /// `(a, b, c) > (1, 2, 3)` expands to:
    ///
    /// ```text
    /// a > 1
    /// OR (a = 1 AND b > 2)
    /// OR (a = 1 AND b = 2 AND c > 3)
    /// ```
    ///
    /// with each comparison flipped for DESC columns and again for backward
    /// traversal. See: <https://use-the-index-luke.com/no-offset>
    ///
    /// On a nullable column `a < 1` becomes `(a < 1 OR a IS NULL)`, `a > NULL`
    /// becomes `a IS NOT NULL`, and a branch needing `a < NULL` is dropped.
    /// When every branch is dropped the result is an empty OR, which matches
    /// no row.
    #[must_use]
    pub fn to_filter_expr(&self) -> FilterExpr {
        let mut branches: Vec<FilterExpr> = self
            .keys
            .iter()
            .zip(&self.values)
            .enumerate()
            .filter_map(|(i, (key, value))| {
                let beyond = self.beyond(key, value)?;
                let mut terms: Vec<FilterExpr> = self
                    .keys
                    .iter()
                    .zip(&self.values)
                    .take(i)
                    .map(|(prev, prev_value)| leaf(&prev.column, Operator::Eq, prev_value))
                    .collect();
                terms.push(beyond);
                Some(collapse(terms, CompoundFilter::and))
            })
            .collect();

        if branches.len() == 1 {
            if let Some(only) = branches.pop() {
                return only;
            }
        }
        FilterExpr::Compound(CompoundFilter::or(branches))
    }

    /// Strict comparison for a column: the XOR of column and traversal direction.
    const fn operator(&self, dir: SortDir) -> Operator {
        match (self.direction, dir) {
            (Direction::Forward, SortDir::Asc) | (Direction::Backward, SortDir::Desc) => {
                Operator::Gt
            },
            (Direction::Forward, SortDir::Desc) | (Direction::Backward, SortDir::Asc) => {
                Operator::Lt
            },
        }
    }

    /// Rows strictly beyond `value` in one column, or `None` if there are none.
    fn beyond(&self, key: &OrderKey, value: &Value) -> Option<FilterExpr> {
        let op = self.operator(key.dir);
        match (op, value) {
            (Operator::Lt, Value::Null) => None,
            (_, Value::Null) => Some(leaf(&key.column, Operator::Ne, value)),
            (Operator::Lt, _) if key.nullable => Some(FilterExpr::Compound(CompoundFilter::or(
                vec![
                    leaf(&key.column, op, value),
                    leaf(&key.column, Operator::Eq, &Value::Null),
                ],
            ))),
            _ => Some(leaf(&key.column, op, value)),
        }
    }
}

fn leaf(column: &str, op: Operator, value: &Value) -> FilterExpr {
    FilterExpr::Simple(Filter {
        field: column.to_string(),
        op,
        value: value.clone(),
    })
}

fn collapse(mut terms: Vec<FilterExpr>, combine: fn(Vec<FilterExpr>) -> CompoundFilter) -> FilterExpr {
    if terms.len() == 1 {
        if let Some(only) = terms.pop() {
            return only;
        }
    }
    FilterExpr::Compound(combine(terms))
}

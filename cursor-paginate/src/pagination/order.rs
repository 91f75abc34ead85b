//! Order resolution: the total order a page request walks.

use crate::builder::{Direction, SortDir, SortField, Value};
use crate::error::PaginateError;

use super::alias::AliasMap;
use super::codec::Cursor;
use super::source::Row;

/// One column of an [`OrderSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    /// Caller-facing name: the alias if the column has one, else the column.
    pub name: String,
    /// Real column compared by the keyset predicate.
    pub column: String,
    /// Direction in the query's natural order.
    pub dir: SortDir,
    /// Whether the column may hold NULL. Only the primary key is known not to.
    pub nullable: bool,
}

impl OrderKey {
    fn resolve(declared: &str, dir: SortDir, aliases: &AliasMap, primary_key: Option<&str>) -> Self {
        let column = aliases.column_for(declared).to_string();
        let name = aliases.alias_for(&column).unwrap_or(declared).to_string();
        let nullable = primary_key.is_none_or(|pk| pk != column);
        Self {
            name,
            column,
            dir,
            nullable,
        }
    }
}

/// The resolved, total order of a query.
///
/// Built from the query's declared order plus its primary key as the final
/// tie-breaker, so rows with equal visible order values still have a stable
/// position across pages.
///
/// # Example
///
/// ```
/// use cursor_paginate::{AliasMap, OrderSpec, SortField};
///
/// let order = OrderSpec::resolve(
///     &[SortField::asc("display_index")],
///     Some("id"),
///     &AliasMap::new(),
/// )
/// .unwrap();
/// assert_eq!(order.names(), vec!["display_index", "id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    keys: Vec<OrderKey>,
}

impl OrderSpec {
    /// Resolve the declared order of a query.
    ///
    /// - No declared order: order by the primary key ascending.
    /// - Declared order without the primary key: append it ascending.
    /// - Neither: [`PaginateError::EmptyOrderSpec`].
    pub fn resolve(
        declared: &[SortField],
        primary_key: Option<&str>,
        aliases: &AliasMap,
    ) -> Result<Self, PaginateError> {
        let pk_column = primary_key.map(|pk| aliases.column_for(pk));
        let mut keys: Vec<OrderKey> = declared
            .iter()
            .map(|sort| OrderKey::resolve(&sort.field, sort.dir, aliases, pk_column))
            .collect();

        if let (Some(pk), Some(pk_column)) = (primary_key, pk_column) {
            if !keys.iter().any(|key| key.column == pk_column) {
                keys.push(OrderKey::resolve(pk, SortDir::Asc, aliases, Some(pk_column)));
            }
        }

        if keys.is_empty() {
            return Err(PaginateError::EmptyOrderSpec);
        }
        Ok(Self { keys })
    }

    /// The order columns, in order.
    pub fn keys(&self) -> &[OrderKey] {
        &self.keys
    }

    /// Caller-facing names, in order.
    pub fn names(&self) -> Vec<String> {
        self.keys.iter().map(|key| key.name.clone()).collect()
    }

    /// The ORDER BY a fetch in `direction` must use.
    ///
    /// Backward fetches walk the natural order in reverse, so every column
    /// direction is flipped.
    pub fn fetch_order(&self, direction: Direction) -> Vec<SortField> {
        self.keys
            .iter()
            .map(|key| {
                let dir = if direction.is_backward() {
                    key.dir.reversed()
                } else {
                    key.dir
                };
                SortField::new(key.column.clone(), dir)
            })
            .collect()
    }

    /// Check a decoded cursor against this order and return its boundary values.
    ///
    /// Each cursor field name is mapped through `aliases` and must name the
    /// column at the same position. A cursor with fewer, more, reordered, or
    /// foreign fields is a [`PaginateError::CursorMismatch`].
    pub fn bind(&self, cursor: &Cursor, aliases: &AliasMap) -> Result<Vec<Value>, PaginateError> {
        let matches = cursor.len() == self.keys.len()
            && cursor
                .fields
                .iter()
                .zip(&self.keys)
                .all(|((name, _), key)| aliases.column_for(name) == key.column);

        if !matches {
            return Err(PaginateError::CursorMismatch {
                expected: self.names(),
                found: cursor.names().map(str::to_string).collect(),
            });
        }
        Ok(cursor.fields.iter().map(|(_, value)| value.clone()).collect())
    }

    /// Build the cursor for a boundary row, keyed by caller-facing names.
    pub fn cursor_for<R: Row + ?Sized>(&self, row: &R) -> Result<Cursor, PaginateError> {
        let mut fields = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            let value = row
                .value(&key.name)
                .or_else(|| row.value(&key.column))
                .ok_or_else(|| PaginateError::MissingColumn {
                    column: key.column.clone(),
                })?;
            fields.push((key.name.clone(), value));
        }
        Ok(Cursor::from_fields(fields))
    }
}

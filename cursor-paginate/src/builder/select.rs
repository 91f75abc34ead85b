//! SELECT rendering for keyset page fetches.

use crate::dialect::Dialect;
use crate::pagination::FetchRequest;
use crate::validate::assert_valid_sql_identifier;

use super::filter::build_filter_expr_impl;
use super::types::{FilterExpr, QueryResult, SortDir, SortField, Value};

/// An ordered, filterable SQL query over one table.
///
/// `SqlQuery` describes the caller's query (table, selected fields, base
/// filter, declared order, primary key) and renders the bounded page fetch and
/// the total count the resolver asks for. It does not execute anything: a host
/// wraps it in a [`PageSource`](crate::PageSource) that runs the rendered SQL
/// on its own connection.
///
/// # Example
///
/// ```
/// use cursor_paginate::prelude::*;
///
/// let query = sqlite("posts")
///     .fields(&["id", "display_index"])
///     .sort("display_index", SortDir::Asc)
///     .primary_key("id");
///
/// let request = FetchRequest {
///     condition: None,
///     order: vec![SortField::asc("display_index"), SortField::asc("id")],
///     limit: 3,
/// };
/// let result = query.fetch_sql(&request);
/// assert_eq!(
///     result.sql,
///     "SELECT id, display_index FROM posts ORDER BY display_index ASC, id ASC LIMIT 3"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SqlQuery<D: Dialect> {
    dialect: D,
    table: String,
    fields: Vec<String>,
    aliased: Vec<(String, String)>,
    filter: Option<FilterExpr>,
    sorts: Vec<SortField>,
    primary_key: Option<String>,
}

impl<D: Dialect> SqlQuery<D> {
    /// Create a new query for the given table.
    ///
    /// # Panics
    ///
    /// Panics if the table name is not a valid SQL identifier.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        let table = table.into();
        assert_valid_sql_identifier(&table, "table");
        Self {
            dialect,
            table,
            fields: Vec::new(),
            aliased: Vec::new(),
            filter: None,
            sorts: Vec::new(),
            primary_key: None,
        }
    }

    /// Set the fields to SELECT.
    ///
    /// # Panics
    ///
    /// Panics if any field name is not a valid SQL identifier.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        for field in fields {
            assert_valid_sql_identifier(field, "field");
        }
        self.fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Select `column AS alias`.
    ///
    /// Order by the alias and register it in an [`AliasMap`](crate::AliasMap)
    /// so cursors are keyed by the alias while predicates use the column.
    ///
    /// # Panics
    ///
    /// Panics if either name is not a valid SQL identifier.
    pub fn select_as(mut self, column: impl Into<String>, alias: impl Into<String>) -> Self {
        let column = column.into();
        let alias = alias.into();
        assert_valid_sql_identifier(&column, "aliased column");
        assert_valid_sql_identifier(&alias, "column alias");
        self.aliased.push((column, alias));
        self
    }

    /// Set the base filter. It applies to page fetches and the total count.
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filter = Some(expr);
        self
    }

    /// Add a sort field to the declared order.
    ///
    /// # Panics
    ///
    /// Panics if the field name is not a valid SQL identifier.
    pub fn sort(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        let field = field.into();
        assert_valid_sql_identifier(&field, "sort field");
        self.sorts.push(SortField::new(field, dir));
        self
    }

    /// Set the primary key used as the tie-breaking order column.
    ///
    /// # Panics
    ///
    /// Panics if the name is not a valid SQL identifier.
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        assert_valid_sql_identifier(&column, "primary key");
        self.primary_key = Some(column);
        self
    }

    /// The declared order, as passed to [`sort`](Self::sort).
    pub fn order(&self) -> &[SortField] {
        &self.sorts
    }

    /// The primary key column, if one was set.
    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Render the bounded page fetch.
    ///
    /// # Panics
    ///
    /// Panics if an order column of the request is not a valid SQL identifier.
    pub fn fetch_sql(&self, request: &FetchRequest) -> QueryResult {
        let mut sql = format!("SELECT {} FROM {}", self.select_list(), self.table);
        let mut params = Vec::new();

        let mut conditions = Vec::new();
        let mut param_idx = 1usize;
        for expr in self.filter.iter().chain(request.condition.iter()) {
            let (condition, new_params, new_idx) =
                build_filter_expr_impl(&self.dialect, expr, param_idx);
            conditions.push(condition);
            params.extend(new_params);
            param_idx = new_idx;
        }
        push_where(&mut sql, &conditions);

        if !request.order.is_empty() {
            let sort_parts: Vec<String> = request
                .order
                .iter()
                .map(|s| {
                    assert_valid_sql_identifier(&s.field, "order column");
                    format!(
                        "{} {}{}",
                        s.field,
                        s.dir.as_sql(),
                        self.dialect.nulls_order(s.dir)
                    )
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&sort_parts.join(", "));
        }

        sql.push_str(&format!(" LIMIT {}", request.limit));

        QueryResult { sql, params }
    }

    /// Render `SELECT COUNT(*)` over the base filter, ignoring any cursor.
    pub fn count_sql(&self) -> QueryResult {
        let mut sql = format!("SELECT COUNT(*) AS count FROM {}", self.table);
        let mut params: Vec<Value> = Vec::new();
        let mut conditions = Vec::new();
        if let Some(expr) = &self.filter {
            let (condition, new_params, _new_idx) = build_filter_expr_impl(&self.dialect, expr, 1);
            conditions.push(condition);
            params.extend(new_params);
        }
        push_where(&mut sql, &conditions);
        QueryResult { sql, params }
    }

    fn select_list(&self) -> String {
        let mut parts: Vec<String> = self.fields.clone();
        parts.extend(
            self.aliased
                .iter()
                .map(|(column, alias)| format!("{column} AS {alias}")),
        );
        if parts.is_empty() {
            "*".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn push_where(sql: &mut String, conditions: &[String]) {
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::types::{Operator, simple};
    use crate::{postgres, sqlite};

    fn request(condition: Option<FilterExpr>, order: Vec<SortField>, limit: usize) -> FetchRequest {
        FetchRequest {
            condition,
            order,
            limit,
        }
    }

    #[test]
    fn test_fetch_without_cursor() {
        let query = postgres("posts").fields(&["id", "title"]);
        let result = query.fetch_sql(&request(None, vec![SortField::asc("id")], 11));
        assert_eq!(
            result.sql,
            "SELECT id, title FROM posts ORDER BY id ASC NULLS FIRST LIMIT 11"
        );
        assert!(result.params.is_empty());
    }

    #[test]
    fn test_base_filter_numbers_before_keyset() {
        let query = postgres("posts")
            .fields(&["id"])
            .filter(simple("published", Operator::Eq, true));
        let condition = simple("id", Operator::Gt, 10i64);
        let result = query.fetch_sql(&request(Some(condition), vec![SortField::asc("id")], 3));
        assert_eq!(
            result.sql,
            "SELECT id FROM posts WHERE published = $1 AND id > $2 \
             ORDER BY id ASC NULLS FIRST LIMIT 3"
        );
        assert_eq!(result.params, vec![Value::Bool(true), Value::Int(10)]);
    }

    #[test]
    fn test_select_as_and_star() {
        let query = sqlite("posts").select_as("display_index", "alias");
        let result = query.fetch_sql(&request(None, vec![], 5));
        assert_eq!(result.sql, "SELECT display_index AS alias FROM posts LIMIT 5");

        let query = sqlite("posts");
        let result = query.fetch_sql(&request(None, vec![], 5));
        assert_eq!(result.sql, "SELECT * FROM posts LIMIT 5");
    }

    #[test]
    fn test_count_ignores_cursor_and_order() {
        let query = sqlite("posts")
            .filter(simple("published", Operator::Eq, true))
            .sort("display_index", SortDir::Desc);
        let result = query.count_sql();
        assert_eq!(
            result.sql,
            "SELECT COUNT(*) AS count FROM posts WHERE published = ?1"
        );
        assert_eq!(result.params, vec![Value::Bool(true)]);
    }

    #[test]
    fn test_declared_order_and_primary_key() {
        let query = sqlite("posts")
            .sort("display_index", SortDir::Desc)
            .primary_key("id");
        assert_eq!(query.order(), &[SortField::desc("display_index")]);
        assert_eq!(query.primary_key_column(), Some("id"));
    }

    #[test]
    fn test_postgres_places_nulls_lowest() {
        let query = postgres("posts").fields(&["id"]);
        let order = vec![SortField::desc("published_at"), SortField::asc("id")];
        let result = query.fetch_sql(&request(None, order, 2));
        assert_eq!(
            result.sql,
            "SELECT id FROM posts ORDER BY published_at DESC NULLS LAST, id ASC NULLS FIRST LIMIT 2"
        );
    }

    #[test]
    #[should_panic(expected = "Invalid SQL table name")]
    fn test_rejects_bad_table() {
        let _ = postgres("posts; DROP TABLE users");
    }
}

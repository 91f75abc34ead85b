//! The page resolver.

use tracing::{debug, warn};

use crate::builder::{Direction, Value};
use crate::error::PaginateError;

use super::codec::Cursor;
use super::keyset::KeysetCondition;
use super::options::PaginateOptions;
use super::order::OrderSpec;
use super::page::Page;
use super::source::{FetchRequest, PageSource, Row};

/// Fetch one page of `source`.
///
/// Runs one bounded fetch of `per_page + 1` rows (the extra row only signals
/// that another page exists) and, with `with_total`, one count.
///
/// A request without a cursor always starts at the beginning of the natural
/// order, whatever its direction. With a cursor, `Forward` returns the rows
/// after the boundary row and `Backward` the rows before it. Rows come back
/// in natural order either way.
///
/// A page with no rows carries no cursors: a forward request past the last
/// row gets neither `next_cursor` nor `prev_cursor`.
///
/// # Errors
///
/// - [`PaginateError::MalformedCursor`] if the token does not decode.
/// - [`PaginateError::CursorMismatch`] if its fields disagree with the order.
/// - [`PaginateError::EmptyOrderSpec`] if the query has no order and no key.
/// - [`PaginateError::MissingColumn`] if a boundary row lacks an order column.
/// - [`PaginateError::CursorOverflow`] if a boundary row's values do not fit
///   in a token that [`Cursor::decode`] would accept.
/// - [`PaginateError::Source`] if the source fails.
///
/// # Example
///
/// ```
/// use cursor_paginate::prelude::*;
/// use std::collections::BTreeMap;
///
/// let rows: Vec<BTreeMap<String, Value>> = (1..=5)
///     .map(|id| BTreeMap::from([("id".to_string(), Value::Int(id))]))
///     .collect();
/// let source = MemorySource::new(rows).primary_key("id");
///
/// let options = PaginateOptions::builder().per_page(2).build().unwrap();
/// let first = paginate(&source, &options).unwrap();
/// assert_eq!(first.len(), 2);
/// assert!(first.prev_cursor.is_none());
///
/// let next = first.next_cursor.unwrap();
/// let options = PaginateOptions::builder().per_page(2).cursor(next).build().unwrap();
/// let second = paginate(&source, &options).unwrap();
/// assert_eq!(second.items[0].get("id"), Some(&Value::Int(3)));
/// ```
pub fn paginate<S: PageSource>(
    source: &S,
    options: &PaginateOptions,
) -> Result<Page<S::Row>, PaginateError> {
    let order = OrderSpec::resolve(source.order(), source.primary_key(), options.aliases())?;
    let boundary = options
        .cursor()
        .map(|token| bind_cursor(&order, token, options))
        .transpose()?;
    let has_cursor = boundary.is_some();
    let direction = if has_cursor {
        options.direction()
    } else {
        Direction::Forward
    };
    let per_page = options.per_page();

    debug!(
        per_page,
        direction = direction.as_str(),
        has_cursor,
        order = ?order.names(),
        "Paginating"
    );

    let condition = boundary
        .and_then(|values| KeysetCondition::new(&order, values, direction))
        .map(|keyset| keyset.to_filter_expr());
    let request = FetchRequest {
        condition,
        order: order.fetch_order(direction),
        limit: per_page.saturating_add(1),
    };

    let mut rows = source.fetch(&request).map_err(PaginateError::from_source)?;
    let has_more = rows.len() > per_page;
    rows.truncate(per_page);
    if direction.is_backward() {
        rows.reverse();
    }

    // Backward from a cursor: the cursor row itself lies ahead of this page.
    let (has_next, has_prev) = match direction {
        Direction::Forward => (has_more, has_cursor),
        Direction::Backward => (true, has_more),
    };

    let next_cursor = match rows.last() {
        Some(row) if has_next => Some(boundary_token(&order, row)?),
        _ => None,
    };
    let prev_cursor = match rows.first() {
        Some(row) if has_prev => Some(boundary_token(&order, row)?),
        _ => None,
    };

    let total_count = if options.with_total() {
        Some(source.count().map_err(PaginateError::from_source)?)
    } else {
        None
    };

    debug!(
        returned = rows.len(),
        has_next = next_cursor.is_some(),
        has_prev = prev_cursor.is_some(),
        total = ?total_count,
        "Paginated"
    );

    Ok(Page {
        items: rows,
        next_cursor,
        prev_cursor,
        total_count,
    })
}

fn boundary_token<R: Row>(order: &OrderSpec, row: &R) -> Result<String, PaginateError> {
    order.cursor_for(row)?.try_encode().map_err(|err| {
        warn!(error = %err, "Boundary row does not fit in a cursor");
        PaginateError::CursorOverflow(err)
    })
}

fn bind_cursor(
    order: &OrderSpec,
    token: &str,
    options: &PaginateOptions,
) -> Result<Vec<Value>, PaginateError> {
    let bound = Cursor::decode(token)
        .map_err(PaginateError::from)
        .and_then(|cursor| order.bind(&cursor, options.aliases()));
    if let Err(err) = &bound {
        warn!(error = %err, "Rejected pagination cursor");
    }
    bound
}

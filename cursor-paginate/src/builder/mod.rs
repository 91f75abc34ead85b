//! Filter expressions, in-memory evaluation, and SQL rendering.

mod eval;
mod filter;
mod select;
mod types;

// Re-export all public items
pub use select::SqlQuery;
pub use types::{
    CompoundFilter, Direction, Filter, FilterExpr, LogicalOp, Operator, QueryResult, SortDir,
    SortField, Value, and, not, or, simple,
};

//! SQL dialect implementations for Postgres and `SQLite`.
//!
//! Keyset predicates treat NULL as the smallest value of a column. `SQLite`
//! already sorts that way; Postgres needs explicit `NULLS FIRST` / `NULLS LAST`.

use crate::builder::SortDir;

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?1` for `SQLite`).
    fn param(&self, idx: usize) -> String;

    /// Suffix for an ORDER BY term that puts NULLs below every other value.
    fn nulls_order(&self, dir: SortDir) -> &'static str;
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }

    #[inline]
    fn nulls_order(&self, dir: SortDir) -> &'static str {
        match dir {
            SortDir::Asc => " NULLS FIRST",
            SortDir::Desc => " NULLS LAST",
        }
    }
}

/// `SQLite` dialect.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }

    #[inline]
    fn nulls_order(&self, _dir: SortDir) -> &'static str {
        ""
    }
}

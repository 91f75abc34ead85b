//! Identifier validation for rendered SQL.
//!
//! Table, column, and alias names are spliced into SQL text, so they must be
//! plain identifiers. Cursor values never are: they always travel as bound
//! parameters.

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Check that a string is a safe SQL identifier.
///
/// A valid identifier starts with an ASCII letter or underscore, continues
/// with ASCII letters, digits, or underscores, and is 1-63 characters long.
///
/// # Examples
///
/// ```
/// use cursor_paginate::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("display_index"));
/// assert!(is_valid_sql_identifier("_rank2"));
///
/// assert!(!is_valid_sql_identifier(""));
/// assert!(!is_valid_sql_identifier("2nd"));
/// assert!(!is_valid_sql_identifier("posts.id"));
/// assert!(!is_valid_sql_identifier("id; DROP TABLE posts"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Assert that a string is a valid SQL identifier.
///
/// # Panics
///
/// Panics if the identifier is invalid. Identifiers come from code, not from
/// requests, so an invalid one is a programming error.
///
/// ```should_panic
/// use cursor_paginate::assert_valid_sql_identifier;
///
/// assert_valid_sql_identifier("posts; DROP TABLE posts", "table");
/// ```
#[inline]
pub fn assert_valid_sql_identifier(s: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(s),
        "Invalid SQL {context} name '{s}': must start with letter/underscore, \
             contain only ASCII alphanumeric/underscore, and be 1-63 chars"
    );
}

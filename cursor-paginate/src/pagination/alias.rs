//! Alias → column mapping for cursor field names.

/// Maps caller-facing aliases to the columns they stand for.
///
/// A query may order by a selected alias (`SELECT display_index AS alias ...
/// ORDER BY alias`). Cursors are then keyed by the alias, but the keyset
/// predicate has to compare the real column. Names without an entry map to
/// themselves.
///
/// # Example
///
/// ```
/// use cursor_paginate::AliasMap;
///
/// let aliases = AliasMap::new().with("alias", "display_index");
/// assert_eq!(aliases.column_for("alias"), "display_index");
/// assert_eq!(aliases.column_for("id"), "id");
/// assert_eq!(aliases.alias_for("display_index"), Some("alias"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: Vec<(String, String)>,
}

impl AliasMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `alias -> column`, replacing any previous mapping for `alias`.
    pub fn with(mut self, alias: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(alias, column);
        self
    }

    /// Add `alias -> column`, replacing any previous mapping for `alias`.
    pub fn insert(&mut self, alias: impl Into<String>, column: impl Into<String>) {
        let alias = alias.into();
        let column = column.into();
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some(entry) => entry.1 = column,
            None => self.entries.push((alias, column)),
        }
    }

    /// The column a name refers to (the name itself when not aliased).
    #[must_use]
    pub fn column_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(alias, _)| alias == name)
            .map_or(name, |(_, column)| column.as_str())
    }

    /// The first alias registered for `column`, if any.
    #[must_use]
    pub fn alias_for(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| c == column)
            .map(|(alias, _)| alias.as_str())
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no alias is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(alias, column)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, column)| (alias.as_str(), column.as_str()))
    }
}

impl<A: Into<String>, C: Into<String>> FromIterator<(A, C)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (A, C)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (alias, column) in iter {
            map.insert(alias, column);
        }
        map
    }
}

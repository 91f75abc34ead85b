//! Per-request pagination options.

use std::str::FromStr;

use crate::builder::Direction;
use crate::constants::{
    PARAM_CURSOR, PARAM_DIRECTION, PARAM_PER_PAGE, PARAM_WITH_TOTAL, get_default_per_page,
    get_max_per_page,
};
use crate::error::PaginateError;

use super::alias::AliasMap;

impl FromStr for Direction {
    type Err = PaginateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("forward") {
            Ok(Self::Forward)
        } else if trimmed.eq_ignore_ascii_case("backward") {
            Ok(Self::Backward)
        } else {
            Err(PaginateError::InvalidDirection {
                value: s.to_string(),
            })
        }
    }
}

/// Route-level page size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginateDefaults {
    /// Page size used when the request does not supply one.
    pub per_page: usize,
    /// Largest page size a request may ask for.
    pub max_per_page: usize,
}

impl PaginateDefaults {
    /// Explicit limits. `per_page` is capped at `max_per_page`.
    #[must_use]
    pub fn new(per_page: usize, max_per_page: usize) -> Self {
        let max_per_page = max_per_page.max(1);
        Self {
            per_page: per_page.clamp(1, max_per_page),
            max_per_page,
        }
    }

    /// Limits from `CURSOR_PAGINATE_DEFAULT_PER_PAGE` and
    /// `CURSOR_PAGINATE_MAX_PER_PAGE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(get_default_per_page(), get_max_per_page())
    }
}

impl Default for PaginateDefaults {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Validated options for one page request.
///
/// # Example
///
/// ```
/// use cursor_paginate::{Direction, PaginateDefaults, PaginateOptions};
///
/// let options = PaginateOptions::from_query(
///     PaginateDefaults::new(20, 100),
///     [("per_page", "2"), ("direction", "backward"), ("with_total", "true")],
/// )
/// .unwrap();
/// assert_eq!(options.per_page(), 2);
/// assert_eq!(options.direction(), Direction::Backward);
/// assert!(options.with_total());
/// assert!(options.cursor().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginateOptions {
    per_page: usize,
    cursor: Option<String>,
    direction: Direction,
    with_total: bool,
    aliases: AliasMap,
}

impl PaginateOptions {
    /// Start building options.
    pub fn builder() -> PaginateOptionsBuilder {
        PaginateOptionsBuilder::default()
    }

    /// Parse options from request query parameters.
    ///
    /// Recognizes `per_page`, `cursor`, `direction`, and `with_total`; other
    /// parameters are ignored and a repeated parameter keeps its last value.
    /// An empty `cursor` counts as absent.
    pub fn from_query<I, K, V>(defaults: PaginateDefaults, params: I) -> Result<Self, PaginateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::builder().defaults(defaults).query_params(params)?.build()
    }

    /// Rows per page.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// The supplied cursor token, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Traversal direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether to count the total.
    #[must_use]
    pub const fn with_total(&self) -> bool {
        self.with_total
    }

    /// Alias mapping for cursor field names.
    #[must_use]
    pub const fn aliases(&self) -> &AliasMap {
        &self.aliases
    }
}

/// Builder for [`PaginateOptions`].
#[derive(Debug, Clone, Default)]
#[must_use = "builder does nothing until .build() is called"]
pub struct PaginateOptionsBuilder {
    defaults: Option<PaginateDefaults>,
    per_page: Option<usize>,
    cursor: Option<String>,
    direction: Direction,
    with_total: bool,
    aliases: AliasMap,
}

impl PaginateOptionsBuilder {
    /// Route-level limits. Without this, [`PaginateDefaults::from_env`] applies.
    pub const fn defaults(mut self, defaults: PaginateDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Rows per page.
    pub const fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Cursor token from a previous page. Empty strings are treated as absent.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        let cursor = cursor.into();
        self.cursor = (!cursor.is_empty()).then_some(cursor);
        self
    }

    /// Traversal direction.
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Whether to count the total.
    pub const fn with_total(mut self, with_total: bool) -> Self {
        self.with_total = with_total;
        self
    }

    /// Alias mapping for cursor field names.
    pub fn aliases(mut self, aliases: AliasMap) -> Self {
        self.aliases = aliases;
        self
    }

    /// Register one `alias -> column` mapping.
    pub fn alias(mut self, alias: impl Into<String>, column: impl Into<String>) -> Self {
        self.aliases.insert(alias, column);
        self
    }

    /// Apply request query parameters.
    pub fn query_params<I, K, V>(mut self, params: I) -> Result<Self, PaginateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                PARAM_PER_PAGE => self.per_page = Some(parse_per_page(value)?),
                PARAM_CURSOR => self = self.cursor(value.trim()),
                PARAM_DIRECTION => self.direction = value.parse()?,
                PARAM_WITH_TOTAL => self.with_total = parse_flag(PARAM_WITH_TOTAL, value)?,
                _ => {},
            }
        }
        Ok(self)
    }

    /// Validate and build.
    pub fn build(self) -> Result<PaginateOptions, PaginateError> {
        let defaults = self.defaults.unwrap_or_default();
        let per_page = self.per_page.unwrap_or(defaults.per_page);
        if per_page == 0 || per_page > defaults.max_per_page {
            return Err(PaginateError::InvalidPerPage {
                value: per_page.to_string(),
            });
        }
        Ok(PaginateOptions {
            per_page,
            cursor: self.cursor,
            direction: self.direction,
            with_total: self.with_total,
            aliases: self.aliases,
        })
    }
}

fn parse_per_page(value: &str) -> Result<usize, PaginateError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PaginateError::InvalidPerPage {
            value: value.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, PaginateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else if trimmed == "1" || trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else {
        Err(PaginateError::InvalidFlag {
            name,
            value: value.to_string(),
        })
    }
}

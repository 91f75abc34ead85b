//! Centralized constants for the cursor-paginate crate.
//!
//! All limits, defaults, and header names are defined here for easy tuning
//! and consistent behavior across the crate.
//!
//! # Environment Variables
//!
//! The route-level page size defaults can be configured via environment variables:
//!
//! | Variable                           | Default | Description                     |
//! |------------------------------------|---------|---------------------------------|
//! | `CURSOR_PAGINATE_DEFAULT_PER_PAGE` | 20      | Page size when none is supplied |
//! | `CURSOR_PAGINATE_MAX_PER_PAGE`     | 100     | Largest page size accepted      |
//!
//! ## Example
//!
//! ```bash
//! CURSOR_PAGINATE_DEFAULT_PER_PAGE=10
//! CURSOR_PAGINATE_MAX_PER_PAGE=50
//! ```

use std::sync::OnceLock;

// ============================================================================
// CURSOR LIMITS
// ============================================================================

/// Maximum allowed cursor token size in bytes (4KB).
/// Checked before base64 decoding so oversized tokens are never decoded.
pub const MAX_CURSOR_SIZE: usize = 4 * 1024;

/// Maximum number of fields allowed in a cursor.
pub const MAX_CURSOR_FIELDS: usize = 16;

// ============================================================================
// PAGE SIZE DEFAULTS
// ============================================================================

const DEFAULT_PER_PAGE: usize = 20;

const DEFAULT_MAX_PER_PAGE: usize = 100;

static DEFAULT_PER_PAGE_CACHE: OnceLock<usize> = OnceLock::new();

static MAX_PER_PAGE_CACHE: OnceLock<usize> = OnceLock::new();

/// Returns the page size used when a request does not supply `per_page`.
///
/// Reads from `CURSOR_PAGINATE_DEFAULT_PER_PAGE` on first call and caches the
/// value for the lifetime of the process. Falls back to 20 if the variable is
/// unset, unparsable, or zero.
#[inline]
pub fn get_default_per_page() -> usize {
    *DEFAULT_PER_PAGE_CACHE
        .get_or_init(|| read_positive_env("CURSOR_PAGINATE_DEFAULT_PER_PAGE", DEFAULT_PER_PAGE))
}

/// Returns the largest `per_page` a request may ask for.
///
/// Reads from `CURSOR_PAGINATE_MAX_PER_PAGE` on first call. Falls back to 100.
#[inline]
pub fn get_max_per_page() -> usize {
    *MAX_PER_PAGE_CACHE
        .get_or_init(|| read_positive_env("CURSOR_PAGINATE_MAX_PER_PAGE", DEFAULT_MAX_PER_PAGE))
}

fn read_positive_env(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

// ============================================================================
// REQUEST PARAMETER NAMES
// ============================================================================

/// Query parameter carrying the page size.
pub const PARAM_PER_PAGE: &str = "per_page";

/// Query parameter carrying the opaque cursor token.
pub const PARAM_CURSOR: &str = "cursor";

/// Query parameter carrying the traversal direction (`forward` / `backward`).
pub const PARAM_DIRECTION: &str = "direction";

/// Query parameter requesting the total row count.
pub const PARAM_WITH_TOTAL: &str = "with_total";

// ============================================================================
// RESPONSE HEADER NAMES
// ============================================================================

/// Header carrying the cursor for the next page.
pub const HEADER_NEXT_CURSOR: &str = "X-Next-Cursor";

/// Header carrying the cursor for the previous page.
pub const HEADER_PREV_CURSOR: &str = "X-Previous-Cursor";

/// Header carrying the total row count.
pub const HEADER_TOTAL: &str = "X-Total";

//! Cursor encoding/decoding.
//!
//! Wire format: standard base64 (with padding) of a JSON array whose elements
//! are single-key objects, one per order column, in order:
//!
//! ```text
//! [{"display_index":1},{"id":2}]  ->  W3siZGlzcGxheV9pbmRleCI6MX0seyJpZCI6Mn1d
//! ```

use base64::{Engine, engine::general_purpose::STANDARD};
use miniserde::json::{self, Array, Object, Value as JsonValue};
use thiserror::Error;

use crate::builder::Value;
use crate::constants::{MAX_CURSOR_FIELDS, MAX_CURSOR_SIZE};

/// A decoded cursor: the order-column values of a boundary row.
///
/// # Security Note
///
/// Cursors are base64-encoded JSON, **not encrypted or signed**. Clients can
/// read and forge them. The resolver only uses cursor values as bound query
/// parameters, and checks the field names against the query's order, but it
/// does not stop a client from seeking to an arbitrary position.
///
/// # Example
///
/// ```
/// use cursor_paginate::Cursor;
///
/// let cursor = Cursor::new().int("display_index", 1).int("id", 2);
/// let token = cursor.encode();
/// assert_eq!(token, "W3siZGlzcGxheV9pbmRleCI6MX0seyJpZCI6Mn1d");
/// assert_eq!(Cursor::decode(&token).unwrap(), cursor);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use = "cursor must be encoded with .encode()"]
pub struct Cursor {
    /// Field values in order-column order.
    pub fields: Vec<(String, Value)>,
}

impl Cursor {
    /// Create a new empty cursor.
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create a cursor from ordered `(name, value)` pairs.
    pub const fn from_fields(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Add a field value to the cursor.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add an integer field.
    pub fn int(self, name: impl Into<String>, value: i64) -> Self {
        self.field(name, Value::Int(value))
    }

    /// Add a string field.
    pub fn string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, Value::String(value.into()))
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the cursor carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode the cursor as an opaque token.
    #[must_use]
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_json())
    }

    /// Encode the cursor, failing if [`decode`](Self::decode) would reject the token.
    ///
    /// # Errors
    ///
    /// [`CursorError::TooManyFields`] above [`MAX_CURSOR_FIELDS`] fields and
    /// [`CursorError::TooLarge`] for tokens longer than [`MAX_CURSOR_SIZE`].
    pub fn try_encode(&self) -> Result<String, CursorError> {
        if self.fields.len() > MAX_CURSOR_FIELDS {
            return Err(CursorError::TooManyFields);
        }
        let token = self.encode();
        if token.len() > MAX_CURSOR_SIZE {
            return Err(CursorError::TooLarge);
        }
        Ok(token)
    }

    /// Decode a cursor token.
    ///
    /// Fails if the token exceeds [`MAX_CURSOR_SIZE`], is not valid base64, is
    /// not JSON, or is not an array of single-key objects holding scalars.
    pub fn decode(encoded: &str) -> Result<Self, CursorError> {
        // Check size before decoding
        if encoded.len() > MAX_CURSOR_SIZE {
            return Err(CursorError::TooLarge);
        }
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| CursorError::InvalidBase64)?;
        let text = std::str::from_utf8(&bytes).map_err(|_| CursorError::InvalidJson)?;
        Self::from_json(text)
    }

    fn to_json(&self) -> String {
        let mut array = Array::new();
        for (name, value) in &self.fields {
            let mut object = Object::new();
            object.insert(name.clone(), value.to_json());
            array.push(JsonValue::Object(object));
        }
        json::to_string(&JsonValue::Array(array))
    }

    fn from_json(text: &str) -> Result<Self, CursorError> {
        let parsed: JsonValue = json::from_str(text).map_err(|_| CursorError::InvalidJson)?;
        let JsonValue::Array(elements) = parsed else {
            return Err(CursorError::InvalidFormat);
        };
        if elements.len() > MAX_CURSOR_FIELDS {
            return Err(CursorError::TooManyFields);
        }

        let mut cursor = Self::new();
        for element in elements.iter() {
            let JsonValue::Object(object) = element else {
                return Err(CursorError::InvalidFormat);
            };
            let mut entries = object.iter();
            let (Some((name, value)), None) = (entries.next(), entries.next()) else {
                return Err(CursorError::InvalidFormat);
            };
            let value = Value::from_json(value).ok_or(CursorError::InvalidFormat)?;
            cursor.fields.push((name.clone(), value));
        }
        Ok(cursor)
    }
}

/// Errors that can occur when decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CursorError {
    /// The base64 encoding is invalid.
    #[error("invalid base64 encoding in cursor")]
    InvalidBase64,
    /// The decoded bytes are not valid UTF-8 JSON.
    #[error("cursor is not valid JSON")]
    InvalidJson,
    /// The JSON is not an array of single-key objects with scalar values.
    #[error("invalid cursor format (expected array of single-key objects)")]
    InvalidFormat,
    /// The token exceeds the maximum allowed size.
    #[error("cursor exceeds maximum size ({}KB limit)", MAX_CURSOR_SIZE / 1024)]
    TooLarge,
    /// The cursor has too many fields.
    #[error("cursor has too many fields (max {MAX_CURSOR_FIELDS})")]
    TooManyFields,
}

impl CursorError {
    /// Returns `true` if this is an encoding/format error.
    ///
    /// Includes `InvalidBase64`, `InvalidJson` and `InvalidFormat`.
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64 | Self::InvalidJson | Self::InvalidFormat
        )
    }

    /// Returns `true` if this is a size/limit error.
    ///
    /// Includes `TooLarge` and `TooManyFields`.
    #[inline]
    #[must_use]
    pub const fn is_limit_error(&self) -> bool {
        matches!(self, Self::TooLarge | Self::TooManyFields)
    }
}

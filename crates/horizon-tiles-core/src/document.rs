//! String-keyed JSON documents.
//!
//! Components, items, layouts and caches all travel as JSON objects. This
//! module provides [`Document`], a thin wrapper around a `serde_json` object
//! map with typed readers and path-based access.
//!
//! # Path-Based Access
//!
//! ```
//! use horizon_tiles_core::document::Document;
//!
//! let doc = Document::parse(r#"{"size": {"width": 320.0}, "items": [{"title": "A"}]}"#)?;
//!
//! assert_eq!(doc.f64("size.width"), Some(320.0));
//! assert_eq!(doc.str("items[0].title"), Some("A"));
//! assert_eq!(doc.f64("size.height"), None);
//! # Ok::<(), horizon_tiles_core::DocumentError>(())
//! ```
//!
//! # Building Documents
//!
//! ```
//! use horizon_tiles_core::document::Document;
//!
//! let mut doc = Document::new();
//! doc.insert("kind", "grid");
//! doc.insert("size", serde_json::json!({"width": 100.0, "height": 40.0}));
//!
//! assert_eq!(doc.to_json_string(), r#"{"kind":"grid","size":{"height":40.0,"width":100.0}}"#);
//! assert_eq!(doc.f64("size.height"), Some(40.0));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocumentError, Result};

/// A JSON object with typed readers and dotted key-path resolution.
///
/// Paths use dot notation for object keys and bracket notation for array
/// indices, e.g. `"size.width"` or `"items[0].title"`. A plain key with no
/// separators is a single-level lookup.
///
/// Readers never fail: a missing key or a value of the wrong type yields
/// `None` (or an empty collection), leaving the choice of default to the
/// caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(Map<String, Value>);

impl Document {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates an empty document.
    pub fn new() -> Self {
        Document(Map::new())
    }

    /// Creates a document from a JSON value if it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Document(map)),
            _ => None,
        }
    }

    /// Creates a document from a borrowed JSON value if it is an object.
    pub fn from_value_ref(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Document)
    }

    /// Parses a JSON string into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON or its root is not an
    /// object.
    pub fn parse(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        match value {
            Value::Object(map) => Ok(Document(map)),
            other => Err(DocumentError::not_an_object(&other)),
        }
    }

    /// Parses JSON bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON or its root is not an
    /// object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        match value {
            Value::Object(map) => Ok(Document(map)),
            other => Err(DocumentError::not_an_object(&other)),
        }
    }

    // ========================================================================
    // Path-Based Access
    // ========================================================================

    /// Gets the raw value at the specified path.
    ///
    /// Returns `None` if any component of the path is missing.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts = parse_path(path);
        let (first, rest) = parts.split_first()?;

        let mut current = match first {
            PathPart::Key(key) => self.0.get(*key)?,
            PathPart::Index(_) => return None,
        };

        for part in rest {
            current = match part {
                PathPart::Key(key) => current.get(*key)?,
                PathPart::Index(idx) => current.get(*idx)?,
            };
        }

        Some(current)
    }

    /// Returns true if a value exists at the specified path.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    // ========================================================================
    // Typed Readers
    // ========================================================================

    /// Returns the string at `path`, if there is one.
    pub fn str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    /// Returns the number at `path` as an `f64`.
    ///
    /// Integers are widened; any other type yields `None`.
    pub fn f64(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_f64()
    }

    /// Returns the boolean at `path`, if there is one.
    pub fn bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// Returns the non-negative integer at `path` as a `usize`.
    pub fn usize(&self, path: &str) -> Option<usize> {
        self.get(path)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Returns a copy of the nested document at `path`.
    ///
    /// Returns `None` if the value is missing or not an object.
    pub fn document(&self, path: &str) -> Option<Document> {
        self.get(path).and_then(Document::from_value_ref)
    }

    /// Returns the elements of the array at `path` that are objects.
    ///
    /// Non-object elements are skipped. A missing or non-array value yields
    /// an empty vector.
    pub fn documents(&self, path: &str) -> Vec<Document> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Document::from_value_ref).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Object Operations
    // ========================================================================

    /// Inserts a top-level key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns true if the top-level key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns an iterator over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over the top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Converts this document to a compact JSON string.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Converts this document to a pretty-printed JSON byte vector.
    pub fn to_bytes_pretty(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(&self.0).unwrap_or_else(|_| self.to_json_string().into_bytes())
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Document(map)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.0)
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document(iter.into_iter().collect())
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Document(map)),
            other => Err(DocumentError::not_an_object(&other)),
        }
    }
}

// ============================================================================
// Serde Support
// ============================================================================

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(Document)
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// A path component for document navigation.
#[derive(Debug, Clone, PartialEq)]
enum PathPart<'a> {
    Key(&'a str),
    Index(usize),
}

/// Parses a path string into components.
///
/// Supports dot notation for keys and bracket notation for indices.
/// Examples: "size.width", "items[0].title", "grid[0][1]".
fn parse_path(path: &str) -> Vec<PathPart<'_>> {
    if path.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut key_start = 0;
    let mut chars = path.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '.' => {
                if i > key_start {
                    parts.push(PathPart::Key(&path[key_start..i]));
                }
                key_start = i + 1;
            }
            '[' => {
                if i > key_start {
                    parts.push(PathPart::Key(&path[key_start..i]));
                }

                let idx_start = i + 1;
                let mut idx_end = path.len();

                while let Some(&(j, ch)) = chars.peek() {
                    chars.next();
                    if ch == ']' {
                        idx_end = j;
                        break;
                    }
                }

                if let Ok(idx) = path[idx_start..idx_end].parse::<usize>() {
                    parts.push(PathPart::Index(idx));
                }

                if let Some(&(_, '.')) = chars.peek() {
                    chars.next();
                }
                key_start = chars.peek().map(|(i, _)| *i).unwrap_or(path.len());
            }
            _ => {}
        }
    }

    if key_start < path.len() {
        parts.push(PathPart::Key(&path[key_start..]));
    }

    parts
}

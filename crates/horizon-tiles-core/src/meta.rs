//! Untyped metadata attached to components and items.
//!
//! [`Meta`] is an open extension bag: a string-keyed map of [`MetaValue`]s.
//! Values are read back through typed accessors that hand out a default on a
//! type mismatch instead of failing.
//!
//! ```
//! use horizon_tiles_core::meta::Meta;
//!
//! let mut meta = Meta::new();
//! meta.insert("columns", 3);
//! meta.insert("title", "Featured");
//!
//! assert_eq!(meta.get::<i64>("columns"), Some(3));
//! assert_eq!(meta.get_or("title", String::new()), "Featured");
//! assert_eq!(meta.get_or("columns", "none".to_string()), "none");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single metadata value.
///
/// Mirrors the shapes a JSON document can hold. Numbers keep their
/// integer/float distinction, but compare numerically: `Integer(2)` equals
/// `Float(2.0)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// A null/empty value.
    #[default]
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating point number.
    Float(f64),
    /// A string value.
    String(String),
    /// An array of values.
    Array(Vec<MetaValue>),
    /// A nested object.
    Object(BTreeMap<String, MetaValue>),
}

impl MetaValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, MetaValue::Null)
    }

    /// Returns this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as an integer, if it is one.
    ///
    /// Floats with no fractional part are accepted as well.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetaValue::Integer(v) => Some(*v),
            MetaValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    /// Returns this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetaValue::Float(v) => Some(*v),
            MetaValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns this value as an array, if it is one.
    pub fn as_array(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Returns this value as an object, if it is one.
    pub fn as_object(&self) -> Option<&BTreeMap<String, MetaValue>> {
        match self {
            MetaValue::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Converts this value into a JSON value.
    ///
    /// Non-finite floats have no JSON form and become null.
    pub fn to_json(&self) -> Value {
        match self {
            MetaValue::Null => Value::Null,
            MetaValue::Bool(b) => Value::Bool(*b),
            MetaValue::Integer(i) => Value::Number((*i).into()),
            MetaValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            MetaValue::String(s) => Value::String(s.clone()),
            MetaValue::Array(arr) => Value::Array(arr.iter().map(MetaValue::to_json).collect()),
            MetaValue::Object(obj) => Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Converts a JSON value into a meta value.
    ///
    /// Integers outside the `i64` range fall back to `Float`.
    pub fn from_json(json: &Value) -> Self {
        match json {
            Value::Null => MetaValue::Null,
            Value::Bool(b) => MetaValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    MetaValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    MetaValue::Float(f)
                } else {
                    MetaValue::Null
                }
            }
            Value::String(s) => MetaValue::String(s.clone()),
            Value::Array(arr) => MetaValue::Array(arr.iter().map(MetaValue::from_json).collect()),
            Value::Object(obj) => MetaValue::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), MetaValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl PartialEq for MetaValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetaValue::Null, MetaValue::Null) => true,
            (MetaValue::Bool(a), MetaValue::Bool(b)) => a == b,
            (MetaValue::Integer(a), MetaValue::Integer(b)) => a == b,
            (MetaValue::Float(a), MetaValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (MetaValue::Integer(a), MetaValue::Float(b))
            | (MetaValue::Float(b), MetaValue::Integer(a)) => (*a as f64) == *b,
            (MetaValue::String(a), MetaValue::String(b)) => a == b,
            (MetaValue::Array(a), MetaValue::Array(b)) => a == b,
            (MetaValue::Object(a), MetaValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        MetaValue::Integer(v as i64)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Integer(v)
    }
}

impl From<f32> for MetaValue {
    fn from(v: f32) -> Self {
        MetaValue::Float(v as f64)
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::String(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::String(v.to_string())
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(v: Vec<T>) -> Self {
        MetaValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Meta> for MetaValue {
    fn from(meta: Meta) -> Self {
        MetaValue::Object(meta.0)
    }
}

/// Trait for types that can be read out of a [`MetaValue`].
pub trait FromMetaValue: Sized {
    /// Attempts to convert a meta value to this type.
    fn from_meta_value(value: &MetaValue) -> Option<Self>;
}

impl FromMetaValue for bool {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromMetaValue for i32 {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_integer().and_then(|v| i32::try_from(v).ok())
    }
}

impl FromMetaValue for i64 {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_integer()
    }
}

impl FromMetaValue for usize {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_integer().and_then(|v| usize::try_from(v).ok())
    }
}

impl FromMetaValue for f32 {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_float().map(|v| v as f32)
    }
}

impl FromMetaValue for f64 {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromMetaValue for String {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromMetaValue for Vec<MetaValue> {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_array().map(<[MetaValue]>::to_vec)
    }
}

impl FromMetaValue for Meta {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        value.as_object().cloned().map(Meta)
    }
}

impl FromMetaValue for MetaValue {
    fn from_meta_value(value: &MetaValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// A string-keyed bag of [`MetaValue`]s.
///
/// Keys are kept sorted so two bags with the same content serialize to the
/// same document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(BTreeMap<String, MetaValue>);

impl Meta {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Meta(BTreeMap::new())
    }

    /// Reads a bag from a JSON value.
    ///
    /// Anything other than an object yields an empty bag.
    pub fn from_json(json: &Value) -> Self {
        match json {
            Value::Object(obj) => Meta(
                obj.iter()
                    .map(|(k, v)| (k.clone(), MetaValue::from_json(v)))
                    .collect(),
            ),
            _ => Meta::new(),
        }
    }

    /// Converts this bag into a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Gets the value under `key` converted to `T`.
    ///
    /// Returns `None` if the key is missing or holds a different type.
    pub fn get<T: FromMetaValue>(&self, key: &str) -> Option<T> {
        self.0.get(key).and_then(T::from_meta_value)
    }

    /// Gets the value under `key` converted to `T`, or `default`.
    pub fn get_or<T: FromMetaValue>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Returns the raw value under `key`.
    pub fn get_raw(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a value and returns it.
    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.0.remove(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns an iterator over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Meta(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

//! Dynamic value representation for JSON data.
//!
//! This module provides the [`JsonValue`] enum, the in-memory model every
//! combinator parses from and prints into.
//!
//! ## Core Types
//!
//! - [`JsonValue`]: a closed tagged union over the seven JSON node kinds
//!   (null, boolean, integer, float, string, array, object)
//!
//! Integers and floats are *distinct* variants: `10.0` decodes as
//! `Float(10.0)` and is never an `Integer`, while an integer literal whose
//! magnitude exceeds the `i64` range is promoted to `Float`.
//!
//! ## The empty sentinel
//!
//! Parsing consumes a value destructively: a combinator that fully consumes a
//! node replaces it with [`JsonValue::empty`] (the empty object). Printing
//! runs in reverse, using the same empty object as the accumulator seed.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use bijson::{bijson, JsonValue};
//!
//! let null = JsonValue::Null;
//! let boolean = JsonValue::from(true);
//! let number = JsonValue::from(42);
//! let text = JsonValue::from("hello");
//!
//! let obj = bijson!({
//!     "name": "Alice",
//!     "age": 30
//! });
//!
//! assert!(obj.is_object());
//! assert!(number.is_integer());
//! assert_eq!(text.as_str(), Some("hello"));
//! ```

use crate::JsonMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any JSON value.
///
/// Produced either by the decoder (from bytes) or by a combinator's print
/// direction (from a typed value); consumed by a combinator's parse
/// direction, which narrows it down to [`JsonValue::empty`] as content is
/// claimed.
///
/// # Examples
///
/// ```rust
/// use bijson::JsonValue;
///
/// let num = JsonValue::Integer(42);
/// let text = JsonValue::String("hello".to_string());
///
/// assert!(num.is_integer());
/// assert!(text.is_string());
/// assert_eq!(num.kind(), "an integer");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonMap),
}

impl JsonValue {
    /// The empty sentinel: an object with no entries.
    ///
    /// A node is reduced to this once a parse has fully consumed it, and
    /// printing starts from it.
    #[must_use]
    pub fn empty() -> Self {
        JsonValue::Object(JsonMap::new())
    }

    /// Returns `true` if this value is the empty sentinel.
    #[must_use]
    pub fn is_empty_sentinel(&self) -> bool {
        matches!(self, JsonValue::Object(map) if map.is_empty())
    }

    /// A short noun for this value's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "a boolean",
            JsonValue::Integer(_) => "an integer",
            JsonValue::Float(_) => "a float",
            JsonValue::String(_) => "a string",
            JsonValue::Array(_) => "an array",
            JsonValue::Object(_) => "an object",
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, JsonValue::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, JsonValue::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// A float is never an integer, even with a zero fractional part.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is numeric, returns it widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Integer(i) => Some(*i as f64),
            JsonValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Compact diagnostic rendering.
///
/// Mirrors canonical encoding for finite values but renders `NaN` and
/// infinities literally, so any value can be displayed in an error message.
/// For canonical bytes use [`crate::to_string`].
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => write!(f, "null"),
            JsonValue::Bool(b) => write!(f, "{}", b),
            JsonValue::Integer(i) => write!(f, "{}", i),
            JsonValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            JsonValue::Float(v) if *v == f64::INFINITY => write!(f, "Infinity"),
            JsonValue::Float(v) if *v == f64::NEG_INFINITY => write!(f, "-Infinity"),
            JsonValue::Float(v) => write!(f, "{:?}", v),
            JsonValue::String(s) => write!(f, "{:?}", s),
            JsonValue::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            JsonValue::Object(obj) => {
                write!(f, "{{")?;
                for (i, (key, value)) in obj.sorted_iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{:?}:{}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Integer(i) => serializer.serialize_i64(*i),
            JsonValue::Float(v) => serializer.serialize_f64(*v),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsonValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct JsonValueVisitor;

        impl<'de> Visitor<'de> for JsonValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(JsonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(JsonValue::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(JsonValue::Integer(value as i64))
                } else {
                    Ok(JsonValue::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(JsonValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(JsonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(JsonValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(JsonValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = JsonMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(JsonValue::Object(values))
            }
        }

        deserializer.deserialize_any(JsonValueVisitor)
    }
}

// TryFrom implementations for extracting values from JsonValue
impl TryFrom<JsonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::Integer(i) => Ok(i),
            other => Err(crate::Error::type_mismatch("an integer", &other)),
        }
    }
}

impl TryFrom<JsonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::Integer(i) => Ok(i as f64),
            JsonValue::Float(v) => Ok(v),
            other => Err(crate::Error::type_mismatch("a number", &other)),
        }
    }
}

impl TryFrom<JsonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::Bool(b) => Ok(b),
            other => Err(crate::Error::type_mismatch("a boolean", &other)),
        }
    }
}

impl TryFrom<JsonValue> for String {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("a string", &other)),
        }
    }
}

// From implementations for creating JsonValue from primitives
impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i8> for JsonValue {
    fn from(value: i8) -> Self {
        JsonValue::Integer(value as i64)
    }
}

impl From<i16> for JsonValue {
    fn from(value: i16) -> Self {
        JsonValue::Integer(value as i64)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Integer(value as i64)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Integer(value)
    }
}

impl From<u8> for JsonValue {
    fn from(value: u8) -> Self {
        JsonValue::Integer(value as i64)
    }
}

impl From<u16> for JsonValue {
    fn from(value: u16) -> Self {
        JsonValue::Integer(value as i64)
    }
}

impl From<u32> for JsonValue {
    fn from(value: u32) -> Self {
        JsonValue::Integer(value as i64)
    }
}

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Float(value as f64)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Float(value)
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(value: JsonMap) -> Self {
        JsonValue::Object(value)
    }
}

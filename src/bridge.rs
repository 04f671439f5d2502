//! Interop with [`serde`] data types.
//!
//! [`SerdeCodec`] adapts any `Deserialize`/`Serialize` type into the
//! combinator protocol by going through the canonical byte encoding. This
//! lets derived record types plug into larger combinators, e.g. as the
//! element of an [`ArrayOf`](crate::ArrayOf) or the value of a
//! [`Field`](crate::Field).
//!
//! Failures inside the foreign codec are remapped onto the engine's own
//! path wrappers, so a deserialization error deep in a nested structure
//! still renders as `outer/[3]/inner/...` like a native combinator failure.
//!
//! # Examples
//!
//! ```rust
//! use bijson::{Field, JsonParser, JsonPrinter, SerdeCodec};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! let field = Field::new("origin", SerdeCodec::<Point>::new());
//! let point = field.parse_slice(br#"{"origin":{"x":1,"y":2}}"#).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! assert_eq!(field.print_slice(&point).unwrap(), br#"{"origin":{"x":1,"y":2}}"#);
//! ```

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_path_to_error::Segment;

use crate::parser::ensure_empty_target;
use crate::{de, ser, Error, JsonParser, JsonPrinter, JsonValue, Result};

/// A combinator backed by a type's serde implementations.
pub struct SerdeCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeCodec<T> {
    pub fn new() -> Self {
        SerdeCodec {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SerdeCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SerdeCodec")
    }
}

/// Rebuilds a path-tracked serde error as nested [`Error::AtKey`] and
/// [`Error::AtIndex`] wrappers around an [`Error::ExternalCodec`] leaf.
fn remap_path_error<E: std::fmt::Display>(error: serde_path_to_error::Error<E>) -> Error {
    let segments: Vec<_> = error.path().iter().cloned().collect();
    let leaf = Error::ExternalCodec {
        message: error.into_inner().to_string(),
    };
    segments.into_iter().rev().fold(leaf, |inner, segment| {
        match segment {
            Segment::Map { key } => inner.at_key(key),
            Segment::Enum { variant } => inner.at_key(variant),
            Segment::Seq { index } => inner.at_index(index),
            Segment::Unknown => inner,
        }
    })
}

impl<T: DeserializeOwned> JsonParser for SerdeCodec<T> {
    type Output = T;

    fn parse(&self, value: &mut JsonValue) -> Result<T> {
        // Round through the canonical encoding rather than walking the
        // model directly; the foreign codec only ever sees bytes.
        let bytes = ser::to_vec(value)?;
        let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
        let output = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(remap_path_error)?;
        *value = JsonValue::empty();
        Ok(output)
    }
}

impl<T: DeserializeOwned + Serialize> JsonPrinter for SerdeCodec<T> {
    fn print(&self, output: &T, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        let mut bytes = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut bytes);
        serde_path_to_error::serialize(output, &mut serializer).map_err(remap_path_error)?;
        *target = de::from_slice(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bijson;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Config {
        name: String,
        retries: u32,
        tags: Vec<String>,
    }

    #[test]
    fn test_parse_derived_struct() {
        let codec = SerdeCodec::<Config>::new();
        let mut value = bijson!({
            "name": "svc",
            "retries": 3,
            "tags": ["a", "b"],
        });
        let config = codec.parse(&mut value).unwrap();
        assert_eq!(
            config,
            Config {
                name: "svc".to_string(),
                retries: 3,
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
        assert!(value.is_empty_sentinel());
    }

    #[test]
    fn test_print_derived_struct() {
        let codec = SerdeCodec::<Config>::new();
        let config = Config {
            name: "svc".to_string(),
            retries: 0,
            tags: vec![],
        };
        assert_eq!(
            codec.print_value(&config).unwrap(),
            bijson!({ "name": "svc", "retries": 0, "tags": [] })
        );
    }

    #[test]
    fn test_error_paths_are_remapped() {
        #[derive(Debug, Deserialize)]
        struct Outer {
            #[allow(dead_code)]
            items: Vec<Inner>,
        }
        #[derive(Debug, Deserialize)]
        struct Inner {
            #[allow(dead_code)]
            n: i64,
        }

        let codec = SerdeCodec::<Outer>::new();
        let error = codec
            .parse_slice(br#"{"items":[{"n":1},{"n":"two"}]}"#)
            .unwrap_err();
        let rendered = error.to_string();
        assert!(
            rendered.starts_with("items/[1]/n/"),
            "unexpected path rendering: {rendered}"
        );
    }

    #[test]
    fn test_print_requires_empty_target() {
        let codec = SerdeCodec::<Vec<i64>>::new();
        let mut target = bijson!([1]);
        assert!(codec.print(&vec![2], &mut target).is_err());
    }
}

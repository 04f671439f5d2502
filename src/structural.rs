//! Structural combinators over arrays and objects.
//!
//! [`ArrayOf`] and [`MapOf`] recursively apply a child combinator to every
//! element or entry, wrapping any child failure with its index or key so
//! errors carry a full path. Both validate their size against an [`Arity`]
//! before touching any child, and both are transactional: the node is
//! consumed (reduced to the empty sentinel) only on full success, and left
//! untouched on failure.
//!
//! ## Examples
//!
//! ```rust
//! use bijson::{Arity, ArrayOf, IntegerValue, JsonParser};
//!
//! let triple = ArrayOf::new(IntegerValue::<i64>::new()).with_arity(Arity::exactly(3));
//! assert_eq!(triple.parse_slice(b"[1,2,3]").unwrap(), vec![1, 2, 3]);
//!
//! let error = triple.parse_slice(b"[1,2]").unwrap_err();
//! assert_eq!(error.to_string(), "expected 3 elements, found 2");
//! ```

use crate::parser::ensure_empty_target;
use crate::text::{Identity, TextParser, TextPrinter};
use crate::{Error, JsonMap, JsonParser, JsonPrinter, JsonValue, Result};
use indexmap::IndexMap;
use std::hash::Hash;

/// An inclusive element/entry count constraint.
///
/// # Examples
///
/// ```rust
/// use bijson::Arity;
///
/// assert!(Arity::any().contains(0));
/// assert!(Arity::exactly(3).contains(3));
/// assert!(!Arity::exactly(3).contains(2));
/// assert!(Arity::between(1, 4).contains(4));
/// assert!(!Arity::at_least(1).contains(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    /// No constraint.
    #[must_use]
    pub const fn any() -> Self {
        Arity { min: 0, max: None }
    }

    /// Exactly `count`.
    #[must_use]
    pub const fn exactly(count: usize) -> Self {
        Arity {
            min: count,
            max: Some(count),
        }
    }

    /// At least `min`, unbounded above.
    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    /// At most `max`.
    #[must_use]
    pub const fn at_most(max: usize) -> Self {
        Arity {
            min: 0,
            max: Some(max),
        }
    }

    /// Between `min` and `max`, inclusive on both ends.
    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    /// Returns `true` if `count` satisfies the constraint.
    #[must_use]
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// Renders the allowed range for error messages, pluralizing the noun.
    pub(crate) fn describe(&self, singular: &str, plural: &str) -> String {
        let counted = |n: usize| {
            let noun = if n == 1 { singular } else { plural };
            format!("{n} {noun}")
        };
        match (self.min, self.max) {
            (min, Some(max)) if min == max => counted(min),
            (0, Some(max)) => format!("at most {}", counted(max)),
            (min, None) if min == 0 => format!("any number of {plural}"),
            (min, None) => format!("at least {}", counted(min)),
            (min, Some(max)) => format!("between {min} and {} {plural}", max),
        }
    }
}

impl Default for Arity {
    fn default() -> Self {
        Arity::any()
    }
}

/// Applies an element combinator to every item of an array.
///
/// Element failures are wrapped with their index. On success the node is
/// reduced to the empty sentinel.
#[derive(Debug, Clone)]
pub struct ArrayOf<E> {
    element: E,
    arity: Arity,
}

impl<E> ArrayOf<E> {
    /// An array combinator with unconstrained length.
    pub fn new(element: E) -> Self {
        ArrayOf {
            element,
            arity: Arity::any(),
        }
    }

    /// Sets the length constraint.
    #[must_use]
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }
}

impl<E: JsonParser> JsonParser for ArrayOf<E> {
    type Output = Vec<E::Output>;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let items = match value {
            JsonValue::Array(items) => items,
            other => return Err(Error::type_mismatch("an array", other)),
        };
        if !self.arity.contains(items.len()) {
            return Err(Error::arity(
                self.arity.describe("element", "elements"),
                items.len(),
                false,
            ));
        }
        let mut outputs = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            // Parse against a scratch copy so a mid-array failure leaves
            // the original node untouched.
            let mut scratch = item.clone();
            outputs.push(
                self.element
                    .parse(&mut scratch)
                    .map_err(|e| e.at_index(index))?,
            );
        }
        *value = JsonValue::empty();
        Ok(outputs)
    }
}

impl<E: JsonPrinter> JsonPrinter for ArrayOf<E> {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        if !self.arity.contains(output.len()) {
            return Err(Error::arity(
                self.arity.describe("element", "elements"),
                output.len(),
                true,
            ));
        }
        let mut items = Vec::with_capacity(output.len());
        for (index, item) in output.iter().enumerate() {
            items.push(
                self.element
                    .print_value(item)
                    .map_err(|e| e.at_index(index))?,
            );
        }
        *target = JsonValue::Array(items);
        Ok(())
    }
}

/// Applies a key combinator and a value combinator to every entry of an
/// object, producing a typed map.
///
/// The key combinator converts raw string keys to any hashable type and
/// must be invertible for printing; the default [`Identity`] passes keys
/// through unchanged. Entries are parsed in lexicographic key order, so
/// the first reported failure is deterministic regardless of insertion
/// order. Value failures are wrapped with their (original string) key;
/// key failures are wrapped as
/// [`InvalidMapKey`](crate::Error::InvalidMapKey).
///
/// # Examples
///
/// ```rust
/// use bijson::{IntegerValue, JsonParser, MapOf, StringValue};
/// use bijson::text::IntegerText;
///
/// let scores = MapOf::new(IntegerValue::<i64>::new());
/// let parsed = scores.parse_slice(br#"{"a":1,"b":2}"#).unwrap();
/// assert_eq!(parsed["a"], 1);
///
/// // Integer-keyed object via a custom key combinator.
/// let by_id = MapOf::keyed(IntegerText, StringValue);
/// let parsed = by_id.parse_slice(br#"{"2":"two","10":"ten"}"#).unwrap();
/// assert_eq!(parsed[&2], "two");
/// ```
#[derive(Debug, Clone)]
pub struct MapOf<V, K = Identity> {
    key: K,
    value: V,
    arity: Arity,
}

impl<V> MapOf<V> {
    /// A map combinator with raw string keys and unconstrained size.
    pub fn new(value: V) -> Self {
        MapOf {
            key: Identity,
            value,
            arity: Arity::any(),
        }
    }
}

impl<V, K> MapOf<V, K> {
    /// A map combinator with a custom key combinator.
    pub fn keyed(key: K, value: V) -> Self {
        MapOf {
            key,
            value,
            arity: Arity::any(),
        }
    }

    /// Sets the entry-count constraint.
    #[must_use]
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }
}

impl<V, K> JsonParser for MapOf<V, K>
where
    V: JsonParser,
    K: TextParser,
    K::Output: Hash + Eq,
{
    type Output = IndexMap<K::Output, V::Output>;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object", other)),
        };
        if !self.arity.contains(map.len()) {
            return Err(Error::arity(
                self.arity.describe("entry", "entries"),
                map.len(),
                false,
            ));
        }
        let mut outputs = IndexMap::with_capacity(map.len());
        for raw_key in map.sorted_keys() {
            let parsed_key = parse_full_key(&self.key, &raw_key)?;
            let mut scratch = map.get(&raw_key).cloned().expect("key taken from the map");
            let parsed_value = self
                .value
                .parse(&mut scratch)
                .map_err(|e| e.at_key(raw_key.clone()))?;
            outputs.insert(parsed_key, parsed_value);
        }
        *value = JsonValue::empty();
        Ok(outputs)
    }
}

impl<V, K> JsonPrinter for MapOf<V, K>
where
    V: JsonPrinter,
    K: TextPrinter,
    K::Output: Hash + Eq + std::fmt::Debug,
{
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        if !self.arity.contains(output.len()) {
            return Err(Error::arity(
                self.arity.describe("entry", "entries"),
                output.len(),
                true,
            ));
        }
        let mut map = JsonMap::with_capacity(output.len());
        for (key, entry) in output {
            let raw_key = self.key.print_text(key).map_err(|e| Error::InvalidMapKey {
                key: format!("{key:?}"),
                detail: Box::new(e),
            })?;
            let printed = self
                .value
                .print_value(entry)
                .map_err(|e| e.at_key(raw_key.clone()))?;
            map.insert(raw_key, printed);
        }
        *target = JsonValue::Object(map);
        Ok(())
    }
}

/// Runs a key combinator over an entire raw key, requiring full
/// consumption.
fn parse_full_key<K: TextParser>(key: &K, raw: &str) -> Result<K::Output> {
    let mut rest = raw;
    let parsed = key.parse_text(&mut rest).map_err(|e| Error::InvalidMapKey {
        key: format!("{raw:?}"),
        detail: Box::new(e),
    })?;
    if !rest.is_empty() {
        return Err(Error::InvalidMapKey {
            key: format!("{raw:?}"),
            detail: Box::new(Error::TrailingInput {
                remainder: rest.to_string(),
            }),
        });
    }
    Ok(parsed)
}

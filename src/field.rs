//! Field combinators over object keys.
//!
//! Field combinators are the building blocks for record parsing: each one
//! claims a single key out of an object, leaving the rest of the object in
//! place for sibling fields. Unlike the primitives, a successful field
//! parse does *not* reduce the node to the empty sentinel; it removes only
//! its own key, so composing fields in a tuple walks the object down and a
//! leftover key is visible in the residual.
//!
//! Printing is the mirror image: fields are the one combinator family
//! allowed to print onto a non-empty accumulator, inserting their key into
//! the shared object.
//!
//! ## Examples
//!
//! ```rust
//! use bijson::{Field, JsonParser, JsonPrinter, OptionalField, StringValue};
//!
//! let record = (
//!     Field::new("name", StringValue),
//!     OptionalField::new("nickname", StringValue),
//! );
//! let (name, nickname) = record
//!     .parse_slice(br#"{"name":"Ada","nickname":null}"#)
//!     .unwrap();
//! assert_eq!(name, "Ada");
//! assert_eq!(nickname, None);
//!
//! // None omits the key entirely.
//! let bytes = record.print_slice(&(name, nickname)).unwrap();
//! assert_eq!(bytes, br#"{"name":"Ada"}"#);
//! ```

use crate::{Error, JsonParser, JsonPrinter, JsonValue, Result};

/// A required object field.
///
/// Parsing fails with [`KeyNotPresent`](crate::Error::KeyNotPresent) when
/// the key is missing (distinct from a type mismatch), wraps value failures
/// with the key, and removes the key on success.
#[derive(Debug, Clone)]
pub struct Field<V> {
    key: String,
    value: V,
}

impl<V> Field<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Field {
            key: key.into(),
            value,
        }
    }
}

impl<V: JsonParser> JsonParser for Field<V> {
    type Output = V::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object", other)),
        };
        let Some(current) = map.get(&self.key) else {
            return Err(Error::key_not_present(&self.key));
        };
        // Parse a scratch copy first; the key is only claimed on success.
        let mut scratch = current.clone();
        let output = self
            .value
            .parse(&mut scratch)
            .map_err(|e| e.at_key(self.key.clone()))?;
        map.remove(&self.key);
        Ok(output)
    }
}

impl<V: JsonPrinter> JsonPrinter for Field<V> {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        let printed = self
            .value
            .print_value(output)
            .map_err(|e| e.at_key(self.key.clone()))?;
        let map = match target {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object to print a field into", other)),
        };
        map.insert(self.key.clone(), printed);
        Ok(())
    }
}

/// An existence-only field: requires the key to be present, ignores its
/// value, and produces unit.
///
/// An explicit null at the key is rejected unless [`ExistingField::or_null`]
/// is used. Parse-only; existence cannot be printed back.
#[derive(Debug, Clone)]
pub struct ExistingField {
    key: String,
    allow_null: bool,
}

impl ExistingField {
    pub fn new(key: impl Into<String>) -> Self {
        ExistingField {
            key: key.into(),
            allow_null: false,
        }
    }

    /// Also accepts an explicit null at the key.
    #[must_use]
    pub fn or_null(mut self) -> Self {
        self.allow_null = true;
        self
    }
}

impl JsonParser for ExistingField {
    type Output = ();

    fn parse(&self, value: &mut JsonValue) -> Result<()> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object", other)),
        };
        match map.get(&self.key) {
            None => Err(Error::key_not_present(&self.key)),
            Some(JsonValue::Null) if !self.allow_null => Err(Error::UnexpectedNull {
                key: self.key.clone(),
            }),
            Some(_) => {
                map.remove(&self.key);
                Ok(())
            }
        }
    }
}

/// An optional object field producing `Option<V::Output>`.
///
/// A missing key or an explicit null both parse as `None`; the key, when
/// present, is removed either way. A present non-null value that fails its
/// combinator is a real failure, never swallowed into `None`. Printing
/// `None` omits the key entirely.
#[derive(Debug, Clone)]
pub struct OptionalField<V> {
    key: String,
    value: V,
}

impl<V> OptionalField<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        OptionalField {
            key: key.into(),
            value,
        }
    }

    /// Substitutes a default for the absent case, producing `V::Output`
    /// directly.
    pub fn with_default(self, default: V::Output) -> FieldWithDefault<V>
    where
        V: JsonParser,
    {
        FieldWithDefault {
            key: self.key,
            value: self.value,
            default,
        }
    }
}

impl<V: JsonParser> JsonParser for OptionalField<V> {
    type Output = Option<V::Output>;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object", other)),
        };
        match map.get(&self.key) {
            None => Ok(None),
            Some(JsonValue::Null) => {
                map.remove(&self.key);
                Ok(None)
            }
            Some(current) => {
                let mut scratch = current.clone();
                let output = self
                    .value
                    .parse(&mut scratch)
                    .map_err(|e| e.at_key(self.key.clone()))?;
                map.remove(&self.key);
                Ok(Some(output))
            }
        }
    }
}

impl<V: JsonPrinter> JsonPrinter for OptionalField<V> {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        match output {
            None => match target {
                JsonValue::Object(_) => Ok(()),
                other => Err(Error::type_mismatch("an object to print a field into", other)),
            },
            Some(inner) => {
                let printed = self
                    .value
                    .print_value(inner)
                    .map_err(|e| e.at_key(self.key.clone()))?;
                let map = match target {
                    JsonValue::Object(map) => map,
                    other => {
                        return Err(Error::type_mismatch(
                            "an object to print a field into",
                            other,
                        ))
                    }
                };
                map.insert(self.key.clone(), printed);
                Ok(())
            }
        }
    }
}

/// An optional field with a default, producing `V::Output` directly.
///
/// A missing key or an explicit null both parse as the default. Printing a
/// value equal to the default omits the key entirely, so defaulted records
/// round-trip to their minimal form; printing therefore requires the output
/// to be equality-comparable.
///
/// # Examples
///
/// ```rust
/// use bijson::{IntegerValue, JsonParser, JsonPrinter, OptionalField};
///
/// let count = OptionalField::new("count", IntegerValue::<i64>::new()).with_default(0);
/// assert_eq!(count.parse_slice(br#"{}"#).unwrap(), 0);
/// assert_eq!(count.parse_slice(br#"{"count":null}"#).unwrap(), 0);
/// assert_eq!(count.parse_slice(br#"{"count":6}"#).unwrap(), 6);
///
/// assert_eq!(count.print_slice(&0).unwrap(), br#"{}"#);
/// assert_eq!(count.print_slice(&6).unwrap(), br#"{"count":6}"#);
/// ```
#[derive(Debug, Clone)]
pub struct FieldWithDefault<V: JsonParser> {
    key: String,
    value: V,
    default: V::Output,
}

impl<V> JsonParser for FieldWithDefault<V>
where
    V: JsonParser,
    V::Output: Clone,
{
    type Output = V::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object", other)),
        };
        match map.get(&self.key) {
            None => Ok(self.default.clone()),
            Some(JsonValue::Null) => {
                map.remove(&self.key);
                Ok(self.default.clone())
            }
            Some(current) => {
                let mut scratch = current.clone();
                let output = self
                    .value
                    .parse(&mut scratch)
                    .map_err(|e| e.at_key(self.key.clone()))?;
                map.remove(&self.key);
                Ok(output)
            }
        }
    }
}

impl<V> JsonPrinter for FieldWithDefault<V>
where
    V: JsonPrinter,
    V::Output: Clone + PartialEq,
{
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        if *output == self.default {
            return match target {
                JsonValue::Object(_) => Ok(()),
                other => Err(Error::type_mismatch("an object to print a field into", other)),
            };
        }
        let printed = self
            .value
            .print_value(output)
            .map_err(|e| e.at_key(self.key.clone()))?;
        let map = match target {
            JsonValue::Object(map) => map,
            other => return Err(Error::type_mismatch("an object to print a field into", other)),
        };
        map.insert(self.key.clone(), printed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bijson, BooleanValue, IntegerValue, StringValue};

    #[test]
    fn test_field_claims_key_and_leaves_residual() {
        let field = Field::new("id", IntegerValue::<i64>::new());
        let mut value = bijson!({ "id": 7, "name": "Ada" });
        assert_eq!(field.parse(&mut value).unwrap(), 7);
        assert_eq!(value, bijson!({ "name": "Ada" }));

        // The same field against the residual is now a missing key.
        let error = field.parse(&mut value).unwrap_err();
        assert_eq!(error, Error::key_not_present("id"));
    }

    #[test]
    fn test_field_missing_key_is_not_a_type_mismatch() {
        let field = Field::new("id", IntegerValue::<i64>::new());
        let error = field.parse_slice(b"{}").unwrap_err();
        assert_eq!(error.to_string(), "no value found for key \"id\"");
    }

    #[test]
    fn test_field_value_failure_keeps_key() {
        let field = Field::new("id", IntegerValue::<i64>::new());
        let mut value = bijson!({ "id": "seven" });
        let error = field.parse(&mut value).unwrap_err();
        assert_eq!(error.to_string(), "id/expected an integer, found a string");
        // Failed parse leaves the key in place.
        assert_eq!(value, bijson!({ "id": "seven" }));
    }

    #[test]
    fn test_field_print_accumulates() {
        let mut target = JsonValue::empty();
        Field::new("a", IntegerValue::<i64>::new())
            .print(&1, &mut target)
            .unwrap();
        Field::new("b", BooleanValue).print(&true, &mut target).unwrap();
        assert_eq!(target, bijson!({ "a": 1, "b": true }));
    }

    #[test]
    fn test_field_print_overwrites_existing_key() {
        let mut target = bijson!({ "a": 1 });
        Field::new("a", IntegerValue::<i64>::new())
            .print(&2, &mut target)
            .unwrap();
        assert_eq!(target, bijson!({ "a": 2 }));
    }

    #[test]
    fn test_existing_field() {
        let marker = ExistingField::new("flag");
        assert!(marker.parse_slice(br#"{"flag":1}"#).is_ok());
        assert_eq!(
            marker.parse_slice(b"{}").unwrap_err(),
            Error::key_not_present("flag")
        );
        // Explicit null is rejected by default...
        let error = marker.parse_slice(br#"{"flag":null}"#).unwrap_err();
        assert_eq!(error.to_string(), "key \"flag\" is present but null");
        // ...and accepted with or_null.
        assert!(ExistingField::new("flag")
            .or_null()
            .parse_slice(br#"{"flag":null}"#)
            .is_ok());
    }

    #[test]
    fn test_optional_field_absent_and_null() {
        let field = OptionalField::new("k", IntegerValue::<i64>::new());
        assert_eq!(field.parse_slice(b"{}").unwrap(), None);
        assert_eq!(field.parse_slice(br#"{"k":null}"#).unwrap(), None);
        assert_eq!(field.parse_slice(br#"{"k":3}"#).unwrap(), Some(3));

        // Null is still removed from the residual.
        let mut value = bijson!({ "k": null, "other": 1 });
        field.parse(&mut value).unwrap();
        assert_eq!(value, bijson!({ "other": 1 }));
    }

    #[test]
    fn test_optional_field_failure_not_swallowed() {
        let field = OptionalField::new("k", IntegerValue::<i64>::new());
        let error = field.parse_slice(br#"{"k":"x"}"#).unwrap_err();
        assert_eq!(error.to_string(), "k/expected an integer, found a string");
    }

    #[test]
    fn test_optional_field_print() {
        let field = OptionalField::new("k", StringValue);
        assert_eq!(field.print_value(&None).unwrap(), bijson!({}));
        assert_eq!(
            field.print_value(&Some("v".to_string())).unwrap(),
            bijson!({ "k": "v" })
        );
    }

    #[test]
    fn test_default_suppression() {
        let count = OptionalField::new("k", IntegerValue::<i64>::new()).with_default(0);
        assert_eq!(count.parse_slice(b"{}").unwrap(), 0);
        assert_eq!(count.parse_slice(br#"{"k":null}"#).unwrap(), 0);
        assert_eq!(count.parse_slice(br#"{"k":6}"#).unwrap(), 6);

        assert_eq!(count.print_value(&0).unwrap(), bijson!({}));
        assert_eq!(count.print_value(&6).unwrap(), bijson!({ "k": 6 }));
    }
}

//! Primitive combinators over single value nodes.
//!
//! Each primitive operates on exactly one [`JsonValue`] node: parsing
//! succeeds only on the matching variant and reduces the node to the empty
//! sentinel, and printing requires the target accumulator to still *be* the
//! empty sentinel (printing onto anything else is a composition error,
//! reported as
//! [`NonEmptyPrintTarget`](crate::Error::NonEmptyPrintTarget)).
//!
//! ## Numbers
//!
//! Numeric combinators are generic over a conversion capability instead of
//! being defined per type:
//!
//! - [`IntegerValue<T>`] accepts only [`JsonValue::Integer`] and
//!   bounds-checks the narrowing into `T`. A float is rejected even when its
//!   fractional part is zero.
//! - [`FloatValue<T>`] accepts [`JsonValue::Float`] always and
//!   [`JsonValue::Integer`] (promoted) unless constructed with
//!   [`FloatValue::strict`].
//!
//! ```rust
//! use bijson::{FloatValue, IntegerValue, JsonParser};
//!
//! assert_eq!(IntegerValue::<u8>::new().parse_slice(b"200").unwrap(), 200);
//! assert!(IntegerValue::<u8>::new().parse_slice(b"300").is_err());
//! assert!(IntegerValue::<i64>::new().parse_slice(b"10.0").is_err());
//!
//! assert_eq!(FloatValue::<f64>::new().parse_slice(b"3").unwrap(), 3.0);
//! assert!(FloatValue::<f64>::strict().parse_slice(b"3").is_err());
//! ```

use crate::parser::ensure_empty_target;
use crate::text::{TextParser, TextPrinter};
use crate::{Error, JsonParser, JsonPrinter, JsonValue, Result};
use std::marker::PhantomData;

/// Parses exactly the `null` value, producing unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValue;

impl JsonParser for NullValue {
    type Output = ();

    fn parse(&self, value: &mut JsonValue) -> Result<()> {
        match value {
            JsonValue::Null => {
                *value = JsonValue::empty();
                Ok(())
            }
            other => Err(Error::type_mismatch("null", other)),
        }
    }
}

impl JsonPrinter for NullValue {
    fn print(&self, _output: &(), target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        *target = JsonValue::Null;
        Ok(())
    }
}

/// Parses a boolean node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValue;

impl JsonParser for BooleanValue {
    type Output = bool;

    fn parse(&self, value: &mut JsonValue) -> Result<bool> {
        match value {
            JsonValue::Bool(b) => {
                let output = *b;
                *value = JsonValue::empty();
                Ok(output)
            }
            other => Err(Error::type_mismatch("a boolean", other)),
        }
    }
}

impl JsonPrinter for BooleanValue {
    fn print(&self, output: &bool, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        *target = JsonValue::Bool(*output);
        Ok(())
    }
}

/// Narrowing/widening capability between `i64` (the model's integer) and a
/// concrete Rust integer type.
pub trait JsonInteger: Copy {
    /// Bounds-checked conversion from the model's integer.
    fn from_model(value: i64) -> Option<Self>;
    /// Lossless widening back into the model's integer.
    fn into_model(self) -> i64;
}

macro_rules! impl_json_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl JsonInteger for $ty {
                fn from_model(value: i64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                fn into_model(self) -> i64 {
                    self as i64
                }
            }
        )+
    };
}

impl_json_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Widening capability between `f64` (the model's float) and a concrete
/// Rust float type.
pub trait JsonFloat: Copy {
    fn from_model(value: f64) -> Self;
    fn into_model(self) -> f64;
}

impl JsonFloat for f64 {
    fn from_model(value: f64) -> Self {
        value
    }

    fn into_model(self) -> f64 {
        self
    }
}

impl JsonFloat for f32 {
    fn from_model(value: f64) -> Self {
        value as f32
    }

    fn into_model(self) -> f64 {
        self as f64
    }
}

/// Parses an integer node into any [`JsonInteger`] type.
///
/// Rejects floats unconditionally; `10.0` is a float in the model even
/// though it has no fractional value.
#[derive(Debug, Clone, Copy)]
pub struct IntegerValue<T = i64> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> IntegerValue<T> {
    #[must_use]
    pub fn new() -> Self {
        IntegerValue {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for IntegerValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: JsonInteger> JsonParser for IntegerValue<T> {
    type Output = T;

    fn parse(&self, value: &mut JsonValue) -> Result<T> {
        match value {
            JsonValue::Integer(i) => {
                let output = T::from_model(*i).ok_or_else(|| {
                    Error::message(format!("integer {i} does not fit the requested width"))
                })?;
                *value = JsonValue::empty();
                Ok(output)
            }
            other => Err(Error::type_mismatch("an integer", other)),
        }
    }
}

impl<T: JsonInteger> JsonPrinter for IntegerValue<T> {
    fn print(&self, output: &T, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        *target = JsonValue::Integer(output.into_model());
        Ok(())
    }
}

/// Parses a float node into any [`JsonFloat`] type.
///
/// By default an integer node is also accepted and promoted; use
/// [`FloatValue::strict`] to require an actual float. The two modes fail
/// with distinct messages.
#[derive(Debug, Clone, Copy)]
pub struct FloatValue<T = f64> {
    allow_integer: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FloatValue<T> {
    /// A float combinator that also accepts (and promotes) integers.
    #[must_use]
    pub fn new() -> Self {
        FloatValue {
            allow_integer: true,
            _marker: PhantomData,
        }
    }

    /// A float combinator that rejects integer nodes.
    #[must_use]
    pub fn strict() -> Self {
        FloatValue {
            allow_integer: false,
            _marker: PhantomData,
        }
    }

    fn expected(&self) -> &'static str {
        if self.allow_integer {
            "a number"
        } else {
            "a floating-point number"
        }
    }
}

impl<T> Default for FloatValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: JsonFloat> JsonParser for FloatValue<T> {
    type Output = T;

    fn parse(&self, value: &mut JsonValue) -> Result<T> {
        match value {
            JsonValue::Float(f) => {
                let output = T::from_model(*f);
                *value = JsonValue::empty();
                Ok(output)
            }
            JsonValue::Integer(i) if self.allow_integer => {
                let output = T::from_model(*i as f64);
                *value = JsonValue::empty();
                Ok(output)
            }
            other => Err(Error::type_mismatch(self.expected(), other)),
        }
    }
}

impl<T: JsonFloat> JsonPrinter for FloatValue<T> {
    fn print(&self, output: &T, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        *target = JsonValue::Float(output.into_model());
        Ok(())
    }
}

/// Parses a string node, producing its text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValue;

impl JsonParser for StringValue {
    type Output = String;

    fn parse(&self, value: &mut JsonValue) -> Result<String> {
        match value {
            JsonValue::String(s) => {
                let output = std::mem::take(s);
                *value = JsonValue::empty();
                Ok(output)
            }
            other => Err(Error::type_mismatch("a string", other)),
        }
    }
}

impl JsonPrinter for StringValue {
    fn print(&self, output: &String, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        *target = JsonValue::String(output.clone());
        Ok(())
    }
}

/// Parses a string node by running an embedded [`TextParser`] over its
/// content.
///
/// The sub-parser must consume the *entire* text; a partially-consumed
/// string fails with [`TrailingInput`](crate::Error::TrailingInput).
/// Printing requires the sub-parser to be a [`TextPrinter`].
///
/// # Examples
///
/// ```rust
/// use bijson::{JsonParser, StringOf};
/// use bijson::text::IntegerText;
///
/// let numeric_string = StringOf::new(IntegerText);
/// assert_eq!(numeric_string.parse_slice(br#""42""#).unwrap(), 42);
/// // "42nd" leaves "nd" unconsumed.
/// assert!(numeric_string.parse_slice(br#""42nd""#).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringOf<P> {
    inner: P,
}

impl<P> StringOf<P> {
    pub fn new(inner: P) -> Self {
        StringOf { inner }
    }
}

impl<P: TextParser> JsonParser for StringOf<P> {
    type Output = P::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<P::Output> {
        match value {
            JsonValue::String(s) => {
                let mut rest: &str = s;
                let output = self.inner.parse_text(&mut rest)?;
                if !rest.is_empty() {
                    return Err(Error::TrailingInput {
                        remainder: rest.to_string(),
                    });
                }
                *value = JsonValue::empty();
                Ok(output)
            }
            other => Err(Error::type_mismatch("a string", other)),
        }
    }
}

impl<P: TextPrinter> JsonPrinter for StringOf<P> {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        ensure_empty_target(target)?;
        *target = JsonValue::String(self.inner.print_text(output)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bijson;
    use crate::text::IntegerText;

    #[test]
    fn test_null_consumes_to_sentinel() {
        let mut value = JsonValue::Null;
        NullValue.parse(&mut value).unwrap();
        assert!(value.is_empty_sentinel());
        assert!(NullValue.parse(&mut JsonValue::Bool(true)).is_err());
    }

    #[test]
    fn test_boolean_round_trip() {
        let mut value = JsonValue::Bool(true);
        assert!(BooleanValue.parse(&mut value).unwrap());
        assert!(value.is_empty_sentinel());
        assert_eq!(
            BooleanValue.print_value(&false).unwrap(),
            JsonValue::Bool(false)
        );
    }

    #[test]
    fn test_integer_rejects_float_even_when_whole() {
        let mut value = JsonValue::Float(10.0);
        let error = IntegerValue::<i64>::new().parse(&mut value).unwrap_err();
        assert_eq!(error.to_string(), "expected an integer, found a float");
        // The failed parse leaves the value untouched.
        assert_eq!(value, JsonValue::Float(10.0));
    }

    #[test]
    fn test_integer_bounds_check() {
        assert_eq!(IntegerValue::<u8>::new().parse_slice(b"255").unwrap(), 255);
        assert!(IntegerValue::<u8>::new().parse_slice(b"256").is_err());
        assert!(IntegerValue::<u8>::new().parse_slice(b"-1").is_err());
        assert_eq!(IntegerValue::<i16>::new().parse_slice(b"-300").unwrap(), -300);
    }

    #[test]
    fn test_float_modes_have_distinct_messages() {
        let promoted = FloatValue::<f64>::new()
            .parse(&mut JsonValue::String("x".to_string()))
            .unwrap_err();
        assert_eq!(promoted.to_string(), "expected a number, found a string");

        let strict = FloatValue::<f64>::strict()
            .parse(&mut JsonValue::Integer(3))
            .unwrap_err();
        assert_eq!(
            strict.to_string(),
            "expected a floating-point number, found an integer"
        );
    }

    #[test]
    fn test_float_promotes_integer_by_default() {
        assert_eq!(FloatValue::<f64>::new().parse_slice(b"3").unwrap(), 3.0);
        assert_eq!(FloatValue::<f32>::new().parse_slice(b"2.5").unwrap(), 2.5f32);
    }

    #[test]
    fn test_string_of_trailing_input() {
        let parser = StringOf::new(IntegerText);
        let error = parser.parse_slice(br#""42nd""#).unwrap_err();
        assert_eq!(
            error,
            Error::TrailingInput {
                remainder: "nd".to_string()
            }
        );
    }

    #[test]
    fn test_print_onto_non_empty_target_fails() {
        let mut target = bijson!({ "occupied": true });
        let error = BooleanValue.print(&true, &mut target).unwrap_err();
        assert!(error
            .to_string()
            .starts_with("attempted to print onto a non-empty value"));
    }

    #[test]
    fn test_string_round_trip() {
        let mut value = JsonValue::String("hello".to_string());
        assert_eq!(StringValue.parse(&mut value).unwrap(), "hello");
        assert!(value.is_empty_sentinel());
        assert_eq!(
            StringValue.print_value(&"hi".to_string()).unwrap(),
            JsonValue::String("hi".to_string())
        );
    }
}

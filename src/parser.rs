//! The dual parser/printer combinator protocol.
//!
//! A combinator is a stateless value with up to two capabilities:
//!
//! - [`JsonParser`]: `parse(&mut JsonValue) -> Result<Output>` — consumes a
//!   decoded value, narrowing it toward [`JsonValue::empty`] as content is
//!   claimed.
//! - [`JsonPrinter`]: `print(&Output, &mut JsonValue) -> Result<()>` — the
//!   inverse direction, building a value up from the empty sentinel.
//!
//! A combinator offering both is a *parser-printer*; composites (tuples,
//! [`OneOf`], [`Convert`]) are parser-printers exactly when every child is.
//!
//! Combinators are immutable and freely shareable; exclusive access during a
//! parse applies to the [`JsonValue`] being narrowed, never to the
//! combinator.
//!
//! ## Sequencing
//!
//! Tuples of combinators run left to right against the same value. Field
//! combinators each claim their own key, so a tuple of fields parses an
//! object into a tuple of outputs:
//!
//! ```rust
//! use bijson::{Field, IntegerValue, JsonParser, StringValue};
//!
//! let user = (
//!     Field::new("id", IntegerValue::<u32>::new()),
//!     Field::new("name", StringValue),
//! );
//! let (id, name) = user.parse_slice(br#"{"id":7,"name":"Ada"}"#).unwrap();
//! assert_eq!((id, name.as_str()), (7, "Ada"));
//! ```
//!
//! ## Alternation
//!
//! [`OneOf`] tries alternatives in declared order and short-circuits on the
//! first success. When every branch fails the error is an
//! [`Error::Multiple`](crate::Error::Multiple) carrying *all* branch
//! failures, never just the last one.

use crate::{Error, JsonValue, Result};

/// The parse capability: consume a [`JsonValue`], producing a typed output.
///
/// On success the implementation must narrow the consumed portion of the
/// value; a combinator that consumes the whole node replaces it with
/// [`JsonValue::empty`]. On failure the value is left as it was
/// (consume-on-success).
pub trait JsonParser {
    /// The typed result of a successful parse.
    type Output;

    /// Parses and narrows `value`.
    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output>;

    /// Decodes `bytes` with the strict codec, then parses the result.
    fn parse_slice(&self, bytes: &[u8]) -> Result<Self::Output>
    where
        Self: Sized,
    {
        let mut value = crate::de::from_slice(bytes)?;
        self.parse(&mut value)
    }

    /// Applies a bidirectional [`Conversion`] to this combinator's output.
    fn convert<C>(self, conversion: C) -> Convert<Self, C>
    where
        Self: Sized,
        C: Conversion<Input = Self::Output>,
    {
        Convert {
            upstream: self,
            conversion,
        }
    }

    /// Applies an infallible, parse-only output mapping.
    ///
    /// The result never implements [`JsonPrinter`]; use [`Self::convert`]
    /// when the mapping must be invertible.
    fn map<F, O>(self, f: F) -> MapOutput<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> O,
    {
        MapOutput { upstream: self, f }
    }
}

/// The print capability: build a [`JsonValue`] back up from a typed output.
pub trait JsonPrinter: JsonParser {
    /// Prints `output` into `target`.
    ///
    /// Most combinators require `target` to be the empty sentinel; field
    /// combinators are the exception, accumulating into a shared object.
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()>;

    /// Prints `output` into a fresh value.
    fn print_value(&self, output: &Self::Output) -> Result<JsonValue> {
        let mut target = JsonValue::empty();
        self.print(output, &mut target)?;
        Ok(target)
    }

    /// Prints `output` and encodes the result to canonical JSON bytes.
    fn print_slice(&self, output: &Self::Output) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        crate::ser::to_vec(&self.print_value(output)?)
    }
}

impl<P: JsonParser + ?Sized> JsonParser for &P {
    type Output = P::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        (**self).parse(value)
    }
}

impl<P: JsonPrinter + ?Sized> JsonPrinter for &P {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        (**self).print(output, target)
    }
}

impl<P: JsonParser + ?Sized> JsonParser for Box<P> {
    type Output = P::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        (**self).parse(value)
    }
}

impl<P: JsonPrinter + ?Sized> JsonPrinter for Box<P> {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        (**self).print(output, target)
    }
}

/// Checks the precondition shared by every non-field print: the accumulator
/// must still be the empty sentinel.
pub(crate) fn ensure_empty_target(target: &JsonValue) -> Result<()> {
    if target.is_empty_sentinel() {
        Ok(())
    } else {
        Err(Error::non_empty_target(target))
    }
}

/// A bidirectional output transformation, used with
/// [`JsonParser::convert`].
///
/// `apply` runs after parsing; `unapply` runs before printing. For
/// tagged-union case selection, `unapply` rejects variants the conversion
/// does not own, which is what lets [`OneOf`] select the right branch when
/// printing.
///
/// # Examples
///
/// ```rust
/// use bijson::{conversion, JsonParser, JsonPrinter, StringValue};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Username(String);
///
/// let parser = StringValue.convert(conversion(
///     |raw: String| Ok(Username(raw)),
///     |name: &Username| Ok(name.0.clone()),
/// ));
/// let name = parser.parse_slice(br#""ada""#).unwrap();
/// assert_eq!(name, Username("ada".to_string()));
/// assert_eq!(parser.print_slice(&name).unwrap(), br#""ada""#);
/// ```
pub trait Conversion {
    type Input;
    type Output;

    /// Converts a parsed input into the final output.
    fn apply(&self, input: Self::Input) -> Result<Self::Output>;

    /// Recovers the upstream input from an output, for printing.
    fn unapply(&self, output: &Self::Output) -> Result<Self::Input>;
}

/// A [`Conversion`] built from a pair of closures. See [`conversion`].
pub struct FnConversion<A, B, F, G> {
    apply: F,
    unapply: G,
    _marker: core::marker::PhantomData<fn(A) -> B>,
}

/// Pairs an `apply` and an `unapply` closure into a [`Conversion`].
pub fn conversion<A, B, F, G>(apply: F, unapply: G) -> FnConversion<A, B, F, G>
where
    F: Fn(A) -> Result<B>,
    G: Fn(&B) -> Result<A>,
{
    FnConversion {
        apply,
        unapply,
        _marker: core::marker::PhantomData,
    }
}

impl<A, B, F, G> Conversion for FnConversion<A, B, F, G>
where
    F: Fn(A) -> Result<B>,
    G: Fn(&B) -> Result<A>,
{
    type Input = A;
    type Output = B;

    fn apply(&self, input: A) -> Result<B> {
        (self.apply)(input)
    }

    fn unapply(&self, output: &B) -> Result<A> {
        (self.unapply)(output)
    }
}

/// A combinator with a [`Conversion`] applied to its output.
///
/// Created by [`JsonParser::convert`].
pub struct Convert<P, C> {
    upstream: P,
    conversion: C,
}

impl<P, C> JsonParser for Convert<P, C>
where
    P: JsonParser,
    C: Conversion<Input = P::Output>,
{
    type Output = C::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let snapshot = value.clone();
        let parsed = self.upstream.parse(value)?;
        match self.conversion.apply(parsed) {
            Ok(output) => Ok(output),
            Err(error) => {
                *value = snapshot;
                Err(error)
            }
        }
    }
}

impl<P, C> JsonPrinter for Convert<P, C>
where
    P: JsonPrinter,
    C: Conversion<Input = P::Output>,
{
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        let input = self.conversion.unapply(output)?;
        self.upstream.print(&input, target)
    }
}

/// A combinator with a parse-only output mapping applied.
///
/// Created by [`JsonParser::map`].
pub struct MapOutput<P, F> {
    upstream: P,
    f: F,
}

impl<P, F, O> JsonParser for MapOutput<P, F>
where
    P: JsonParser,
    F: Fn(P::Output) -> O,
{
    type Output = O;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        self.upstream.parse(value).map(&self.f)
    }
}

/// First-successful-of-N alternation.
///
/// Parsing tries each alternative in declared order against the same value,
/// restoring the value between attempts so a partially-consuming failure
/// never leaks into the next branch. If every alternative fails, the error
/// aggregates all branch failures.
///
/// Printing tries each alternative's printer in order against a scratch
/// target, committing the first success. This is only generally invertible
/// when the alternatives are tagged-union case selectors whose conversions
/// reject foreign variants.
///
/// # Examples
///
/// ```rust
/// use bijson::{Field, IntegerValue, JsonParser, OneOf, StringValue};
///
/// // Accept either {"value": n} or a bare integer.
/// let flexible = OneOf::new(vec![
///     Box::new(Field::new("value", IntegerValue::<i64>::new()))
///         as Box<dyn JsonParser<Output = i64>>,
///     Box::new(IntegerValue::<i64>::new()),
/// ]);
/// assert_eq!(flexible.parse_slice(br#"{"value":3}"#).unwrap(), 3);
/// assert_eq!(flexible.parse_slice(b"3").unwrap(), 3);
/// ```
pub struct OneOf<P> {
    alternatives: Vec<P>,
}

impl<P> OneOf<P> {
    /// Creates an alternation over the given alternatives, tried in order.
    pub fn new(alternatives: Vec<P>) -> Self {
        OneOf { alternatives }
    }
}

impl<P: JsonParser> JsonParser for OneOf<P> {
    type Output = P::Output;

    fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
        let snapshot = value.clone();
        let mut failures = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match alternative.parse(value) {
                Ok(output) => return Ok(output),
                Err(failure) => {
                    *value = snapshot.clone();
                    failures.push(failure);
                }
            }
        }
        Err(match failures.len() {
            0 => Error::message("no alternatives to try"),
            1 => failures.pop().expect("len checked"),
            _ => Error::Multiple(failures),
        })
    }
}

impl<P: JsonPrinter> JsonPrinter for OneOf<P> {
    fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
        let mut failures = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            let mut scratch = target.clone();
            match alternative.print(output, &mut scratch) {
                Ok(()) => {
                    *target = scratch;
                    return Ok(());
                }
                Err(failure) => failures.push(failure),
            }
        }
        Err(match failures.len() {
            0 => Error::message("no alternatives to try"),
            1 => failures.pop().expect("len checked"),
            _ => Error::Multiple(failures),
        })
    }
}

macro_rules! impl_tuple_combinator {
    ($(($($name:ident : $index:tt),+)),+ $(,)?) => {
        $(
            impl<$($name: JsonParser),+> JsonParser for ($($name,)+) {
                type Output = ($($name::Output,)+);

                fn parse(&self, value: &mut JsonValue) -> Result<Self::Output> {
                    Ok(($(self.$index.parse(value)?,)+))
                }
            }

            impl<$($name: JsonPrinter),+> JsonPrinter for ($($name,)+) {
                fn print(&self, output: &Self::Output, target: &mut JsonValue) -> Result<()> {
                    $(self.$index.print(&output.$index, target)?;)+
                    Ok(())
                }
            }
        )+
    };
}

impl_tuple_combinator! {
    (A:0),
    (A:0, B:1),
    (A:0, B:1, C:2),
    (A:0, B:1, C:2, D:3),
    (A:0, B:1, C:2, D:3, E:4),
    (A:0, B:1, C:2, D:3, E:4, F:5),
    (A:0, B:1, C:2, D:3, E:4, F:5, G:6),
    (A:0, B:1, C:2, D:3, E:4, F:5, G:6, H:7),
}

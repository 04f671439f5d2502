//! Text-level sub-parsers.
//!
//! [`TextParser`] and [`TextPrinter`] are the string-content counterparts of
//! the value-level combinator protocol. They are used in two places:
//!
//! - embedded inside [`StringOf`](crate::StringOf), which requires the
//!   sub-parser to consume the *entire* string content (anything left over
//!   is a [`TrailingInput`](crate::Error::TrailingInput) failure);
//! - as the key combinator of [`MapOf`](crate::MapOf), converting raw
//!   string keys to and from an arbitrary hashable key type.
//!
//! A text parser consumes a prefix of its input by advancing the `&mut &str`
//! cursor; full consumption is the *caller's* contract, not the parser's.
//!
//! Scalar conversion extensions (dates, raw-value enums and similar) are
//! just instances of this pattern: a pure `T -> text` function paired with a
//! partial `text -> T` function.

use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// The text-level parse capability.
pub trait TextParser {
    /// The typed result of a successful text parse.
    type Output;

    /// Parses a prefix of `input`, advancing the cursor past what was
    /// consumed.
    fn parse_text(&self, input: &mut &str) -> Result<Self::Output>;
}

/// The text-level print capability.
pub trait TextPrinter: TextParser {
    /// Renders `output` back to text.
    fn print_text(&self, output: &Self::Output) -> Result<String>;
}

/// The identity text combinator: consumes the whole input as-is.
///
/// This is the default key combinator of [`MapOf`](crate::MapOf).
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl TextParser for Identity {
    type Output = String;

    fn parse_text(&self, input: &mut &str) -> Result<String> {
        let output = input.to_string();
        *input = "";
        Ok(output)
    }
}

impl TextPrinter for Identity {
    fn print_text(&self, output: &String) -> Result<String> {
        Ok(output.clone())
    }
}

/// Matches an exact literal prefix, producing unit.
///
/// # Examples
///
/// ```rust
/// use bijson::text::{Literal, TextParser};
///
/// let mut input = "items.rest";
/// Literal("items.").parse_text(&mut input).unwrap();
/// assert_eq!(input, "rest");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Literal(pub &'static str);

impl TextParser for Literal {
    type Output = ();

    fn parse_text(&self, input: &mut &str) -> Result<()> {
        match input.strip_prefix(self.0) {
            Some(rest) => {
                *input = rest;
                Ok(())
            }
            None => Err(Error::message(format!("expected the literal {:?}", self.0))),
        }
    }
}

impl TextPrinter for Literal {
    fn print_text(&self, _output: &()) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Parses a leading base-10 integer (optional `-` sign), leaving any
/// remaining text unconsumed.
///
/// Useful both as a [`MapOf`](crate::MapOf) key combinator for
/// integer-keyed objects and for exercising the trailing-input contract of
/// [`StringOf`](crate::StringOf).
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerText;

impl TextParser for IntegerText {
    type Output = i64;

    fn parse_text(&self, input: &mut &str) -> Result<i64> {
        let bytes = input.as_bytes();
        let digits_start = usize::from(bytes.first() == Some(&b'-'));
        let digits_end = bytes[digits_start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |i| digits_start + i);
        if digits_end == digits_start {
            return Err(Error::message("expected a decimal integer"));
        }
        let (literal, rest) = input.split_at(digits_end);
        let parsed = literal
            .parse::<i64>()
            .map_err(|_| Error::message(format!("integer literal {literal:?} out of range")))?;
        *input = rest;
        Ok(parsed)
    }
}

impl TextPrinter for IntegerText {
    fn print_text(&self, output: &i64) -> Result<String> {
        Ok(output.to_string())
    }
}

/// Parses an RFC 3339 timestamp, consuming the whole input.
///
/// # Examples
///
/// ```rust
/// use bijson::{JsonParser, JsonPrinter, StringOf};
/// use bijson::text::DateTimeText;
///
/// let date = StringOf::new(DateTimeText);
/// let parsed = date.parse_slice(br#""2024-01-15T10:30:00Z""#).unwrap();
/// assert_eq!(
///     date.print_slice(&parsed).unwrap(),
///     br#""2024-01-15T10:30:00+00:00""#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeText;

impl TextParser for DateTimeText {
    type Output = DateTime<Utc>;

    fn parse_text(&self, input: &mut &str) -> Result<DateTime<Utc>> {
        let parsed = DateTime::parse_from_rfc3339(input)
            .map_err(|e| Error::message(format!("expected an RFC 3339 timestamp: {e}")))?;
        *input = "";
        Ok(parsed.with_timezone(&Utc))
    }
}

impl TextPrinter for DateTimeText {
    fn print_text(&self, output: &DateTime<Utc>) -> Result<String> {
        Ok(output.to_rfc3339())
    }
}

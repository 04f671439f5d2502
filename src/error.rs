//! Error types shared by both directions of the engine.
//!
//! Decoding, parsing, printing, and encoding all fail with the same
//! recursive [`Error`]: a leaf describes what went wrong, and the
//! [`Error::AtKey`] / [`Error::AtIndex`] wrappers accumulate the path from
//! the failure site back to the root. A rendered error therefore reads as a
//! slash-delimited path followed by the leaf description:
//!
//! ```text
//! items/[2]/expected an integer, found a string
//! ```
//!
//! Alternation never discards context: when every branch of a
//! [`crate::OneOf`] fails, the resulting [`Error::Multiple`] renders every
//! branch's fully-formed path and message.
//!
//! ## Examples
//!
//! ```rust
//! use bijson::Error;
//!
//! let err = Error::key_not_present("id").at_key("user");
//! assert_eq!(err.to_string(), "user/no value found for key \"id\"");
//! ```

use thiserror::Error;

/// Which non-finite float was rejected by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFinite {
    NaN,
    Infinity,
}

impl std::fmt::Display for NonFinite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonFinite::NaN => write!(f, "NaN"),
            NonFinite::Infinity => write!(f, "infinity"),
        }
    }
}

/// Any failure produced while decoding, parsing, printing, or encoding.
///
/// Structural combinators wrap child failures with their own key or index,
/// building the path bottom-up; the wrapping is uniform and never skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Decode was called on zero-length input.
    #[error("empty input")]
    EmptyInput,

    /// Lexical or structural malformation in the input bytes.
    ///
    /// Always names the construct that was expected.
    #[error("syntax error at byte {offset}: expected {expected}")]
    Syntax { offset: usize, expected: String },

    /// A node's kind did not match what the combinator required.
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A required field's key was missing from the object.
    #[error("no value found for key {key:?}")]
    KeyNotPresent { key: String },

    /// An existence-only field found an explicit null it does not accept.
    #[error("key {key:?} is present but null")]
    UnexpectedNull { key: String },

    /// Element or entry count outside the configured arity range.
    ///
    /// `printing` selects the print-direction phrasing so the two
    /// directions are never confusable.
    #[error("{}", arity_message(.expected, .found, .printing))]
    ArityViolation {
        expected: String,
        found: usize,
        printing: bool,
    },

    /// Attempted to encode a NaN or infinite float.
    #[error("cannot encode {kind} as a JSON number")]
    NonFiniteNumber { kind: NonFinite },

    /// An embedded text sub-parser left part of the string unconsumed.
    #[error("expected end of input, found trailing content {remainder:?}")]
    TrailingInput { remainder: String },

    /// A primitive print found its accumulator already holding a value.
    #[error("attempted to print onto a non-empty value: {found}")]
    NonEmptyPrintTarget { found: String },

    /// A map key failed its key combinator, in either direction.
    #[error("invalid map key {key}: {detail}")]
    InvalidMapKey { key: String, detail: Box<Error> },

    /// Wrapped failure from the black-box reflective codec bridge.
    #[error("external codec failure: {message}")]
    ExternalCodec { message: String },

    /// Every alternative of a `OneOf` failed; all branch failures are kept.
    #[error("{}", multiple_message(.0))]
    Multiple(Vec<Error>),

    /// A failure beneath an object key.
    #[error("{key}/{detail}")]
    AtKey { key: String, detail: Box<Error> },

    /// A failure beneath an array index.
    #[error("[{index}]/{detail}")]
    AtIndex { index: usize, detail: Box<Error> },

    /// Free-form failure from a conversion or text parser.
    #[error("{0}")]
    Message(String),
}

fn arity_message(expected: &str, found: &usize, printing: &bool) -> String {
    if *printing {
        format!("expected {expected}, was given {found} to print")
    } else {
        format!("expected {expected}, found {found}")
    }
}

fn multiple_message(errors: &[Error]) -> String {
    let mut out = String::from("multiple failures:");
    for error in errors {
        out.push_str("\n  - ");
        out.push_str(&error.to_string().replace('\n', "\n    "));
    }
    out
}

/// Alias for `std::result::Result<T, bijson::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a syntax error naming the expected construct.
    pub fn syntax(offset: usize, expected: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            expected: expected.into(),
        }
    }

    /// Creates a type-mismatch error against an actual value.
    pub fn type_mismatch(expected: impl Into<String>, found: &crate::JsonValue) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.kind().to_string(),
        }
    }

    /// Creates a missing-key error.
    pub fn key_not_present(key: impl Into<String>) -> Self {
        Error::KeyNotPresent { key: key.into() }
    }

    /// Creates an arity-violation error; `expected` is the rendered range
    /// description, e.g. `"3 elements"` or `"at least 1 entry"`.
    pub fn arity(expected: impl Into<String>, found: usize, printing: bool) -> Self {
        Error::ArityViolation {
            expected: expected.into(),
            found,
            printing,
        }
    }

    /// Creates a non-empty-print-target error against the offending value.
    pub fn non_empty_target(found: &crate::JsonValue) -> Self {
        Error::NonEmptyPrintTarget {
            found: found.to_string(),
        }
    }

    /// Creates a free-form failure message.
    pub fn message<T: std::fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Wraps this failure with the object key it occurred beneath.
    #[must_use]
    pub fn at_key(self, key: impl Into<String>) -> Self {
        Error::AtKey {
            key: key.into(),
            detail: Box::new(self),
        }
    }

    /// Wraps this failure with the array index it occurred beneath.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        Error::AtIndex {
            index,
            detail: Box::new(self),
        }
    }
}

//! # bijson
//!
//! A bidirectional JSON engine: one combinator describes both directions.
//!
//! ## What is a bidirectional combinator?
//!
//! Most JSON libraries give you two unrelated artifacts for a data shape: a
//! parser and a serializer, which drift apart as the shape evolves. Here a
//! single value of a combinator type *is* both. [`JsonParser::parse`] turns
//! a decoded [`JsonValue`] into typed output, consuming what it recognizes;
//! [`JsonPrinter::print`] turns that output back into a value. Composing
//! combinators composes both directions at once, so a shape described once
//! stays round-trip consistent by construction.
//!
//! ## Key Features
//!
//! - **Single Source of Truth**: every combinator reads and writes the same
//!   shape; parse/print asymmetry is impossible to introduce by accident
//! - **Destructive Narrowing**: parsing consumes recognized input, so
//!   leftover keys and trailing data are detectable, not silently ignored
//! - **Transactional**: a failed parse leaves the input value untouched,
//!   which makes alternation ([`OneOf`]) and optional fields exact
//! - **Path-Tracked Errors**: failures carry their location
//!   (`items/[2]/name/expected a string, found null`) all the way up
//! - **Canonical Encoding**: byte output is deterministic — no whitespace,
//!   lexicographically ordered keys — so equal values encode equal bytes
//! - **Serde Compatible**: derived types plug into combinator trees via
//!   [`SerdeCodec`]
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bijson = "0.1"
//! ```
//!
//! ### Parsing and printing with one description
//!
//! ```rust
//! use bijson::{ArrayOf, Field, IntegerValue, JsonParser, JsonPrinter, StringValue};
//!
//! let user = (
//!     Field::new("name", StringValue),
//!     Field::new("logins", IntegerValue::<u32>::new()),
//!     Field::new("tags", ArrayOf::new(StringValue)),
//! );
//!
//! let (name, logins, tags) = user
//!     .parse_slice(br#"{"name":"Ada","logins":3,"tags":["admin"]}"#)
//!     .unwrap();
//! assert_eq!(name, "Ada");
//! assert_eq!(logins, 3);
//! assert_eq!(tags, vec!["admin".to_string()]);
//!
//! // The same description prints, canonically.
//! let bytes = user.print_slice(&(name, logins, tags)).unwrap();
//! assert_eq!(bytes, br#"{"logins":3,"name":"Ada","tags":["admin"]}"#);
//! ```
//!
//! ### Errors carry their path
//!
//! ```rust
//! use bijson::{ArrayOf, Field, IntegerValue, JsonParser};
//!
//! let parser = Field::new("items", ArrayOf::new(IntegerValue::<i64>::new()));
//! let error = parser.parse_slice(br#"{"items":[1,2,"three"]}"#).unwrap_err();
//! assert_eq!(error.to_string(), "items/[2]/expected an integer, found a string");
//! ```
//!
//! ### Dynamic values with the bijson! macro
//!
//! ```rust
//! use bijson::{bijson, JsonValue};
//!
//! let data = bijson!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "json"]
//! });
//!
//! if let JsonValue::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Concurrency
//!
//! Combinators are plain immutable values: `parse` and `print` take `&self`,
//! and all mutation happens on the caller-owned [`JsonValue`]. Any
//! combinator whose parts are `Send + Sync` is itself freely shareable
//! across threads.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All array indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - No panics in the public API (except for logic errors that indicate bugs)

pub mod bridge;
pub mod de;
pub mod error;
pub mod field;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod pretty;
pub mod primitives;
pub mod ser;
pub mod structural;
pub mod text;
pub mod value;

pub use bridge::SerdeCodec;
pub use de::{from_slice, from_slice_with_options, from_str};
pub use error::{Error, NonFinite, Result};
pub use field::{ExistingField, Field, FieldWithDefault, OptionalField};
pub use map::JsonMap;
pub use options::DecodeOptions;
pub use parser::{conversion, Conversion, Convert, JsonParser, JsonPrinter, MapOutput, OneOf};
pub use pretty::{pretty, pretty_with_options, PrettyOptions};
pub use primitives::{
    BooleanValue, FloatValue, IntegerValue, JsonFloat, JsonInteger, NullValue, StringOf,
    StringValue,
};
pub use ser::{to_string, to_vec};
pub use structural::{Arity, ArrayOf, MapOf};
pub use text::{TextParser, TextPrinter};
pub use value::JsonValue;

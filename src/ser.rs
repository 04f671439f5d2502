//! Canonical JSON encoding.
//!
//! This module turns a [`JsonValue`] back into bytes in canonical form:
//!
//! - no inserted whitespace
//! - object keys in lexicographic order, never insertion order
//! - numbers in minimal decimal form (floats always carry a fraction or
//!   exponent so they re-decode as floats)
//! - strings escape the quote, backslash, and control characters only; `/`
//!   and printable unicode are emitted raw, so output is not byte-identical
//!   to arbitrary valid input but always re-decodes to an equal value
//!
//! Encoding a NaN or infinite float fails with
//! [`Error::NonFiniteNumber`](crate::Error::NonFiniteNumber); the two cases
//! carry distinct messages.
//!
//! ## Examples
//!
//! ```rust
//! use bijson::{bijson, to_string};
//!
//! let value = bijson!({ "b": 2, "a": [true, null] });
//! assert_eq!(to_string(&value).unwrap(), r#"{"a":[true,null],"b":2}"#);
//! ```

use crate::error::NonFinite;
use crate::{Error, JsonValue, Result};

/// Encodes a `JsonValue` to canonical JSON bytes.
///
/// # Errors
///
/// Fails only when the value contains a NaN or infinite float.
pub fn to_vec(value: &JsonValue) -> Result<Vec<u8>> {
    to_string(value).map(String::into_bytes)
}

/// Encodes a `JsonValue` to a canonical JSON string.
///
/// # Examples
///
/// ```rust
/// use bijson::{to_string, JsonValue};
///
/// assert_eq!(to_string(&JsonValue::Float(10.0)).unwrap(), "10.0");
/// assert!(to_string(&JsonValue::Float(f64::NAN)).is_err());
/// ```
pub fn to_string(value: &JsonValue) -> Result<String> {
    let mut out = String::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &JsonValue, out: &mut String) -> Result<()> {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Integer(i) => {
            out.push_str(&i.to_string());
        }
        JsonValue::Float(f) => {
            if f.is_nan() {
                return Err(Error::NonFiniteNumber {
                    kind: NonFinite::NaN,
                });
            }
            if f.is_infinite() {
                return Err(Error::NonFiniteNumber {
                    kind: NonFinite::Infinity,
                });
            }
            // Debug formatting is the shortest representation that
            // round-trips and keeps a fraction or exponent, so the literal
            // re-decodes as a float.
            out.push_str(&format!("{:?}", f));
        }
        JsonValue::String(s) => write_string(s, out),
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        JsonValue::Object(map) => {
            out.push('{');
            for (i, (key, entry)) in map.sorted_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(entry, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"), // backspace
            '\u{000C}' => out.push_str("\\f"), // form feed
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            // `/` and non-ASCII pass through unescaped.
            ch => out.push(ch),
        }
    }
    out.push('"');
}

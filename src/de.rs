//! JSON decoding.
//!
//! This module turns raw bytes into a [`JsonValue`] via single-pass
//! recursive descent. Nesting depth is bounded only by the call stack; input
//! is fully materialized in memory with no streaming.
//!
//! ## Numeric classification
//!
//! A literal with a fraction or exponent always decodes as
//! [`JsonValue::Float`], including `10.0`. A literal with neither decodes as
//! [`JsonValue::Integer`] unless its magnitude exceeds the `i64` range, in
//! which case it is promoted to `Float`:
//!
//! ```rust
//! use bijson::{from_slice, JsonValue};
//!
//! assert_eq!(from_slice(b"9223372036854775807").unwrap(), JsonValue::Integer(i64::MAX));
//! assert_eq!(
//!     from_slice(b"9223372036854775808").unwrap(),
//!     JsonValue::Float(9223372036854775808.0)
//! );
//! assert_eq!(from_slice(b"10.0").unwrap(), JsonValue::Float(10.0));
//! ```
//!
//! ## Relaxed mode
//!
//! [`DecodeOptions`] can switch on JSON5-like tolerances (line comments,
//! trailing commas); strict JSON is the default. See [`crate::options`].

use crate::options::DecodeOptions;
use crate::{Error, JsonMap, JsonValue, Result};

/// Decodes a `JsonValue` from bytes using strict JSON grammar.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for zero-length input, and
/// [`Error::Syntax`] naming the expected construct for any malformation.
///
/// # Examples
///
/// ```rust
/// use bijson::{from_slice, JsonValue};
///
/// let value = from_slice(b"{\"id\":7}").unwrap();
/// assert!(value.is_object());
/// ```
pub fn from_slice(bytes: &[u8]) -> Result<JsonValue> {
    from_slice_with_options(bytes, DecodeOptions::default())
}

/// Decodes a `JsonValue` from a string slice using strict JSON grammar.
pub fn from_str(input: &str) -> Result<JsonValue> {
    from_slice(input.as_bytes())
}

/// Decodes a `JsonValue` from bytes with explicit [`DecodeOptions`].
pub fn from_slice_with_options(bytes: &[u8], options: DecodeOptions) -> Result<JsonValue> {
    if bytes.is_empty() {
        return Err(Error::EmptyInput);
    }
    let input = std::str::from_utf8(bytes)
        .map_err(|e| Error::syntax(e.valid_up_to(), "valid UTF-8 text"))?;
    let mut decoder = Decoder {
        input,
        offset: 0,
        options,
    };
    let value = decoder.decode_value()?;
    decoder.skip_whitespace();
    if decoder.offset != decoder.input.len() {
        return Err(Error::syntax(decoder.offset, "end of input"));
    }
    Ok(value)
}

struct Decoder<'de> {
    input: &'de str,
    offset: usize,
    options: DecodeOptions,
}

impl<'de> Decoder<'de> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.offset += 1;
                }
                Some(b'/')
                    if self.options.allow_comments
                        && self.input.as_bytes().get(self.offset + 1) == Some(&b'/') =>
                {
                    while let Some(byte) = self.peek() {
                        self.offset += 1;
                        if byte == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, byte: u8, construct: &str) -> Result<()> {
        if self.peek() == Some(byte) {
            self.offset += 1;
            Ok(())
        } else {
            Err(Error::syntax(self.offset, construct))
        }
    }

    fn decode_value(&mut self) -> Result<JsonValue> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'n') => self.decode_keyword("null", JsonValue::Null),
            Some(b't') => self.decode_keyword("true", JsonValue::Bool(true)),
            Some(b'f') => self.decode_keyword("false", JsonValue::Bool(false)),
            Some(b'"') => Ok(JsonValue::String(self.decode_string()?)),
            Some(b'[') => self.decode_array(),
            Some(b'{') => self.decode_object(),
            Some(b'-' | b'0'..=b'9') => self.decode_number(),
            _ => Err(Error::syntax(self.offset, "a value")),
        }
    }

    fn decode_keyword(&mut self, keyword: &'static str, value: JsonValue) -> Result<JsonValue> {
        if self.input[self.offset..].starts_with(keyword) {
            self.offset += keyword.len();
            Ok(value)
        } else {
            Err(Error::syntax(self.offset, format!("the literal `{keyword}`")))
        }
    }

    fn decode_number(&mut self) -> Result<JsonValue> {
        let start = self.offset;
        if self.peek() == Some(b'-') {
            self.offset += 1;
        }
        // Integer part: a single zero, or a nonzero digit run.
        match self.peek() {
            Some(b'0') => {
                self.offset += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(Error::syntax(self.offset, "no digits after a leading zero"));
                }
            }
            Some(b'1'..=b'9') => {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.offset += 1;
                }
            }
            _ => return Err(Error::syntax(self.offset, "a digit")),
        }
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.offset += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(Error::syntax(self.offset, "a digit after the decimal point"));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.offset += 1;
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.offset += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.offset += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(Error::syntax(self.offset, "a digit in the exponent"));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.offset += 1;
            }
        }
        let literal = &self.input[start..self.offset];
        if is_float {
            let parsed: f64 = literal
                .parse()
                .map_err(|_| Error::syntax(start, "a valid number"))?;
            if !parsed.is_finite() {
                // Too large for f64; rejecting keeps every decoded value
                // re-encodable.
                return Err(Error::syntax(start, "a number within range"));
            }
            Ok(JsonValue::Float(parsed))
        } else {
            match literal.parse::<i64>() {
                Ok(integer) => Ok(JsonValue::Integer(integer)),
                // Magnitude beyond the i64 range promotes to float.
                Err(_) => {
                    let parsed: f64 = literal
                        .parse()
                        .map_err(|_| Error::syntax(start, "a valid number"))?;
                    if !parsed.is_finite() {
                        return Err(Error::syntax(start, "a number within range"));
                    }
                    Ok(JsonValue::Float(parsed))
                }
            }
        }
    }

    fn decode_string(&mut self) -> Result<String> {
        self.expect(b'"', "an opening quote")?;
        let mut out = String::new();
        let mut chunk_start = self.offset;
        loop {
            match self.peek() {
                None => return Err(Error::syntax(self.offset, "a closing quote")),
                Some(b'"') => {
                    out.push_str(&self.input[chunk_start..self.offset]);
                    self.offset += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.input[chunk_start..self.offset]);
                    self.offset += 1;
                    self.decode_escape(&mut out)?;
                    chunk_start = self.offset;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(Error::syntax(
                        self.offset,
                        "an escaped control character",
                    ));
                }
                Some(_) => {
                    // Multi-byte UTF-8 passes through in the raw chunk.
                    let ch = self.input[self.offset..]
                        .chars()
                        .next()
                        .expect("offset is on a char boundary");
                    self.offset += ch.len_utf8();
                }
            }
        }
    }

    fn decode_escape(&mut self, out: &mut String) -> Result<()> {
        match self.bump() {
            Some(b'"') => out.push('"'),
            Some(b'\\') => out.push('\\'),
            // Decoded but never re-escaped by the encoder.
            Some(b'/') => out.push('/'),
            Some(b'b') => out.push('\u{0008}'),
            Some(b'f') => out.push('\u{000C}'),
            Some(b'n') => out.push('\n'),
            Some(b'r') => out.push('\r'),
            Some(b't') => out.push('\t'),
            Some(b'u') => {
                let unit = self.decode_hex4()?;
                if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: reassemble with the following low
                    // surrogate into a single scalar.
                    if self.bump() != Some(b'\\') || self.bump() != Some(b'u') {
                        return Err(Error::syntax(self.offset, "a low surrogate escape"));
                    }
                    let low = self.decode_hex4()?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(Error::syntax(self.offset, "a low surrogate escape"));
                    }
                    let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(
                        char::from_u32(scalar)
                            .ok_or_else(|| Error::syntax(self.offset, "a valid unicode scalar"))?,
                    );
                } else if (0xDC00..=0xDFFF).contains(&unit) {
                    return Err(Error::syntax(self.offset, "a high surrogate before a low surrogate"));
                } else {
                    out.push(
                        char::from_u32(unit)
                            .ok_or_else(|| Error::syntax(self.offset, "a valid unicode scalar"))?,
                    );
                }
            }
            _ => return Err(Error::syntax(self.offset, "a valid escape sequence")),
        }
        Ok(())
    }

    fn decode_hex4(&mut self) -> Result<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            let digit = match self.bump() {
                Some(byte @ b'0'..=b'9') => u32::from(byte - b'0'),
                Some(byte @ b'a'..=b'f') => u32::from(byte - b'a') + 10,
                Some(byte @ b'A'..=b'F') => u32::from(byte - b'A') + 10,
                _ => return Err(Error::syntax(self.offset, "four hex digits")),
            };
            unit = unit * 16 + digit;
        }
        Ok(unit)
    }

    fn decode_array(&mut self) -> Result<JsonValue> {
        self.expect(b'[', "an opening bracket")?;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.offset += 1;
            return Ok(JsonValue::Array(items));
        }
        loop {
            items.push(self.decode_value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(b',') => {
                    self.skip_whitespace();
                    if self.options.allow_trailing_commas && self.peek() == Some(b']') {
                        self.offset += 1;
                        return Ok(JsonValue::Array(items));
                    }
                }
                Some(b']') => return Ok(JsonValue::Array(items)),
                _ => return Err(Error::syntax(self.offset, "a comma or closing bracket")),
            }
        }
    }

    fn decode_object(&mut self) -> Result<JsonValue> {
        self.expect(b'{', "an opening brace")?;
        let mut map = JsonMap::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.offset += 1;
            return Ok(JsonValue::Object(map));
        }
        loop {
            self.skip_whitespace();
            let key = self.decode_string()?;
            self.skip_whitespace();
            self.expect(b':', "a colon after the object key")?;
            let value = self.decode_value()?;
            // Duplicate keys: the last occurrence wins.
            map.insert(key, value);
            self.skip_whitespace();
            match self.bump() {
                Some(b',') => {
                    self.skip_whitespace();
                    if self.options.allow_trailing_commas && self.peek() == Some(b'}') {
                        self.offset += 1;
                        return Ok(JsonValue::Object(map));
                    }
                }
                Some(b'}') => return Ok(JsonValue::Object(map)),
                _ => return Err(Error::syntax(self.offset, "a comma or closing brace")),
            }
        }
    }
}

//! Configuration options for JSON decoding.
//!
//! This module provides [`DecodeOptions`], which controls the relaxed-grammar
//! extensions of the decoder. Strict JSON is the default; each extension must
//! be switched on individually.
//!
//! ## Examples
//!
//! ```rust
//! use bijson::{from_slice_with_options, DecodeOptions};
//!
//! // Strict mode rejects trailing commas...
//! assert!(from_slice_with_options(b"[1,2,]", DecodeOptions::new()).is_err());
//!
//! // ...relaxed mode tolerates them, along with line comments.
//! let value = from_slice_with_options(
//!     b"[1, 2,] // trailing comma",
//!     DecodeOptions::relaxed(),
//! )
//! .unwrap();
//! assert_eq!(value.as_array().map(Vec::len), Some(2));
//! ```

/// Configuration options for the decoder.
///
/// # Examples
///
/// ```rust
/// use bijson::DecodeOptions;
///
/// // Strict JSON (the default)
/// let options = DecodeOptions::new();
///
/// // JSON5-like relaxations
/// let options = DecodeOptions::relaxed();
///
/// // Individual switches
/// let options = DecodeOptions::new().with_comments(true);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Tolerate `//` line comments between tokens.
    pub allow_comments: bool,
    /// Tolerate a trailing comma before `]` or `}`.
    pub allow_trailing_commas: bool,
}

impl DecodeOptions {
    /// Creates strict-JSON options: no comments, no trailing commas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates relaxed options with every grammar extension enabled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijson::DecodeOptions;
    ///
    /// let options = DecodeOptions::relaxed();
    /// assert!(options.allow_comments);
    /// assert!(options.allow_trailing_commas);
    /// ```
    #[must_use]
    pub fn relaxed() -> Self {
        DecodeOptions {
            allow_comments: true,
            allow_trailing_commas: true,
        }
    }

    /// Sets whether `//` line comments are tolerated.
    #[must_use]
    pub fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = allow;
        self
    }

    /// Sets whether trailing commas in arrays and objects are tolerated.
    #[must_use]
    pub fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }
}

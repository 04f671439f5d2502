//! Human-oriented rendering of values.
//!
//! The canonical encoding ([`to_string`](crate::to_string)) is built for
//! machines: no whitespace, nothing elided. [`pretty`] is the diagnostic
//! counterpart, meant for logs and error reports: indented, with small
//! composites collapsed onto one line, and with optional truncation of
//! depth, width and long strings so a pathological value cannot flood the
//! output.
//!
//! The pretty form is *not* required to re-decode; truncation markers are
//! plain text inside the rendering.
//!
//! # Examples
//!
//! ```rust
//! use bijson::{bijson, pretty};
//!
//! let value = bijson!({ "name": "svc", "ports": [80, 443] });
//! assert_eq!(pretty(&value), "{\"name\": \"svc\", \"ports\": [80, 443]}");
//! ```

use crate::JsonValue;

/// How many columns a collapsed composite may occupy.
const COLLAPSE_WIDTH: usize = 80;

/// Limits and formatting knobs for [`pretty_with_options`].
#[derive(Debug, Clone)]
pub struct PrettyOptions {
    max_depth: Option<usize>,
    max_sub_values: Option<usize>,
    max_string_length: Option<usize>,
    indent: String,
}

impl PrettyOptions {
    pub fn new() -> Self {
        PrettyOptions {
            max_depth: None,
            max_sub_values: None,
            max_string_length: None,
            indent: "  ".to_string(),
        }
    }

    /// Elides composites nested deeper than `depth` levels.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Shows at most `count` elements or entries per composite.
    #[must_use]
    pub fn with_max_sub_values(mut self, count: usize) -> Self {
        self.max_sub_values = Some(count);
        self
    }

    /// Truncates string content longer than `length` characters.
    #[must_use]
    pub fn with_max_string_length(mut self, length: usize) -> Self {
        self.max_string_length = Some(length);
        self
    }

    /// Sets the per-level indentation (two spaces by default).
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `value` with the default [`PrettyOptions`].
#[must_use]
pub fn pretty(value: &JsonValue) -> String {
    pretty_with_options(value, &PrettyOptions::new())
}

/// Renders `value` under the given limits.
#[must_use]
pub fn pretty_with_options(value: &JsonValue, options: &PrettyOptions) -> String {
    render(value, options, 0)
}

fn render(value: &JsonValue, options: &PrettyOptions, depth: usize) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Integer(n) => n.to_string(),
        JsonValue::Float(f) => {
            if f.is_nan() {
                "NaN".to_string()
            } else if f.is_infinite() {
                if *f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
            } else {
                format!("{f:?}")
            }
        }
        JsonValue::String(s) => render_string(s, options),
        JsonValue::Array(items) => {
            if at_depth_limit(options, depth) {
                return "[...]".to_string();
            }
            let (shown, elided) = visible(items.len(), options);
            let parts: Vec<String> = items[..shown]
                .iter()
                .map(|item| render(item, options, depth + 1))
                .chain(elision_marker(elided))
                .collect();
            compose("[", "]", parts, options, depth)
        }
        JsonValue::Object(map) => {
            if at_depth_limit(options, depth) {
                return "{...}".to_string();
            }
            let (shown, elided) = visible(map.len(), options);
            let parts: Vec<String> = map
                .sorted_iter()
                .take(shown)
                .map(|(key, item)| {
                    format!("{key:?}: {}", render(item, options, depth + 1))
                })
                .chain(elision_marker(elided))
                .collect();
            compose("{", "}", parts, options, depth)
        }
    }
}

fn at_depth_limit(options: &PrettyOptions, depth: usize) -> bool {
    options.max_depth.is_some_and(|max| depth >= max)
}

/// Splits a composite's length into the visible prefix and the elided tail.
fn visible(len: usize, options: &PrettyOptions) -> (usize, usize) {
    match options.max_sub_values {
        Some(max) if len > max => (max, len - max),
        _ => (len, 0),
    }
}

fn elision_marker(elided: usize) -> Option<String> {
    (elided > 0).then(|| format!("...(+{elided} more)"))
}

fn render_string(s: &str, options: &PrettyOptions) -> String {
    match options.max_string_length {
        Some(max) if s.chars().count() > max => {
            let prefix: String = s.chars().take(max).collect();
            let hidden = s.chars().count() - max;
            let mut quoted = format!("{prefix:?}");
            quoted.pop();
            format!("{quoted}...(+{hidden} more chars)\"")
        }
        _ => format!("{s:?}"),
    }
}

/// Joins rendered parts either on one line (when they fit) or one per line
/// at the next indent level.
fn compose(
    open: &str,
    close: &str,
    parts: Vec<String>,
    options: &PrettyOptions,
    depth: usize,
) -> String {
    if parts.is_empty() {
        return format!("{open}{close}");
    }
    if parts.iter().all(|p| !p.contains('\n')) {
        let one_line = format!("{open}{}{close}", parts.join(", "));
        if one_line.len() + depth * options.indent.len() <= COLLAPSE_WIDTH {
            return one_line;
        }
    }
    let inner_pad = options.indent.repeat(depth + 1);
    let close_pad = options.indent.repeat(depth);
    let body = parts
        .iter()
        .map(|p| format!("{inner_pad}{p}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{open}\n{body}\n{close_pad}{close}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bijson;

    #[test]
    fn test_scalars() {
        assert_eq!(pretty(&bijson!(null)), "null");
        assert_eq!(pretty(&bijson!(true)), "true");
        assert_eq!(pretty(&bijson!(42)), "42");
        assert_eq!(pretty(&bijson!(1.5)), "1.5");
        assert_eq!(pretty(&bijson!("hi")), "\"hi\"");
        assert_eq!(pretty(&JsonValue::Float(f64::NAN)), "NaN");
    }

    #[test]
    fn test_small_composites_collapse() {
        assert_eq!(pretty(&bijson!([1, 2, 3])), "[1, 2, 3]");
        assert_eq!(pretty(&bijson!({ "b": 2, "a": 1 })), "{\"a\": 1, \"b\": 2}");
        assert_eq!(pretty(&bijson!([])), "[]");
        assert_eq!(pretty(&bijson!({})), "{}");
    }

    #[test]
    fn test_wide_composite_breaks_into_lines() {
        let value = bijson!({
            "description": "a reasonably long string that pushes the line past the collapse width",
            "items": [1, 2, 3],
        });
        let rendered = pretty(&value);
        assert_eq!(
            rendered,
            "{\n  \"description\": \"a reasonably long string that pushes the line past the collapse width\",\n  \"items\": [1, 2, 3]\n}"
        );
    }

    #[test]
    fn test_max_depth_elides_nested_composites() {
        let value = bijson!({ "outer": { "inner": [1, 2] } });
        let options = PrettyOptions::new().with_max_depth(1);
        assert_eq!(
            pretty_with_options(&value, &options),
            "{\"outer\": {...}}"
        );
        let array = bijson!([[1], [2]]);
        assert_eq!(
            pretty_with_options(&array, &options),
            "[[...], [...]]"
        );
    }

    #[test]
    fn test_max_sub_values_marker() {
        let value = bijson!([1, 2, 3, 4, 5]);
        let options = PrettyOptions::new().with_max_sub_values(2);
        assert_eq!(
            pretty_with_options(&value, &options),
            "[1, 2, ...(+3 more)]"
        );
    }

    #[test]
    fn test_max_string_length_marker() {
        let value = bijson!("abcdefghij");
        let options = PrettyOptions::new().with_max_string_length(4);
        assert_eq!(
            pretty_with_options(&value, &options),
            "\"abcd...(+6 more chars)\""
        );
    }

    #[test]
    fn test_custom_indent() {
        let value = bijson!([
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        ]);
        let options = PrettyOptions::new().with_indent("    ");
        let rendered = pretty_with_options(&value, &options);
        assert!(rendered.starts_with("[\n    \"aaaa"));
    }
}

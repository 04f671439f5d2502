/// Builds a [`JsonValue`](crate::JsonValue) from a JSON-like literal.
///
/// Keywords, arrays and objects use JSON syntax; any other expression is
/// converted through [`JsonValue::from`](crate::JsonValue), so numeric and
/// string literals (and variables of convertible types) work in place.
///
/// # Examples
///
/// ```rust
/// use bijson::{bijson, JsonValue};
///
/// let value = bijson!({
///     "name": "Ada",
///     "scores": [1, 2.5, null],
///     "active": true,
/// });
/// assert_eq!(value.to_string(), r#"{"active":true,"name":"Ada","scores":[1,2.5,null]}"#);
///
/// let count = 3;
/// assert_eq!(bijson!(count), JsonValue::Integer(3));
/// ```
#[macro_export]
macro_rules! bijson {
    (null) => {
        $crate::JsonValue::Null
    };

    (true) => {
        $crate::JsonValue::Bool(true)
    };

    (false) => {
        $crate::JsonValue::Bool(false)
    };

    ([]) => {
        $crate::JsonValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::JsonValue::Array(vec![$($crate::bijson!($elem)),*])
    };

    ({}) => {
        $crate::JsonValue::Object($crate::JsonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::JsonMap::new();
        $(
            object.insert($key.to_string(), $crate::bijson!($value));
        )*
        $crate::JsonValue::Object(object)
    }};

    // Fallback: anything convertible into a value.
    ($e:expr) => {
        $crate::JsonValue::from($e)
    };
}

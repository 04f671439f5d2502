//! Property-based tests for the codec and combinator round-trip guarantees.

use bijson::{
    from_slice, to_vec, ArrayOf, Field, FieldWithDefault, IntegerValue, JsonParser, JsonPrinter,
    JsonValue, OptionalField, StringValue,
};
use proptest::prelude::*;

fn arb_finite_float() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn arb_value() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(JsonValue::Integer),
        arb_finite_float().prop_map(JsonValue::Float),
        any::<String>().prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(4, 32, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(JsonValue::Array),
            prop::collection::hash_map(any::<String>(), inner, 0..8)
                .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Decoding the canonical encoding recovers the value exactly; in
    /// particular the integer/float distinction survives.
    #[test]
    fn prop_decode_encode_round_trip(value in arb_value()) {
        let bytes = to_vec(&value).unwrap();
        let decoded = from_slice(&bytes).unwrap();
        prop_assert_eq!(decoded, value);
    }

    /// The canonical encoding is a fixed point: re-encoding a decoded
    /// value yields the same bytes.
    #[test]
    fn prop_encoding_is_canonical(value in arb_value()) {
        let bytes = to_vec(&value).unwrap();
        let again = to_vec(&from_slice(&bytes).unwrap()).unwrap();
        prop_assert_eq!(bytes, again);
    }

    /// Canonical output never contains insignificant whitespace.
    #[test]
    fn prop_encoding_is_compact(value in arb_value()) {
        let bytes = to_vec(&value).unwrap();
        let reencoded_len = to_vec(&from_slice(&bytes).unwrap()).unwrap().len();
        prop_assert_eq!(bytes.len(), reencoded_len);
    }

    /// Printing a record and parsing it back is the identity on outputs.
    #[test]
    fn prop_record_round_trip(
        name in any::<String>(),
        logins in any::<u32>(),
        tags in prop::collection::vec(any::<String>(), 0..5),
    ) {
        let record = (
            Field::new("name", StringValue),
            Field::new("logins", IntegerValue::<u32>::new()),
            OptionalField::new("tags", ArrayOf::new(StringValue)).with_default(vec![]),
        );
        let output = (name, logins, tags);
        let bytes = record.print_slice(&output).unwrap();
        prop_assert_eq!(record.parse_slice(&bytes).unwrap(), output);
    }

    /// Arrays of integers survive the combinator round trip at any length.
    #[test]
    fn prop_array_round_trip(items in prop::collection::vec(any::<i64>(), 0..20)) {
        let array = ArrayOf::new(IntegerValue::<i64>::new());
        let bytes = array.print_slice(&items).unwrap();
        prop_assert_eq!(array.parse_slice(&bytes).unwrap(), items);
    }

    /// Defaulted fields print to their minimal form and still parse back.
    #[test]
    fn prop_default_field_round_trip(count in any::<i64>()) {
        let field: FieldWithDefault<IntegerValue<i64>> =
            OptionalField::new("count", IntegerValue::<i64>::new()).with_default(0);
        let bytes = field.print_slice(&count).unwrap();
        if count == 0 {
            prop_assert_eq!(bytes.as_slice(), b"{}" as &[u8]);
        }
        prop_assert_eq!(field.parse_slice(&bytes).unwrap(), count);
    }
}

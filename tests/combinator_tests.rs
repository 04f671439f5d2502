//! End-to-end combinator behavior: round trips, destructive narrowing,
//! transactionality, and the error contracts of composed parsers.

use bijson::text::{DateTimeText, IntegerText};
use bijson::{
    bijson, conversion, Arity, ArrayOf, Error, Field, FieldWithDefault, FloatValue, IntegerValue,
    JsonParser, JsonPrinter, JsonValue, MapOf, OneOf, OptionalField, SerdeCodec, StringOf,
    StringValue,
};
use serde::{Deserialize, Serialize};

fn user_record() -> (
    Field<StringValue>,
    Field<IntegerValue<u32>>,
    FieldWithDefault<ArrayOf<StringValue>>,
) {
    (
        Field::new("name", StringValue),
        Field::new("logins", IntegerValue::<u32>::new()),
        OptionalField::new("tags", ArrayOf::new(StringValue)).with_default(vec![]),
    )
}

#[test]
fn test_record_round_trip() {
    let record = user_record();
    let input = br#"{"name":"Ada","logins":3,"tags":["admin","ops"]}"#;
    let output = record.parse_slice(input).unwrap();
    assert_eq!(output.0, "Ada");
    assert_eq!(output.1, 3);
    assert_eq!(output.2, vec!["admin".to_string(), "ops".to_string()]);

    // Printing yields canonical bytes, which re-parse to an equal output.
    let bytes = record.print_slice(&output).unwrap();
    assert_eq!(bytes, br#"{"logins":3,"name":"Ada","tags":["admin","ops"]}"#);
    assert_eq!(record.parse_slice(&bytes).unwrap(), output);
}

#[test]
fn test_destructive_narrowing_leaves_residual() {
    let record = user_record();
    let mut value = bijson!({
        "name": "Ada",
        "logins": 3,
        "unclaimed": true,
    });
    record.parse(&mut value).unwrap();
    assert_eq!(value, bijson!({ "unclaimed": true }));

    // Parsing the residual again reports the missing key, not a type error.
    assert_eq!(
        record.parse(&mut value).unwrap_err(),
        Error::key_not_present("name")
    );
}

#[test]
fn test_full_consumption_reaches_the_sentinel() {
    let record = (Field::new("only", IntegerValue::<i64>::new()),);
    let mut value = bijson!({ "only": 1 });
    record.parse(&mut value).unwrap();
    assert_eq!(value, bijson!({}));
    assert!(value.is_empty_sentinel());
}

#[test]
fn test_failed_parse_is_transactional() {
    let record = (
        Field::new("a", IntegerValue::<i64>::new()),
        Field::new("b", IntegerValue::<i64>::new()),
    );
    // "b" fails after "a" would have been claimed; wrap in OneOf so the
    // snapshot restore applies.
    let alternation = OneOf::new(vec![Box::new(record.map(|(a, b)| a + b))
        as Box<dyn JsonParser<Output = i64>>]);
    let mut value = bijson!({ "a": 1, "b": "two" });
    let original = value.clone();
    assert!(alternation.parse(&mut value).is_err());
    assert_eq!(value, original);
}

#[test]
fn test_array_arity_boundaries() {
    let exactly = ArrayOf::new(IntegerValue::<i64>::new()).with_arity(Arity::exactly(2));
    assert_eq!(exactly.parse_slice(b"[1,2]").unwrap(), vec![1, 2]);
    assert_eq!(
        exactly.parse_slice(b"[1]").unwrap_err().to_string(),
        "expected 2 elements, found 1"
    );

    let between = ArrayOf::new(IntegerValue::<i64>::new()).with_arity(Arity::between(1, 3));
    assert!(between.parse_slice(b"[]").is_err());
    assert!(between.parse_slice(b"[1]").is_ok());
    assert!(between.parse_slice(b"[1,2,3]").is_ok());
    assert!(between.parse_slice(b"[1,2,3,4]").is_err());

    // Printing checks arity too, with its own phrasing.
    let error = exactly.print_value(&vec![1, 2, 3]).unwrap_err();
    assert_eq!(error.to_string(), "expected 2 elements, was given 3 to print");
}

#[test]
fn test_array_failure_carries_index() {
    let parser = Field::new("items", ArrayOf::new(IntegerValue::<i64>::new()));
    let error = parser.parse_slice(br#"{"items":[1,null,3]}"#).unwrap_err();
    assert_eq!(error.to_string(), "items/[1]/expected an integer, found null");
}

#[test]
fn test_integer_float_boundary() {
    let integer = IntegerValue::<i64>::new();
    assert_eq!(integer.parse_slice(b"7").unwrap(), 7);
    assert_eq!(
        integer.parse_slice(b"7.0").unwrap_err().to_string(),
        "expected an integer, found a float"
    );

    // The permissive float parser accepts either representation.
    let float = FloatValue::<f64>::new();
    assert_eq!(float.parse_slice(b"7").unwrap(), 7.0);
    assert_eq!(float.parse_slice(b"7.5").unwrap(), 7.5);

    // The strict one does not.
    let strict = FloatValue::<f64>::strict();
    assert!(strict.parse_slice(b"7").is_err());
    assert_eq!(strict.parse_slice(b"7.5").unwrap(), 7.5);
}

#[test]
fn test_bounded_integer_range() {
    let byte = IntegerValue::<u8>::new();
    assert_eq!(byte.parse_slice(b"255").unwrap(), 255);
    assert!(byte.parse_slice(b"256").is_err());
    assert!(byte.parse_slice(b"-1").is_err());
}

#[test]
fn test_one_of_reports_every_branch() {
    let alternation = OneOf::new(vec![
        Box::new(Field::new("value", IntegerValue::<i64>::new()))
            as Box<dyn JsonParser<Output = i64>>,
        Box::new(IntegerValue::<i64>::new()),
    ]);
    let error = alternation.parse_slice(b"\"oops\"").unwrap_err();
    let rendered = error.to_string();
    assert!(rendered.contains("multiple failures"));
    assert!(rendered.contains("expected an object, found a string"));
    assert!(rendered.contains("expected an integer, found a string"));
}

#[test]
fn test_tagged_union_prints_through_one_of() {
    #[derive(Debug, Clone, PartialEq)]
    enum Id {
        Number(i64),
        Name(String),
    }

    let by_number = IntegerValue::<i64>::new().convert(conversion(
        |n| Ok(Id::Number(n)),
        |id: &Id| match id {
            Id::Number(n) => Ok(*n),
            Id::Name(_) => Err(Error::message("not a numeric id")),
        },
    ));
    let by_name = StringValue.convert(conversion(
        |s| Ok(Id::Name(s)),
        |id: &Id| match id {
            Id::Name(s) => Ok(s.clone()),
            Id::Number(_) => Err(Error::message("not a named id")),
        },
    ));
    let id = OneOf::new(vec![
        Box::new(by_number) as Box<dyn JsonPrinter<Output = Id>>,
        Box::new(by_name),
    ]);

    assert_eq!(id.parse_slice(b"7").unwrap(), Id::Number(7));
    assert_eq!(id.parse_slice(b"\"ada\"").unwrap(), Id::Name("ada".to_string()));

    // Printing selects the branch whose conversion owns the variant.
    assert_eq!(id.print_slice(&Id::Number(7)).unwrap(), b"7");
    assert_eq!(id.print_slice(&Id::Name("ada".to_string())).unwrap(), b"\"ada\"");
}

#[test]
fn test_optional_field_and_default_suppression() {
    let count = OptionalField::new("k", IntegerValue::<i64>::new()).with_default(0);
    assert_eq!(count.parse_slice(b"{}").unwrap(), 0);
    assert_eq!(count.parse_slice(br#"{"k":null}"#).unwrap(), 0);
    assert_eq!(count.parse_slice(br#"{"k":6}"#).unwrap(), 6);

    assert_eq!(count.print_slice(&0).unwrap(), b"{}");
    assert_eq!(count.print_slice(&6).unwrap(), br#"{"k":6}"#);
}

#[test]
fn test_map_of_with_integer_keys() {
    let by_id = MapOf::keyed(IntegerText, StringValue);
    let parsed = by_id
        .parse_slice(br#"{"2":"two","10":"ten"}"#)
        .unwrap();
    assert_eq!(parsed[&2], "two");
    assert_eq!(parsed[&10], "ten");

    let bytes = by_id.print_slice(&parsed).unwrap();
    assert_eq!(bytes, br#"{"10":"ten","2":"two"}"#);
}

#[test]
fn test_map_of_key_failure_is_distinct() {
    let by_id = MapOf::keyed(IntegerText, StringValue);
    let error = by_id.parse_slice(br#"{"x":"oops"}"#).unwrap_err();
    assert!(error.to_string().starts_with("invalid map key"));
}

#[test]
fn test_string_of_requires_full_consumption() {
    let timestamp = StringOf::new(DateTimeText);
    assert!(timestamp.parse_slice(br#""2024-01-15T10:30:00Z""#).is_ok());

    let partial = StringOf::new(IntegerText);
    let error = partial.parse_slice(br#""42nd""#).unwrap_err();
    assert!(error.to_string().contains("trailing content"));
    assert!(error.to_string().contains("nd"));
}

#[test]
fn test_serde_codec_inside_a_combinator_tree() {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    let record = (
        Field::new("primary", SerdeCodec::<Endpoint>::new()),
        OptionalField::new("backup", SerdeCodec::<Endpoint>::new()),
    );
    let input = br#"{"primary":{"host":"a","port":80}}"#;
    let (primary, backup) = record.parse_slice(input).unwrap();
    assert_eq!(
        primary,
        Endpoint {
            host: "a".to_string(),
            port: 80,
        }
    );
    assert_eq!(backup, None);
    assert_eq!(record.print_slice(&(primary, backup)).unwrap(), input.to_vec());
}

#[test]
fn test_primitive_print_requires_empty_target() {
    let mut target = JsonValue::Integer(1);
    let error = IntegerValue::<i64>::new().print(&2, &mut target).unwrap_err();
    assert!(error.to_string().contains("non-empty value"));
    // The target is untouched by the refused print.
    assert_eq!(target, JsonValue::Integer(1));
}

#[test]
fn test_nested_error_path_rendering() {
    let parser = Field::new(
        "users",
        ArrayOf::new((Field::new("name", StringValue),)),
    );
    let error = parser
        .parse_slice(br#"{"users":[{"name":"a"},{"name":1}]}"#)
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "users/[1]/name/expected a string, found an integer"
    );
}

//! Rebuilding derived types from value maps.

use indexmap::IndexMap;
use vc_marshal::derive::{Marshal, MarshalEnum, MarshalUnion};
use vc_marshal::descriptor::{ElementParser, ParseError, Parser};
use vc_marshal::ops::Uninit;
use vc_marshal::{Marshal, UnmarshalError, Value, ValueMap};

fn map<const N: usize>(entries: [(&str, Value); N]) -> ValueMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

fn mismatch(field: &str, expected: &[&str], actual: &str) -> UnmarshalError {
    UnmarshalError::TypeMismatch {
        field: field.into(),
        expected: expected.iter().map(|name| (*name).to_owned()).collect(),
        actual: actual.into(),
    }
}

#[derive(Marshal, Debug, PartialEq)]
struct User {
    #[field(name = "first-name")]
    first_name: String,
    age: i64,
    height: f64,
    email: Option<String>,
}

fn john() -> ValueMap {
    map([
        ("first-name", Value::from("John")),
        ("age", Value::Int(42)),
        ("height", Value::Float(1.78)),
        ("email", Value::Null),
    ])
}

// -----------------------------------------------------------------------------
// Strict and lenient mode

#[test]
fn empty_map_is_missing_first_field() {
    assert_eq!(
        User::unmarshal(&ValueMap::new()),
        Err(UnmarshalError::MissingField("first-name".into()))
    );
}

#[test]
fn explicit_null_is_missing_in_strict_mode() {
    let mut data = john();
    data.insert("age".into(), Value::Null);
    assert_eq!(
        User::unmarshal(&data),
        Err(UnmarshalError::MissingField("age".into()))
    );
}

#[test]
fn lenient_mode_reports_null_as_mismatch() {
    let mut data = john();
    data.shift_remove("age");
    assert_eq!(
        User::unmarshal_with(&data, false),
        Err(mismatch("age", &["int"], "null"))
    );
}

#[test]
fn nullable_field_may_be_absent() {
    let mut data = john();
    data.shift_remove("email");
    let user = User::unmarshal(&data).unwrap();
    assert_eq!(user.email, None);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut data = john();
    data.insert("nickname".into(), Value::from("JJ"));
    assert!(User::unmarshal(&data).is_ok());
}

// -----------------------------------------------------------------------------
// Type checks

#[test]
fn mismatch_names_field_and_types() {
    let mut data = john();
    data.insert("age".into(), Value::from("not-a-number"));

    let err = User::unmarshal(&data).unwrap_err();
    assert_eq!(err, mismatch("age", &["int"], "string"));
    assert_eq!(
        err.to_string(),
        "field 'age' must be of type 'int', got 'string'"
    );
}

#[test]
fn integers_widen_into_floats() {
    let mut data = john();
    data.insert("height".into(), Value::Int(2));

    let user = User::unmarshal(&data).unwrap();
    assert_eq!(user.height, 2.0);
}

#[test]
fn floats_do_not_narrow_into_integers() {
    let mut data = john();
    data.insert("age".into(), Value::Float(42.0));
    assert_eq!(
        User::unmarshal(&data),
        Err(mismatch("age", &["int"], "float"))
    );
}

#[derive(Marshal, Debug, PartialEq)]
struct Small {
    level: u8,
}

#[test]
fn out_of_range_integers_are_rejected() {
    let err = Small::unmarshal(&map([("level", Value::Int(300))])).unwrap_err();
    assert_eq!(err, mismatch("level", &["u8"], "int"));

    let small = Small::unmarshal(&map([("level", Value::Int(255))])).unwrap();
    assert_eq!(small.level, 255);
}

#[derive(Marshal, Debug, PartialEq)]
struct Scores {
    values: Vec<i64>,
    by_subject: IndexMap<String, i64>,
}

#[test]
fn container_elements_are_labelled() {
    let data = map([
        ("values", Value::List(vec![Value::Int(1), Value::from("two")])),
        ("by_subject", Value::Map(ValueMap::new())),
    ]);
    assert_eq!(
        Scores::unmarshal(&data),
        Err(mismatch("values[1]", &["int"], "string"))
    );

    let data = map([
        ("values", Value::List(Vec::new())),
        ("by_subject", Value::Map(map([("math", Value::from("A"))]))),
    ]);
    assert_eq!(
        Scores::unmarshal(&data),
        Err(mismatch("by_subject.math", &["int"], "string"))
    );
}

// -----------------------------------------------------------------------------
// Unions

#[derive(MarshalUnion, Debug, PartialEq)]
enum IntOrString {
    Int(i64),
    Str(String),
}

#[derive(Marshal, Debug, PartialEq)]
struct Ticket {
    id: IntOrString,
}

#[test]
fn union_accepts_each_member() {
    let ticket = Ticket::unmarshal(&map([("id", Value::Int(456))])).unwrap();
    assert_eq!(ticket.id, IntOrString::Int(456));

    let ticket = Ticket::unmarshal(&map([("id", Value::from("test"))])).unwrap();
    assert_eq!(ticket.id, IntOrString::Str("test".into()));
}

#[test]
fn union_rejects_other_types() {
    let err = Ticket::unmarshal(&map([("id", Value::Bool(true))])).unwrap_err();
    assert_eq!(err, mismatch("id", &["int", "string"], "bool"));
    assert_eq!(
        err.to_string(),
        "field 'id' must be one of the types (int, string), got 'bool'"
    );
}

#[derive(Marshal, Debug, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Marshal, Debug, PartialEq)]
struct Rect {
    width: f64,
    height: f64,
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum Shape {
    Circle(Circle),
    Rect(Rect),
}

#[derive(Marshal, Debug, PartialEq)]
struct Drawing {
    shape: Shape,
}

#[test]
fn first_fitting_candidate_wins() {
    let rect = map([("width", Value::Int(2)), ("height", Value::Int(3))]);
    let drawing = Drawing::unmarshal(&map([("shape", Value::Map(rect))])).unwrap();
    assert_eq!(
        drawing.shape,
        Shape::Rect(Rect {
            width: 2.0,
            height: 3.0
        })
    );

    let circle = map([("radius", Value::Float(0.5))]);
    let drawing = Drawing::unmarshal(&map([("shape", Value::Map(circle))])).unwrap();
    assert_eq!(drawing.shape, Shape::Circle(Circle { radius: 0.5 }));
}

#[test]
fn unmatched_map_falls_through_to_type_check() {
    let blob = map([("sides", Value::Int(5))]);
    assert_eq!(
        Drawing::unmarshal(&map([("shape", Value::Map(blob))])),
        Err(mismatch("shape", &["Circle", "Rect"], "map"))
    );
}

#[derive(Marshal, Debug, PartialEq)]
struct Tag {
    label: String,
}

#[derive(Marshal, Debug, PartialEq)]
struct Score {
    points: i64,
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum Entries {
    Tags(Vec<Tag>),
    Scores(Vec<Score>),
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum Ranking {
    Tags(IndexMap<String, Tag>),
    Scores(IndexMap<String, Score>),
}

#[derive(Marshal, Debug, PartialEq)]
struct Board {
    entries: Entries,
    ranking: Ranking,
}

#[test]
fn every_container_member_is_tried() {
    let board = Board {
        entries: Entries::Scores(vec![Score { points: 3 }]),
        ranking: Ranking::Scores(IndexMap::from([("alice".to_owned(), Score { points: 7 })])),
    };
    let data = board.marshal();
    assert_eq!(
        data["entries"],
        Value::List(vec![Value::Map(map([("points", Value::Int(3))]))])
    );
    assert_eq!(Board::unmarshal(&data).unwrap(), board);

    let board = Board {
        entries: Entries::Tags(vec![Tag { label: "x".into() }]),
        ranking: Ranking::Tags(IndexMap::from([("bob".to_owned(), Tag { label: "y".into() })])),
    };
    assert_eq!(Board::unmarshal(&board.marshal()).unwrap(), board);
}

#[test]
fn container_member_errors_name_the_first_member() {
    let data = map([
        ("entries", Value::List(vec![Value::Map(map([("other", Value::Int(1))]))])),
        ("ranking", Value::Map(ValueMap::new())),
    ]);
    assert_eq!(
        Board::unmarshal(&data),
        Err(mismatch("entries[0]", &["Tag"], "map"))
    );
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum Amount {
    Exact(f64),
    Whole(i64),
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum Ratio {
    Value(f64),
    Text(String),
}

#[derive(Marshal, Debug, PartialEq)]
struct Measure {
    amount: Amount,
    ratio: Ratio,
}

#[test]
fn exact_member_wins_over_widening() {
    let measure = Measure {
        amount: Amount::Whole(2),
        ratio: Ratio::Text("n/a".into()),
    };
    assert_eq!(Measure::unmarshal(&measure.marshal()).unwrap(), measure);

    let measure = Measure {
        amount: Amount::Exact(2.0),
        ratio: Ratio::Value(0.5),
    };
    assert_eq!(Measure::unmarshal(&measure.marshal()).unwrap(), measure);

    // Without an int member the int still widens.
    let data = map([("amount", Value::Int(1)), ("ratio", Value::Int(3))]);
    let measure = Measure::unmarshal(&data).unwrap();
    assert_eq!(measure.ratio, Ratio::Value(3.0));
}

// -----------------------------------------------------------------------------
// Nested objects

#[derive(Marshal, Debug, PartialEq)]
struct Contact {
    kind: String,
    value: String,
}

#[derive(Marshal, Debug, PartialEq)]
struct Directory {
    contacts: Vec<Contact>,
}

#[test]
fn invalid_nested_element_is_labelled() {
    let good = map([("kind", Value::from("email")), ("value", Value::from("a@b.c"))]);
    let bad = map([("value", Value::from("555"))]);
    let data = map([("contacts", Value::List(vec![Value::Map(good), Value::Map(bad)]))]);

    assert_eq!(
        Directory::unmarshal(&data),
        Err(mismatch("contacts[1]", &["Contact"], "map"))
    );
}

// -----------------------------------------------------------------------------
// Enums

#[derive(MarshalEnum, Debug, PartialEq, Clone, Copy)]
enum Role {
    #[marshal(name = "ADMIN")]
    Admin = 1,
    #[marshal(name = "MEMBER")]
    Member = 2,
}

#[derive(Marshal, Debug, PartialEq)]
struct Account {
    role: Role,
}

#[derive(Marshal, Debug, PartialEq)]
struct NamedAccount {
    #[field(enum_by_name)]
    role: Role,
}

#[test]
fn backed_enum_matches_by_value() {
    let account = Account::unmarshal(&map([("role", Value::Int(1))])).unwrap();
    assert_eq!(account.role, Role::Admin);

    assert_eq!(
        Account::unmarshal(&map([("role", Value::from("ADMIN"))])),
        Err(mismatch("role", &["Role"], "string"))
    );
    assert_eq!(
        Account::unmarshal(&map([("role", Value::Int(3))])),
        Err(mismatch("role", &["Role"], "int"))
    );
}

#[test]
fn enum_by_name_ignores_case() {
    let account = NamedAccount::unmarshal(&map([("role", Value::from("admin"))])).unwrap();
    assert_eq!(account.role, Role::Admin);

    assert_eq!(
        NamedAccount::unmarshal(&map([("role", Value::Int(1))])),
        Err(mismatch("role", &["Role"], "int"))
    );
}

// -----------------------------------------------------------------------------
// Defaults and unset fields

#[derive(Marshal, Debug, PartialEq)]
struct Settings {
    #[marshal(default = 18)]
    volume: i64,
    #[marshal(default = "en")]
    language: String,
    #[field(allow_uninitialized)]
    token: Uninit<String>,
    #[field(allow_uninitialized)]
    #[marshal(default = 3)]
    retries: Uninit<i64>,
}

#[test]
fn absent_keys_take_defaults() {
    let settings = Settings::unmarshal(&ValueMap::new()).unwrap();
    assert_eq!(settings.volume, 18);
    assert_eq!(settings.language, "en");
    assert_eq!(settings.token, Uninit::Unset);
    assert_eq!(settings.retries, Uninit::Set(3));
}

#[test]
fn explicit_null_does_not_take_the_default() {
    assert_eq!(
        Settings::unmarshal(&map([("volume", Value::Null)])),
        Err(UnmarshalError::MissingField("volume".into()))
    );
}

#[test]
fn present_uninit_field_is_set() {
    let settings = Settings::unmarshal(&map([("token", Value::from("abc"))])).unwrap();
    assert_eq!(settings.token, Uninit::Set("abc".to_owned()));
}

// -----------------------------------------------------------------------------
// Parsers

#[derive(Default)]
struct Celsius;

impl Parser for Celsius {
    type Output = f64;

    fn parse(&self, raw: Value) -> Result<f64, ParseError> {
        let text = raw
            .as_str()
            .ok_or_else(|| ParseError::unexpected("a string", &raw))?;
        text.trim_end_matches("C")
            .parse()
            .map_err(|_| ParseError::new(format!("'{text}' is not a temperature")))
    }

    fn serialize(&self, value: &f64) -> Value {
        Value::from(format!("{value}C"))
    }
}

#[derive(Marshal, Debug, PartialEq)]
struct Reading {
    #[field(parser = Celsius)]
    temperature: f64,
}

#[test]
fn parser_errors_name_the_field() {
    let reading = Reading::unmarshal(&map([("temperature", Value::from("21.5C"))])).unwrap();
    assert_eq!(reading.temperature, 21.5);

    let err = Reading::unmarshal(&map([("temperature", Value::from("warm"))])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'temperature' could not be parsed: 'warm' is not a temperature"
    );

    let err = Reading::unmarshal(&map([("temperature", Value::Int(3))])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'temperature' could not be parsed: expected a string, got 'int'"
    );
}

#[derive(Marshal, Debug, PartialEq)]
struct Gauge {
    #[field(parser = Celsius)]
    temperature: f64,
}

#[derive(Marshal, Debug, PartialEq)]
struct Note {
    temperature: String,
}

#[derive(Marshal, Debug, PartialEq)]
struct Counter {
    count: i64,
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum GaugeOrNote {
    Gauge(Gauge),
    Note(Note),
}

#[derive(MarshalUnion, Debug, PartialEq)]
enum GaugeOrCounter {
    Gauge(Gauge),
    Counter(Counter),
}

#[derive(Marshal, Debug, PartialEq)]
struct Station {
    reading: GaugeOrNote,
}

#[derive(Marshal, Debug, PartialEq)]
struct Sensor {
    reading: GaugeOrCounter,
}

#[test]
fn later_candidate_recovers_from_parse_failure() {
    let reading = map([("temperature", Value::from("warm"))]);
    let station = Station::unmarshal(&map([("reading", Value::Map(reading))])).unwrap();
    assert_eq!(
        station.reading,
        GaugeOrNote::Note(Note {
            temperature: "warm".into()
        })
    );
}

#[test]
fn parse_failure_reported_when_no_candidate_fits() {
    let reading = map([("temperature", Value::from("warm"))]);
    let err = Sensor::unmarshal(&map([("reading", Value::Map(reading))])).unwrap_err();
    assert!(matches!(&err, UnmarshalError::Parse { field, .. } if field == "temperature"));
    assert_eq!(
        err.to_string(),
        "field 'temperature' could not be parsed: 'warm' is not a temperature"
    );
}

#[derive(Marshal, Debug, PartialEq)]
struct TemperatureLog {
    #[field(parser = ElementParser<Celsius>)]
    readings: Vec<f64>,
}

#[test]
fn element_parser_maps_each_element() {
    let log = TemperatureLog {
        readings: vec![21.5, -3.0],
    };
    let data = log.marshal();
    assert_eq!(
        data["readings"],
        Value::List(vec![Value::from("21.5C"), Value::from("-3C")])
    );
    assert_eq!(TemperatureLog::unmarshal(&data).unwrap(), log);

    let data = map([(
        "readings",
        Value::List(vec![Value::from("1C"), Value::from("warm")]),
    )]);
    let err = TemperatureLog::unmarshal(&data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'readings' could not be parsed: element 1: 'warm' is not a temperature"
    );
}

//! Saving and loading marshaled types through files.

use std::path::PathBuf;

use vc_codec::{CodecError, Json, Ron, Yaml};
use vc_marshal::UnmarshalError;
use vc_marshal::derive::Marshal;

#[derive(Marshal, Debug, PartialEq)]
struct User {
    #[field(name = "first-name")]
    first_name: String,
    #[field(name = "last-name")]
    last_name: String,
    age: i64,
    height: f64,
    contacts: Vec<String>,
    email: Option<String>,
}

fn john() -> User {
    User {
        first_name: "John".into(),
        last_name: "Doe".into(),
        age: 42,
        height: 1.78,
        contacts: Vec::new(),
        email: Some("johndoe@gmail.com".into()),
    }
}

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vc_codec_tests_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn json_file_round_trip() {
    let path = temp_path("user.json");
    vc_codec::save::<Json, _>(&john(), &path).unwrap();

    let user: User = vc_codec::load::<Json, _>(&path, true).unwrap();
    assert_eq!(user, john());
}

#[test]
fn ron_file_round_trip() {
    let path = temp_path("user.ron");
    vc_codec::save::<Ron, _>(&john(), &path).unwrap();

    let user: User = vc_codec::load::<Ron, _>(&path, true).unwrap();
    assert_eq!(user, john());
}

#[test]
fn yaml_file_round_trip() {
    let path = temp_path("user.yaml");
    vc_codec::save::<Yaml, _>(&john(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("first-name: John\nlast-name: Doe\n"));

    let user: User = vc_codec::load::<Yaml, _>(&path, true).unwrap();
    assert_eq!(user, john());
}

#[test]
fn whole_float_survives_a_file() {
    let path = temp_path("whole.json");
    let user = User {
        height: 2.0,
        ..john()
    };
    vc_codec::save::<Json, _>(&user, &path).unwrap();

    let loaded: User = vc_codec::load::<Json, _>(&path, true).unwrap();
    assert_eq!(loaded.height, 2.0);
}

#[test]
fn integer_widens_into_float_field() {
    let text = r#"{"first-name":"John","last-name":"Doe","age":42,"height":2,"contacts":[],"email":null}"#;
    let user: User = vc_codec::decode::<Json, _>(text, true).unwrap();
    assert_eq!(user.height, 2.0);
    assert_eq!(user.email, None);
}

#[test]
fn missing_file() {
    let path = temp_path("does_not_exist.json");
    let err = vc_codec::load::<Json, User>(&path, true).unwrap_err();
    assert!(matches!(err, CodecError::NotFound { .. }));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn unwritable_path() {
    let path = temp_path("missing_dir").join("nested").join("user.json");
    let err = vc_codec::save::<Json, _>(&john(), &path).unwrap_err();
    assert!(matches!(err, CodecError::Write { .. }));
}

#[test]
fn root_must_be_an_object() {
    let err = vc_codec::decode::<Json, User>("[1, 2, 3]", true).unwrap_err();
    assert!(matches!(err, CodecError::NotAnObject));
}

#[test]
fn unmarshal_errors_pass_through() {
    let text = r#"{"last-name":"Doe","age":42,"height":1.5,"contacts":[],"email":null}"#;
    let err = vc_codec::decode::<Json, User>(text, true).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Unmarshal(UnmarshalError::MissingField(ref field)) if field == "first-name"
    ));
    assert_eq!(err.to_string(), "missing field 'first-name'");
}

//! Properties tying rendering and reconstruction together.

use formkit_core::{
    flatten, reconstruct, FieldPath, FlatSubmission, FormDefinition, ListEncoding, TypeMap,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

fn definition(schema: Value, types: Value) -> FormDefinition {
    FormDefinition::from_json_str(&schema.to_string(), &types.to_string()).expect("valid form")
}

fn user_form() -> FormDefinition {
    definition(
        json!({
            "user": {"name": "Ann", "age": 30, "tags": ["a", "b"]},
            "settings": {"notify": true, "levels": [1, 2, 3], "theme": {"dark": false}},
            "comment": "free text, with commas"
        }),
        json!({
            "user": {"name": "str", "age": "int", "tags": "list[str]"},
            "settings": {"notify": "bool", "levels": "list[int]", "theme": {"dark": "bool"}}
        }),
    )
}

#[test]
fn user_scenario_reconstructs_typed_document() {
    let form = definition(
        json!({"user": {"name": "Ann", "age": 30, "tags": ["a", "b"]}}),
        json!({"user": {"name": "str", "age": "int", "tags": "list[str]"}}),
    );
    let flat: FlatSubmission = [
        ("user.name", "Ann"),
        ("user.age", "31"),
        ("user.tags.0", "x"),
        ("user.tags.1", "y"),
        ("user.tags.2", "z"),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        Value::Object(form.reconstruct(&flat)),
        json!({"user": {"name": "Ann", "age": 31, "tags": ["x", "y", "z"]}})
    );
}

#[test]
fn upper_case_false_is_false() {
    let form = definition(json!({"flag": true}), json!({"flag": "bool"}));
    let flat: FlatSubmission = [("flag", "FALSE")].into_iter().collect();
    assert_eq!(Value::Object(form.reconstruct(&flat)), json!({"flag": false}));
}

#[rstest]
#[case(ListEncoding::Rows)]
#[case(ListEncoding::Comma)]
fn untouched_form_reproduces_schema(#[case] encoding: ListEncoding) {
    let form = user_form();
    let flat = form.field_paths(encoding);
    let document = form.reconstruct(&flat);
    assert_eq!(document, form.schema);
}

#[rstest]
#[case(ListEncoding::Rows)]
#[case(ListEncoding::Comma)]
fn reconstruct_is_idempotent(#[case] encoding: ListEncoding) {
    let form = user_form();
    let flat: FlatSubmission = [
        ("user.name", "Bo"),
        ("user.age", "not a number"),
        ("user.tags.1", "second"),
        ("user.tags.0", "first"),
        ("user.tags.2.name", "grouped"),
        ("user.tags.99999999999999999999", "far"),
        ("settings.notify", "True"),
        ("settings.levels", "4, x, 6"),
        ("settings.theme.dark", "nope"),
        ("extra.deep.key", "kept"),
    ]
    .into_iter()
    .collect();

    let once = reconstruct(&flat, &form.types);
    assert_eq!(once["user"]["tags"], json!(["first", "second", "far"]));
    let twice = reconstruct(&flatten(&once, &form.types, encoding), &form.types);
    assert_eq!(twice, once);
}

#[test]
fn list_order_ignores_submission_order() {
    let types = TypeMap::from_value(&json!({"t": "list[int]"})).expect("types");
    let ordered: FlatSubmission = (0..12).map(|i| (format!("t.{i}"), i.to_string())).collect();
    let reversed: FlatSubmission = (0..12)
        .rev()
        .map(|i| (format!("t.{i}"), i.to_string()))
        .collect();

    let expected: Vec<Value> = (0..12).map(Value::from).collect();
    assert_eq!(reconstruct(&ordered, &types)["t"], Value::Array(expected.clone()));
    assert_eq!(reconstruct(&reversed, &types)["t"], Value::Array(expected));
}

#[test]
fn list_length_matches_numeric_children() {
    let types = TypeMap::from_value(&json!({"t": "list[str]"})).expect("types");
    let flat: FlatSubmission = [("t.3", "d"), ("t.0", "a"), ("t.7", "h")]
        .into_iter()
        .collect();
    let document = reconstruct(&flat, &types);
    assert_eq!(document["t"], json!(["a", "d", "h"]));
}

#[test]
fn int_fallback_keeps_text() {
    let types = TypeMap::from_value(&json!({"n": "int"})).expect("types");
    let flat: FlatSubmission = [("n", "abc")].into_iter().collect();
    assert_eq!(reconstruct(&flat, &types)["n"], json!("abc"));
}

#[rstest]
#[case("TRUE", true)]
#[case("True", true)]
#[case("true", true)]
#[case("tRuE", true)]
#[case("1", false)]
#[case("on", false)]
fn bool_is_case_insensitive(#[case] raw: &str, #[case] expected: bool) {
    let types = TypeMap::from_value(&json!({"b": "bool"})).expect("types");
    let flat: FlatSubmission = [("b", raw)].into_iter().collect();
    assert_eq!(reconstruct(&flat, &types)["b"], json!(expected));
}

#[test]
fn rendered_names_are_the_posted_paths() {
    let form = user_form();
    let html = form.render(ListEncoding::Rows);
    for (path, _) in form.field_paths(ListEncoding::Rows).iter() {
        assert!(
            html.contains(&format!(r#"name="{path}""#)),
            "rendered form has no input named {path}"
        );
    }
}

#[test]
fn field_paths_resolve_against_schema() {
    let form = user_form();
    for (path, _) in form.field_paths(ListEncoding::Comma).iter() {
        let mut node = Value::Object(form.schema.clone());
        for segment in FieldPath::from(path).segments() {
            node = node
                .get(segment)
                .cloned()
                .unwrap_or_else(|| panic!("{path} does not resolve at {segment}"));
        }
        assert!(!node.is_object(), "{path} resolves to a group");
    }
}

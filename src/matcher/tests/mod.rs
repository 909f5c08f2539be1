//! Unit tests for the matcher, driven through the tokenizer.

#![allow(clippy::panic, clippy::unwrap_used)]

use crate::diagnostics::Diagnostic;
use crate::matcher::{BoundConfiguration, BoundValue, match_tree};
use crate::schema::{ParameterSchema, SchemaRegistry};
use crate::tokenizer::tokenize;

fn server() -> SchemaRegistry {
    SchemaRegistry::new("Server", "")
        .with(ParameterSchema::scalar("host"))
        .unwrap()
        .with(ParameterSchema::scalar("port").with_short('p'))
        .unwrap()
}

fn schema() -> SchemaRegistry {
    SchemaRegistry::new("App", "")
        .with(ParameterSchema::flag("verbose").with_short('v'))
        .unwrap()
        .with(ParameterSchema::flag("quiet").with_short('q'))
        .unwrap()
        .with(ParameterSchema::scalar("output").with_short('o'))
        .unwrap()
        .with(ParameterSchema::list("include").with_short('I'))
        .unwrap()
        .with(ParameterSchema::nested("server", server()))
        .unwrap()
}

struct Matched {
    bound: BoundConfiguration,
    diagnostics: Vec<Diagnostic>,
    free: Vec<String>,
    left: Vec<String>,
}

fn run(args: &[&str], ignore_unknown: bool) -> Matched {
    let mut tokenized = tokenize(args);
    assert!(tokenized.diagnostics.is_empty(), "{}", tokenized.diagnostics);

    let (bound, diagnostics) = match_tree(
        &schema(),
        &mut tokenized.tree,
        &mut tokenized.tokens,
        ignore_unknown,
        "",
    );

    Matched {
        bound,
        diagnostics: diagnostics.into_iter().collect(),
        free: tokenized.tokens.free_arguments(),
        left: tokenized.tree.keys().map(str::to_string).collect(),
    }
}

fn text(value: &str) -> BoundValue {
    BoundValue::Str(value.to_string())
}

#[test]
fn scalar_consumes_the_following_argument() {
    let m = run(&["--output", "out.txt", "input"], false);

    assert!(m.diagnostics.is_empty());
    assert_eq!(m.bound.get("output"), Some(&text("out.txt")));
    assert_eq!(m.free, vec!["input"]);
    assert!(m.left.is_empty());
}

#[test]
fn flag_leaves_the_following_argument_free() {
    let m = run(&["--verbose", "input"], false);

    assert_eq!(m.bound.get("verbose"), Some(&BoundValue::Bool(true)));
    assert_eq!(m.free, vec!["input"]);
}

#[test]
fn flag_takes_an_explicit_literal() {
    let m = run(&["--verbose=off"], false);
    assert_eq!(m.bound.get("verbose"), Some(&text("off")));
}

#[test]
fn short_names_bind_to_declared_names() {
    let m = run(&["-vo", "x"], false);

    assert!(m.diagnostics.is_empty());
    assert_eq!(m.bound.get("verbose"), Some(&BoundValue::Bool(true)));
    assert_eq!(m.bound.get("output"), Some(&text("x")));
    assert!(m.bound.get("v").is_none());
    assert!(m.free.is_empty());
}

#[test]
fn repeated_list_parameter_collects_all_values() {
    let m = run(&["-I", "a", "-I", "b", "-I=c"], false);

    assert!(m.diagnostics.is_empty());
    assert_eq!(
        m.bound.get("include"),
        Some(&BoundValue::List(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string()
        ]))
    );
    assert!(m.free.is_empty());
}

#[test]
fn list_values_of_short_and_long_names_are_all_kept() {
    let m = run(&["--include", "a", "-I", "b", "--include=c"], false);

    assert!(m.diagnostics.is_empty(), "{:?}", m.diagnostics);
    // grouped by spelling, first spelling first
    assert_eq!(
        m.bound.get("include"),
        Some(&BoundValue::List(vec![
            "a".to_string(),
            "c".to_string(),
            "b".to_string()
        ]))
    );
    assert!(m.free.is_empty());
    assert!(m.left.is_empty());
}

#[test]
fn scalar_given_by_short_and_long_name_is_a_conflict() {
    let m = run(&["--output", "x", "-o", "y"], false);

    assert!(matches!(
        m.diagnostics.as_slice(),
        [Diagnostic::StructuralConflict { key, .. }] if key == "o"
    ));
    assert_eq!(m.left, vec!["o"]);
}

#[test]
fn flag_given_by_short_and_long_name_is_accepted() {
    let m = run(&["-v", "--verbose"], false);

    assert!(m.diagnostics.is_empty());
    assert_eq!(m.bound.get("verbose"), Some(&BoundValue::Bool(true)));
    assert!(m.left.is_empty());
}

#[test]
fn single_value_for_a_list_becomes_one_element() {
    let m = run(&["--include", "a"], false);
    assert_eq!(
        m.bound.get("include"),
        Some(&BoundValue::List(vec!["a".to_string()]))
    );
}

#[test]
fn repeated_scalar_is_a_conflict() {
    let m = run(&["--output", "a", "--output", "b"], false);

    assert!(matches!(
        m.diagnostics.as_slice(),
        [Diagnostic::StructuralConflict { key, .. }] if key == "output"
    ));
    assert!(m.bound.get("output").is_none());
    assert_eq!(m.left, vec!["output"]);
    // neither value was taken
    assert_eq!(m.free, vec!["a", "b"]);
}

#[test]
fn scalar_without_value_is_missing() {
    let m = run(&["--output"], false);

    assert!(matches!(
        m.diagnostics.as_slice(),
        [Diagnostic::MissingValue { key, .. }] if key == "output"
    ));
    assert!(m.bound.is_empty());
}

#[test]
fn list_without_value_is_missing() {
    let m = run(&["--include"], false);
    assert!(matches!(
        m.diagnostics.as_slice(),
        [Diagnostic::MissingValue { .. }]
    ));
}

#[test]
fn unknown_key_is_reported_with_location() {
    let m = run(&["--colour", "red"], false);

    match m.diagnostics.as_slice() {
        [Diagnostic::UnknownParameter { key, at }] => {
            assert_eq!(key, "colour");
            assert_eq!(at.object, "App");
            assert!(at.path.is_empty());
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
    assert_eq!(m.left, vec!["colour"]);
    assert_eq!(m.free, vec!["red"]);
}

#[test]
fn unknown_key_is_kept_silently_when_ignored() {
    let m = run(&["--colour", "red", "-q"], true);

    assert!(m.diagnostics.is_empty());
    assert_eq!(m.bound.get("quiet"), Some(&BoundValue::Bool(true)));
    assert_eq!(m.left, vec!["colour"]);
}

#[test]
fn nested_object_matches_recursively() {
    let m = run(&["--server.host", "example.org", "--server.p=80"], false);

    assert!(m.diagnostics.is_empty(), "{:?}", m.diagnostics);
    let Some(BoundValue::Object(server)) = m.bound.get("server") else {
        panic!("server not bound: {:?}", m.bound);
    };
    assert_eq!(server.get("host"), Some(&text("example.org")));
    assert_eq!(server.get("port"), Some(&text("80")));
    assert!(m.left.is_empty());
}

#[test]
fn nested_unknown_reports_dotted_context() {
    let m = run(&["--server.user", "me"], false);

    match m.diagnostics.as_slice() {
        [Diagnostic::UnknownParameter { key, at }] => {
            assert_eq!(key, "user");
            assert_eq!(at.path, "server");
            assert_eq!(at.object, "Server");
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
    assert_eq!(m.left, vec!["server"]);
}

#[test]
fn bare_object_mention_is_understood() {
    let m = run(&["--server", "file"], false);

    assert!(m.diagnostics.is_empty());
    assert!(m.bound.is_empty());
    assert!(m.left.is_empty());
    assert_eq!(m.free, vec!["file"]);
}

#[test]
fn literal_for_object_is_tolerated_with_a_warning() {
    let m = run(&["--server=big"], false);

    match m.diagnostics.as_slice() {
        [warning @ Diagnostic::IgnoredObjectValue { key, value, at }] => {
            assert!(warning.is_warning());
            assert_eq!(key, "server");
            assert_eq!(value, "big");
            assert_eq!(at.object, "App");
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
    assert!(m.bound.is_empty());
    assert!(m.left.is_empty());
}

#[test]
fn sub_parameter_of_a_flag_is_a_conflict() {
    let m = run(&["--verbose.level=2"], false);
    assert!(matches!(
        m.diagnostics.as_slice(),
        [Diagnostic::StructuralConflict { key, .. }] if key == "verbose"
    ));
}

#[test]
fn matching_twice_against_disjoint_registries_empties_the_tree() {
    let help = SchemaRegistry::new("Application", "")
        .with(ParameterSchema::flag("help").with_short('h'))
        .unwrap();

    let mut tokenized = tokenize(["-h", "--output", "o", "rest"]);
    let (app, app_diagnostics) = match_tree(
        &help,
        &mut tokenized.tree,
        &mut tokenized.tokens,
        true,
        "",
    );
    let (user, user_diagnostics) = match_tree(
        &schema(),
        &mut tokenized.tree,
        &mut tokenized.tokens,
        false,
        "",
    );

    assert!(app_diagnostics.is_empty());
    assert!(user_diagnostics.is_empty());
    assert_eq!(app.get("help"), Some(&BoundValue::Bool(true)));
    assert_eq!(user.get("output"), Some(&text("o")));
    assert!(tokenized.tree.is_empty());
    assert_eq!(tokenized.tokens.free_arguments(), vec!["rest"]);
}

#[test]
fn bound_configuration_converts_to_toml() {
    let m = run(&["-v", "--server.host=h", "-I", "x"], false);
    let table = m.bound.to_toml();

    assert_eq!(table["verbose"].as_bool(), Some(true));
    assert_eq!(table["server"]["host"].as_str(), Some("h"));
    assert_eq!(table["include"][0].as_str(), Some("x"));
}

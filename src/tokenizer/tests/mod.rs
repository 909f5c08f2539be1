//! Unit tests for tokenizer module
//! Pure in-memory tests of the context-free pass.

#![allow(clippy::panic, clippy::unwrap_used)]

use crate::diagnostics::Diagnostic;
use crate::tokenizer::{Provisional, ProvisionalTree, TokenIndex, ValueRef, tokenize};

fn token(index: usize) -> ValueRef {
    ValueRef::Token(TokenIndex(index))
}

fn literal(text: &str) -> ValueRef {
    ValueRef::Literal(text.to_string())
}

fn object(tree: &ProvisionalTree, key: &str) -> ProvisionalTree {
    match tree.get(key) {
        Some(Provisional::Object(sub)) => sub.clone(),
        other => panic!("expected object at {key}, got {other:?}"),
    }
}

#[test]
fn bare_arguments_only() {
    let out = tokenize(["a.txt", "b.txt"]);

    assert!(out.tree.is_empty());
    assert!(out.diagnostics.is_empty());
    assert_eq!(out.tokens.free_arguments(), ["a.txt", "b.txt"]);
}

#[test]
fn empty_command_line() {
    let out = tokenize(Vec::<String>::new());

    assert!(out.tree.is_empty());
    assert!(out.tokens.is_empty());
    assert!(out.diagnostics.is_empty());
}

#[test]
fn long_parameter_followed_by_value_candidate() {
    let out = tokenize(["--name", "value"]);

    assert_eq!(out.tree.get("name"), Some(&Provisional::Value(token(0))));
    assert_eq!(out.tokens.text(TokenIndex(0)), Some("value"));
    assert!(!out.tokens.is_consumed(TokenIndex(0)));
}

#[test]
fn long_parameter_without_value() {
    let out = tokenize(["--verbose"]);

    assert_eq!(out.tree.get("verbose"), Some(&Provisional::NoValue));
    assert!(out.tokens.is_empty());
}

#[test]
fn explicit_assignment_is_a_literal() {
    let out = tokenize(["--name=value", "free"]);

    assert_eq!(out.tree.get("name"), Some(&Provisional::Value(literal("value"))));
    assert_eq!(out.tokens.free_arguments(), ["free"]);
}

#[test]
fn assignment_splits_at_first_equals_only() {
    let out = tokenize(["--expr=a=b", "--obj.path=x.y"]);

    assert_eq!(out.tree.get("expr"), Some(&Provisional::Value(literal("a=b"))));
    assert_eq!(
        out.tree.get_path(&["obj", "path"]),
        Some(&Provisional::Value(literal("x.y")))
    );
}

#[test]
fn empty_assignment_is_an_empty_literal() {
    let out = tokenize(["--name="]);

    assert_eq!(out.tree.get("name"), Some(&Provisional::Value(literal(""))));
}

#[test]
fn value_clears_pending_parameter() {
    let out = tokenize(["--name", "first", "second"]);

    assert_eq!(out.tree.get("name"), Some(&Provisional::Value(token(0))));
    assert_eq!(out.tokens.len(), 2);
    assert_eq!(out.tokens.text(TokenIndex(1)), Some("second"));
}

#[test]
fn parameter_after_parameter_leaves_first_without_value() {
    let out = tokenize(["--a", "--b", "x"]);

    assert_eq!(out.tree.get("a"), Some(&Provisional::NoValue));
    assert_eq!(out.tree.get("b"), Some(&Provisional::Value(token(0))));
}

#[test]
fn dotted_names_build_objects() {
    let out = tokenize(["--obj.a", "1", "--obj.b", "x"]);

    let obj = object(&out.tree, "obj");
    assert_eq!(obj.get("a"), Some(&Provisional::Value(token(0))));
    assert_eq!(obj.get("b"), Some(&Provisional::Value(token(1))));
    assert_eq!(out.tree.len(), 1);
}

#[test]
fn deep_paths_share_intermediate_objects() {
    let out = tokenize(["--a.b.c=1", "--a.b.d=2", "--a.e"]);

    let a = object(&out.tree, "a");
    let b = object(&a, "b");
    assert_eq!(b.keys().collect::<Vec<_>>(), ["c", "d"]);
    assert_eq!(a.get("e"), Some(&Provisional::NoValue));
}

#[test]
fn bare_mention_can_become_object() {
    let out = tokenize(["--obj", "--obj.a=1"]);

    let obj = object(&out.tree, "obj");
    assert_eq!(obj.get("a"), Some(&Provisional::Value(literal("1"))));
    assert!(out.diagnostics.is_empty());
}

#[test]
fn nested_bare_mention_becomes_object_in_place() {
    let out = tokenize(["--a.b", "--a.b.c=1", "--a.b.d", "v"]);

    assert!(out.diagnostics.is_empty());
    let a = object(&out.tree, "a");
    let b = object(&a, "b");
    assert_eq!(a.len(), 1);
    assert_eq!(b.get("c"), Some(&Provisional::Value(literal("1"))));
    assert_eq!(b.get("d"), Some(&Provisional::Value(token(0))));
}

#[test]
fn short_parameters_are_split_per_character() {
    let out = tokenize(["-xyz"]);

    assert_eq!(out.tree.keys().collect::<Vec<_>>(), ["x", "y", "z"]);
    assert!(out.tree.iter().all(|(_, v)| *v == Provisional::NoValue));
}

#[test]
fn last_short_parameter_takes_the_value_candidate() {
    let out = tokenize(["-xo", "out.bin"]);

    assert_eq!(out.tree.get("x"), Some(&Provisional::NoValue));
    assert_eq!(out.tree.get("o"), Some(&Provisional::Value(token(0))));
}

#[test]
fn short_parameter_assignment() {
    let out = tokenize(["-o=out.bin", "in.bin"]);

    assert_eq!(out.tree.get("o"), Some(&Provisional::Value(literal("out.bin"))));
    assert_eq!(out.tokens.free_arguments(), ["in.bin"]);
}

#[test]
fn repeated_short_parameter_is_left_alone() {
    let out = tokenize(["-o", "a", "-o"]);

    assert_eq!(out.tree.get("o"), Some(&Provisional::Value(token(0))));
}

#[test]
fn repetition_accumulates_a_list() {
    let out = tokenize(["--tag", "a", "in", "--tag=b", "--tag", "c"]);

    assert_eq!(
        out.tree.get("tag"),
        Some(&Provisional::List(vec![token(0), literal("b"), token(2)]))
    );
    assert_eq!(out.tokens.len(), 3);
}

#[test]
fn negative_number_reads_as_short_parameter() {
    let out = tokenize(["--offset", "-5"]);

    assert_eq!(out.tree.get("offset"), Some(&Provisional::NoValue));
    assert_eq!(out.tree.get("5"), Some(&Provisional::NoValue));
}

#[test]
fn lone_dash_is_a_bare_argument() {
    let out = tokenize(["--input", "-"]);

    assert_eq!(out.tree.get("input"), Some(&Provisional::Value(token(0))));
    assert_eq!(out.tokens.text(TokenIndex(0)), Some("-"));
}

#[test]
fn value_cannot_hold_sub_parameters() {
    let out = tokenize(["--a", "1", "--a.b", "2"]);

    assert_eq!(out.tree.get("a"), Some(&Provisional::Value(token(0))));
    assert_eq!(out.tree.len(), 1);
    assert_eq!(out.tokens.free_arguments(), ["1", "2"]);

    let diagnostics: Vec<_> = out.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0],
        Diagnostic::StructuralConflict { key, .. } if key == "a"
    ));
}

#[test]
fn conflict_deep_in_path_creates_nothing() {
    let out = tokenize(["--a.b=1", "--a.b.c.d=2"]);

    let a = object(&out.tree, "a");
    assert_eq!(a.get("b"), Some(&Provisional::Value(literal("1"))));
    assert_eq!(a.len(), 1);
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn object_cannot_take_a_value() {
    let out = tokenize(["--obj.a=1", "--obj", "value", "--obj=other"]);

    let obj = object(&out.tree, "obj");
    assert_eq!(obj.get("a"), Some(&Provisional::Value(literal("1"))));
    assert_eq!(out.tokens.free_arguments(), ["value"]);
    assert_eq!(out.diagnostics.len(), 2);
    assert!(
        out.diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::StructuralConflict { key, .. } if key == "obj"))
    );
}

#[test]
fn empty_segments_are_diagnosed() {
    for arg in ["--", "--a..b", "--a.", "--.a", "--=x", "-=x"] {
        let out = tokenize([arg, "free"]);

        assert!(out.tree.is_empty(), "{arg} should not create entries");
        assert_eq!(out.tokens.free_arguments(), ["free"]);
        assert!(
            matches!(
                out.diagnostics.iter().next(),
                Some(Diagnostic::EmptySegment { argument }) if argument == arg
            ),
            "{arg} should be diagnosed"
        );
    }
}

#[test]
fn bare_boolean_without_pending_parameter_is_a_warning() {
    let out = tokenize(["--flag=1", "ON"]);

    let diagnostics: Vec<_> = out.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_warning());
    assert!(!out.diagnostics.has_errors());
    assert_eq!(out.tokens.free_arguments(), ["ON"]);
}

#[test]
fn boolean_value_candidate_is_not_diagnosed() {
    let out = tokenize(["--flag", "false"]);

    assert!(out.diagnostics.is_empty());
    assert_eq!(out.tree.get("flag"), Some(&Provisional::Value(token(0))));
}

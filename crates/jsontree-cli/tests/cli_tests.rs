//! Integration tests for the `jsontree` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the tree, tokens,
//! select and json subcommands through the actual binary, including stdin
//! piping, file I/O and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the glossary.json fixture.
fn glossary_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/glossary.json")
}

fn jsontree() -> Command {
    Command::cargo_bin("jsontree").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tree_stdin_to_stdout() {
    jsontree()
        .arg("tree")
        .write_stdin(r#"{"a":1,"b":[true,null]}"#)
        .assert()
        .success()
        .stdout("{\n\t\"a\": 1,\n\t\"b\": [\n\t\ttrue,\n\t\tnull\n\t]\n}\n");
}

#[test]
fn tree_file_to_file() {
    let output_path = std::env::temp_dir().join("jsontree-test-tree-output.txt");
    let _ = std::fs::remove_file(&output_path);

    jsontree()
        .args(["tree", "-i", glossary_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.starts_with("{\n\t\"glossary\": {"));
    assert!(content.contains("\"GlossTerm\": Standard Generalized Markup Language"));

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn tree_rejects_malformed_json() {
    jsontree()
        .arg("tree")
        .write_stdin(r#"{"a":1,}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON"))
        .stderr(predicate::str::contains("CloseBrace"));
}

#[test]
fn tree_rejects_empty_object() {
    jsontree()
        .arg("tree")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("field rule"));
}

#[test]
fn missing_input_file_fails() {
    jsontree()
        .args(["tree", "-i", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokens subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tokens_lists_positions_and_kinds() {
    jsontree()
        .arg("tokens")
        .write_stdin("[1,\n true]")
        .assert()
        .success()
        .stdout(predicate::str::contains("1:1\tOpenBracket\t["))
        .stdout(predicate::str::contains("2:2\tTrue\ttrue"))
        .stdout(predicate::str::contains("End"));
}

#[test]
fn tokens_as_json() {
    let output = jsontree()
        .args(["tokens", "--json"])
        .write_stdin(r#"{"k":null}"#)
        .output()
        .expect("tokens should run");
    assert!(output.status.success());

    let tokens: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let tokens = tokens.as_array().expect("token list");
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[1]["kind"], "String");
    assert_eq!(tokens[1]["text"], "\"k\"");
    assert_eq!(tokens[5]["is_last"], true);
}

#[test]
fn tokens_reports_lex_errors() {
    jsontree()
        .arg("tokens")
        .write_stdin("[1, @]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to tokenize"))
        .stderr(predicate::str::contains("'@'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Select subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn select_scalar_from_file() {
    jsontree()
        .args(["select", "glossary.GlossDiv.title", "-i", glossary_path()])
        .assert()
        .success()
        .stdout("S\n");
}

#[test]
fn select_array_prints_one_element_per_line() {
    jsontree()
        .args([
            "select",
            "glossary.GlossDiv.GlossList.GlossEntry.GlossDef.GlossSeeAlso",
            "-i",
            glossary_path(),
        ])
        .assert()
        .success()
        .stdout("GML\nXML\n");
}

#[test]
fn select_missing_path_fails() {
    jsontree()
        .args(["select", "glossary.nothing", "-i", glossary_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found: glossary.nothing"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Json subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_matches_serde_parse() {
    let output = jsontree()
        .args(["json", "-i", glossary_path()])
        .output()
        .expect("json should run");
    assert!(output.status.success());

    let ours: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let source = std::fs::read_to_string(glossary_path()).unwrap();
    let reference: serde_json::Value = serde_json::from_str(&source).unwrap();
    assert_eq!(ours, reference);
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_only() {
    jsontree()
        .args(["-v", "select", "a"])
        .write_stdin(r#"{"a":true}"#)
        .assert()
        .success()
        .stdout("true\n")
        .stderr(predicate::str::contains("parsed"));
}

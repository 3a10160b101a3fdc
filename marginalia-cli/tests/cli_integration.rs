//! Integration tests for the marginalia CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn marginalia() -> Command {
    Command::cargo_bin("marginalia").unwrap()
}

#[test]
fn test_render_text() {
    marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("story.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# tests/fixtures/story.json"))
        .stdout(predicate::str::contains("[validation] \"She ran \""))
        .stdout(predicate::str::contains("[logic-flag,validation] \"fast\""))
        .stdout(predicate::str::contains(
            "[validation*] \" because she could. \"",
        ))
        .stdout(predicate::str::contains(
            "[factual-flag] \"Then she rested.\"",
        ));
}

#[test]
fn test_render_json() {
    let output = marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("story.json"))
        .arg("-f")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let documents: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let document = &documents[0];
    assert_eq!(document["source"], "tests/fixtures/story.json");
    assert_eq!(document["metadata"]["segment_count"], 4);
    assert_eq!(document["metadata"]["annotations_kept"], 3);
    assert_eq!(document["segments"][1]["covering"][0]["id"], "l1");
}

#[test]
fn test_render_markdown() {
    marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("story.json"))
        .arg("-f")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "==She ran== ==fast==[^1] ==because she could.==[^2] ==Then she rested.==[^3]",
        ))
        .stdout(predicate::str::contains(
            "[^1]: *logic-flag*: ≈ Fast compared to what?",
        ))
        .stdout(predicate::str::contains(
            "[^2]: *validation*: Great **rhythm** here",
        ))
        .stdout(predicate::str::contains("*Documents: 1, notes: 3*"));
}

#[test]
fn test_render_response_bundle() {
    marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("reply.json"))
        .arg("-f")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"anchors_relocated\": 1"))
        .stdout(predicate::str::contains("\"text\": \"The bridge opened in 1992.\""));
}

#[test]
fn test_render_with_config() {
    marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("story.json"))
        .arg("-c")
        .arg(fixture_path("pipeline.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[logic-flag*,validation] \"fast\""))
        .stdout(predicate::str::contains(
            "[factual-flag*] \"Then she rested.\"",
        ));
}

#[test]
fn test_render_glob_keeps_order() {
    let temp_dir = TempDir::new().unwrap();
    for (name, text) in [("b.json", "Second text."), ("a.json", "First text.")] {
        fs::write(
            temp_dir.path().join(name),
            format!(r#"{{"text": "{text}", "annotations": []}}"#),
        )
        .unwrap();
    }
    let pattern = temp_dir.path().join("*.json");

    let output = marginalia()
        .arg("render")
        .arg("-i")
        .arg(pattern.to_str().unwrap())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.find("First text.").unwrap();
    let second = stdout.find("Second text.").unwrap();
    assert!(first < second);
}

#[test]
fn test_render_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.md");

    marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("story.json"))
        .arg("-f")
        .arg("markdown")
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(output_path).unwrap();
    assert!(content.starts_with("## tests/fixtures/story.json"));
}

#[test]
fn test_invalid_bundle() {
    marginalia()
        .arg("render")
        .arg("-i")
        .arg(fixture_path("invalid.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input bundle"));
}

#[test]
fn test_no_matching_files() {
    marginalia()
        .arg("render")
        .arg("-i")
        .arg("tests/fixtures/*.nothing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files match"));
}

#[test]
fn test_empty_text_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("empty.json");
    fs::write(&bundle, r#"{"text": "   ", "annotations": []}"#).unwrap();

    marginalia()
        .arg("render")
        .arg("-i")
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render"));
}

#[test]
fn test_generate_and_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("pipeline.toml");

    marginalia()
        .arg("generate-config")
        .arg("-o")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Configuration template generated"));

    marginalia()
        .arg("validate")
        .arg("-c")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Configuration is valid!"));
}

#[test]
fn test_validate_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[normalizer]\nprecise_word_limit = 99999\n").unwrap();

    marginalia()
        .arg("validate")
        .arg("-c")
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Configuration is invalid!"));
}

#[test]
fn test_list_categories() {
    marginalia()
        .arg("list")
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("logic-flag"))
        .stdout(predicate::str::contains("validation"));
}

#[test]
fn test_list_formats() {
    marginalia()
        .arg("list")
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_help() {
    marginalia()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("generate-config"));
}

#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn promptlint() -> Command {
    Command::cargo_bin("promptlint").unwrap()
}

#[test]
fn curated_presets_lint_clean() {
    for name in ["portrait.json", "night_market.json"] {
        promptlint()
            .arg("lint")
            .arg(fixture(name))
            .arg("--fail-on")
            .arg("info")
            .assert()
            .success()
            .stderr(predicate::str::contains("No issues found."));
    }
}

#[test]
fn noisy_context_fails_on_warning() {
    promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("[WARN] lint-repeatable-duplicates-scene-1 (section:scene[1])")
                .and(predicate::str::contains("fix available: fix-list-style"))
                .and(predicate::str::contains("lint-default-fps")),
        )
        .stderr(predicate::str::contains("6 total (1 warnings, 5 suggestions, 0 info), 3 fixable"));
}

#[test]
fn disabling_the_only_warning_passes() {
    promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .arg("--disable")
        .arg("lint-repeatable-duplicates")
        .assert()
        .success();
}

#[test]
fn fail_on_suggestion_is_stricter() {
    promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .args(["--disable", "lint-repeatable-duplicates", "--fail-on", "suggestion"])
        .assert()
        .code(1);
}

#[test]
fn json_report_keeps_rule_order() {
    let output = promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "lint-main-too-short",
            "lint-metadata-aspect-ratio",
            "lint-repeatable-duplicates-scene-1",
            "lint-trim-main",
            "lint-list-string-style",
            "lint-default-fps",
        ]
    );
    assert_eq!(report["summary"]["total"], 6);
    assert_eq!(report["summary"]["fixable"], 3);
}

#[test]
fn sort_puts_warnings_first() {
    let output = promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .args(["--format", "json", "--sort"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["issues"][0]["severity"], "warning");
    assert_eq!(report["issues"][1]["id"], "lint-main-too-short");
}

#[test]
fn min_severity_filters_output() {
    let output = promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .args(["--format", "json", "--min-severity", "warning"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 1);
}

#[test]
fn config_file_disables_rules() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("lint.yaml");
    fs::write(
        &config,
        "version: 1\ndisabled_rules: [lint-repeatable-duplicates]\n",
    )
    .unwrap();

    promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn default_config_is_picked_up_from_working_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("promptlint.yaml"), "fail_on: info\n").unwrap();

    promptlint()
        .current_dir(dir.path())
        .arg("lint")
        .arg(fixture("noisy.json"))
        .args(["--disable", "lint-repeatable-duplicates"])
        .assert()
        .code(1);
}

#[test]
fn bad_config_is_a_config_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("lint.yaml");
    fs::write(&config, "disabled_rules: [lint-does-not-exist]\n").unwrap();

    promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown rule id"));
}

#[test]
fn unknown_disable_flag_is_rejected() {
    promptlint()
        .arg("lint")
        .arg(fixture("noisy.json"))
        .args(["--disable", "lint-nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lint-nope"));
}

#[test]
fn missing_context_is_a_config_error() {
    promptlint()
        .arg("lint")
        .arg("does-not-exist.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read context"));
}

#[test]
fn yaml_context_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("context.yaml");
    fs::write(
        &path,
        r#"
schema:
  sections:
    - id: main
      label: Main prompt
      inputType: text
  negativePrompt:
    enabled: true
state:
  sections:
    main: "a  castle"
  negativePrompt: blurry
validation:
  hasErrors: true
"#,
    )
    .unwrap();

    promptlint()
        .arg("lint")
        .arg(&path)
        .args(["--fail-on", "info"])
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("[INFO] lint-validation-errors-banner")
                .and(predicate::str::contains("lint-negative-too-generic (negative:negativePrompt)")),
        );
}

#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn promptlint() -> Command {
    Command::cargo_bin("promptlint").unwrap()
}

fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
    let path = dir.join(name);
    fs::copy(fixture(name), &path).unwrap();
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn list_shows_offered_fixes_in_rule_order() {
    promptlint()
        .arg("fix")
        .arg(fixture("noisy.json"))
        .arg("--list")
        .assert()
        .success()
        .stdout(
            "fix-trim-main\tlint-trim-main\tTrim whitespace\n\
             fix-list-style\tlint-list-string-style\tConvert to list\n\
             fix-default-fps\tlint-default-fps\tSet FPS to 24\n",
        );
}

#[test]
fn clean_context_has_nothing_to_fix() {
    promptlint()
        .arg("fix")
        .arg(fixture("portrait.json"))
        .arg("--yes")
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to fix"));
}

#[test]
fn yes_applies_all_fixes_and_reports_remaining() {
    let dir = tempdir().unwrap();
    let path = copy_fixture("noisy.json", dir.path());

    promptlint()
        .arg("fix")
        .arg(&path)
        .arg("--yes")
        .assert()
        // The duplicate scene warning has no automatic fix.
        .code(1)
        .stderr(
            predicate::str::contains("Applied: fix-default-fps")
                .and(predicate::str::contains("Done. Applied 3 fix(es). Remaining: 3 issue(s)")),
        );

    let fixed = read_json(&path);
    let sections = &fixed["state"]["sections"];
    assert_eq!(sections["main"], "a castle");
    assert_eq!(sections["style"], serde_json::json!(["oil", "ink"]));
    assert_eq!(fixed["state"]["metadata"]["fps"], 24);
    // Untouched parts survive the rewrite.
    assert_eq!(sections["scene"], serde_json::json!(["fog", "fog"]));
    assert_eq!(fixed["schema"]["metadataFields"][1]["default"], 24);
}

#[test]
fn fixing_twice_is_a_no_op() {
    let dir = tempdir().unwrap();
    let path = copy_fixture("noisy.json", dir.path());

    promptlint().arg("fix").arg(&path).arg("--yes").assert().code(1);
    let first = fs::read_to_string(&path).unwrap();

    promptlint()
        .arg("fix")
        .arg(&path)
        .arg("--yes")
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to fix"));
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn only_limits_applied_fixes() {
    let dir = tempdir().unwrap();
    let path = copy_fixture("noisy.json", dir.path());

    promptlint()
        .arg("fix")
        .arg(&path)
        .args(["--yes", "--only", "fix-list-style"])
        .assert()
        .stderr(predicate::str::contains("Applied 1 fix(es)"));

    let fixed = read_json(&path);
    assert_eq!(fixed["state"]["sections"]["style"], serde_json::json!(["oil", "ink"]));
    assert_eq!(fixed["state"]["sections"]["main"], "a  castle");
    assert!(fixed["state"]["metadata"].get("fps").is_none());
}

#[test]
fn only_with_unknown_id_does_nothing() {
    promptlint()
        .arg("fix")
        .arg(fixture("noisy.json"))
        .args(["--yes", "--only", "fix-nope"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No fixes match"));
}

#[test]
fn dry_run_prints_diff_without_writing() {
    let dir = tempdir().unwrap();
    let path = copy_fixture("noisy.json", dir.path());
    let before = fs::read_to_string(&path).unwrap();

    promptlint()
        .arg("fix")
        .arg(&path)
        .args(["--yes", "--dry-run", "--only", "fix-default-fps"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("(dry-run) fixes=fix-default-fps")
                .and(predicate::str::contains("+      \"fps\": 24")),
        );

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn out_writes_yaml_and_keeps_input() {
    let dir = tempdir().unwrap();
    let input = copy_fixture("noisy.json", dir.path());
    let before = fs::read_to_string(&input).unwrap();
    let out = dir.path().join("fixed.yaml");

    promptlint()
        .arg("fix")
        .arg(&input)
        .args(["--yes", "--out"])
        .arg(&out)
        .assert()
        .code(1);

    assert_eq!(fs::read_to_string(&input).unwrap(), before);

    // The written YAML lints without the fixed issues.
    let output = promptlint()
        .arg("lint")
        .arg(&out)
        .args(["--format", "json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["fixable"], 0);
}

#[test]
fn disabled_rules_offer_no_fixes() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("lint.yaml");
    fs::write(
        &config,
        "disabled_rules: [lint-trim-whitespace, lint-list-from-string]\n",
    )
    .unwrap();

    promptlint()
        .arg("fix")
        .arg(fixture("noisy.json"))
        .args(["--list", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("fix-default-fps\tlint-default-fps\tSet FPS to 24\n");
}

/// Night-market preset plus keys the linter does not model, with one
/// whitespace issue on the global prompt. Written the way `fix` renders JSON.
fn night_market_with_extras(dir: &Path) -> PathBuf {
    let mut doc = read_json(&fixture("night_market.json"));
    doc["schema"]["modelId"] = serde_json::json!("ltx2");
    doc["schema"]["sections"][0]["required"] = serde_json::json!(true);
    doc["state"]["sections"]["global_main"] =
        serde_json::json!("a  neon-lit night market chase in the rain");
    doc["state"]["metadata"]["seed"] = serde_json::Value::Null;

    let path = dir.join("night_market.json");
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap() + "\n").unwrap();
    path
}

#[test]
fn fix_rewrites_only_the_fixed_entry() {
    let dir = tempdir().unwrap();
    let path = night_market_with_extras(dir.path());

    promptlint()
        .arg("fix")
        .arg(&path)
        .arg("--yes")
        .assert()
        .success()
        .stderr(predicate::str::contains("Applied: fix-trim-global_main"));

    let fixed = read_json(&path);
    let sections = &fixed["state"]["sections"];
    assert_eq!(sections["global_main"], "a neon-lit night market chase in the rain");
    assert_eq!(sections["scene_duration"], serde_json::json!([8, 6]));
    assert_eq!(fixed["schema"]["modelId"], "ltx2");
    assert_eq!(fixed["schema"]["sections"][0]["required"], true);
    assert_eq!(
        fixed["state"]["metadata"].get("seed"),
        Some(&serde_json::Value::Null)
    );
    assert_eq!(fixed["state"]["metadata"]["fps"], 24);
}

#[test]
fn dry_run_diff_matches_what_would_be_written() {
    let dir = tempdir().unwrap();
    let path = night_market_with_extras(dir.path());

    let output = promptlint()
        .arg("fix")
        .arg(&path)
        .args(["--yes", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let removed: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with('-') && !line.starts_with("---"))
        .collect();
    let added: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
        .collect();
    assert_eq!(
        removed,
        vec!["-      \"global_main\": \"a  neon-lit night market chase in the rain\","]
    );
    assert_eq!(
        added,
        vec!["+      \"global_main\": \"a neon-lit night market chase in the rain\","]
    );
}

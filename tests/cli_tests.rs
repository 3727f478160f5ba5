//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_cli_check_help() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("check").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Check licenses"));
}

#[test]
fn test_cli_flatten_reference_tree() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("flatten").arg(fixture("reference_tree.json"));

    cmd.assert().success().stdout(
        "@company/package1@1.1.1\n\
         package2@2.2.2\n\
         package3@3.3.3\n\
         package4@4.4.4\n\
         package5@5.5.5\n\
         package6@6.6.6\n\
         package7@7.7.6\n\
         package7@7.7.7\n",
    );
}

#[test]
fn test_cli_check_fails_on_gpl() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("check")
        .arg(fixture("reference_tree.json"))
        .arg("--config")
        .arg(fixture("whitelist.toml"));

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("package7@7.7.6"))
        .stderr(predicate::str::contains("Licenses to review: GPL"));
}

#[test]
fn test_cli_check_passes_with_extra_whitelist_entry() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("check")
        .arg(fixture("reference_tree.json"))
        .arg("--config")
        .arg(fixture("whitelist.toml"))
        .arg("--whitelist")
        .arg("GPL");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All licenses are whitelisted"));
}

#[test]
fn test_cli_check_without_whitelist_flags_everything() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("check").arg(fixture("reference_tree.json"));

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Licenses to review: GPL, MIT"));
}

#[test]
fn test_cli_report_json() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("report")
        .arg(fixture("reference_tree.json"))
        .arg("--config")
        .arg(fixture("whitelist.toml"))
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"unknown_licenses\""))
        .stdout(predicate::str::contains("\"subtree_problem\": true"));
}

#[test]
fn test_cli_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.md");

    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("report")
        .arg(fixture("reference_tree.json"))
        .arg("--whitelist")
        .arg("MIT")
        .arg("--output")
        .arg(&output);

    cmd.assert().success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("# License Audit Report: Name"));
    assert!(content.contains("| package6@6.6.6 | GPL | package4@4.4.4 <- Name@ |"));
}

#[test]
fn test_cli_missing_tree_file() {
    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("flatten").arg(fixture("does_not_exist.json"));

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read dependency tree"));
}

#[test]
fn test_cli_report_markdown_escapes_pipes() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.json");
    std::fs::write(
        &tree,
        r#"{"name": "app", "license": "MIT", "dependencies": [
            {"name": "odd", "version": "1.0.0", "license": "MIT | GPL"}
        ]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("secure-license-audit").unwrap();
    cmd.arg("report").arg(&tree).arg("--whitelist").arg("MIT");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("| odd@1.0.0 | MIT \\| GPL | app@ |"));
}

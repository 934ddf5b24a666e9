//! End-to-end CLI tests over fixture files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tailorfix() -> Command {
    Command::cargo_bin("tailorfix").expect("tailorfix binary")
}

fn create_fixtures() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();

    fs::write(
        root.join("resume.json"),
        r#"{
            "summary": "Built systems.",
            "skills": ["A", "B", "C"],
            "experience": [
                { "title": "Engineer", "company": "Acme", "details": ["Wrote code."] }
            ],
            "projects": []
        }"#,
    )
    .unwrap();

    fs::write(
        root.join("suggestions.json"),
        r#"[
            { "section": "skills", "entryIdx": 0, "original": "A", "updated": "", "explanation": "Not relevant." },
            { "section": "skills", "entryIdx": "2", "original": "C", "updated": "D", "explanation": "Match the JD." },
            { "section": "summary", "original": "Built systems.", "updated": "Built distributed systems.", "explanation": "" },
            { "section": "skills", "original": "Missing", "updated": "", "explanation": "" }
        ]"#,
    )
    .unwrap();

    td
}

#[test]
fn validate_lists_applicability() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args(["validate", "--resume", "resume.json", "--suggestions", "suggestions.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 4 suggestions applicable"));
}

#[test]
fn apply_without_flag_is_dry_run() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args(["apply", "--resume", "resume.json", "--suggestions", "suggestions.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry-run: no files written"));

    assert!(!temp.path().join("tailorfix-out").exists());
}

#[test]
fn apply_writes_artifacts() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args([
            "apply",
            "--resume",
            "resume.json",
            "--suggestions",
            "suggestions.json",
            "--apply",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("applied 3"));

    let out = temp.path().join("tailorfix-out");
    for artifact in ["resume.json", "session.json", "session.md", "resume.diff"] {
        assert!(out.join(artifact).exists(), "missing {artifact}");
    }

    let updated = fs::read_to_string(out.join("resume.json")).unwrap();
    assert!(updated.contains("Built distributed systems."));
    assert!(updated.contains("\"D\""));
    assert!(!updated.contains("\"A\""));
}

#[test]
fn reject_ordinal_keeps_the_suggestion_out() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args([
            "apply",
            "--resume",
            "resume.json",
            "--suggestions",
            "suggestions.json",
            "--reject",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected 1"));
}

#[test]
fn deny_section_blocks_it() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args([
            "apply",
            "--resume",
            "resume.json",
            "--suggestions",
            "suggestions.json",
            "--deny",
            "skills",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("blocked 3"));
}

#[test]
fn config_file_policy_is_honored() {
    let temp = create_fixtures();
    fs::write(
        temp.path().join("tailorfix.toml"),
        r#"
[policy]
deny = ["summary"]
"#,
    )
    .unwrap();

    tailorfix()
        .current_dir(temp.path())
        .args(["apply", "--resume", "resume.json", "--suggestions", "suggestions.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blocked 1"));
}

#[test]
fn show_renders_markdown() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args(["show", "--resume", "resume.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Experience"))
        .stdout(predicate::str::contains("**Engineer at Acme**"));
}

#[test]
fn missing_resume_is_a_runtime_error() {
    let temp = create_fixtures();

    tailorfix()
        .current_dir(temp.path())
        .args(["show", "--resume", "nope.json"])
        .assert()
        .failure();
}

#[test]
fn unknown_section_records_are_skipped_not_fatal() {
    let temp = create_fixtures();
    fs::write(
        temp.path().join("mixed.json"),
        r#"[
            { "section": "education", "original": "", "updated": "MSc" },
            { "section": "skills", "original": "", "updated": "Kubernetes" }
        ]"#,
    )
    .unwrap();

    tailorfix()
        .current_dir(temp.path())
        .args(["validate", "--resume", "resume.json", "--suggestions", "mixed.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 suggestions applicable"));
}

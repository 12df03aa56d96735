//! Corpus classification and CLI regression tests.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

use skald::corpus::{FileStatus, Runner};

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.scala", "package a.b\nclass C\n");
    write(dir.path(), "bad.scala", "class C {\n");
    write(dir.path(), "neg/alsobad.scala", "class {{{\n");
    write(dir.path(), "failing/ignored.scala", "class C {\n");
    write(dir.path(), "script.scala", "#!/usr/bin/env scala\nclass C\n");
    write(dir.path(), "notes.txt", "not a source file");
    dir
}

#[test]
fn classification_covers_pass_fail_and_skip() {
    let dir = corpus();
    let runner = Runner::new();

    let good = runner.classify(&dir.path().join("good.scala"));
    assert!(matches!(good.status, FileStatus::Ok));
    assert_eq!(good.len, "package a.b\nclass C\n".len());

    let bad = runner.classify(&dir.path().join("bad.scala"));
    assert!(matches!(bad.status, FileStatus::Failed(Some(_))));

    let script = runner.classify(&dir.path().join("script.scala"));
    assert!(matches!(script.status, FileStatus::Skip(_)));

    let ignored = runner.classify(&dir.path().join("failing/ignored.scala"));
    assert!(matches!(ignored.status, FileStatus::Skip(_)));

    let missing = runner.classify(&dir.path().join("nosuch.scala"));
    assert!(matches!(missing.status, FileStatus::Skip(_)));
}

#[test]
fn neg_paths_invert_the_expected_outcome() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "neg/rejected.scala", "class {{{\n");
    write(dir.path(), "neg/accepted.scala", "class C\n");
    let runner = Runner::new();

    let rejected = runner.classify(&dir.path().join("neg/rejected.scala"));
    assert!(matches!(rejected.status, FileStatus::Ok));

    let accepted = runner.classify(&dir.path().join("neg/accepted.scala"));
    assert!(matches!(accepted.status, FileStatus::Failed(None)));
}

#[test]
fn bare_unicode_escape_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "esc.scala",
        "class C\nval a = \\u0041\n",
    );
    let runner = Runner::new();
    let report = runner.classify(&dir.path().join("esc.scala"));
    assert!(matches!(report.status, FileStatus::Skip(_)));
}

#[test]
fn run_tallies_across_roots() {
    let dir = corpus();
    let runner = Runner::new();
    let (reports, summary) = runner.run(&[dir.path().to_path_buf()]);
    // good passes; bad fails; neg/alsobad passes by inversion; the script
    // and the failing-dir file skip; notes.txt is never discovered.
    assert_eq!(reports.len(), 5);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 2);
    assert!(!summary.all_passed());
}

// ---------------------------------------------------------------------------
// Binary regression
// ---------------------------------------------------------------------------

#[test]
fn check_reports_status_lines_and_exit_code() {
    let dir = corpus();
    let mut cmd = Command::cargo_bin("skald").unwrap();
    cmd.arg("check").arg(dir.path());
    cmd.assert()
        .failure()
        .stdout(contains("good.scala  ok"))
        .stdout(contains("bad.scala  failed"))
        .stdout(contains("script.scala  skip"))
        .stdout(contains("expected"))
        .stdout(contains("passed"));
}

#[test]
fn check_succeeds_on_a_clean_corpus() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.scala", "class A\n");
    write(dir.path(), "b.scala", "object B { def f = 1 }\n");
    let mut cmd = Command::cargo_bin("skald").unwrap();
    cmd.arg("check").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(contains("2 passed, 0 failed, 0 skipped"));
}

#[test]
fn check_json_emits_a_machine_readable_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.scala", "class A\n");
    let mut cmd = Command::cargo_bin("skald").unwrap();
    cmd.arg("check").arg("--json").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(contains("\"passed\": 1"))
        .stdout(contains("\"status\": \"ok\""));
}

#[test]
fn parse_renders_miette_diagnostics_on_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.scala", "class C {\n");
    let mut cmd = Command::cargo_bin("skald").unwrap();
    cmd.arg("parse").arg(dir.path().join("bad.scala"));
    cmd.assert().failure().stderr(contains("skald::parse"));
}

#[test]
fn trace_prints_a_rule_tally() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.scala", "class A { def f: Int = 1 }\n");
    let mut cmd = Command::cargo_bin("skald").unwrap();
    cmd.arg("trace").arg(dir.path().join("a.scala")).arg("--rule").arg("Type");
    cmd.assert().success().stdout(contains("rule Type"));
}

//! Dry run tests

mod common;

use common::{TestWorkspace, dropins_cmd};
use predicates::prelude::*;

#[test]
fn test_dry_run_writes_nothing() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/foo.jar", "foo", "1.0.0", &[]);
    workspace.write_plugin("target/bar.jar", "bar", "1.0.0", &[]);

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "--dry-run", "-m", "bar=extra", "target/*.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extra"))
        .stdout(predicate::str::contains("foo"))
        .stdout(predicate::str::contains("nothing written"));

    assert!(!workspace.file_exists("dropins"));
}

#[cfg(unix)]
#[test]
fn test_dry_run_marks_links() {
    let workspace = TestWorkspace::new();
    workspace.create_repository();
    workspace.write_plugin(
        "target/foo.jar",
        "foo",
        "1.0.0",
        &["Require-Bundle: org.apache.commons.io"],
    );

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "--dry-run", "-r", "repo", "target/foo.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("link plugin org.apache.commons.io"))
        .stdout(predicate::str::contains("copy plugin foo"));
}

#[test]
fn test_dry_run_json() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/a.jar", "A", "1.0.0", &["Require-Bundle: B"]);
    workspace.write_plugin("target/b.jar", "B", "1.0.0", &[]);

    let output = dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "--dry-run", "--json", "-m", "A=sub", "target/*.jar"])
        .output()
        .expect("Failed to run dropins");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    let root = json["dropin_root"].as_str().expect("dropin_root");
    assert!(root.ends_with("dropins"));

    let placements = json["placements"].as_array().expect("placements array");
    let units: Vec<(&str, &str)> = placements
        .iter()
        .map(|p| {
            (
                p["subpackage"].as_str().unwrap_or_default(),
                p["unit"].as_str().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(units, vec![("sub", "A"), ("sub", "B")]);
    assert!(!workspace.file_exists("dropins"));
}

#[test]
fn test_dry_run_still_reports_errors() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/a.jar", "A", "1.0.0", &["Require-Bundle: missing.bundle"]);

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "--dry-run", "target/a.jar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.bundle"));
}

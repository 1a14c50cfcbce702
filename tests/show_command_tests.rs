//! Show command tests

mod common;

use common::{TestWorkspace, dropins_cmd};
use predicates::prelude::*;

#[test]
fn test_show_plugin() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin(
        "target/foo.jar",
        "org.example.foo",
        "1.2.3",
        &[
            "Export-Package: org.example.foo.api",
            "Import-Package: org.slf4j",
            "Require-Bundle: org.example.core",
        ],
    );

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["show", "target/foo.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.example.foo"))
        .stdout(predicate::str::contains("1.2.3"))
        .stdout(predicate::str::contains("org.example.foo_1.2.3.jar"))
        .stdout(predicate::str::contains("org.example.foo.api"))
        .stdout(predicate::str::contains("org.slf4j"))
        .stdout(predicate::str::contains("org.example.core"));
}

#[test]
fn test_show_dir_shaped_plugin() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/foo.jar", "foo", "1.0.0", &["Eclipse-BundleShape: dir"]);

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["show", "target/foo.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo_1.0.0"))
        .stdout(predicate::str::contains("foo_1.0.0.jar").not());
}

#[test]
fn test_show_feature_json() {
    let workspace = TestWorkspace::new();
    workspace.write_feature("target/f.jar", "my.feature", "1.0.0", &["a", "b"]);

    let output = dropins_cmd()
        .current_dir(&workspace.path)
        .args(["show", "--json", "target/f.jar"])
        .output()
        .expect("Failed to run dropins");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(json["id"], "my.feature");
    assert_eq!(json["kind"], "feature");
    assert_eq!(json["shape"], "directory");
}

#[test]
fn test_show_missing_artifact() {
    let workspace = TestWorkspace::new();

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["show", "target/nope.jar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.jar"));
}

#[test]
fn test_show_non_osgi_jar() {
    let workspace = TestWorkspace::new();
    workspace.write_file("plain/META-INF/MANIFEST.MF", "Manifest-Version: 1.0\r\n\r\n");

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["show", "plain"])
        .assert()
        .failure();
}

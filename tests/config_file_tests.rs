//! Request file (dropins.yaml) tests

mod common;

use common::{TestWorkspace, dropins_cmd};
use predicates::prelude::*;

#[test]
fn test_install_from_request_file() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/foo.jar", "foo", "1.0.0", &[]);
    workspace.write_plugin("target/bar.jar", "bar", "1.0.0", &[]);
    workspace.write_file(
        "dropins.yaml",
        "build_root: buildroot\n\
         dropin_dir: usr/share/eclipse/dropins\n\
         main_package: core\n\
         artifacts:\n  - target/*.jar\n\
         packages:\n  bar: extra\n",
    );

    dropins_cmd()
        .current_dir(&workspace.path)
        .arg("install")
        .assert()
        .success();

    let root = "buildroot/usr/share/eclipse/dropins";
    assert_eq!(workspace.list_dir(root), vec!["core", "extra"]);
    assert!(workspace.file_exists(&format!("{root}/core/eclipse/plugins/foo_1.0.0.jar")));
    assert!(workspace.file_exists(&format!("{root}/extra/eclipse/plugins/bar_1.0.0.jar")));
}

#[test]
fn test_command_line_overrides_request_file() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/foo.jar", "foo", "1.0.0", &[]);
    workspace.write_plugin("other/bar.jar", "bar", "1.0.0", &[]);
    workspace.write_file(
        "dropins.yaml",
        "main_package: core\nartifacts: [target/*.jar]\n",
    );

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "--main-package", "base", "other/bar.jar"])
        .assert()
        .success();

    assert_eq!(workspace.list_dir("dropins"), vec!["base"]);
    assert_eq!(
        workspace.list_dir("dropins/base/eclipse/plugins"),
        vec!["bar_1.0.0.jar"]
    );
}

#[test]
fn test_explicit_request_file_in_other_directory() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("module/target/foo.jar", "foo", "1.0.0", &[]);
    workspace.write_file(
        "module/packaging.yaml",
        "build_root: out\nartifacts: [target/foo.jar]\n",
    );

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "-c", "module/packaging.yaml"])
        .assert()
        .success();

    assert!(workspace.file_exists("module/out/dropins/main/eclipse/plugins/foo_1.0.0.jar"));
}

#[test]
fn test_unknown_key_rejected() {
    let workspace = TestWorkspace::new();
    workspace.write_file("dropins.yaml", "artifacts: [a.jar]\nmain_pacakge: core\n");

    dropins_cmd()
        .current_dir(&workspace.path)
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"))
        .stderr(predicate::str::contains("main_pacakge"));
}

#[test]
fn test_missing_explicit_request_file() {
    let workspace = TestWorkspace::new();

    dropins_cmd()
        .current_dir(&workspace.path)
        .args(["install", "-c", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_build_root_from_environment() {
    let workspace = TestWorkspace::new();
    workspace.write_plugin("target/foo.jar", "foo", "1.0.0", &[]);

    dropins_cmd()
        .current_dir(&workspace.path)
        .env("DROPINS_BUILD_ROOT", workspace.path.join("envroot"))
        .args(["install", "target/foo.jar"])
        .assert()
        .success();

    assert!(workspace.file_exists("envroot/dropins/main/eclipse/plugins/foo_1.0.0.jar"));
}

//! Common test utilities for dropins integration tests

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Command for the dropins binary, isolated from the developer's environment
#[allow(dead_code, deprecated)]
pub fn dropins_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dropins").expect("Failed to find dropins binary");
    cmd.env_remove("DROPINS_BUILD_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A build directory holding reactor artifacts, a repository and a build root
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp dir");
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Check if a path in workspace is a symbolic link
    pub fn is_symlink(&self, path: &str) -> bool {
        self.path
            .join(path)
            .symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// Check if a path in workspace is a real (non-link) directory
    pub fn is_real_dir(&self, path: &str) -> bool {
        self.path
            .join(path)
            .symlink_metadata()
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false)
    }

    /// Names of the entries of a workspace directory, sorted
    pub fn list_dir(&self, path: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path.join(path))
            .expect("Failed to read directory")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Write a plugin jar
    ///
    /// `headers` are extra manifest lines such as `Require-Bundle: foo`.
    pub fn write_plugin(&self, path: &str, id: &str, version: &str, headers: &[&str]) -> PathBuf {
        let manifest = plugin_manifest(id, version, headers);
        let file_path = self.path.join(path);
        write_jar(
            &file_path,
            &[
                ("META-INF/MANIFEST.MF", manifest.as_str()),
                ("about.txt", id),
            ],
        );
        file_path
    }

    /// Write a plugin as a directory bundle
    pub fn write_plugin_dir(&self, path: &str, id: &str, version: &str, headers: &[&str]) {
        self.write_file(
            &format!("{path}/META-INF/MANIFEST.MF"),
            &plugin_manifest(id, version, headers),
        );
        self.write_file(&format!("{path}/about.txt"), id);
    }

    /// Write a feature jar listing `plugins`
    pub fn write_feature(&self, path: &str, id: &str, version: &str, plugins: &[&str]) {
        let mut xml = format!("<feature id=\"{id}\" version=\"{version}\">\n");
        for plugin in plugins {
            xml.push_str(&format!("  <plugin id=\"{plugin}\" version=\"0.0.0\"/>\n"));
        }
        xml.push_str("</feature>\n");
        write_jar(&self.path.join(path), &[("feature.xml", xml.as_str())]);
    }

    /// Write a system repository at `repo/`: junit (requiring hamcrest),
    /// hamcrest, commons-io and commons-lang
    pub fn create_repository(&self) -> PathBuf {
        self.write_plugin(
            "repo/junit.jar",
            "org.junit",
            "4.12.0",
            &[
                "Export-Package: junit.framework,org.junit",
                "Require-Bundle: org.hamcrest.core",
            ],
        );
        self.write_plugin(
            "repo/hamcrest-core.jar",
            "org.hamcrest.core",
            "1.3.0",
            &["Export-Package: org.hamcrest"],
        );
        self.write_plugin(
            "repo/commons-io.jar",
            "org.apache.commons.io",
            "2.4.0",
            &["Export-Package: org.apache.commons.io"],
        );
        self.write_plugin(
            "repo/commons-lang.jar",
            "org.apache.commons.lang",
            "2.6.0",
            &["Export-Package: org.apache.commons.lang"],
        );
        self.path.join("repo")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn plugin_manifest(id: &str, version: &str, headers: &[&str]) -> String {
    let mut manifest = format!(
        "Manifest-Version: 1.0\r\nBundle-ManifestVersion: 2\r\nBundle-SymbolicName: {id}\r\nBundle-Version: {version}\r\n"
    );
    for header in headers {
        manifest.push_str(header);
        manifest.push_str("\r\n");
    }
    manifest.push_str("\r\n");
    manifest
}

fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    let file = File::create(path).expect("Failed to create jar");
    let mut zip = ZipWriter::new(file);
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start jar entry");
        zip.write_all(content.as_bytes())
            .expect("Failed to write jar entry");
    }
    zip.finish().expect("Failed to finish jar");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_write_plugin() {
        let workspace = TestWorkspace::new();
        let jar = workspace.write_plugin("target/foo.jar", "foo", "1.0.0", &[]);
        assert!(jar.is_file());
        assert_eq!(workspace.list_dir("target"), vec!["foo.jar"]);
    }
}

//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides builders that write real plugin and feature artifacts
//! (jars or directories) and a small in-memory resolver, so tests exercise the
//! same metadata reading code as a real installation.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, Plugin};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     Plugin::new("foo", "1.0.0")
//!         .require_bundle("bar")
//!         .write_jar(&temp.path().join("foo.jar"));
//! }
//! ```

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::domain::{Requirement, Unit};
use crate::error::Result;
use crate::resolver::ArtifactResolver;

/// Absolute temp base, so fixtures never land under the working directory
/// when `TMPDIR` is relative (for example `TMPDIR=tmp`).
fn temp_dir_base() -> PathBuf {
    let t = std::env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

fn write_zip(path: &Path, entries: &[(String, String)]) {
    let file = File::create(path).expect("Failed to create jar");
    let mut zip = ZipWriter::new(file);
    for (name, content) in entries {
        zip.start_file(name.as_str(), SimpleFileOptions::default())
            .expect("Failed to start jar entry");
        zip.write_all(content.as_bytes())
            .expect("Failed to write jar entry");
    }
    zip.finish().expect("Failed to finish jar");
}

fn write_tree(root: &Path, entries: &[(String, String)]) {
    for (name, content) in entries {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }
}

/// Builder for an OSGi plugin artifact
#[derive(Debug, Clone)]
pub struct Plugin {
    id: String,
    version: String,
    imports: BTreeSet<String>,
    exports: BTreeSet<String>,
    requires: BTreeSet<String>,
    extra: Vec<(String, String)>,
    symbolic_name: bool,
}

impl Plugin {
    pub fn new(id: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            version: version.to_string(),
            imports: BTreeSet::new(),
            exports: BTreeSet::new(),
            requires: BTreeSet::new(),
            extra: Vec::new(),
            symbolic_name: true,
        }
    }

    pub fn import_package(mut self, name: &str) -> Self {
        self.imports.insert(name.to_string());
        self
    }

    pub fn export_package(mut self, name: &str) -> Self {
        self.exports.insert(name.to_string());
        self
    }

    pub fn require_bundle(mut self, name: &str) -> Self {
        self.requires.insert(name.to_string());
        self
    }

    pub fn mf_entry(mut self, key: &str, value: &str) -> Self {
        self.extra.push((key.to_string(), value.to_string()));
        self
    }

    /// Write a plain (non-OSGi) manifest
    pub fn without_symbolic_name(mut self) -> Self {
        self.symbolic_name = false;
        self
    }

    pub fn manifest(&self) -> String {
        let mut mf = String::from("Manifest-Version: 1.0\r\n");
        if self.symbolic_name {
            mf.push_str("Bundle-ManifestVersion: 2\r\n");
            mf.push_str(&format!("Bundle-SymbolicName: {}\r\n", self.id));
            mf.push_str(&format!("Bundle-Version: {}\r\n", self.version));
        }
        for (key, values) in [
            ("Import-Package", &self.imports),
            ("Export-Package", &self.exports),
            ("Require-Bundle", &self.requires),
        ] {
            if !values.is_empty() {
                let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                mf.push_str(&format!("{key}: {}\r\n", joined.join(",")));
            }
        }
        for (key, value) in &self.extra {
            mf.push_str(&format!("{key}: {value}\r\n"));
        }
        mf.push_str("\r\n");
        mf
    }

    fn entries(&self) -> Vec<(String, String)> {
        vec![
            ("META-INF/MANIFEST.MF".to_string(), self.manifest()),
            ("about.txt".to_string(), format!("{} {}\n", self.id, self.version)),
        ]
    }

    /// Write the plugin as a jar archive
    pub fn write_jar(&self, path: &Path) {
        write_zip(path, &self.entries());
    }

    /// Write the plugin as a directory bundle
    pub fn write_dir(&self, path: &Path) {
        write_tree(path, &self.entries());
    }
}

/// Builder for an Eclipse feature artifact
#[derive(Debug, Clone)]
pub struct Feature {
    id: String,
    version: String,
    plugins: Vec<String>,
    includes: Vec<String>,
}

impl Feature {
    pub fn new(id: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            version: version.to_string(),
            plugins: Vec::new(),
            includes: Vec::new(),
        }
    }

    pub fn plugin(mut self, id: &str) -> Self {
        self.plugins.push(id.to_string());
        self
    }

    pub fn includes(mut self, id: &str) -> Self {
        self.includes.push(id.to_string());
        self
    }

    pub fn feature_xml(&self) -> String {
        let mut xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<feature id=\"{}\" version=\"{}\">\n",
            self.id, self.version
        );
        for id in &self.includes {
            xml.push_str(&format!("  <includes id=\"{id}\" version=\"0.0.0\"/>\n"));
        }
        for id in &self.plugins {
            xml.push_str(&format!("  <plugin id=\"{id}\" version=\"0.0.0\"/>\n"));
        }
        xml.push_str("</feature>\n");
        xml
    }

    pub fn write_jar(&self, path: &Path) {
        write_zip(path, &[("feature.xml".to_string(), self.feature_xml())]);
    }

    pub fn write_dir(&self, path: &Path) {
        write_tree(path, &[("feature.xml".to_string(), self.feature_xml())]);
    }
}

/// Write a small system repository: junit (requiring hamcrest), hamcrest and
/// commons-io/commons-lang, all as jars.
///
/// # Panics
///
/// Panics if the repository cannot be written.
#[must_use]
pub fn create_repository() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let repo = temp.path().join("java");
    std::fs::create_dir_all(&repo).expect("Failed to create repository");

    Plugin::new("org.junit", "4.12.0")
        .export_package("junit.framework")
        .export_package("org.junit")
        .require_bundle("org.hamcrest.core")
        .write_jar(&repo.join("junit.jar"));
    Plugin::new("org.hamcrest.core", "1.3.0")
        .export_package("org.hamcrest")
        .write_jar(&repo.join("hamcrest-core.jar"));
    Plugin::new("org.apache.commons.io", "2.4.0")
        .export_package("org.apache.commons.io")
        .write_jar(&repo.join("commons-io.jar"));
    Plugin::new("org.apache.commons.lang", "2.6.0")
        .export_package("org.apache.commons.lang")
        .write_jar(&repo.join("commons-lang.jar"));
    std::fs::write(repo.join("plain.jar"), "not an osgi bundle").expect("Failed to write jar");

    (temp, repo)
}

/// In-memory resolver answering from a fixed list of external units
#[derive(Debug, Default)]
pub struct StaticResolver {
    units: Vec<Unit>,
}

impl StaticResolver {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }
}

impl ArtifactResolver for StaticResolver {
    fn resolve(&self, requirement: &Requirement) -> Result<Option<Unit>> {
        Ok(self
            .units
            .iter()
            .find(|unit| unit.satisfies(requirement))
            .cloned())
    }
}

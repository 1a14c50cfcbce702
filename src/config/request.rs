//! Installation request file (dropins.yaml) data structures
//!
//! ```yaml
//! build_root: buildroot
//! dropin_dir: usr/share/eclipse/dropins
//! main_package: main
//! artifacts:
//!   - target/*.jar
//! packages:
//!   foo: sub1
//! repositories:
//!   - /usr/share/java
//! ```
//!
//! Relative paths in the file are relative to the directory holding it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::InstallationRequest;
use crate::domain::request::{DEFAULT_DROPIN_DIR, DEFAULT_MAIN_PACKAGE};
use crate::error::{
    Result, config_invalid, config_not_found, config_parse_failed, config_read_failed,
};

/// Default request file name, looked up in the current directory
pub const REQUEST_FILE: &str = "dropins.yaml";

/// Request file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    /// Root the dropin directory is created under
    #[serde(default)]
    pub build_root: Option<PathBuf>,

    /// Dropin directory relative to the build root
    #[serde(default)]
    pub dropin_dir: Option<PathBuf>,

    /// Subpackage for units with no other placement
    #[serde(default)]
    pub main_package: Option<String>,

    /// Reactor artifact paths or glob patterns
    #[serde(default)]
    pub artifacts: Vec<String>,

    /// Explicit unit id -> subpackage mappings
    #[serde(default)]
    pub packages: BTreeMap<String, String>,

    /// Directories searched for external units
    #[serde(default)]
    pub repositories: Vec<PathBuf>,
}

/// Values given on the command line, applied on top of a request file
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    pub build_root: Option<PathBuf>,
    pub dropin_dir: Option<PathBuf>,
    pub main_package: Option<String>,
    /// Replaces the file's artifacts when non-empty
    pub artifacts: Vec<String>,
    /// Merged over the file's mappings
    pub packages: Vec<(String, String)>,
    /// Appended to the file's repositories
    pub repositories: Vec<PathBuf>,
}

impl RequestConfig {
    /// Parse request file contents; `source` names the file in errors
    pub fn from_yaml(yaml: &str, source: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| config_parse_failed(source, e.to_string()))
    }

    /// Load a request file, making its relative paths relative to the file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_not_found(path.display().to_string()));
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        let config = Self::from_yaml(&yaml, &path.display().to_string())?;

        let base = path.parent().unwrap_or(Path::new("."));
        tracing::debug!(path = %path.display(), "loaded request file");
        Ok(config.relative_to(base))
    }

    /// Load `path` if given, else `dropins.yaml` in `cwd` when present
    pub fn discover(path: Option<&Path>, cwd: &Path) -> Result<Option<Self>> {
        if let Some(path) = path {
            return Self::load(path).map(Some);
        }
        let default = cwd.join(REQUEST_FILE);
        if default.is_file() {
            return Self::load(&default).map(Some);
        }
        Ok(None)
    }

    fn relative_to(mut self, base: &Path) -> Self {
        self.build_root = self.build_root.map(|p| base.join(p));
        self.repositories = self.repositories.into_iter().map(|p| base.join(p)).collect();
        self.artifacts = self
            .artifacts
            .into_iter()
            .map(|a| base.join(a).to_string_lossy().into_owned())
            .collect();
        self
    }

    /// Apply command line overrides and build the final request
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an empty main package, a subpackage name
    /// that is not a single path segment, or a request with no artifacts.
    pub fn into_request(self, overrides: RequestOverrides) -> Result<InstallationRequest> {
        let mut packages = self.packages;
        packages.extend(overrides.packages);
        let mut repositories = self.repositories;
        repositories.extend(overrides.repositories);

        let request = InstallationRequest {
            build_root: overrides
                .build_root
                .or(self.build_root)
                .unwrap_or_else(|| PathBuf::from(".")),
            dropin_dir: overrides
                .dropin_dir
                .or(self.dropin_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DROPIN_DIR)),
            main_package: overrides
                .main_package
                .or(self.main_package)
                .unwrap_or_else(|| DEFAULT_MAIN_PACKAGE.to_string()),
            artifacts: if overrides.artifacts.is_empty() {
                self.artifacts
            } else {
                overrides.artifacts
            },
            base_dir: PathBuf::from("."),
            packages,
            repositories,
        };

        validate(&request)?;
        Ok(request)
    }
}

fn validate_subpackage(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(config_invalid(format!("{what} is empty")));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(config_invalid(format!(
            "{what} '{name}' must be a single directory name"
        )));
    }
    Ok(())
}

fn validate(request: &InstallationRequest) -> Result<()> {
    validate_subpackage(&request.main_package, "main_package")?;
    for (unit, subpackage) in &request.packages {
        validate_subpackage(subpackage, &format!("subpackage for '{unit}'"))?;
    }
    if request.artifacts.is_empty() {
        return Err(config_invalid(
            "no artifacts given; pass them as arguments or list them under 'artifacts'",
        ));
    }
    Ok(())
}

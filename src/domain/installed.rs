//! Installation result types

use std::path::PathBuf;

use serde::Serialize;

use super::UnitKind;

/// How a unit was placed into a subpackage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Real file or directory
    Copied,
    /// Symbolic link to the external artifact
    Symlinked,
}

/// One installed (unit, subpackage) entry
#[derive(Debug, Clone, Serialize)]
pub struct InstalledUnit {
    pub id: String,
    pub version: String,
    pub kind: UnitKind,
    pub subpackage: String,
    pub mode: InstallMode,
    pub path: PathBuf,
}

/// Summary returned to the caller after a successful installation
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallationResult {
    pub installed: Vec<InstalledUnit>,
}

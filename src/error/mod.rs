//! Error types and handling for dropins
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`unit`]: Unit metadata errors
//! - [`deps`]: Dependency resolution and placement errors
//! - [`fs`]: File system errors
//! - [`config`]: Request configuration errors
//! - [`tree`]: Dropin tree layout errors

pub mod config;
pub mod deps;
pub mod fs;
pub mod tree;
pub mod unit;

pub use config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use deps::{
    ambiguous_placement, invalid_package_mapping, unknown_required_bundle, unresolved_dependency,
};
pub use fs::{
    io_error, read_failed as file_read_failed, symlink_failed, target_exists,
    write_failed as file_write_failed,
};
pub use tree::layout_violation;
pub use unit::{
    artifact_not_found, duplicate as duplicate_unit, invalid_pattern, manifest_invalid,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for dropin installation
#[derive(Error, Diagnostic, Debug)]
pub enum DropinError {
    // Unit metadata errors
    #[error("Invalid bundle metadata in {path}: {reason}")]
    #[diagnostic(
        code(dropins::unit::manifest_invalid),
        help(
            "Plugins need META-INF/MANIFEST.MF with Bundle-SymbolicName, features need feature.xml with an id"
        )
    )]
    ManifestInvalid { path: String, reason: String },

    #[error("Unit '{id}' is provided by both {first} and {second}")]
    #[diagnostic(
        code(dropins::unit::duplicate),
        help("Each reactor artifact must have a unique symbolic name")
    )]
    DuplicateUnit {
        id: String,
        first: String,
        second: String,
    },

    #[error("No artifact matches '{pattern}'")]
    #[diagnostic(
        code(dropins::unit::artifact_not_found),
        help("Check that the reactor was built and the path or glob is correct")
    )]
    ArtifactNotFound { pattern: String },

    #[error("Invalid artifact pattern '{pattern}': {reason}")]
    #[diagnostic(code(dropins::unit::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    // Dependency errors
    #[error("Unresolved dependency: {requirement} (required by '{unit}')")]
    #[diagnostic(
        code(dropins::deps::unresolved),
        help("Add a repository that provides it (--repository) or build it in the reactor")
    )]
    UnresolvedDependency { unit: String, requirement: String },

    #[error("Unknown required bundle '{bundle}' (required by '{unit}')")]
    #[diagnostic(code(dropins::deps::unknown_required_bundle))]
    UnknownRequiredBundle { unit: String, bundle: String },

    #[error(
        "Cannot decide subpackage for '{unit}': required from {}",
        .subpackages.join(", ")
    )]
    #[diagnostic(
        code(dropins::deps::ambiguous_placement),
        help("Map the unit to a subpackage explicitly with --map <unit>=<subpackage>")
    )]
    AmbiguousPlacement {
        unit: String,
        subpackages: Vec<String>,
    },

    #[error("Invalid package mapping for '{unit}': {reason}")]
    #[diagnostic(
        code(dropins::deps::invalid_mapping),
        help("Only units built in the reactor can be mapped to subpackages")
    )]
    InvalidPackageMapping { unit: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(dropins::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(dropins::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(dropins::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(dropins::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(dropins::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(dropins::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to create symlink {link} -> {target}: {reason}")]
    #[diagnostic(code(dropins::fs::symlink_failed))]
    SymlinkFailed {
        link: String,
        target: String,
        reason: String,
    },

    #[error("Target already exists: {path}")]
    #[diagnostic(
        code(dropins::fs::target_exists),
        help("Installation requires a clean destination; remove the dropin directory and retry")
    )]
    TargetExists { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(dropins::fs::io_error))]
    IoError { message: String },

    // Tree layout errors
    #[error("Unexpected dropin layout at {path}: {reason}")]
    #[diagnostic(code(dropins::tree::layout_violation))]
    LayoutViolation { path: String, reason: String },
}

impl From<std::io::Error> for DropinError {
    fn from(err: std::io::Error) -> Self {
        DropinError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DropinError {
    fn from(err: serde_yaml::Error) -> Self {
        DropinError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DropinError {
    fn from(err: serde_json::Error) -> Self {
        DropinError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DropinError>;

//! Unit metadata errors

use super::DropinError;

/// Creates an invalid manifest error
pub fn manifest_invalid(path: impl Into<String>, reason: impl Into<String>) -> DropinError {
    DropinError::ManifestInvalid {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a duplicate unit error
pub fn duplicate(
    id: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> DropinError {
    DropinError::DuplicateUnit {
        id: id.into(),
        first: first.into(),
        second: second.into(),
    }
}

/// Creates an artifact not found error
pub fn artifact_not_found(pattern: impl Into<String>) -> DropinError {
    DropinError::ArtifactNotFound {
        pattern: pattern.into(),
    }
}

/// Creates an invalid artifact pattern error
pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> DropinError {
    DropinError::InvalidPattern {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}

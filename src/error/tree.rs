//! Dropin tree layout errors

use super::DropinError;

/// Creates a layout violation error
pub fn layout_violation(path: impl Into<String>, reason: impl Into<String>) -> DropinError {
    DropinError::LayoutViolation {
        path: path.into(),
        reason: reason.into(),
    }
}

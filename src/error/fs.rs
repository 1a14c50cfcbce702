//! File system errors

use super::DropinError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> DropinError {
    DropinError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> DropinError {
    DropinError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> DropinError {
    DropinError::IoError {
        message: message.into(),
    }
}

/// Creates a symlink failed error
pub fn symlink_failed(
    link: impl Into<String>,
    target: impl Into<String>,
    reason: impl Into<String>,
) -> DropinError {
    DropinError::SymlinkFailed {
        link: link.into(),
        target: target.into(),
        reason: reason.into(),
    }
}

/// Creates a target exists error
pub fn target_exists(path: impl Into<String>) -> DropinError {
    DropinError::TargetExists { path: path.into() }
}

//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::error::{Result, io_error};

/// Current working directory
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| io_error(format!("Failed to get current directory: {}", e)))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Make a relative command line path absolute against `cwd`
pub fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

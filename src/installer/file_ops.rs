//! Basic file operations for unit installation
//!
//! This module handles low-level file operations:
//! - Directory creation (ensure_dir)
//! - Copying archives and directory bundles (copy_file, copy_dir)
//! - Unpacking jar archives into directories (extract_archive)
//! - Linking external artifacts (symlink)

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::common::fs::copy_dir_recursive;
use crate::error::{
    DropinError, Result, file_read_failed, file_write_failed, symlink_failed, target_exists,
};

fn file_write_error(path: &Path, e: impl ToString) -> DropinError {
    file_write_failed(path.display().to_string(), e.to_string())
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| file_write_error(path, e))
}

/// Fail if anything, including a dangling symlink, already occupies `target`
pub fn ensure_vacant(target: &Path) -> Result<()> {
    if target.symlink_metadata().is_ok() {
        return Err(target_exists(target.display().to_string()));
    }
    Ok(())
}

/// Copy a single file verbatim
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_vacant(target)?;
    std::fs::copy(source, target)
        .map_err(|e| file_write_error(target, e))
        .map(|_| ())
}

/// Copy a directory bundle into a new directory
pub fn copy_dir(source: &Path, target: &Path) -> Result<()> {
    ensure_vacant(target)?;
    copy_dir_recursive(source, target).map(|_| ())
}

/// Unpack a jar archive into a new directory
pub fn extract_archive(source: &Path, target: &Path) -> Result<()> {
    ensure_vacant(target)?;
    let file = File::open(source)
        .map_err(|e| file_read_failed(source.display().to_string(), e.to_string()))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| file_read_failed(source.display().to_string(), e.to_string()))?;

    ensure_dir(target)?;
    archive.extract(target).map_err(|e| file_write_error(target, e))
}

/// Create a symbolic link at `link` pointing to the canonical `target`
pub fn symlink(target: &Path, link: &Path) -> Result<()> {
    ensure_vacant(link)?;
    let canonical = dunce::canonicalize(target)
        .map_err(|e| file_read_failed(target.display().to_string(), e.to_string()))?;

    create_symlink(&canonical, link).map_err(|e| {
        symlink_failed(
            link.display().to_string(),
            canonical.display().to_string(),
            e.to_string(),
        )
    })
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

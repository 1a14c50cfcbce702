//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, file_read_failed, file_write_failed};

/// Copy a directory recursively
///
/// `dst` is created if missing. Symbolic links inside `src` are followed, so
/// the copy contains only real files and directories.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> Result<u64>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();
    let mut copied = 0;

    for entry in WalkDir::new(src_ref).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| file_read_failed(src_ref.display().to_string(), e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src_ref)
            .map_err(|e| file_read_failed(entry.path().display().to_string(), e.to_string()))?;
        let dst_path = dst_ref.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst_path)
                .map_err(|e| file_write_failed(dst_path.display().to_string(), e.to_string()))?;
        } else {
            fs::copy(entry.path(), &dst_path)
                .map_err(|e| file_write_failed(dst_path.display().to_string(), e.to_string()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

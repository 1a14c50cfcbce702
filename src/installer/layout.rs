//! Dropin tree scanning
//!
//! Reads an existing dropin directory back into a structured report and
//! checks that it has the shape the materializer produces:
//!
//! ```text
//! <dropin-root>/<subpackage>/eclipse/{plugins|features}/<id>_<version>[.jar]
//! ```
//!
//! Every level above the units must be a real directory, a subpackage holds
//! nothing but `eclipse`, and a unit entry is either a directory or a `.jar`
//! file. Symbolic links may only point at jar files, and features are never
//! links.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::UnitKind;
use crate::error::{Result, file_read_failed, layout_violation};

use super::materialize::ECLIPSE_DIR;

/// How a unit is present in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Archive,
    Directory,
    Symlink,
}

/// One installed unit found in a dropin tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TreeEntry {
    pub subpackage: String,
    pub kind: UnitKind,
    pub id: String,
    pub version: String,
    pub entry: EntryKind,
}

/// Scan a dropin root into a sorted list of entries
///
/// A missing root is an empty tree.
///
/// # Errors
///
/// Returns `LayoutViolation` for anything the materializer would never
/// write, and `FileReadFailed` if a directory cannot be listed.
pub fn scan_tree(dropin_root: &Path) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    if dropin_root.symlink_metadata().is_err() {
        return Ok(entries);
    }
    require_dir(dropin_root)?;

    for subpackage_path in list_dir(dropin_root)? {
        require_dir(&subpackage_path)?;
        let subpackage = file_name(&subpackage_path);

        for eclipse_path in list_dir(&subpackage_path)? {
            require_dir(&eclipse_path)?;
            if file_name(&eclipse_path) != ECLIPSE_DIR {
                return Err(violation(&eclipse_path, "expected only 'eclipse' in a subpackage"));
            }

            for category_path in list_dir(&eclipse_path)? {
                require_dir(&category_path)?;
                let kind = match file_name(&category_path).as_str() {
                    "plugins" => UnitKind::Plugin,
                    "features" => UnitKind::Feature,
                    _ => return Err(violation(&category_path, "unknown unit category")),
                };

                for unit_path in list_dir(&category_path)? {
                    entries.push(scan_unit(&unit_path, &subpackage, kind)?);
                }
            }
        }
    }

    entries.sort();
    tracing::debug!(entries = entries.len(), root = %dropin_root.display(), "scanned dropin tree");
    Ok(entries)
}

fn scan_unit(path: &Path, subpackage: &str, kind: UnitKind) -> Result<TreeEntry> {
    let name = file_name(path);
    let is_link = path
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    let is_dir = path.is_dir();
    let is_jar = name.ends_with(".jar");

    if is_dir == is_jar {
        return Err(violation(path, "expected a directory or a .jar file"));
    }
    if is_link && is_dir {
        return Err(violation(path, "symbolic link to a directory"));
    }
    if is_link && kind == UnitKind::Feature {
        return Err(violation(path, "features are never symbolic links"));
    }

    let stem = name.strip_suffix(".jar").unwrap_or(&name);
    let (id, version) = split_name(stem);
    let entry = if is_link {
        EntryKind::Symlink
    } else if is_dir {
        EntryKind::Directory
    } else {
        EntryKind::Archive
    };

    Ok(TreeEntry {
        subpackage: subpackage.to_string(),
        kind,
        id: id.to_string(),
        version: version.to_string(),
        entry,
    })
}

/// Split `<id>_<version>` at the first underscore followed by a digit
///
/// Ids may contain underscores themselves (`org.foo_bar_1.0.0`), versions
/// always start with a digit.
fn split_name(name: &str) -> (&str, &str) {
    name.match_indices('_')
        .find(|(pos, _)| {
            name[pos + 1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        })
        .map_or((name, ""), |(pos, _)| (&name[..pos], &name[pos + 1..]))
}

fn violation(path: &Path, reason: &str) -> crate::error::DropinError {
    layout_violation(path.display().to_string(), reason)
}

fn require_dir(path: &Path) -> Result<()> {
    let is_real_dir = path
        .symlink_metadata()
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false);
    if is_real_dir {
        Ok(())
    } else {
        Err(violation(path, "expected a directory"))
    }
}

fn list_dir(path: &Path) -> Result<Vec<std::path::PathBuf>> {
    let read_error = |e: std::io::Error| file_read_failed(path.display().to_string(), e.to_string());
    let mut children = fs::read_dir(path)
        .map_err(read_error)?
        .map(|entry| entry.map(|e| e.path()).map_err(read_error))
        .collect::<Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

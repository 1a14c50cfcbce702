//! Dropin tree materialization
//!
//! Writes the placements of a [`PackageAssignment`] below the dropin root:
//!
//! ```text
//! <build-root>/<dropin-dir>/<subpackage>/eclipse/plugins/<id>_<version>.jar
//! <build-root>/<dropin-dir>/<subpackage>/eclipse/plugins/<id>_<version>/
//! <build-root>/<dropin-dir>/<subpackage>/eclipse/features/<id>_<version>/
//! ```
//!
//! Directory-shaped units always become real directories, copied from a
//! directory artifact or unpacked from a jar. Archive-shaped reactor units
//! are copied verbatim; archive-shaped external plugins become symbolic
//! links to their canonical artifact. Features are never linked.
//!
//! Nothing is rolled back on failure; a failed run leaves a partial tree that
//! must be removed before retrying.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::catalog::UnitCatalog;
use crate::domain::{InstallMode, InstallationResult, InstalledUnit, Shape, Unit, UnitKind};
use crate::error::Result;
use crate::progress::ProgressDisplay;

use super::assign::{PackageAssignment, Placement};
use super::file_ops;

/// Directory between a subpackage and the unit categories
pub const ECLIPSE_DIR: &str = "eclipse";

/// How a single unit is put into place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Copy,
    CopyDir,
    Extract,
    Link,
}

impl Action {
    fn for_unit(unit: &Unit) -> Self {
        match unit.shape {
            Shape::Directory if unit.artifact.is_dir() => Action::CopyDir,
            Shape::Directory => Action::Extract,
            Shape::Archive if unit.is_reactor() || unit.is_feature() => Action::Copy,
            Shape::Archive => Action::Link,
        }
    }

    fn mode(self) -> InstallMode {
        match self {
            Action::Link => InstallMode::Symlinked,
            Action::Copy | Action::CopyDir | Action::Extract => InstallMode::Copied,
        }
    }
}

/// Writes assigned units into a dropin directory
pub struct TreeMaterializer {
    dropin_root: PathBuf,
    /// Category directories already created in this run
    created: HashSet<PathBuf>,
    progress: ProgressDisplay,
}

impl TreeMaterializer {
    /// Materializer for `<build_root>/<dropin_dir>`
    ///
    /// `dropin_dir` is always taken relative to `build_root`, even when
    /// written as an absolute path (`/usr/share/eclipse/dropins`).
    pub fn new(build_root: &Path, dropin_dir: &Path) -> Self {
        let relative: PathBuf = dropin_dir
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        Self {
            dropin_root: build_root.join(relative),
            created: HashSet::new(),
            progress: ProgressDisplay::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressDisplay) -> Self {
        self.progress = progress;
        self
    }

    pub fn dropin_root(&self) -> &Path {
        &self.dropin_root
    }

    /// Directory holding units of `kind` in `subpackage`
    pub fn category_dir(&self, subpackage: &str, kind: UnitKind) -> PathBuf {
        self.dropin_root
            .join(subpackage)
            .join(ECLIPSE_DIR)
            .join(kind.category())
    }

    /// Install path of `unit` in `subpackage`
    pub fn target_path(&self, subpackage: &str, unit: &Unit) -> PathBuf {
        self.category_dir(subpackage, unit.kind).join(unit.file_name())
    }

    /// Write every placement of `assignment`
    ///
    /// # Errors
    ///
    /// Fails on the first target that already exists or the first I/O error.
    /// Units written before the failure stay on disk.
    pub fn materialize(
        mut self,
        assignment: &PackageAssignment,
        catalog: &UnitCatalog,
    ) -> Result<InstallationResult> {
        let mut result = InstallationResult::default();

        for placement in assignment.placements(catalog) {
            let Some(unit) = catalog.get(&placement.unit) else {
                continue;
            };
            self.progress.update_unit(&placement.subpackage, &unit.id);
            match self.install_unit(&placement, unit) {
                Ok(installed) => result.installed.push(installed),
                Err(e) => {
                    self.progress.abandon();
                    return Err(e);
                }
            }
            self.progress.inc_unit();
        }

        self.progress.finish();
        tracing::info!(
            units = result.installed.len(),
            root = %self.dropin_root.display(),
            "dropin tree written"
        );
        Ok(result)
    }

    fn install_unit(&mut self, placement: &Placement, unit: &Unit) -> Result<InstalledUnit> {
        let category_dir = self.category_dir(&placement.subpackage, unit.kind);
        if !self.created.contains(&category_dir) {
            file_ops::ensure_dir(&category_dir)?;
            self.created.insert(category_dir.clone());
        }

        let target = self.target_path(&placement.subpackage, unit);
        let action = Action::for_unit(unit);
        match action {
            Action::Copy => file_ops::copy_file(&unit.artifact, &target)?,
            Action::CopyDir => file_ops::copy_dir(&unit.artifact, &target)?,
            Action::Extract => file_ops::extract_archive(&unit.artifact, &target)?,
            Action::Link => file_ops::symlink(&unit.artifact, &target)?,
        }

        tracing::debug!(
            unit = %unit.id,
            subpackage = %placement.subpackage,
            action = ?action,
            target = %target.display(),
            "installed unit"
        );

        Ok(InstalledUnit {
            id: unit.id.clone(),
            version: unit.version.clone(),
            kind: unit.kind,
            subpackage: placement.subpackage.clone(),
            mode: action.mode(),
            path: target,
        })
    }
}

//! Installation of reactor units into dropin subpackages
//!
//! This module handles:
//! - Expanding reactor artifact paths and globs
//! - Deciding the subpackage of every unit ([`assign`])
//! - Writing the dropin tree ([`materialize`])
//! - Reading an existing dropin tree back ([`layout`])
//!
//! ## Installation Flow
//!
//! ```text
//! artifacts -> UnitCatalog -> DependencyGraph -> PackageAssignment -> tree
//! ```
//!
//! Every unit is read and every requirement resolved before anything is
//! written, so resolution and placement errors never leave a partial tree.

pub mod assign;
pub mod file_ops;
pub mod layout;
pub mod materialize;

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::catalog::UnitCatalog;
use crate::domain::{InstallationRequest, InstallationResult};
use crate::error::{Result, artifact_not_found, file_read_failed, invalid_pattern};
use crate::progress::ProgressDisplay;
use crate::resolver::{ArtifactResolver, DependencyGraph};

pub use assign::{PackageAssignment, Placement};
pub use layout::{TreeEntry, scan_tree};
pub use materialize::TreeMaterializer;

/// Characters that make an artifact entry a glob pattern
const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// Everything decided about an installation before writing to disk
#[derive(Debug)]
pub struct InstallationPlan {
    pub catalog: UnitCatalog,
    pub assignment: PackageAssignment,
}

impl InstallationPlan {
    pub fn placements(&self) -> Vec<Placement> {
        self.assignment.placements(&self.catalog)
    }
}

/// Installer for one request
pub struct Installer<'a> {
    request: &'a InstallationRequest,
    show_progress: bool,
}

impl<'a> Installer<'a> {
    pub fn new(request: &'a InstallationRequest) -> Self {
        Self {
            request,
            show_progress: false,
        }
    }

    /// Draw a progress bar while writing the tree
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Materializer writing into the request's dropin directory
    pub fn materializer(&self) -> TreeMaterializer {
        TreeMaterializer::new(&self.request.build_root, &self.request.dropin_dir)
    }

    /// Reactor artifact paths, with globs expanded
    ///
    /// Plain paths are passed through as long as they exist; every pattern
    /// must match at least one file or directory.
    pub fn reactor_artifacts(&self) -> Result<Vec<PathBuf>> {
        let mut artifacts = Vec::new();
        for pattern in &self.request.artifacts {
            let matched = expand_artifact(&self.request.base_dir, pattern)?;
            if matched.is_empty() {
                return Err(artifact_not_found(pattern));
            }
            artifacts.extend(matched);
        }
        Ok(artifacts)
    }

    /// Resolve and place every unit without touching the dropin tree
    pub fn plan(&self, resolver: &dyn ArtifactResolver) -> Result<InstallationPlan> {
        let artifacts = self.reactor_artifacts()?;
        tracing::info!(artifacts = artifacts.len(), "planning installation");

        let catalog = UnitCatalog::load(&artifacts, resolver)?;
        let graph = DependencyGraph::build(&catalog)?;
        let assignment = assign::assign(
            &catalog,
            &graph,
            &self.request.packages,
            &self.request.main_package,
        )?;
        tracing::info!(
            subpackages = ?assignment.subpackages(),
            edges = graph.edge_count(),
            "units assigned"
        );

        Ok(InstallationPlan {
            catalog,
            assignment,
        })
    }

    /// Plan, then write the dropin tree
    pub fn install(&self, resolver: &dyn ArtifactResolver) -> Result<InstallationResult> {
        let plan = self.plan(resolver)?;
        let progress = if self.show_progress {
            ProgressDisplay::new(plan.placements().len() as u64)
        } else {
            ProgressDisplay::hidden()
        };

        self.materializer()
            .with_progress(progress)
            .materialize(&plan.assignment, &plan.catalog)
    }
}

/// Expand one artifact entry relative to `base_dir`
fn expand_artifact(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !pattern.contains(GLOB_CHARS) {
        let path = base_dir.join(pattern);
        return Ok(if path.exists() { vec![path] } else { Vec::new() });
    }

    let (prefix, glob_part) = split_glob(pattern);
    let glob = Glob::new(&glob_part).map_err(|e| invalid_pattern(pattern, e.to_string()))?;
    let root = base_dir.join(prefix);
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut matched = Vec::new();
    let mut walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| file_read_failed(root.display().to_string(), e.to_string()))?;
        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if glob.matched(&CandidatePath::from(relative.as_str())).is_some() {
            matched.push(entry.path().to_path_buf());
            // a matched directory is a bundle, not a tree to search
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
        }
    }

    tracing::debug!(pattern, matches = matched.len(), "expanded artifact pattern");
    Ok(matched)
}

/// Split a pattern into its literal leading directories and the glob rest
fn split_glob(pattern: &str) -> (PathBuf, String) {
    let mut prefix = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        let literal = matches!(
            component,
            Component::RootDir | Component::Prefix(_) | Component::CurDir | Component::ParentDir
        ) || !text.contains(GLOB_CHARS);
        if rest.is_empty() && literal {
            prefix.push(component);
        } else {
            rest.push(text.into_owned());
        }
    }
    (prefix, rest.join("/"))
}

//! Repository-backed artifact resolver
//!
//! Indexes every OSGi jar and directory bundle found under a set of
//! repository roots (for example `/usr/share/java`). Artifacts without OSGi
//! metadata are skipped. Lookups are first-match-wins in scan order, and scan
//! order is the sorted file name order of each root, roots in the order given.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::{Origin, Requirement, Unit, UnitKind};
use crate::error::Result;
use crate::manifest;

use super::ArtifactResolver;

/// Resolver answering from an index of repository artifacts
#[derive(Debug, Default)]
pub struct RepositoryResolver {
    units: Vec<Unit>,
    by_id: HashMap<(UnitKind, String), usize>,
    by_package: HashMap<String, Vec<usize>>,
}

fn has_jar_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jar")
}

fn is_bundle_dir(path: &Path) -> bool {
    path.join("META-INF/MANIFEST.MF").is_file() || path.join("feature.xml").is_file()
}

impl RepositoryResolver {
    /// Scan repository roots and index the units they contain
    ///
    /// Missing roots are skipped with a warning.
    pub fn scan(roots: &[PathBuf]) -> Result<Self> {
        let mut resolver = Self::default();

        for root in roots {
            if !root.exists() {
                tracing::warn!(root = %root.display(), "repository does not exist, skipping");
                continue;
            }

            let mut walker = WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter();
            while let Some(entry) = walker.next() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::debug!(%err, "skipping unreadable repository entry");
                        continue;
                    }
                };
                let path = entry.path();

                if entry.file_type().is_dir() {
                    if path != root.as_path() && is_bundle_dir(path) {
                        walker.skip_current_dir();
                        resolver.index(path);
                    }
                } else if has_jar_extension(path) {
                    resolver.index(path);
                }
            }
        }

        tracing::info!(units = resolver.len(), "indexed repository units");
        Ok(resolver)
    }

    fn index(&mut self, path: &Path) {
        match manifest::read_unit(path, Origin::External) {
            Ok(unit) => self.insert(unit),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "skipping non-OSGi artifact");
            }
        }
    }

    fn insert(&mut self, unit: Unit) {
        let idx = self.units.len();
        self.by_id.entry((unit.kind, unit.id.clone())).or_insert(idx);
        for package in &unit.exports {
            self.by_package.entry(package.clone()).or_default().push(idx);
        }
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }
}

impl ArtifactResolver for RepositoryResolver {
    fn resolve(&self, requirement: &Requirement) -> Result<Option<Unit>> {
        let idx = match requirement {
            Requirement::Bundle(name) => self.by_id.get(&(UnitKind::Plugin, name.clone())).copied(),
            Requirement::Feature(name) => {
                self.by_id.get(&(UnitKind::Feature, name.clone())).copied()
            }
            Requirement::Package(name) => self
                .by_package
                .get(name)
                .and_then(|providers| providers.first())
                .copied(),
        };
        Ok(idx.map(|idx| self.units[idx].clone()))
    }
}

//! Dependency resolution for dropin installation
//!
//! This module handles:
//! - Finding external units that satisfy reactor requirements ([`ArtifactResolver`])
//! - Indexing repository directories of OSGi artifacts ([`repository`])
//! - Building the dependency graph over a catalog ([`graph`])
//! - Grouping dependency cycles into strongly connected components ([`scc`])

pub mod graph;
pub mod repository;
pub mod scc;

use crate::domain::{Requirement, Unit};
use crate::error::Result;

pub use graph::DependencyGraph;
pub use repository::RepositoryResolver;

/// Metadata resolution collaborator
///
/// Given a requirement that no reactor unit satisfies, return the external
/// unit providing it (with its artifact location), or `None` when no provider
/// is known. Implementations must be deterministic: the same requirement
/// always yields the same unit.
pub trait ArtifactResolver {
    fn resolve(&self, requirement: &Requirement) -> Result<Option<Unit>>;
}

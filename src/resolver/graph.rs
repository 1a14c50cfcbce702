//! Dependency graph over a unit catalog
//!
//! An edge `A -> B` means unit A requires unit B, either through
//! `Require-Bundle`, an `Import-Package` satisfied by B's exports, or a
//! feature listing B. Nodes are catalog arena indices.
//!
//! ## Graph Structure
//!
//! ```text
//! requires:    Vec<BTreeSet<usize>>   a -> {b, c}
//! required_by: Vec<BTreeSet<usize>>   b -> {a}, c -> {a}
//! ```
//!
//! The graph never contains self loops. Cycles are allowed; consumers that
//! need to collapse them use [`super::scc`].

use std::collections::BTreeSet;

use crate::catalog::UnitCatalog;
use crate::domain::Requirement;
use crate::error::{Result, unknown_required_bundle, unresolved_dependency};

/// Directed "requires" graph, with reverse edges kept alongside
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    requires: Vec<BTreeSet<usize>>,
    required_by: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Build the graph from catalog content
    ///
    /// Each requirement must resolve to exactly one provider within the
    /// catalog, chosen by [`UnitCatalog::provider_of`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownRequiredBundle` for a required bundle missing from the
    /// catalog and `UnresolvedDependency` for any other unmatched requirement.
    /// [`UnitCatalog`] resolves every requirement while loading, so neither
    /// error is reachable through [`UnitCatalog::load`].
    ///
    /// # Example
    ///
    /// ```text
    /// Input units:
    ///   - a (Require-Bundle: b, Import-Package: org.c)
    ///   - b
    ///   - c (Export-Package: org.c)
    ///
    /// Output:
    ///   a -> {b, c}
    ///   b -> {}
    ///   c -> {}
    /// ```
    pub fn build(catalog: &UnitCatalog) -> Result<Self> {
        let mut requires = vec![BTreeSet::new(); catalog.len()];
        let mut required_by = vec![BTreeSet::new(); catalog.len()];

        for (idx, unit) in catalog.iter() {
            for requirement in unit.requirements() {
                let provider = catalog
                    .provider_of(idx, &requirement)
                    .ok_or_else(|| match &requirement {
                        Requirement::Bundle(name) => unknown_required_bundle(&unit.id, name),
                        _ => unresolved_dependency(&unit.id, requirement.to_string()),
                    })?;

                if provider == idx {
                    continue;
                }
                requires[idx].insert(provider);
                required_by[provider].insert(idx);
            }
        }

        let graph = Self {
            requires,
            required_by,
        };
        tracing::debug!(
            nodes = catalog.len(),
            edges = graph.edge_count(),
            "dependency graph built"
        );
        Ok(graph)
    }

    pub fn edge_count(&self) -> usize {
        self.requires.iter().map(BTreeSet::len).sum()
    }

    /// Units directly required by `idx`, in index order
    pub fn requires(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.requires[idx].iter().copied()
    }

    /// Units directly requiring `idx`, in index order
    pub fn required_by(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.required_by[idx].iter().copied()
    }
}

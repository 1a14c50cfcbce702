//! Unit catalog
//!
//! Holds every unit relevant to one installation: the reactor units read from
//! the request's artifacts, followed by the external units the resolver
//! supplied to satisfy their requirements (transitively). Units live in an
//! insertion-ordered arena and are addressed by index; ids are unique.
//!
//! The catalog is built once by [`UnitCatalog::load`] and never mutated
//! afterwards.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::{Origin, Requirement, Unit};
use crate::error::{Result, duplicate_unit, unresolved_dependency};
use crate::manifest;
use crate::resolver::ArtifactResolver;

/// All units of one installation, reactor units first
#[derive(Debug, Default)]
pub struct UnitCatalog {
    units: Vec<Unit>,
    by_id: HashMap<String, usize>,
    exporters: HashMap<String, Vec<usize>>,
}

impl UnitCatalog {
    /// Read reactor artifacts and resolve everything they need
    ///
    /// # Errors
    ///
    /// Fails if an artifact has no readable metadata, two units share an id,
    /// or a requirement has no provider even after consulting `resolver`.
    pub fn load(reactor_artifacts: &[PathBuf], resolver: &dyn ArtifactResolver) -> Result<Self> {
        let reactor = reactor_artifacts
            .iter()
            .map(|path| manifest::read_unit(path, Origin::Reactor))
            .collect::<Result<Vec<_>>>()?;
        Self::from_reactor(reactor, resolver)
    }

    /// Build a catalog from already-read reactor units
    pub fn from_reactor(reactor: Vec<Unit>, resolver: &dyn ArtifactResolver) -> Result<Self> {
        let mut catalog = Self::default();
        for unit in reactor {
            catalog.insert(Unit {
                origin: Origin::Reactor,
                ..unit
            })?;
        }
        catalog.resolve_externals(resolver)?;

        tracing::info!(
            reactor = catalog.reactor().count(),
            external = catalog.externals().count(),
            "unit catalog loaded"
        );
        Ok(catalog)
    }

    fn insert(&mut self, unit: Unit) -> Result<usize> {
        if let Some(&existing) = self.by_id.get(&unit.id) {
            return Err(duplicate_unit(
                &unit.id,
                self.units[existing].artifact.display().to_string(),
                unit.artifact.display().to_string(),
            ));
        }

        let idx = self.units.len();
        self.by_id.insert(unit.id.clone(), idx);
        for package in &unit.exports {
            self.exporters.entry(package.clone()).or_default().push(idx);
        }
        self.units.push(unit);
        Ok(idx)
    }

    /// Walk the arena as a worklist: every unit appended by the resolver is
    /// itself visited, so external dependencies of external units are found.
    fn resolve_externals(&mut self, resolver: &dyn ArtifactResolver) -> Result<()> {
        let mut next = 0;
        while next < self.units.len() {
            let requirer = self.units[next].id.clone();
            let requirements: Vec<Requirement> = self.units[next].requirements().collect();

            for requirement in requirements {
                if self.provider_of(next, &requirement).is_some() {
                    continue;
                }

                let provider = resolver
                    .resolve(&requirement)?
                    .filter(|unit| unit.satisfies(&requirement))
                    .ok_or_else(|| unresolved_dependency(&requirer, requirement.to_string()))?;

                tracing::debug!(
                    requirer = %requirer,
                    %requirement,
                    provider = %provider.id,
                    artifact = %provider.artifact.display(),
                    "resolved external unit"
                );
                self.insert(Unit {
                    origin: Origin::External,
                    ..provider
                })?;
            }
            next += 1;
        }
        Ok(())
    }

    /// Find the unit satisfying `requirement` on behalf of unit `requirer`
    ///
    /// A unit's own exports satisfy its own imports. Otherwise a reactor
    /// exporter is preferred over an external one, and among equals the first
    /// in catalog order wins.
    pub fn provider_of(&self, requirer: usize, requirement: &Requirement) -> Option<usize> {
        match requirement {
            Requirement::Package(name) => {
                if self.units[requirer].exports.contains(name) {
                    return Some(requirer);
                }
                self.exporters
                    .get(name)?
                    .iter()
                    .copied()
                    .min_by_key(|&idx| self.units[idx].origin)
            }
            Requirement::Bundle(_) | Requirement::Feature(_) => self
                .by_id
                .get(requirement.name())
                .copied()
                .filter(|&idx| self.units[idx].satisfies(requirement)),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Unit at arena index `idx`
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn unit(&self, idx: usize) -> &Unit {
        &self.units[idx]
    }

    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.index_of(id).map(|idx| &self.units[idx])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Unit)> {
        self.units.iter().enumerate()
    }

    pub fn reactor(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_reactor())
    }

    pub fn externals(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| !unit.is_reactor())
    }
}

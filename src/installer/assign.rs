//! Subpackage assignment
//!
//! Decides which subpackage every unit of a catalog is installed into.
//!
//! ## Algorithm
//!
//! Reactor units are placed per strongly connected component, so units
//! that require each other always end up together:
//!
//! 1. **Seed**: components containing explicitly mapped units take the
//!    mapped subpackage
//! 2. **Propagate**: repeatedly, an unplaced component whose placed reactor
//!    requirers all live in one subpackage inherits it; requirers in two or
//!    more subpackages are a conflict. Every pass decides from the placement
//!    as it stood when the pass started
//! 3. **Verify**: every inferred component is checked again against all of
//!    its placed requirers, since a requirer may have been placed in a later
//!    pass than the component itself
//! 4. **Default**: components still unplaced go to the main subpackage
//! 5. **Externals**: every external unit required (directly, or through
//!    other external units) by a unit in subpackage P is recorded in P
//!
//! Propagation places at least one component per productive pass, so it
//! finishes after at most one pass per component.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;

use crate::catalog::UnitCatalog;
use crate::domain::UnitKind;
use crate::error::{Result, ambiguous_placement, invalid_package_mapping};
use crate::resolver::DependencyGraph;
use crate::resolver::scc::{ReactorComponents, reactor_components};

/// One unit to be installed into one subpackage
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Placement {
    pub subpackage: String,
    pub kind: UnitKind,
    pub unit: String,
}

/// Result of package assignment
///
/// Every reactor unit has exactly one subpackage; external units have one or
/// more (only those some placed unit needs are present).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageAssignment {
    pub reactor: BTreeMap<String, String>,
    pub external: BTreeMap<String, BTreeSet<String>>,
}

impl PackageAssignment {
    /// Subpackage of a reactor unit
    #[cfg(test)]
    pub fn subpackage_of(&self, id: &str) -> Option<&str> {
        self.reactor.get(id).map(String::as_str)
    }

    /// Subpackages an external unit is linked into
    #[cfg(test)]
    pub fn external_subpackages(&self, id: &str) -> impl Iterator<Item = &str> {
        self.external
            .get(id)
            .into_iter()
            .flat_map(|subs| subs.iter().map(String::as_str))
    }

    /// All subpackages receiving at least one unit
    pub fn subpackages(&self) -> BTreeSet<&str> {
        self.reactor
            .values()
            .map(String::as_str)
            .chain(self.external.values().flatten().map(String::as_str))
            .collect()
    }

    /// Every (subpackage, unit) pair, sorted by subpackage, kind then id
    pub fn placements(&self, catalog: &UnitCatalog) -> Vec<Placement> {
        let reactor = self
            .reactor
            .iter()
            .map(|(id, sub)| (id, sub.clone()));
        let external = self
            .external
            .iter()
            .flat_map(|(id, subs)| subs.iter().map(move |sub| (id, sub.clone())));

        let mut placements: Vec<Placement> = reactor
            .chain(external)
            .filter_map(|(id, subpackage)| {
                catalog.get(id).map(|unit| Placement {
                    subpackage,
                    kind: unit.kind,
                    unit: id.clone(),
                })
            })
            .collect();
        placements.sort();
        placements
    }
}

/// Assign every unit of `catalog` to a subpackage
///
/// # Errors
///
/// Returns `InvalidPackageMapping` if `explicit` names a unit that is not a
/// reactor unit or maps to an empty name, and `AmbiguousPlacement` if a unit
/// is required from two subpackages or a dependency cycle is mapped to two
/// subpackages.
///
/// # Example
///
/// ```text
/// Reactor: A (requires B), B, C      Mapping: A -> sub
///
/// Assignment:
///   A -> sub, B -> sub, C -> main
/// ```
pub fn assign(
    catalog: &UnitCatalog,
    graph: &DependencyGraph,
    explicit: &BTreeMap<String, String>,
    main_package: &str,
) -> Result<PackageAssignment> {
    validate_mappings(catalog, explicit)?;

    let components = reactor_components(catalog, graph);
    let mut placed = seed(catalog, &components, explicit)?;
    let seeded: Vec<bool> = placed.iter().map(Option::is_some).collect();
    propagate(catalog, graph, &components, &mut placed)?;
    verify_inferred(catalog, graph, &components, &placed, &seeded)?;

    let mut assignment = PackageAssignment::default();
    for (component, members) in components.iter() {
        let subpackage = placed[component].as_deref().unwrap_or(main_package);
        for &member in members {
            let unit = catalog.unit(member);
            tracing::debug!(unit = %unit.id, subpackage, "placed reactor unit");
            assignment
                .reactor
                .insert(unit.id.clone(), subpackage.to_string());
        }
    }

    assignment.external = place_externals(catalog, graph, &assignment.reactor);
    Ok(assignment)
}

fn validate_mappings(catalog: &UnitCatalog, explicit: &BTreeMap<String, String>) -> Result<()> {
    for (id, subpackage) in explicit {
        let Some(unit) = catalog.get(id) else {
            return Err(invalid_package_mapping(id, "no such unit in the reactor"));
        };
        if !unit.is_reactor() {
            return Err(invalid_package_mapping(
                id,
                "external units follow the units requiring them",
            ));
        }
        if subpackage.trim().is_empty() {
            return Err(invalid_package_mapping(id, "subpackage name is empty"));
        }
    }
    Ok(())
}

/// Human readable name of a component for error messages
fn component_label(catalog: &UnitCatalog, members: &[usize]) -> String {
    members
        .iter()
        .map(|&m| catalog.unit(m).id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn seed(
    catalog: &UnitCatalog,
    components: &ReactorComponents,
    explicit: &BTreeMap<String, String>,
) -> Result<Vec<Option<String>>> {
    let mut placed = vec![None; components.len()];

    for (component, members) in components.iter() {
        let mapped: BTreeSet<&str> = members
            .iter()
            .filter_map(|&m| explicit.get(&catalog.unit(m).id))
            .map(String::as_str)
            .collect();

        match mapped.len() {
            0 => {}
            1 => placed[component] = mapped.into_iter().next().map(str::to_string),
            _ => {
                return Err(ambiguous_placement(
                    component_label(catalog, members),
                    mapped,
                ));
            }
        }
    }
    Ok(placed)
}

fn propagate(
    catalog: &UnitCatalog,
    graph: &DependencyGraph,
    components: &ReactorComponents,
    placed: &mut [Option<String>],
) -> Result<()> {
    let mut passes = 0;
    loop {
        passes += 1;
        let snapshot = placed.to_vec();
        let mut changed = false;

        for (component, members) in components.iter() {
            if snapshot[component].is_some() {
                continue;
            }

            let requirers = requirer_subpackages(graph, components, component, &snapshot);
            match requirers.len() {
                0 => {}
                1 => {
                    placed[component] = requirers.into_iter().next().map(str::to_string);
                    changed = true;
                }
                _ => {
                    return Err(ambiguous_placement(
                        component_label(catalog, members),
                        requirers,
                    ));
                }
            }
        }

        if !changed {
            break;
        }
    }

    tracing::debug!(passes, "placement propagation converged");
    Ok(())
}

/// Distinct subpackages of the placed reactor units requiring `component`
fn requirer_subpackages<'a>(
    graph: &DependencyGraph,
    components: &ReactorComponents,
    component: usize,
    placed: &'a [Option<String>],
) -> BTreeSet<&'a str> {
    components
        .members(component)
        .iter()
        .flat_map(|&m| graph.required_by(m))
        .filter_map(|requirer| components.component_of(requirer))
        .filter(|&other| other != component)
        .filter_map(|other| placed[other].as_deref())
        .collect()
}

/// Re-check every inferred component against the final placement
///
/// A component inherits from the requirers placed when it is decided; a
/// requirer placed in a later pass can still land elsewhere.
fn verify_inferred(
    catalog: &UnitCatalog,
    graph: &DependencyGraph,
    components: &ReactorComponents,
    placed: &[Option<String>],
    seeded: &[bool],
) -> Result<()> {
    for (component, members) in components.iter() {
        if seeded[component] || placed[component].is_none() {
            continue;
        }
        let requirers = requirer_subpackages(graph, components, component, placed);
        if requirers.len() > 1 {
            return Err(ambiguous_placement(
                component_label(catalog, members),
                requirers,
            ));
        }
    }
    Ok(())
}

/// Walk external edges from every placed reactor unit, carrying the
/// requirer's subpackage along
fn place_externals(
    catalog: &UnitCatalog,
    graph: &DependencyGraph,
    reactor: &BTreeMap<String, String>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut external: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut queue: VecDeque<(usize, &str)> = VecDeque::new();

    for (idx, unit) in catalog.iter() {
        if let Some(subpackage) = reactor.get(&unit.id) {
            queue.push_back((idx, subpackage.as_str()));
        }
    }

    while let Some((idx, subpackage)) = queue.pop_front() {
        for dep in graph.requires(idx) {
            let unit = catalog.unit(dep);
            if unit.is_reactor() {
                continue;
            }
            let newly_placed = external
                .entry(unit.id.clone())
                .or_default()
                .insert(subpackage.to_string());
            if newly_placed {
                tracing::debug!(unit = %unit.id, subpackage, "placed external unit");
                queue.push_back((dep, subpackage));
            }
        }
    }

    external
}

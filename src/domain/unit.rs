//! Unit domain types
//!
//! A unit is one installable OSGi artifact: a plugin (bundle) or a feature.
//! Units are read once from their artifact and never mutated afterwards.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::Requirement;

/// Whether a unit is a plugin or a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Plugin,
    Feature,
}

impl UnitKind {
    /// Directory name under `eclipse/` holding units of this kind
    pub fn category(self) -> &'static str {
        match self {
            UnitKind::Plugin => "plugins",
            UnitKind::Feature => "features",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Plugin => write!(f, "plugin"),
            UnitKind::Feature => write!(f, "feature"),
        }
    }
}

/// On-disk shape of an installed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Installed as a single `.jar` file
    Archive,
    /// Installed as an unpacked directory
    Directory,
}

/// Where a unit comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Built as part of the current installation request
    Reactor,
    /// Borrowed from a repository to satisfy a dependency
    External,
}

/// An OSGi plugin or feature with the metadata relevant to installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: String,
    pub version: String,
    pub kind: UnitKind,
    pub shape: Shape,
    /// Exported package names
    pub exports: BTreeSet<String>,
    /// Imported package names (mandatory imports only)
    pub imports: BTreeSet<String>,
    /// Required bundle symbolic names
    pub requires: BTreeSet<String>,
    /// Required feature ids (features only)
    pub includes: BTreeSet<String>,
    /// Location of the artifact this unit was read from
    pub artifact: PathBuf,
    pub origin: Origin,
}

impl Unit {
    pub fn new(id: impl Into<String>, version: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            kind,
            shape: match kind {
                UnitKind::Plugin => Shape::Archive,
                UnitKind::Feature => Shape::Directory,
            },
            exports: BTreeSet::new(),
            imports: BTreeSet::new(),
            requires: BTreeSet::new(),
            includes: BTreeSet::new(),
            artifact: PathBuf::new(),
            origin: Origin::Reactor,
        }
    }

    pub fn is_reactor(&self) -> bool {
        self.origin == Origin::Reactor
    }

    pub fn is_feature(&self) -> bool {
        self.kind == UnitKind::Feature
    }

    /// Installed entry name: `<id>_<version>`, plus `.jar` for archives
    pub fn file_name(&self) -> String {
        match self.shape {
            Shape::Archive => format!("{}_{}.jar", self.id, self.version),
            Shape::Directory => format!("{}_{}", self.id, self.version),
        }
    }

    /// All requirements declared by this unit, bundles first
    pub fn requirements(&self) -> impl Iterator<Item = Requirement> + '_ {
        self.requires
            .iter()
            .map(|name| Requirement::Bundle(name.clone()))
            .chain(
                self.imports
                    .iter()
                    .map(|name| Requirement::Package(name.clone())),
            )
            .chain(
                self.includes
                    .iter()
                    .map(|name| Requirement::Feature(name.clone())),
            )
    }

    /// Check whether this unit can satisfy a requirement
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        match requirement {
            Requirement::Bundle(name) => self.kind == UnitKind::Plugin && &self.id == name,
            Requirement::Package(name) => self.exports.contains(name),
            Requirement::Feature(name) => self.kind == UnitKind::Feature && &self.id == name,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_by_shape() {
        let mut unit = Unit::new("foo", "1.0.0", UnitKind::Plugin);
        assert_eq!(unit.file_name(), "foo_1.0.0.jar");

        unit.shape = Shape::Directory;
        assert_eq!(unit.file_name(), "foo_1.0.0");
    }

    #[test]
    fn test_features_default_to_directory_shape() {
        let unit = Unit::new("foo.feature", "2.1.0", UnitKind::Feature);
        assert_eq!(unit.shape, Shape::Directory);
        assert_eq!(unit.kind.category(), "features");
    }

    #[test]
    fn test_satisfies() {
        let mut unit = Unit::new("org.junit", "4.12.0", UnitKind::Plugin);
        unit.exports.insert("junit.framework".to_string());

        assert!(unit.satisfies(&Requirement::Bundle("org.junit".to_string())));
        assert!(unit.satisfies(&Requirement::Package("junit.framework".to_string())));
        assert!(!unit.satisfies(&Requirement::Feature("org.junit".to_string())));
        assert!(!unit.satisfies(&Requirement::Package("org.junit".to_string())));
    }

    #[test]
    fn test_requirements_order() {
        let mut unit = Unit::new("a", "1", UnitKind::Feature);
        unit.includes.insert("f".to_string());
        unit.imports.insert("p".to_string());
        unit.requires.insert("b".to_string());

        let reqs: Vec<Requirement> = unit.requirements().collect();
        assert_eq!(
            reqs,
            vec![
                Requirement::Bundle("b".to_string()),
                Requirement::Package("p".to_string()),
                Requirement::Feature("f".to_string()),
            ]
        );
    }
}

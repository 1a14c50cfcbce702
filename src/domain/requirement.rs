//! Requirement domain type

use std::fmt;

/// A dependency reference declared by a unit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Requirement {
    /// `Require-Bundle` entry, or a plugin listed by a feature
    Bundle(String),
    /// `Import-Package` entry
    Package(String),
    /// Feature included or imported by another feature
    Feature(String),
}

impl Requirement {
    pub fn name(&self) -> &str {
        match self {
            Requirement::Bundle(name) | Requirement::Package(name) | Requirement::Feature(name) => {
                name
            }
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Bundle(name) => write!(f, "bundle {name}"),
            Requirement::Package(name) => write!(f, "package {name}"),
            Requirement::Feature(name) => write!(f, "feature {name}"),
        }
    }
}

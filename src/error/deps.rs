//! Dependency resolution and placement errors

use super::DropinError;

/// Creates an unresolved dependency error
pub fn unresolved_dependency(unit: impl Into<String>, requirement: impl Into<String>) -> DropinError {
    DropinError::UnresolvedDependency {
        unit: unit.into(),
        requirement: requirement.into(),
    }
}

/// Creates an unknown required bundle error
pub fn unknown_required_bundle(unit: impl Into<String>, bundle: impl Into<String>) -> DropinError {
    DropinError::UnknownRequiredBundle {
        unit: unit.into(),
        bundle: bundle.into(),
    }
}

/// Creates an ambiguous placement error
///
/// Competing subpackages are reported sorted and without duplicates.
pub fn ambiguous_placement<I, S>(unit: impl Into<String>, subpackages: I) -> DropinError
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut subpackages: Vec<String> = subpackages.into_iter().map(Into::into).collect();
    subpackages.sort();
    subpackages.dedup();
    DropinError::AmbiguousPlacement {
        unit: unit.into(),
        subpackages,
    }
}

/// Creates an invalid package mapping error
pub fn invalid_package_mapping(unit: impl Into<String>, reason: impl Into<String>) -> DropinError {
    DropinError::InvalidPackageMapping {
        unit: unit.into(),
        reason: reason.into(),
    }
}

//! Display functions for units, placements and dropin trees

use std::collections::BTreeMap;

use console::Style;

use crate::domain::{InstallMode, InstallationResult, Unit};
use crate::installer::{Placement, TreeEntry};
use crate::installer::layout::EntryKind;

macro_rules! display_set_field {
    ($label:expr, $values:expr) => {
        if !$values.is_empty() {
            println!("  {}", Style::new().bold().apply_to($label));
            for value in &$values {
                println!("    {}", value);
            }
        }
    };
}

fn subpackage_header(name: &str) {
    println!("{}", Style::new().bold().green().apply_to(name));
}

/// Group items by subpackage, keeping their order within each group
fn by_subpackage<'a, T>(
    items: &'a [T],
    subpackage: impl Fn(&T) -> &str,
) -> BTreeMap<String, Vec<&'a T>> {
    let mut grouped: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for item in items {
        grouped
            .entry(subpackage(item).to_string())
            .or_default()
            .push(item);
    }
    grouped
}

/// Display the placements an installation would perform
pub fn display_plan(placements: &[Placement], is_external: impl Fn(&str) -> bool) {
    if placements.is_empty() {
        println!("Nothing to install.");
        return;
    }

    for (subpackage, entries) in by_subpackage(placements, |p| p.subpackage.as_str()) {
        subpackage_header(&subpackage);
        for placement in entries {
            let marker = if is_external(&placement.unit) {
                Style::new().cyan().apply_to("link")
            } else {
                Style::new().yellow().apply_to("copy")
            };
            println!("  {} {} {}", marker, placement.kind, placement.unit);
        }
    }
    println!();
    println!(
        "{} {} placement(s), nothing written",
        Style::new().bold().apply_to("Dry run:"),
        placements.len()
    );
}

/// Display the summary of a finished installation
pub fn display_result(result: &InstallationResult) {
    for (subpackage, units) in by_subpackage(&result.installed, |u| u.subpackage.as_str()) {
        subpackage_header(&subpackage);
        for unit in units {
            let arrow = match unit.mode {
                InstallMode::Copied => Style::new().yellow().apply_to("+"),
                InstallMode::Symlinked => Style::new().cyan().apply_to("~"),
            };
            println!(
                "  {} {}_{} {}",
                arrow,
                unit.id,
                unit.version,
                Style::new().dim().apply_to(unit.path.display())
            );
        }
    }

    let linked = result
        .installed
        .iter()
        .filter(|u| u.mode == InstallMode::Symlinked)
        .count();
    println!();
    println!(
        "{} {} unit(s), {} linked",
        Style::new().bold().green().apply_to("Installed"),
        result.installed.len(),
        linked
    );
}

/// Display a scanned dropin tree
pub fn display_tree(entries: &[TreeEntry]) {
    if entries.is_empty() {
        println!("No units installed.");
        return;
    }

    for (subpackage, units) in by_subpackage(entries, |e| e.subpackage.as_str()) {
        subpackage_header(&subpackage);
        for entry in units {
            let shape = match entry.entry {
                EntryKind::Archive => "jar",
                EntryKind::Directory => "dir",
                EntryKind::Symlink => "link",
            };
            println!(
                "  {:<7} {} {}",
                entry.kind.to_string(),
                Style::new().bold().apply_to(&entry.id),
                Style::new().dim().apply_to(format!("{} ({})", entry.version, shape))
            );
        }
    }
}

/// Display the metadata of a single unit
pub fn display_unit(unit: &Unit) {
    println!(
        "{} {}",
        Style::new().bold().yellow().apply_to(&unit.id),
        unit.version
    );
    println!("  {} {}", Style::new().bold().apply_to("Kind:"), unit.kind);
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Installs as:"),
        unit.file_name()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Artifact:"),
        unit.artifact.display()
    );
    display_set_field!("Exports:", unit.exports);
    display_set_field!("Imports:", unit.imports);
    display_set_field!("Requires:", unit.requires);
    display_set_field!("Includes:", unit.includes);
}

//! `feature.xml` parsing

use std::path::Path;

use crate::domain::{Unit, UnitKind};
use crate::error::{Result, manifest_invalid};

/// Build a feature unit from the contents of its `feature.xml`
///
/// Listed plugins and `<import plugin=..>` entries become required bundles;
/// `<includes>` and `<import feature=..>` entries become required features.
/// Optional includes are skipped.
pub fn parse_feature(xml: &str, path: &Path) -> Result<Unit> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| manifest_invalid(path.display().to_string(), e.to_string()))?;
    let root = doc.root_element();

    if !root.has_tag_name("feature") {
        return Err(manifest_invalid(
            path.display().to_string(),
            format!("expected <feature> root element, found <{}>", root.tag_name().name()),
        ));
    }

    let id = root
        .attribute("id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| manifest_invalid(path.display().to_string(), "feature has no id"))?;
    let version = root.attribute("version").map_or("0.0.0", str::trim);

    let mut unit = Unit::new(id, version, UnitKind::Feature);

    for node in root.children().filter(roxmltree::Node::is_element) {
        match node.tag_name().name() {
            "plugin" => {
                if let Some(plugin) = node.attribute("id") {
                    unit.requires.insert(plugin.to_string());
                }
            }
            "includes" => {
                if node.attribute("optional") == Some("true") {
                    continue;
                }
                if let Some(feature) = node.attribute("id") {
                    unit.includes.insert(feature.to_string());
                }
            }
            "requires" => {
                for import in node.children().filter(|n| n.has_tag_name("import")) {
                    if let Some(plugin) = import.attribute("plugin") {
                        unit.requires.insert(plugin.to_string());
                    }
                    if let Some(feature) = import.attribute("feature") {
                        unit.includes.insert(feature.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    Ok(unit)
}

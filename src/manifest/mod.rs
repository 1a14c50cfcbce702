//! Unit metadata reading
//!
//! Reads the identity and dependency declarations of a plugin or feature
//! without unpacking anything beyond its descriptor:
//! - plugins: `META-INF/MANIFEST.MF`
//! - features: `feature.xml`
//!
//! Both jar archives and directory artifacts are supported.

pub mod feature;
pub mod header;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::domain::{Origin, Shape, Unit, UnitKind};
use crate::error::{Result, file_read_failed, manifest_invalid};

pub use header::Manifest;

const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
const FEATURE_PATH: &str = "feature.xml";

/// Packages provided by the Java runtime itself
const RUNTIME_PACKAGE_PREFIX: &str = "java.";
/// Alias for the OSGi framework bundle
const SYSTEM_BUNDLE: &str = "system.bundle";

enum Descriptor {
    Manifest(String),
    Feature(String),
}

/// Read a unit from a jar or directory artifact
pub fn read_unit(path: &Path, origin: Origin) -> Result<Unit> {
    let is_dir = path.is_dir();
    let descriptor = if is_dir {
        read_dir_descriptor(path)?
    } else {
        read_jar_descriptor(path)?
    };

    let mut unit = match descriptor {
        Descriptor::Feature(xml) => feature::parse_feature(&xml, path)?,
        Descriptor::Manifest(text) => plugin_from_manifest(&Manifest::parse(&text), path, is_dir)?,
    };
    check_file_name(&unit, path)?;
    unit.artifact = path.to_path_buf();
    unit.origin = origin;

    tracing::debug!(
        id = %unit.id,
        version = %unit.version,
        kind = %unit.kind,
        artifact = %path.display(),
        "read unit metadata"
    );

    Ok(unit)
}

/// Id and version become the installed file name `<id>_<version>`, which must
/// stay a single path segment
fn check_file_name(unit: &Unit, path: &Path) -> Result<()> {
    for (field, value) in [("id", &unit.id), ("version", &unit.version)] {
        if value.contains(['/', '\\']) || value.contains("..") {
            return Err(manifest_invalid(
                path.display().to_string(),
                format!("{} {field} '{value}' is not usable in a file name", unit.kind),
            ));
        }
    }
    Ok(())
}

fn read_dir_descriptor(path: &Path) -> Result<Descriptor> {
    let read = |file: &Path| {
        std::fs::read_to_string(file)
            .map_err(|e| file_read_failed(file.display().to_string(), e.to_string()))
    };

    let feature_xml = path.join(FEATURE_PATH);
    if feature_xml.is_file() {
        return read(&feature_xml).map(Descriptor::Feature);
    }
    let manifest = path.join(MANIFEST_PATH);
    if manifest.is_file() {
        return read(&manifest).map(Descriptor::Manifest);
    }

    Err(manifest_invalid(
        path.display().to_string(),
        "directory has neither META-INF/MANIFEST.MF nor feature.xml",
    ))
}

fn read_jar_descriptor(path: &Path) -> Result<Descriptor> {
    let file =
        File::open(path).map_err(|e| file_read_failed(path.display().to_string(), e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        manifest_invalid(path.display().to_string(), format!("not a jar archive: {e}"))
    })?;

    if let Some(xml) = read_entry(&mut archive, FEATURE_PATH, path)? {
        return Ok(Descriptor::Feature(xml));
    }
    if let Some(text) = read_entry(&mut archive, MANIFEST_PATH, path)? {
        return Ok(Descriptor::Manifest(text));
    }

    Err(manifest_invalid(
        path.display().to_string(),
        "archive has neither META-INF/MANIFEST.MF nor feature.xml",
    ))
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str, path: &Path) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut text = String::new();
            entry
                .read_to_string(&mut text)
                .map_err(|e| file_read_failed(format!("{}!/{name}", path.display()), e.to_string()))?;
            Ok(Some(text))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(manifest_invalid(path.display().to_string(), e.to_string())),
    }
}

/// Build a plugin unit from its manifest
///
/// Optional imports and requires are not dependencies for installation
/// purposes, and neither are `java.*` packages or the system bundle.
fn plugin_from_manifest(manifest: &Manifest, path: &Path, is_dir: bool) -> Result<Unit> {
    let id = manifest
        .clauses("Bundle-SymbolicName")
        .into_iter()
        .next()
        .and_then(|clause| clause.names.into_iter().next())
        .ok_or_else(|| {
            manifest_invalid(path.display().to_string(), "missing Bundle-SymbolicName")
        })?;
    let version = manifest.get("Bundle-Version").unwrap_or("0.0.0");

    let mut unit = Unit::new(id, version, UnitKind::Plugin);
    if is_dir || manifest.get("Eclipse-BundleShape") == Some("dir") {
        unit.shape = Shape::Directory;
    }

    unit.exports = manifest
        .clauses("Export-Package")
        .into_iter()
        .flat_map(|clause| clause.names)
        .collect();
    unit.imports = manifest
        .clauses("Import-Package")
        .into_iter()
        .filter(|clause| !clause.is_optional())
        .flat_map(|clause| clause.names)
        .filter(|name| !name.starts_with(RUNTIME_PACKAGE_PREFIX))
        .collect();
    unit.requires = manifest
        .clauses("Require-Bundle")
        .into_iter()
        .filter(|clause| !clause.is_optional())
        .flat_map(|clause| clause.names)
        .filter(|name| name != SYSTEM_BUNDLE)
        .collect();

    Ok(unit)
}

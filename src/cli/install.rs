use std::path::PathBuf;

use clap::Parser;

/// Parse an `ID=SUBPACKAGE` mapping
pub fn parse_mapping(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((unit, subpackage)) if !unit.is_empty() && !subpackage.is_empty() => {
            Ok((unit.trim().to_string(), subpackage.trim().to_string()))
        }
        _ => Err(format!("expected ID=SUBPACKAGE, got '{value}'")),
    }
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install everything into dropins/main:\n    dropins install target/*.jar\n\n\
                   Install into a packaging build root:\n    \
                   dropins install --build-root buildroot --dropin-dir usr/share/eclipse/dropins 'target/*.jar'\n\n\
                   Split units into subpackages:\n    \
                   dropins install -m foo.tests=tests -m foo.doc=doc 'target/*.jar'\n\n\
                   Link external dependencies from a repository:\n    \
                   dropins install -r /usr/share/java 'target/*.jar'\n\n\
                   Install from dropins.yaml:\n    dropins install\n\n\
                   Show placements without writing:\n    dropins install --dry-run")]
pub struct InstallArgs {
    /// Reactor artifacts (jars, bundle directories or glob patterns).
    /// If not provided, reads them from dropins.yaml
    #[arg(value_name = "ARTIFACT")]
    pub artifacts: Vec<String>,

    /// Request file (default: dropins.yaml in the current directory, if present)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build root the dropin directory is created under
    #[arg(long, value_name = "DIR", env = "DROPINS_BUILD_ROOT")]
    pub build_root: Option<PathBuf>,

    /// Dropin directory relative to the build root
    #[arg(long, value_name = "DIR")]
    pub dropin_dir: Option<PathBuf>,

    /// Subpackage for units with no other placement
    #[arg(long, value_name = "NAME")]
    pub main_package: Option<String>,

    /// Map a reactor unit to a subpackage (repeatable)
    #[arg(long = "map", short = 'm', value_name = "ID=SUBPACKAGE", value_parser = parse_mapping)]
    pub mappings: Vec<(String, String)>,

    /// Directory searched for external units (repeatable)
    #[arg(long = "repository", short = 'r', value_name = "DIR")]
    pub repositories: Vec<PathBuf>,

    /// Show what would be installed without actually installing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

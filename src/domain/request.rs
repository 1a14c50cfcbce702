//! Installation request

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default dropin directory, relative to the build root
pub const DEFAULT_DROPIN_DIR: &str = "dropins";
/// Default subpackage for units nothing else places
pub const DEFAULT_MAIN_PACKAGE: &str = "main";

/// Everything needed to perform one installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationRequest {
    /// Root the dropin directory is created under
    pub build_root: PathBuf,
    /// Dropin directory, relative to `build_root`
    pub dropin_dir: PathBuf,
    /// Subpackage receiving units with no other placement
    pub main_package: String,
    /// Reactor artifact paths or glob patterns
    pub artifacts: Vec<String>,
    /// Directory relative artifact patterns are resolved against
    pub base_dir: PathBuf,
    /// Explicit unit id -> subpackage mappings
    pub packages: BTreeMap<String, String>,
    /// Directories searched for external units
    pub repositories: Vec<PathBuf>,
}

impl Default for InstallationRequest {
    fn default() -> Self {
        Self {
            build_root: PathBuf::from("."),
            dropin_dir: PathBuf::from(DEFAULT_DROPIN_DIR),
            main_package: DEFAULT_MAIN_PACKAGE.to_string(),
            artifacts: Vec::new(),
            base_dir: PathBuf::from("."),
            packages: BTreeMap::new(),
            repositories: Vec::new(),
        }
    }
}

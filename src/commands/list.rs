//! List command implementation
//!
//! Scans a dropin directory and lists the units installed in each
//! subpackage, validating the tree layout on the way.

use std::path::PathBuf;

use crate::cli::ListArgs;
use crate::config::RequestConfig;
use crate::domain::request::DEFAULT_DROPIN_DIR;
use crate::error::Result;
use crate::installer::{TreeMaterializer, scan_tree};
use crate::ui;

use super::helpers::{absolutize, current_dir, print_json};

/// Run list command
pub fn run(args: ListArgs) -> Result<()> {
    let cwd = current_dir()?;
    let config = RequestConfig::discover(args.config.as_deref(), &cwd)?.unwrap_or_default();

    let build_root = args
        .build_root
        .map(|p| absolutize(&cwd, p))
        .or(config.build_root)
        .unwrap_or_else(|| cwd.clone());
    let dropin_dir = args
        .dropin_dir
        .or(config.dropin_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DROPIN_DIR));

    let materializer = TreeMaterializer::new(&build_root, &dropin_dir);
    let entries = scan_tree(materializer.dropin_root())?;

    if args.json {
        return print_json(&entries);
    }
    ui::display_tree(&entries);
    Ok(())
}

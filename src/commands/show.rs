//! Show command implementation
//!
//! Prints the metadata read from a single plugin or feature artifact.

use crate::cli::ShowArgs;
use crate::domain::Origin;
use crate::error::Result;
use crate::manifest;
use crate::ui;

use super::helpers::print_json;

/// Run show command
pub fn run(args: ShowArgs) -> Result<()> {
    let unit = manifest::read_unit(&args.artifact, Origin::Reactor)?;
    if args.json {
        return print_json(&unit);
    }
    ui::display_unit(&unit);
    Ok(())
}

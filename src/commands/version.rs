//! Version command implementation

use crate::config::request::REQUEST_FILE;
use crate::domain::request::{DEFAULT_DROPIN_DIR, DEFAULT_MAIN_PACKAGE};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", version_text());
    Ok(())
}

/// Version banner followed by the defaults an install run starts from
fn version_text() -> String {
    format!(
        "{name} {version}\n{description}\n\n\
         Defaults:\n  \
         dropin directory: {DEFAULT_DROPIN_DIR}\n  \
         main subpackage:  {DEFAULT_MAIN_PACKAGE}\n  \
         request file:     {REQUEST_FILE}\n",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        description = env!("CARGO_PKG_DESCRIPTION"),
    )
}

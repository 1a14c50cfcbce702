use std::path::PathBuf;

use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a plugin jar:\n    dropins show target/foo.jar\n\n\
                  Show a directory bundle:\n    dropins show target/foo\n\n\
                  Machine readable output:\n    dropins show target/foo.feature.jar --json")]
pub struct ShowArgs {
    /// Plugin or feature artifact (jar or directory)
    pub artifact: PathBuf,

    /// Print metadata as JSON
    #[arg(long)]
    pub json: bool,
}

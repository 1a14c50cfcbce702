use std::path::PathBuf;

use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the dropin directory of the current build root:\n    dropins list\n\n\
                  List a packaged tree:\n    dropins list --build-root buildroot --dropin-dir usr/share/eclipse/dropins\n\n\
                  Machine readable output:\n    dropins list --json")]
pub struct ListArgs {
    /// Build root containing the dropin directory (default: from dropins.yaml, else ".")
    #[arg(long, value_name = "DIR")]
    pub build_root: Option<PathBuf>,

    /// Dropin directory relative to the build root (default: from dropins.yaml, else "dropins")
    #[arg(long, value_name = "DIR")]
    pub dropin_dir: Option<PathBuf>,

    /// Request file to read defaults from
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - list: List command arguments
//! - show: Show command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod install;
pub mod list;
pub mod show;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use list::ListArgs;
pub use show::ShowArgs;

/// dropins - Eclipse dropin installer
///
/// Install OSGi plugins and features into Eclipse dropin subpackages.
#[derive(Parser, Debug)]
#[command(
    name = "dropins",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install OSGi plugins and features into Eclipse dropin subpackages",
    long_about = "dropins installs reactor-built OSGi plugins and features into a dropin \
                  directory split into subpackages, placing each unit where the units \
                  requiring it live and linking external dependencies from system repositories.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  dropins install target/*.jar                \x1b[90m# Install into dropins/main\x1b[0m\n   \
                  dropins install -m foo.tests=tests *.jar    \x1b[90m# Put foo.tests into its own subpackage\x1b[0m\n   \
                  dropins install -r /usr/share/java *.jar    \x1b[90m# Link dependencies from a repository\x1b[0m\n   \
                  dropins install --dry-run                   \x1b[90m# Show placements from dropins.yaml\x1b[0m\n   \
                  dropins list                                \x1b[90m# List installed units\x1b[0m\n   \
                  dropins show target/foo.jar                 \x1b[90m# Show unit metadata\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install reactor artifacts into dropin subpackages
    Install(InstallArgs),

    /// List units installed in a dropin directory
    List(ListArgs),

    /// Show the metadata of an artifact
    Show(ShowArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

//! dropins - Eclipse dropin installer
//!
//! A command line tool that installs reactor-built OSGi plugins and features
//! into an Eclipse dropin directory split into subpackages, symlinking the
//! external units they depend on.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod installer;
mod manifest;
mod progress;
mod resolver;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Log filter: `RUST_LOG` when set, else warnings only; `-v` forces debug
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("dropins=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

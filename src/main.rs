//! docconf - resolve documentation site configuration from the command line.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    docconf::logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Resolve {
            sources,
            format,
            output,
        } => cli::resolve::run_resolve(sources, *format, output.as_deref()),
        Commands::Check { sources } => cli::check::run_check(sources),
    }
}

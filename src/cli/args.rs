//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Documentation-site configuration resolver CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve sources and print the effective configuration
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Resolve sources and report problems without printing the result
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

/// Source selection shared by all commands.
///
/// Order, lowest precedence first: built-in defaults, positional (or
/// discovered) files, `--optional` files, then `DOCCONF_*` variables.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Required config files, lowest precedence first.
    /// If omitted, `--config` is searched upward from the current directory.
    #[arg(value_name = "SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub sources: Vec<PathBuf>,

    /// Optional override files, skipped when absent
    #[arg(
        short = 'O',
        long = "optional",
        value_name = "PATH",
        value_hint = clap::ValueHint::FilePath
    )]
    pub optional: Vec<PathBuf>,

    /// Config file name to discover when no SOURCE is given
    #[arg(
        short = 'C',
        long,
        default_value = "docconf.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Do not prepend the built-in defaults
    #[arg(long)]
    pub no_builtin: bool,

    /// Ignore DOCCONF_* environment variables
    #[arg(long)]
    pub no_env: bool,

    /// Additional theme names to accept
    #[arg(short = 't', long = "theme", value_name = "NAME", value_delimiter = ',')]
    pub themes: Vec<String>,
}

/// Serialization format of the resolved configuration.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Toml,
    Json,
}

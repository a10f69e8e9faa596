//! Command-line interface module.

mod args;
pub mod check;
pub mod resolve;

pub use args::{Cli, Commands, OutputFormat, SourceArgs};

use anyhow::{Context, Result};
use docconf::config::{ConfigResolver, ConfigSource, find_config_file};
use docconf::debug;

/// Build the ordered source list for a command, lowest precedence first.
///
/// Builtin defaults (unless disabled), then required files, then optional
/// overrides, then the environment (unless disabled). With no required
/// file, `--config` is discovered upward from the current directory; when
/// nothing is found it stays in the list as a required file, so resolving
/// reports it as unavailable.
pub fn collect_sources(args: &SourceArgs) -> Result<Vec<ConfigSource>> {
    let mut sources = Vec::with_capacity(args.sources.len() + args.optional.len() + 2);

    if !args.no_builtin {
        sources.push(ConfigSource::builtin());
    }

    if args.sources.is_empty() {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        match find_config_file(&cwd, &args.config) {
            Some(found) => {
                debug!("config"; "discovered {}", found.display());
                sources.push(ConfigSource::file(found));
            }
            None => {
                debug!("config"; "{} not found from {}", args.config.display(), cwd.display());
                sources.push(ConfigSource::file(cwd.join(&args.config)));
            }
        }
    } else {
        sources.extend(args.sources.iter().map(ConfigSource::file));
    }

    sources.extend(args.optional.iter().map(ConfigSource::optional));

    if !args.no_env {
        sources.push(ConfigSource::env());
    }

    Ok(sources)
}

/// Resolver with any extra themes from the command line.
pub fn resolver(args: &SourceArgs) -> ConfigResolver {
    ConfigResolver::new().with_themes(args.themes.iter().cloned())
}

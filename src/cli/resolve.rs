//! `resolve` command: print the effective configuration.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use docconf::config::EffectiveConfig;
use docconf::log;

use super::{OutputFormat, SourceArgs, collect_sources, resolver};

pub fn run_resolve(args: &SourceArgs, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let sources = collect_sources(args)?;
    let config = resolver(args).resolve(&sources)?;
    let formatted = render(&config, format)?;

    // Output to file or stdout
    if let Some(output_path) = output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        write!(file, "{}", formatted)?;
        log!("config"; "wrote effective config to {}", output_path.display());
    } else {
        print!("{}", formatted);
    }

    Ok(())
}

/// Serialize the effective configuration, always ending with a newline.
///
/// TOML has no null, so theme options holding one only render as JSON.
pub fn render(config: &EffectiveConfig, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Toml => toml::to_string_pretty(config)
            .context("Failed to serialize TOML, try `--format json`")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to serialize JSON")?
        }
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

//! `check` command: validate sources without printing the result.

use anyhow::Result;
use docconf::log;
use docconf::utils::{plural_count, plural_s};

use super::{SourceArgs, collect_sources, resolver};

pub fn run_check(args: &SourceArgs) -> Result<()> {
    let sources = collect_sources(args)?;
    let (config, diag) = resolver(args).resolve_with_diagnostics(&sources)?;
    diag.print_warnings();

    let warnings = diag.warnings().len();
    let suffix = if warnings > 0 {
        format!(", {warnings} warning{}", plural_s(warnings))
    } else {
        String::new()
    };
    log!(
        "check";
        "{} ok: theme `{}`, {}, {}{}",
        config.project(),
        config.theme(),
        plural_count(config.extensions().len(), "extension"),
        plural_count(sources.len(), "source"),
        suffix
    );
    Ok(())
}

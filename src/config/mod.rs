//! Documentation-site configuration resolution.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── source      # ConfigSource: file, inline, builtin, env
//! ├── env         # DOCCONF_* variable overrides
//! ├── raw         # RawConfig: one parsed source, deprecated keys
//! ├── merge       # Field strategy table, Merged accumulator
//! ├── validate    # post-merge checks
//! ├── effective   # EffectiveConfig, ExtLink
//! ├── theme       # ThemeRegistry
//! ├── types/      # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs      # ConfigResolver (this file)
//! ```
//!
//! # Resolution
//!
//! | Step     | Failure              |
//! |----------|----------------------|
//! | load     | `SourceUnavailable`  |
//! | parse    | `Parse`              |
//! | merge    | (cannot fail)        |
//! | validate | `Validation`         |
//!
//! Sources are given lowest precedence first. The resolver adds no
//! defaults of its own; callers put [`ConfigSource::builtin`] first when
//! they want them.

mod effective;
mod env;
mod merge;
mod raw;
mod source;
mod theme;
pub mod types;
mod util;
mod validate;

pub use effective::{EffectiveConfig, ExtLink, PLACEHOLDER};
pub use env::ENV_PREFIX;
pub use merge::{Field, FieldKind, MergePolicy, Provenance};
pub use raw::{
    DEPRECATED_KEYS, OptionValue, RawConfig, RawExtLink, ThemeOptions, UNKNOWN_KEY,
    deprecated_alias,
};
pub use source::{ConfigSource, SourceFormat};
pub use theme::{BUNDLED_THEMES, COMMON_THEMES, ThemeRegistry};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, ParseFailure};
pub use util::find_config_file;

use crate::debug;
use merge::Merged;
use rayon::prelude::*;

// ============================================================================
// resolver
// ============================================================================

/// Turns an ordered list of sources into one [`EffectiveConfig`].
///
/// Holds no per-build state, so one resolver can serve concurrent builds.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    themes: ThemeRegistry,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept additional theme names in `html_theme`.
    pub fn with_themes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.themes.register(name);
        }
        self
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Resolve sources (lowest precedence first) into a frozen config.
    ///
    /// Warnings are printed; use [`resolve_with_diagnostics`](Self::resolve_with_diagnostics)
    /// to handle them yourself.
    pub fn resolve(&self, sources: &[ConfigSource]) -> Result<EffectiveConfig, ConfigError> {
        let (config, diag) = self.resolve_with_diagnostics(sources)?;
        diag.print_warnings();
        Ok(config)
    }

    /// Resolve and return the non-fatal diagnostics alongside the config.
    ///
    /// The warnings cover every source (unknown or deprecated keys) as
    /// well as the merged result.
    pub fn resolve_with_diagnostics(
        &self,
        sources: &[ConfigSource],
    ) -> Result<(EffectiveConfig, ConfigDiagnostics), ConfigError> {
        if sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        let mut diag = ConfigDiagnostics::new();
        let mut merged = Merged::default();
        for source in sources {
            if let Some(raw) = source.load(&mut diag)? {
                merged.apply(raw, &source.id());
            }
        }

        let resolved = validate::finalize(merged, &self.themes, diag)?;
        debug!("config"; "resolved {} sources", sources.len());
        Ok(resolved)
    }

    /// Resolve independent source lists in parallel, preserving input order.
    ///
    /// Each batch is isolated: a failure in one does not affect the others.
    pub fn resolve_all(
        &self,
        batches: &[Vec<ConfigSource>],
    ) -> Vec<Result<EffectiveConfig, ConfigError>> {
        batches
            .par_iter()
            .map(|sources| self.resolve(sources))
            .collect()
    }
}

/// Resolve with the default theme registry.
pub fn resolve(sources: &[ConfigSource]) -> Result<EffectiveConfig, ConfigError> {
    ConfigResolver::new().resolve(sources)
}

// ============================================================================
// tests
// ============================================================================

//! Configuration sources.
//!
//! A source is one document contributing settings. Files are read in a
//! single scoped call, so the handle is closed before parsing begins and no
//! source is ever written back.

use super::{ConfigDiagnostics, ConfigError, RawConfig, env};
use crate::{debug, embed};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Document syntax of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Toml,
    Json,
}

impl SourceFormat {
    /// Pick the format from a file extension (`.json` is JSON, anything else TOML).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Where one configuration document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File on disk; a missing optional file is skipped.
    File { path: PathBuf, required: bool },
    /// In-memory document with a display name.
    Inline {
        name: String,
        content: String,
        format: SourceFormat,
    },
    /// Defaults shipped inside the binary.
    Builtin,
    /// `DOCCONF_*` environment variables, captured when the source is built.
    Env { vars: BTreeMap<String, String> },
}

impl ConfigSource {
    /// Required file. `~` is expanded.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File {
            path: expand_tilde(path.as_ref()),
            required: true,
        }
    }

    /// Optional file, skipped when it does not exist. `~` is expanded.
    pub fn optional(path: impl AsRef<Path>) -> Self {
        Self::File {
            path: expand_tilde(path.as_ref()),
            required: false,
        }
    }

    /// Inline TOML document.
    pub fn inline(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            content: content.into(),
            format: SourceFormat::Toml,
        }
    }

    /// Inline JSON document.
    pub fn inline_json(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            content: content.into(),
            format: SourceFormat::Json,
        }
    }

    pub const fn builtin() -> Self {
        Self::Builtin
    }

    /// Overrides from the process environment.
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn env() -> Self {
        let vars = std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        });
        Self::env_from(vars)
    }

    /// Overrides from the given variables; only `DOCCONF_*` names are kept.
    pub fn env_from<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Env {
            vars: env::capture(vars),
        }
    }

    /// Identifier used in logs and errors.
    pub fn id(&self) -> Cow<'_, str> {
        match self {
            Self::File { path, .. } => path.to_string_lossy(),
            Self::Inline { name, .. } => Cow::Borrowed(name),
            Self::Builtin => Cow::Borrowed("<builtin>"),
            Self::Env { .. } => Cow::Borrowed("<env>"),
        }
    }

    /// Read and parse the source, adding its warnings to `diag`.
    ///
    /// Returns `Ok(None)` for an optional file that does not exist.
    pub fn load(&self, diag: &mut ConfigDiagnostics) -> Result<Option<RawConfig>, ConfigError> {
        let id = self.id();
        let (content, format) = match self {
            Self::File { path, required } => match std::fs::read_to_string(path) {
                Ok(content) => (Cow::Owned(content), SourceFormat::from_path(path)),
                Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
                    debug!("config"; "skipping optional source {}", id);
                    return Ok(None);
                }
                Err(error) => {
                    return Err(ConfigError::SourceUnavailable {
                        origin: id.into_owned(),
                        error,
                    });
                }
            },
            Self::Inline {
                content, format, ..
            } => (Cow::Borrowed(content.as_str()), *format),
            Self::Builtin => (Cow::Borrowed(embed::DEFAULTS_TOML), SourceFormat::Toml),
            Self::Env { vars } => {
                debug!("config"; "loaded {} environment variables", vars.len());
                return env::load(vars, &id, diag).map(Some);
            }
        };

        let raw = RawConfig::parse(&content, format, &id, diag)?;
        debug!("config"; "loaded {}", id);
        Ok(Some(raw))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// tests
// ============================================================================

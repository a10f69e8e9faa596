//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that abort a single `resolve` call.
///
/// Every variant is terminal: no partially resolved configuration exists
/// once one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration sources given")]
    NoSources,

    #[error("config source `{origin}` is unavailable")]
    SourceUnavailable {
        origin: String,
        #[source]
        error: std::io::Error,
    },

    #[error("config source `{origin}` is malformed")]
    Parse {
        origin: String,
        #[source]
        error: ParseFailure,
    },

    // NOTE: No #[source] here - diagnostics are rendered inline
    #[error("{diagnostics}")]
    Validation {
        /// Source that last set the offending field, if any did.
        origin: Option<String>,
        field: FieldPath,
        message: String,
        diagnostics: ConfigDiagnostics,
    },
}

impl ConfigError {
    /// Build a validation error from collected diagnostics.
    ///
    /// Returns the diagnostics back when there are no errors to report.
    pub fn from_diagnostics(diagnostics: ConfigDiagnostics) -> Result<ConfigDiagnostics, Self> {
        let Some(first) = diagnostics.errors().first().cloned() else {
            return Ok(diagnostics);
        };
        Err(Self::Validation {
            origin: first.origin,
            field: first.field,
            message: first.message,
            diagnostics,
        })
    }

    /// Offending field of a validation error.
    pub fn field(&self) -> Option<FieldPath> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Identifier of the source the error is attributed to.
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::NoSources => None,
            Self::SourceUnavailable { origin, .. } | Self::Parse { origin, .. } => Some(origin),
            Self::Validation { origin, .. } => origin.as_deref(),
        }
    }
}

/// Underlying syntax or shape error of a malformed source.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A mapping-valued environment variable that is not a JSON object.
    #[error("`{var}` is not valid JSON: {error}")]
    Env {
        var: String,
        #[source]
        error: serde_json::Error,
    },
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single configuration diagnostic
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    /// Config key (e.g., "html_theme")
    pub field: FieldPath,
    /// Source the value came from
    pub origin: Option<String>,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: FieldPath, origin: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            field,
            origin: origin.map(str::to_owned),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        write!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field.as_str().cyan(),
            "]".dimmed()
        )?;
        if let Some(origin) = &self.origin {
            write!(f, " {}", format_args!("(from {origin})").dimmed())?;
        }
        writeln!(f)?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    /// Non-fatal findings, printed but never returned as errors.
    warnings: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, origin: Option<&str>, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(field, origin, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        origin: Option<&str>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors.push(ConfigDiagnostic::new(field, origin, message).with_hint(hint));
    }

    /// Add a warning (collected for batch display).
    pub fn warn(&mut self, field: FieldPath, origin: Option<&str>, message: impl Into<String>) {
        self.warnings.push(ConfigDiagnostic::new(field, origin, message));
    }

    /// Print collected warnings in a grouped format.
    pub fn print_warnings(&self) {
        for warning in &self.warnings {
            let (field, message) = (warning.field.as_str(), &warning.message);
            match &warning.origin {
                Some(origin) => crate::log!("warning"; "[{}] {} ({})", field, message, origin),
                None => crate::log!("warning"; "[{}] {}", field, message),
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    /// Convert to Result (returns Err if there are errors).
    ///
    /// On success the remaining warnings are handed back.
    pub fn into_result(self) -> Result<Self, ConfigError> {
        ConfigError::from_diagnostics(self)
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::SourceUnavailable {
            origin: "override.toml".into(),
            error: Error::new(ErrorKind::NotFound, "file not found"),
        };
        let display = format!("{io_err}");
        assert!(display.contains("unavailable"));
        assert!(display.contains("override.toml"));
        assert_eq!(io_err.origin(), Some("override.toml"));
        assert!(io_err.field().is_none());
    }

    #[test]
    fn test_first_error_names_field() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("project"), None, "must not be empty");
        diag.error(FieldPath::new("author"), Some("site.toml"), "must not be empty");

        let err = diag.into_result().unwrap_err();
        assert_eq!(err.field(), Some(FieldPath::new("project")));
        assert_eq!(err.origin(), None);

        let display = format!("{err}");
        assert!(display.contains("project"));
        assert!(display.contains("author"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("extlinks"), None, "relative url");
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
        assert!(diag.into_result().is_ok());
    }
}

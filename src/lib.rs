//! docconf - layered configuration resolver for documentation site builds.
//!
//! Loads an ordered list of configuration sources (built-in defaults,
//! site config, local overrides, `DOCCONF_*` environment variables),
//! merges them with a per-field strategy and validates the result into one
//! immutable [`EffectiveConfig`] that a documentation renderer consumes.
//!
//! ```ignore
//! use docconf::config::{ConfigResolver, ConfigSource};
//!
//! let config = ConfigResolver::new().resolve(&[
//!     ConfigSource::builtin(),
//!     ConfigSource::file("docs/docconf.toml"),
//!     ConfigSource::optional("docs/docconf.local.toml"),
//!     ConfigSource::env(),
//! ])?;
//! println!("{} uses {}", config.project(), config.theme());
//! ```

pub mod config;
pub mod embed;
pub mod logger;
pub mod utils;

pub use config::{ConfigError, ConfigResolver, ConfigSource, EffectiveConfig, resolve};

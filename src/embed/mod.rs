//! Embedded static resources.
//!
//! - `defaults.toml` - built-in lowest-precedence config source

/// Built-in defaults document, see [`ConfigSource::Builtin`](crate::config::ConfigSource::Builtin).
pub const DEFAULTS_TOML: &str = include_str!("defaults.toml");

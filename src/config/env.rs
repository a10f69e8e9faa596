//! Environment variable overrides.
//!
//! Every field can be set through `DOCCONF_<KEY>`, where `<KEY>` is the
//! upper-cased source key (`DOCCONF_HTML_THEME`, `DOCCONF_GETTEXT_UUID`).
//! Deprecated keys work the same way and warn like they do in files.
//!
//! | Kind           | Value                                           |
//! |----------------|-------------------------------------------------|
//! | scalar         | taken verbatim                                  |
//! | flag           | `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` |
//! | sequence / set | comma-separated, blanks dropped                 |
//! | mapping        | JSON object                                     |

use super::raw::{self, JsonObject};
use super::{ConfigDiagnostics, ConfigError, Field, FieldKind, ParseFailure, RawConfig};
use crate::debug;
use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix shared by all recognized variables.
pub const ENV_PREFIX: &str = "DOCCONF_";

/// Keep the variables carrying [`ENV_PREFIX`].
pub(super) fn capture<I, K, V>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .filter(|(name, _)| name.starts_with(ENV_PREFIX))
        .collect()
}

/// Turn captured variables into a parsed source.
pub(super) fn load(
    vars: &BTreeMap<String, String>,
    origin: &str,
    diag: &mut ConfigDiagnostics,
) -> Result<RawConfig, ConfigError> {
    let mut object = JsonObject::new();
    for (name, value) in vars {
        let Some(key) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key = key.to_ascii_lowercase();
        let Some(field) = Field::from_key(&key).or_else(|| raw::deprecated_alias(&key)) else {
            debug!("config"; "ignoring {}, not a config key", name);
            continue;
        };
        let value = to_value(field, name, value).map_err(|err| raw::malformed(origin, err))?;
        object.insert(key, value);
    }
    RawConfig::from_object(object, origin, diag)
}

fn to_value(field: Field, name: &str, value: &str) -> Result<Value, ParseFailure> {
    Ok(match field.kind() {
        FieldKind::Scalar => Value::String(value.to_owned()),
        // anything else is left for deserialization to reject
        FieldKind::Flag => parse_flag(value).map_or_else(|| value.into(), Value::Bool),
        FieldKind::Sequence | FieldKind::Set => Value::Array(
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(Value::from)
                .collect(),
        ),
        FieldKind::Mapping => serde_json::from_str(value).map_err(|error| ParseFailure::Env {
            var: name.to_owned(),
            error,
        })?,
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load_vars(vars: &[(&str, &str)]) -> Result<(RawConfig, ConfigDiagnostics), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let raw = load(&capture(vars.iter().copied()), "<env>", &mut diag)?;
        Ok((raw, diag))
    }

    #[test]
    fn test_capture_keeps_prefixed_only() {
        let vars = capture([("DOCCONF_PROJECT", "Atlas"), ("HOME", "/root"), ("docconf_x", "y")]);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["DOCCONF_PROJECT"], "Atlas");
    }

    #[test]
    fn test_values_by_kind() {
        let (raw, diag) = load_vars(&[
            ("DOCCONF_HTML_THEME", "furo"),
            ("DOCCONF_GETTEXT_UUID", "yes"),
            ("DOCCONF_EXTENSIONS", "sphinx.ext.todo, ,sphinx.ext.extlinks"),
            ("DOCCONF_HTML_THEME_OPTIONS", r#"{"navigation_depth": 2}"#),
            ("DOCCONF_EXTLINKS", r#"{"pr": ["https://a/pull/%s", "PR %s"]}"#),
        ])
        .unwrap();
        assert!(diag.warnings().is_empty());
        assert_eq!(raw.html_theme.as_deref(), Some("furo"));
        assert_eq!(raw.gettext_uuid, Some(true));
        assert_eq!(
            raw.extensions,
            Some(vec!["sphinx.ext.todo".to_string(), "sphinx.ext.extlinks".to_string()])
        );
        assert_eq!(raw.html_theme_options.unwrap()["navigation_depth"], json!(2));
        assert_eq!(raw.extlinks.unwrap()["pr"].label, "PR %s");
        assert!(raw.project.is_none());
    }

    #[test]
    fn test_unrelated_variables_ignored() {
        let (raw, diag) = load_vars(&[("DOCCONF_LOG_LEVEL", "debug")]).unwrap();
        assert_eq!(raw, RawConfig::default());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_deprecated_variable_warns() {
        let (raw, diag) = load_vars(&[("DOCCONF_THEME", "furo")]).unwrap();
        assert_eq!(raw.html_theme.as_deref(), Some("furo"));
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].field.as_str(), "html_theme");
        assert_eq!(diag.warnings()[0].origin.as_deref(), Some("<env>"));
    }

    #[test]
    fn test_bad_flag_is_parse_error() {
        let err = load_vars(&[("DOCCONF_GETTEXT_COMPACT", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.origin(), Some("<env>"));
    }

    #[test]
    fn test_bad_mapping_names_variable() {
        let err = load_vars(&[("DOCCONF_EXTLINKS", "issue=https://a/%s")]).unwrap_err();
        let ConfigError::Parse { error, .. } = err else {
            panic!("expected parse error");
        };
        assert!(error.to_string().contains("DOCCONF_EXTLINKS"));
    }
}

//! As-authored configuration of a single source.
//!
//! Every recognized key is an `Option`: `None` means the source did not set
//! it, which is what lets a later source override only what it mentions.
//!
//! # Example
//!
//! ```toml
//! project = "Atlas"
//! copyright = "2024, Atlas Authors"
//! author = "Atlas Authors"
//!
//! extensions = ["sphinx.ext.extlinks", "sphinx.ext.todo"]
//! templates_path = ["_templates"]
//! exclude_patterns = ["_build", "Thumbs.db", ".DS_Store"]
//!
//! html_theme = "sphinx_rtd_theme"
//! html_static_path = ["_static"]
//!
//! locale_dirs = ["locale/"]
//! gettext_compact = false
//!
//! [html_theme_options]
//! collapse_navigation = true
//! navigation_depth = 4
//!
//! [extlinks]
//! issue = ["https://github.com/atlas/atlas/issues/%s", "#%s"]
//! ```
//!
//! # Deprecated keys
//!
//! Older key names are still read and moved to their current name with a
//! warning. When both are present the current name wins.
//!
//! | Deprecated       | Current              |
//! |------------------|----------------------|
//! | `exclude_trees`  | `exclude_patterns`   |
//! | `template_path`  | `templates_path`     |
//! | `theme`          | `html_theme`         |
//! | `theme_options`  | `html_theme_options` |
//! | `static_path`    | `html_static_path`   |
//! | `locale_dir`     | `locale_dirs`        |

use super::{ConfigDiagnostics, ConfigError, Field, FieldPath, ParseFailure, SourceFormat};
use crate::utils::plural_s;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};

/// Opaque theme option value (scalar, array, nested table or null).
pub type OptionValue = serde_json::Value;

/// Theme options as passed through to the theme.
pub type ThemeOptions = BTreeMap<String, OptionValue>;

/// Top-level object of a JSON document.
pub(super) type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Diagnostic path for keys no field claims.
pub const UNKNOWN_KEY: FieldPath = FieldPath::new("unknown");

/// Old key names and the field they now map to.
pub const DEPRECATED_KEYS: &[(&str, Field)] = &[
    ("exclude_trees", Field::ExcludePatterns),
    ("template_path", Field::TemplatesPath),
    ("theme", Field::HtmlTheme),
    ("theme_options", Field::HtmlThemeOptions),
    ("static_path", Field::HtmlStaticPath),
    ("locale_dir", Field::LocaleDirs),
];

/// Field a deprecated key stands for.
pub fn deprecated_alias(key: &str) -> Option<Field> {
    DEPRECATED_KEYS
        .iter()
        .find(|(old, _)| *old == key)
        .map(|&(_, field)| field)
}

/// Raw `extlinks` entry: a `[url template, label template]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct RawExtLink {
    pub url: String,
    pub label: String,
}

impl TryFrom<Vec<String>> for RawExtLink {
    type Error = String;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        match <[String; 2]>::try_from(parts) {
            Ok([url, label]) => Ok(Self { url, label }),
            Err(parts) => Err(format!(
                "expected a [url, label] pair, found {} element{}",
                parts.len(),
                plural_s(parts.len())
            )),
        }
    }
}

/// Parsed contents of one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawConfig {
    pub project: Option<String>,
    pub copyright: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub language: Option<String>,

    pub extensions: Option<Vec<String>>,
    pub templates_path: Option<Vec<String>>,
    pub exclude_patterns: Option<BTreeSet<String>>,

    pub html_theme: Option<String>,
    pub html_theme_options: Option<ThemeOptions>,
    pub html_static_path: Option<Vec<String>>,

    pub locale_dirs: Option<Vec<String>>,
    pub gettext_compact: Option<bool>,
    pub gettext_uuid: Option<bool>,

    pub extlinks: Option<BTreeMap<String, RawExtLink>>,
}

impl RawConfig {
    /// Parse source content.
    ///
    /// Deprecated and unrecognized keys are reported to `diag` as warnings
    /// attributed to `origin`.
    pub fn parse(
        content: &str,
        format: SourceFormat,
        origin: &str,
        diag: &mut ConfigDiagnostics,
    ) -> Result<Self, ConfigError> {
        match format {
            SourceFormat::Toml => {
                let mut table: toml::Table =
                    toml::from_str(content).map_err(|err| malformed(origin, err.into()))?;
                rename_deprecated(&mut table, origin, diag);
                Self::deserialize_tracked(toml::Value::Table(table), origin, diag)
            }
            SourceFormat::Json => {
                let object: JsonObject =
                    serde_json::from_str(content).map_err(|err| malformed(origin, err.into()))?;
                Self::from_object(object, origin, diag)
            }
        }
    }

    /// Build from an already decoded top-level object.
    pub(super) fn from_object(
        mut object: JsonObject,
        origin: &str,
        diag: &mut ConfigDiagnostics,
    ) -> Result<Self, ConfigError> {
        rename_deprecated(&mut object, origin, diag);
        Self::deserialize_tracked(serde_json::Value::Object(object), origin, diag)
    }

    fn deserialize_tracked<'de, D>(
        document: D,
        origin: &str,
        diag: &mut ConfigDiagnostics,
    ) -> Result<Self, ConfigError>
    where
        D: Deserializer<'de>,
        ParseFailure: From<D::Error>,
    {
        let mut ignored = Vec::new();
        let track = |path: serde_ignored::Path| ignored.push(path.to_string());
        let parsed: Self = serde_ignored::deserialize(document, track)
            .map_err(|err| malformed(origin, err.into()))?;

        for key in ignored {
            diag.warn(
                UNKNOWN_KEY,
                Some(origin),
                format!("`{key}` is not a recognized key, ignoring"),
            );
        }
        Ok(parsed)
    }
}

pub(super) fn malformed(origin: &str, error: ParseFailure) -> ConfigError {
    ConfigError::Parse {
        origin: origin.to_owned(),
        error,
    }
}

/// Top-level table of a decoded document.
trait Document {
    type Value;

    fn take(&mut self, key: &str) -> Option<Self::Value>;
    fn has(&self, key: &str) -> bool;
    fn put(&mut self, key: &str, value: Self::Value);
}

impl Document for toml::Table {
    type Value = toml::Value;

    fn take(&mut self, key: &str) -> Option<toml::Value> {
        self.remove(key)
    }

    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: &str, value: toml::Value) {
        self.insert(key.to_owned(), value);
    }
}

impl Document for JsonObject {
    type Value = serde_json::Value;

    fn take(&mut self, key: &str) -> Option<serde_json::Value> {
        self.remove(key)
    }

    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: &str, value: serde_json::Value) {
        self.insert(key.to_owned(), value);
    }
}

/// Move deprecated keys to their current name, warning for each one found.
fn rename_deprecated<D: Document>(document: &mut D, origin: &str, diag: &mut ConfigDiagnostics) {
    for &(old, field) in DEPRECATED_KEYS {
        let Some(value) = document.take(old) else {
            continue;
        };
        let current = field.path();
        if document.has(current.as_str()) {
            diag.warn(
                current,
                Some(origin),
                format!("deprecated `{old}` ignored, `{}` is also set", current.as_str()),
            );
        } else {
            diag.warn(
                current,
                Some(origin),
                format!("`{old}` is deprecated, use `{}` instead", current.as_str()),
            );
            document.put(current.as_str(), value);
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_toml(content: &str) -> Result<(RawConfig, ConfigDiagnostics), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let raw = RawConfig::parse(content, SourceFormat::Toml, "test.toml", &mut diag)?;
        Ok((raw, diag))
    }

    fn parse_json(content: &str) -> Result<(RawConfig, ConfigDiagnostics), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let raw = RawConfig::parse(content, SourceFormat::Json, "site.json", &mut diag)?;
        Ok((raw, diag))
    }

    #[test]
    fn test_parse_full_source() {
        let content = r##"
project = "Atlas"
copyright = "2024, Atlas Authors"
author = "Atlas Authors"
extensions = ["sphinx.ext.extlinks"]
templates_path = ["_templates"]
exclude_patterns = ["_build", "Thumbs.db"]
html_theme = "alabaster"
html_static_path = ["_static"]
locale_dirs = ["locale/"]
gettext_compact = false
gettext_uuid = true

[html_theme_options]
navigation_depth = 4

[extlinks]
issue = ["https://example.com/issues/%s", "#%s"]
"##;
        let (raw, diag) = parse_toml(content).unwrap();
        assert!(diag.warnings().is_empty());
        assert_eq!(raw.project.as_deref(), Some("Atlas"));
        assert_eq!(raw.extensions, Some(vec!["sphinx.ext.extlinks".to_string()]));
        assert_eq!(raw.gettext_compact, Some(false));
        assert_eq!(raw.gettext_uuid, Some(true));
        assert_eq!(raw.html_theme_options.unwrap()["navigation_depth"], json!(4));
        let issue = &raw.extlinks.unwrap()["issue"];
        assert_eq!(issue.url, "https://example.com/issues/%s");
        assert_eq!(issue.label, "#%s");
    }

    #[test]
    fn test_absent_keys_stay_unset() {
        let (raw, _) = parse_toml("project = \"Atlas\"").unwrap();
        assert_eq!(raw.project.as_deref(), Some("Atlas"));
        assert!(raw.extensions.is_none());
        assert!(raw.html_theme.is_none());
        assert!(raw.gettext_compact.is_none());
    }

    #[test]
    fn test_explicit_empty_list_is_set() {
        let (raw, _) = parse_toml("extensions = []").unwrap();
        assert_eq!(raw.extensions, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_keys_warn() {
        let (raw, diag) = parse_toml("project = \"Atlas\"\npygments_style = \"sphinx\"").unwrap();
        assert_eq!(raw.project.as_deref(), Some("Atlas"));
        assert!(!diag.has_errors());

        let [warning] = diag.warnings() else {
            panic!("expected one warning, got {:?}", diag.warnings());
        };
        assert_eq!(warning.field, UNKNOWN_KEY);
        assert_eq!(warning.origin.as_deref(), Some("test.toml"));
        assert!(warning.message.contains("pygments_style"));
    }

    #[test]
    fn test_deprecated_key_renamed() {
        let (raw, diag) = parse_toml("theme = \"furo\"\nexclude_trees = [\"_build\"]").unwrap();
        assert_eq!(raw.html_theme.as_deref(), Some("furo"));
        assert_eq!(raw.exclude_patterns, Some(BTreeSet::from(["_build".to_string()])));

        let fields: Vec<_> = diag.warnings().iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["exclude_patterns", "html_theme"]);
        assert!(diag.warnings()[1].message.contains("`theme` is deprecated"));
    }

    #[test]
    fn test_current_key_beats_deprecated() {
        let (raw, diag) = parse_toml("theme = \"furo\"\nhtml_theme = \"alabaster\"").unwrap();
        assert_eq!(raw.html_theme.as_deref(), Some("alabaster"));
        assert_eq!(diag.warnings().len(), 1);
        assert!(diag.warnings()[0].message.contains("ignored"));
    }

    #[test]
    fn test_deprecated_alias_lookup() {
        assert_eq!(deprecated_alias("static_path"), Some(Field::HtmlStaticPath));
        assert_eq!(deprecated_alias("html_static_path"), None);
        for (old, _) in DEPRECATED_KEYS {
            assert!(Field::from_key(old).is_none(), "`{old}` shadows a current key");
        }
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        let err = parse_toml("[base\nproject = \"Atlas\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.origin(), Some("test.toml"));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        assert!(matches!(
            parse_toml("extensions = 3").unwrap_err(),
            ConfigError::Parse { .. }
        ));
        // extlinks values must be exactly (url, label)
        for value in [
            "[\"https://example.com/%s\"]",
            "[\"https://example.com/%s\", \"#%s\", \"extra\"]",
            "[]",
        ] {
            let err = parse_toml(&format!("[extlinks]\nissue = {value}")).unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }), "{value} accepted");
        }
        assert!(matches!(
            parse_json(r#"{"extlinks": {"pr": ["a/%s", "b", "c"]}}"#).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_extlink_arity_message() {
        let err = RawExtLink::try_from(vec!["a".to_string(); 3]).unwrap_err();
        assert_eq!(err, "expected a [url, label] pair, found 3 elements");
    }

    #[test]
    fn test_parse_json_source() {
        let content = r##"{
            "project": "Atlas",
            "html_theme_options": {"collapse_navigation": true},
            "extlinks": {"pr": ["https://example.com/pull/%s", "PR %s"]}
        }"##;
        let (raw, diag) = parse_json(content).unwrap();
        assert!(diag.warnings().is_empty());
        assert_eq!(raw.project.as_deref(), Some("Atlas"));
        assert_eq!(raw.html_theme_options.unwrap()["collapse_navigation"], json!(true));
        assert_eq!(raw.extlinks.unwrap()["pr"].label, "PR %s");
    }

    #[test]
    fn test_json_theme_options_pass_through() {
        let content = r#"{"html_theme_options": {"logo": null, "seed": 18446744073709551615}}"#;
        let (raw, _) = parse_json(content).unwrap();
        let options = raw.html_theme_options.unwrap();
        assert_eq!(options["logo"], serde_json::Value::Null);
        assert_eq!(options["seed"].as_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_json_trailing_garbage_is_parse_error() {
        let err = parse_json("{\"project\": \"Atlas\"} extra").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.origin(), Some("site.json"));
    }
}

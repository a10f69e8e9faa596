//! The resolved, validated configuration handed to the renderer.

use super::raw::{OptionValue, ThemeOptions};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Placeholder substituted by extlink expansion.
pub const PLACEHOLDER: &str = "%s";

/// Final configuration for a single documentation build.
///
/// Built only by [`ConfigResolver`](crate::config::ConfigResolver) and never
/// mutated afterwards: there are no setters, only read accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    pub(super) project: String,
    pub(super) copyright: String,
    pub(super) author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) language: Option<String>,
    pub(super) extensions: Vec<String>,
    pub(super) theme: String,
    pub(super) theme_options: ThemeOptions,
    pub(super) static_paths: Vec<String>,
    pub(super) template_paths: Vec<String>,
    pub(super) exclude_patterns: BTreeSet<String>,
    pub(super) locale_dirs: Vec<String>,
    pub(super) gettext_compact: bool,
    pub(super) gettext_uuid: bool,
    pub(super) extlinks: BTreeMap<String, ExtLink>,
}

impl EffectiveConfig {
    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Short X.Y version, if configured.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Full release string, if configured.
    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    /// Content language code (e.g. "en", "zh_CN").
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Renderer plugins in activation order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn theme_options(&self) -> &ThemeOptions {
        &self.theme_options
    }

    pub fn theme_option(&self, key: &str) -> Option<&OptionValue> {
        self.theme_options.get(key)
    }

    pub fn static_paths(&self) -> &[String] {
        &self.static_paths
    }

    pub fn template_paths(&self) -> &[String] {
        &self.template_paths
    }

    pub fn exclude_patterns(&self) -> &BTreeSet<String> {
        &self.exclude_patterns
    }

    pub fn locale_dirs(&self) -> &[String] {
        &self.locale_dirs
    }

    pub fn gettext_compact(&self) -> bool {
        self.gettext_compact
    }

    pub fn gettext_uuid(&self) -> bool {
        self.gettext_uuid
    }

    pub fn extlinks(&self) -> &BTreeMap<String, ExtLink> {
        &self.extlinks
    }

    /// Expand `name:target` through the named shortcut.
    pub fn expand_link(&self, name: &str, target: &str) -> Option<(String, String)> {
        self.extlinks.get(name).map(|link| link.expand(target))
    }
}

/// A named shortcut expanding short references into full URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtLink {
    /// URL template with exactly one `%s`.
    pub url: String,
    /// Link text template; `%s` is substituted when present.
    pub label: String,
}

impl ExtLink {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Substitute `target` into both templates, returning `(url, label)`.
    ///
    /// A label without a placeholder is used verbatim.
    ///
    /// ```ignore
    /// let link = ExtLink::new("https://github.com/o/r/issues/%s", "#%s");
    /// assert_eq!(link.expand("42").0, "https://github.com/o/r/issues/42");
    /// ```
    pub fn expand(&self, target: &str) -> (String, String) {
        (
            self.url.replacen(PLACEHOLDER, target, 1),
            self.label.replace(PLACEHOLDER, target),
        )
    }

    /// Number of placeholders in the url template.
    pub fn placeholder_count(&self) -> usize {
        self.url.matches(PLACEHOLDER).count()
    }
}

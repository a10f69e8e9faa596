//! Post-merge validation.
//!
//! Collects every problem into [`ConfigDiagnostics`]; the resulting
//! [`ConfigError::Validation`] names the first offending field.

use super::effective::{EffectiveConfig, ExtLink, PLACEHOLDER};
use super::merge::{Field, Merged, Provenance};
use super::theme::ThemeRegistry;
use super::{ConfigDiagnostics, ConfigError};
use rustc_hash::FxHashSet;

/// Default of `gettext_compact` when no source sets it.
const DEFAULT_GETTEXT_COMPACT: bool = true;

/// Validate the merged sources and freeze them into an [`EffectiveConfig`].
///
/// `diag` carries what loading already reported; the returned diagnostics
/// hold those warnings plus any found here, so the caller decides how to
/// surface them.
pub fn finalize(
    merged: Merged,
    themes: &ThemeRegistry,
    mut diag: ConfigDiagnostics,
) -> Result<(EffectiveConfig, ConfigDiagnostics), ConfigError> {
    let Merged { config, provenance } = merged;

    let project = required(config.project, Field::Project, &provenance, &mut diag);
    let copyright = required(config.copyright, Field::Copyright, &provenance, &mut diag);
    let author = required(config.author, Field::Author, &provenance, &mut diag);
    let theme = required(config.html_theme, Field::HtmlTheme, &provenance, &mut diag);

    if !theme.is_empty() && !themes.contains(&theme) {
        diag.error_with_hint(
            Field::HtmlTheme.path(),
            provenance.origin(Field::HtmlTheme),
            format!("unknown theme `{theme}`"),
            format!("known themes: {}", themes.sorted().join(", ")),
        );
    }

    let extensions = config.extensions.unwrap_or_default();
    check_duplicates(&extensions, provenance.origin(Field::Extensions), &mut diag);

    let extlinks: std::collections::BTreeMap<String, ExtLink> = config
        .extlinks
        .unwrap_or_default()
        .into_iter()
        .map(|(name, raw)| (name, ExtLink::new(raw.url, raw.label)))
        .collect();
    for (name, link) in &extlinks {
        let origin = provenance.entry_origin(Field::Extlinks, name);
        check_extlink(name, link, origin, &mut diag);
    }

    let diag = diag.into_result()?;

    let effective = EffectiveConfig {
        project,
        copyright,
        author,
        version: config.version,
        release: config.release,
        language: config.language,
        extensions,
        theme,
        theme_options: config.html_theme_options.unwrap_or_default(),
        static_paths: config.html_static_path.unwrap_or_default(),
        template_paths: config.templates_path.unwrap_or_default(),
        exclude_patterns: config.exclude_patterns.unwrap_or_default(),
        locale_dirs: config.locale_dirs.unwrap_or_default(),
        gettext_compact: config.gettext_compact.unwrap_or(DEFAULT_GETTEXT_COMPACT),
        gettext_uuid: config.gettext_uuid.unwrap_or_default(),
        extlinks,
    };

    Ok((effective, diag))
}

/// Take a required string, reporting it when missing or blank.
fn required(
    value: Option<String>,
    field: Field,
    provenance: &Provenance,
    diag: &mut ConfigDiagnostics,
) -> String {
    match value {
        None => {
            diag.error_with_hint(
                field.path(),
                None,
                "is required but no source sets it",
                format!("add `{} = \"...\"` to a config source", field.path().as_str()),
            );
            String::new()
        }
        Some(value) if value.trim().is_empty() => {
            diag.error(field.path(), provenance.origin(field), "must not be empty");
            String::new()
        }
        Some(value) => value,
    }
}

fn check_duplicates(extensions: &[String], origin: Option<&str>, diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();
    for name in extensions {
        if !seen.insert(name.as_str()) {
            diag.error_with_hint(
                Field::Extensions.path(),
                origin,
                format!("`{name}` is listed more than once"),
                "each extension is activated once; remove the repeated entry",
            );
        }
    }
}

fn check_extlink(name: &str, link: &ExtLink, origin: Option<&str>, diag: &mut ConfigDiagnostics) {
    let field = Field::Extlinks.path();

    if !is_identifier(name) {
        diag.error(
            field,
            origin,
            format!("shortcut name `{name}` must be a non-empty identifier"),
        );
    }

    let count = link.placeholder_count();
    if count != 1 {
        diag.error_with_hint(
            field,
            origin,
            format!(
                "shortcut `{name}`: `{}` needs exactly one `{PLACEHOLDER}`, found {count}",
                link.url
            ),
            format!("e.g. {name} = [\"https://host/{PLACEHOLDER}\", \"{PLACEHOLDER}\"]"),
        );
        return;
    }

    // Relative templates are allowed, only reported
    let (sample, _) = link.expand("sample");
    if url::Url::parse(&sample).is_err() {
        diag.warn(
            field,
            origin,
            format!("shortcut `{name}`: `{}` does not expand to an absolute URL", link.url),
        );
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

// ============================================================================
// tests
// ============================================================================

//! Per-field merge strategy table.
//!
//! | Kind       | Policy     | Fields                                              |
//! |------------|------------|-----------------------------------------------------|
//! | scalar     | `Replace`  | project, copyright, author, html_theme, version, ...|
//! | flag       | `Replace`  | gettext_compact, gettext_uuid                       |
//! | sequence   | `Replace`  | extensions, templates_path, html_static_path, ...   |
//! | mapping    | `KeyMerge` | html_theme_options, extlinks                        |
//!
//! `Replace` means the later explicit value wins outright; sequences are
//! never concatenated. `KeyMerge` keeps keys from both sides with the later
//! source winning on a shared key. The merge is one level deep.

use super::{FieldPath, RawConfig};
use std::collections::BTreeMap;

/// How a field combines an earlier value with a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    Replace,
    KeyMerge,
}

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    /// Boolean scalar.
    Flag,
    Sequence,
    Set,
    Mapping,
}

/// Every key a source may set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Project,
    Copyright,
    Author,
    Version,
    Release,
    Language,
    Extensions,
    TemplatesPath,
    ExcludePatterns,
    HtmlTheme,
    HtmlThemeOptions,
    HtmlStaticPath,
    LocaleDirs,
    GettextCompact,
    GettextUuid,
    Extlinks,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Project,
        Field::Copyright,
        Field::Author,
        Field::Version,
        Field::Release,
        Field::Language,
        Field::Extensions,
        Field::TemplatesPath,
        Field::ExcludePatterns,
        Field::HtmlTheme,
        Field::HtmlThemeOptions,
        Field::HtmlStaticPath,
        Field::LocaleDirs,
        Field::GettextCompact,
        Field::GettextUuid,
        Field::Extlinks,
    ];

    /// Key as written in a source document.
    pub const fn path(self) -> FieldPath {
        FieldPath::new(match self {
            Field::Project => "project",
            Field::Copyright => "copyright",
            Field::Author => "author",
            Field::Version => "version",
            Field::Release => "release",
            Field::Language => "language",
            Field::Extensions => "extensions",
            Field::TemplatesPath => "templates_path",
            Field::ExcludePatterns => "exclude_patterns",
            Field::HtmlTheme => "html_theme",
            Field::HtmlThemeOptions => "html_theme_options",
            Field::HtmlStaticPath => "html_static_path",
            Field::LocaleDirs => "locale_dirs",
            Field::GettextCompact => "gettext_compact",
            Field::GettextUuid => "gettext_uuid",
            Field::Extlinks => "extlinks",
        })
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Field::Extensions
            | Field::TemplatesPath
            | Field::HtmlStaticPath
            | Field::LocaleDirs => FieldKind::Sequence,
            Field::ExcludePatterns => FieldKind::Set,
            Field::HtmlThemeOptions | Field::Extlinks => FieldKind::Mapping,
            Field::GettextCompact | Field::GettextUuid => FieldKind::Flag,
            _ => FieldKind::Scalar,
        }
    }

    pub const fn policy(self) -> MergePolicy {
        match self.kind() {
            FieldKind::Mapping => MergePolicy::KeyMerge,
            FieldKind::Scalar | FieldKind::Flag | FieldKind::Sequence | FieldKind::Set => {
                MergePolicy::Replace
            }
        }
    }

    /// Look up a field by its source key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.path().as_str() == key)
    }
}

/// Which source last set each field, and each entry of a mapping field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    origins: BTreeMap<Field, String>,
    entries: BTreeMap<Field, BTreeMap<String, String>>,
}

impl Provenance {
    /// Source that last set `field` (for a mapping, any of its keys), if any.
    pub fn origin(&self, field: Field) -> Option<&str> {
        self.origins.get(&field).map(String::as_str)
    }

    /// Source that last set `key` inside a mapping field.
    pub fn entry_origin(&self, field: Field, key: &str) -> Option<&str> {
        self.entries.get(&field)?.get(key).map(String::as_str)
    }

    fn record(&mut self, field: Field, origin: &str) {
        self.origins.insert(field, origin.to_owned());
    }

    fn record_entry(&mut self, field: Field, key: String, origin: &str) {
        self.entries
            .entry(field)
            .or_default()
            .insert(key, origin.to_owned());
    }
}

/// Left-to-right accumulator over parsed sources.
#[derive(Debug, Clone, Default)]
pub struct Merged {
    pub config: RawConfig,
    pub provenance: Provenance,
}

impl Merged {
    /// Fold one more source into the accumulator.
    pub fn apply(&mut self, next: RawConfig, origin: &str) {
        let RawConfig {
            project,
            copyright,
            author,
            version,
            release,
            language,
            extensions,
            templates_path,
            exclude_patterns,
            html_theme,
            html_theme_options,
            html_static_path,
            locale_dirs,
            gettext_compact,
            gettext_uuid,
            extlinks,
        } = next;

        let acc = &mut self.config;
        let mut touched = Vec::new();
        let mut entries = Vec::new();

        touched.extend(replace(&mut acc.project, project, Field::Project));
        touched.extend(replace(&mut acc.copyright, copyright, Field::Copyright));
        touched.extend(replace(&mut acc.author, author, Field::Author));
        touched.extend(replace(&mut acc.version, version, Field::Version));
        touched.extend(replace(&mut acc.release, release, Field::Release));
        touched.extend(replace(&mut acc.language, language, Field::Language));
        touched.extend(replace(&mut acc.extensions, extensions, Field::Extensions));
        touched.extend(replace(
            &mut acc.templates_path,
            templates_path,
            Field::TemplatesPath,
        ));
        touched.extend(replace(
            &mut acc.exclude_patterns,
            exclude_patterns,
            Field::ExcludePatterns,
        ));
        touched.extend(replace(&mut acc.html_theme, html_theme, Field::HtmlTheme));
        entries.extend(key_merge(
            &mut acc.html_theme_options,
            html_theme_options,
            Field::HtmlThemeOptions,
        ));
        touched.extend(replace(
            &mut acc.html_static_path,
            html_static_path,
            Field::HtmlStaticPath,
        ));
        touched.extend(replace(&mut acc.locale_dirs, locale_dirs, Field::LocaleDirs));
        touched.extend(replace(
            &mut acc.gettext_compact,
            gettext_compact,
            Field::GettextCompact,
        ));
        touched.extend(replace(&mut acc.gettext_uuid, gettext_uuid, Field::GettextUuid));
        entries.extend(key_merge(&mut acc.extlinks, extlinks, Field::Extlinks));

        for field in touched {
            self.provenance.record(field, origin);
        }
        for (field, keys) in entries {
            self.provenance.record(field, origin);
            for key in keys {
                self.provenance.record_entry(field, key, origin);
            }
        }
    }
}

fn replace<T>(slot: &mut Option<T>, next: Option<T>, field: Field) -> Option<Field> {
    debug_assert_eq!(field.policy(), MergePolicy::Replace);
    let value = next?;
    *slot = Some(value);
    Some(field)
}

/// Merge mapping entries, returning the keys this source set.
fn key_merge<V>(
    slot: &mut Option<BTreeMap<String, V>>,
    next: Option<BTreeMap<String, V>>,
    field: Field,
) -> Option<(Field, Vec<String>)> {
    debug_assert_eq!(field.policy(), MergePolicy::KeyMerge);
    let entries = next?;
    let keys = entries.keys().cloned().collect();
    slot.get_or_insert_with(BTreeMap::new).extend(entries);
    Some((field, keys))
}

// ============================================================================
// tests
// ============================================================================

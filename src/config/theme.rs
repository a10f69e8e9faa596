//! Known theme names.

use rustc_hash::FxHashSet;

/// Themes bundled with the reference renderer.
pub const BUNDLED_THEMES: &[&str] = &[
    "alabaster",
    "agogo",
    "basic",
    "bizstyle",
    "classic",
    "haiku",
    "nature",
    "pyramid",
    "scrolls",
    "sphinxdoc",
    "traditional",
];

/// Widely installed third-party themes.
pub const COMMON_THEMES: &[&str] = &[
    "furo",
    "pydata_sphinx_theme",
    "sphinx_book_theme",
    "sphinx_rtd_theme",
];

/// Set of theme names `html_theme` may refer to.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    names: FxHashSet<String>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self {
            names: BUNDLED_THEMES
                .iter()
                .chain(COMMON_THEMES)
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }
}

impl ThemeRegistry {
    /// Registry with no known themes.
    pub fn empty() -> Self {
        Self {
            names: FxHashSet::default(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Sorted names, for hints.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// An absolute `config_name` is returned as-is when it is a file.
///
/// # Example
/// ```text
/// /home/user/docs/source/api/   ← start
/// /home/user/docs/docconf.toml  ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_parent() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("source/api");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("docconf.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("docconf.toml")).unwrap();
        assert_eq!(found, tmp.path().join("docconf.toml"));
    }

    #[test]
    fn test_nearest_wins() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("source");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("docconf.toml"), "").unwrap();
        fs::write(nested.join("docconf.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("docconf.toml")).unwrap();
        assert_eq!(found, nested.join("docconf.toml"));
    }

    #[test]
    fn test_directory_with_config_name_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("docconf.toml")).unwrap();
        fs::write(tmp.path().join("other.toml"), "").unwrap();
        assert!(find_config_file(tmp.path(), Path::new("other.toml")).is_some());
        // a directory named like the config is not a config file
        let found = find_config_file(tmp.path(), Path::new("docconf.toml"));
        assert_ne!(found, Some(tmp.path().join("docconf.toml")));
    }

    #[test]
    fn test_absolute_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        assert_eq!(find_config_file(Path::new("/"), &path), None);
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(Path::new("/"), &path), Some(path.clone()));
    }

    #[test]
    fn test_absolute_directory_not_found() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("docconf.toml");
        fs::create_dir_all(&dir).unwrap();
        assert_eq!(find_config_file(Path::new("/"), &dir), None);
    }
}

//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/guide/assets/css/   ← start
/// /home/user/guide/pagefix.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
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
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("assets/css");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("pagefix.toml"), "").unwrap();

        let found = find_config_file(Path::new("pagefix.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("pagefix.toml"));
    }

    #[test]
    fn test_nearest_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("pagefix.toml"), "").unwrap();
        fs::write(nested.join("pagefix.toml"), "").unwrap();

        let found = find_config_file(Path::new("pagefix.toml"), &nested).unwrap();
        assert_eq!(found, nested.join("pagefix.toml"));
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.toml");
        assert_eq!(find_config_file(&config, dir.path()), None);

        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(&config, Path::new("/")), Some(config));
    }

    #[test]
    fn test_directory_is_not_a_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pagefix.toml")).unwrap();
        // A directory with the config name does not count; search continues upward.
        let found = find_config_file(Path::new("pagefix.toml"), dir.path());
        assert_ne!(found, Some(dir.path().join("pagefix.toml")));
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings read from `reload.toml`.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct DemoConfig {
    /// Debounce before restarting, in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Extra directories to watch.
    pub watch: Option<Vec<PathBuf>>,
}

impl DemoConfig {
    /// Load configuration from `path`.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("failed to parse {}: {err}. Using defaults.", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read {}: {err}. Using defaults.", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(DemoConfig::load(&dir.path().join("reload.toml")), DemoConfig::default());
    }

    #[test]
    fn test_load_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reload.toml");
        fs::write(&path, "debounce_ms = 300\nwatch = [\"/tmp\", \"templates\"]\n").unwrap();

        let config = DemoConfig::load(&path);

        assert_eq!(config.debounce_ms, Some(300));
        assert_eq!(
            config.watch,
            Some(vec![PathBuf::from("/tmp"), PathBuf::from("templates")])
        );
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reload.toml");
        fs::write(&path, "debounce_ms = \"soon\"").unwrap();

        assert_eq!(DemoConfig::load(&path), DemoConfig::default());
    }
}

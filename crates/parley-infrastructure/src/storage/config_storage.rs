//! Application config file storage (config.toml).

use std::fs;
use std::path::{Path, PathBuf};

use parley_core::config::AppConfig;

use crate::paths::ParleyPaths;

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

/// Read-only access to config.toml.
///
/// A missing file is not an error: the defaults apply.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a ConfigStorage at the path resolved by `paths`.
    pub fn new(paths: &ParleyPaths) -> Result<Self, ConfigStorageError> {
        let path = paths
            .config_file()
            .map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a ConfigStorage for an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<AppConfig, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigStorage] No config at {}, using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(storage.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
personas_dir = "/srv/personas"
base_instruction = "You are a security researcher."

[catalogs]
general_url = "http://localhost/prompts.csv"

[defaults]
temperature = 0.5
"#,
        )
        .unwrap();

        let config = ConfigStorage::with_path(path).load().unwrap();
        assert_eq!(config.personas_dir, "/srv/personas");
        assert_eq!(config.base_instruction, "You are a security researcher.");
        assert_eq!(config.catalogs.general_url, "http://localhost/prompts.csv");
        assert_eq!(
            config.catalogs.jailbreak_url,
            AppConfig::default().catalogs.jailbreak_url
        );
        assert_eq!(config.defaults.temperature, 0.5);
        assert_eq!(config.defaults.model, "gpt-4o-mini");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "personas_dir = [").unwrap();

        assert!(matches!(
            ConfigStorage::with_path(path).load(),
            Err(ConfigStorageError::TomlParseError(_))
        ));
    }
}

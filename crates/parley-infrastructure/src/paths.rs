//! Unified path management for parley configuration files.
//!
//! All paths are resolved from the platform config directory (via `dirs`) so
//! the layout is consistent across Linux, macOS and Windows.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "parley";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for parley.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/parley/            # Config directory
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API key
/// └── logs/                    # Application logs
///     └── parley.log.YYYY-MM-DD
/// ```
///
/// Personas live outside this tree, in `personas_dir` from `config.toml`
/// (a `personas/` directory next to where the client is started by default).
#[derive(Debug, Clone)]
pub struct ParleyPaths {
    base_dir: Option<PathBuf>,
}

impl ParleyPaths {
    /// Creates a path resolver.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Overrides the config directory (used by tests and `--config-dir`)
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the parley configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/parley/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// The file is written with 600 permissions on Unix.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for ParleyPaths {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = ParleyPaths::new(Some(Path::new("/tmp/parley-test")));
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/parley-test"));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/parley-test/config.toml")
        );
        assert_eq!(
            paths.secret_file().unwrap(),
            PathBuf::from("/tmp/parley-test/secret.json")
        );
        assert_eq!(
            paths.logs_dir().unwrap(),
            PathBuf::from("/tmp/parley-test/logs")
        );
    }

    #[test]
    fn test_files_live_under_config_dir() {
        let paths = ParleyPaths::default();
        if let Ok(config_dir) = paths.config_dir() {
            assert!(config_dir.ends_with("parley"));
            assert!(paths.config_file().unwrap().starts_with(&config_dir));
            assert!(paths.secret_file().unwrap().starts_with(&config_dir));
            assert!(paths.logs_dir().unwrap().starts_with(&config_dir));
        }
    }
}

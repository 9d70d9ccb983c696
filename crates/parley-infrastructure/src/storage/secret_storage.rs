//! Secret configuration file storage.
//!
//! Loads and saves the API key in ~/.config/parley/secret.json.

use crate::paths::ParleyPaths;
use parley_core::config::{OpenAIConfig, SecretConfig};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Storage for the secret configuration file (secret.json).
///
/// Responsibilities:
/// - Load secret.json into the SecretConfig model
/// - Persist an OpenAI key on request, preserving other fields
///
/// Does NOT:
/// - Validate API keys against the service
/// - Handle encryption (plaintext JSON storage)
///
/// # Security Note
///
/// The file is plaintext. It is created with 600 permissions on Unix and the
/// key is never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a SecretStorage at the path resolved by `paths`.
    pub fn new(paths: &ParleyPaths) -> Result<Self, SecretStorageError> {
        let path = paths
            .secret_file()
            .map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded and parsed
    /// - `Err(SecretStorageError::NotFound)`: File doesn't exist
    /// - `Err(SecretStorageError::IoError)`: Failed to read file
    /// - `Err(SecretStorageError::ParseError)`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Stores `api_key` as the OpenAI key, keeping any configured model name.
    pub fn save_openai_key(&self, api_key: &str) -> Result<(), SecretStorageError> {
        let mut config = match self.load() {
            Ok(config) => config,
            Err(SecretStorageError::NotFound(_)) => SecretConfig::default(),
            Err(e) => return Err(e),
        };

        let model_name = config.openai.take().and_then(|c| c.model_name);
        config.openai = Some(OpenAIConfig {
            api_key: api_key.to_string(),
            model_name,
        });

        self.write(&config)?;
        tracing::info!("[SecretStorage] Saved API key to {}", self.path.display());
        Ok(())
    }

    fn write(&self, config: &SecretConfig) -> Result<(), SecretStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // A new file is created as 600 (user read/write only) on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies on creation; tighten an existing file before writing the key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

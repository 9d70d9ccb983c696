//! Directory-backed PersonaRepository implementation.
//!
//! 1 persona = 1 plain-text file; the file stem is the persona name and the
//! file content is the body.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parley_core::error::{ParleyError, Result};
use parley_core::persona::{PersonaRepository, validate_persona_name};

const PERSONA_EXTENSION: &str = "md";

/// Directory-backed persona repository.
///
/// Directory structure:
/// ```text
/// personas/
/// ├── pirate.md
/// ├── Linux Terminal_remote.md
/// └── DAN_jailbreak.md
/// ```
///
/// Writes are not atomic; a crash mid-write can leave a truncated persona.
pub struct DirPersonaRepository {
    dir: PathBuf,
}

impl DirPersonaRepository {
    /// Creates a repository rooted at `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{PERSONA_EXTENSION}"))
    }

    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<String>> {
        self.ensure_dir().await?;

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PERSONA_EXTENSION) {
                continue;
            }
            if !entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) if validate_persona_name(stem).is_ok() => names.push(stem.to_string()),
                Some(stem) => tracing::debug!(
                    "[PersonaRepository] Skipping reserved persona file: {}",
                    stem
                ),
                None => tracing::debug!(
                    "[PersonaRepository] Skipping non UTF-8 file name: {:?}",
                    path
                ),
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait::async_trait]
impl PersonaRepository for DirPersonaRepository {
    async fn list(&self) -> Vec<String> {
        match self.scan().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(
                    "[PersonaRepository] Failed to scan {:?}, treating as empty: {}",
                    self.dir,
                    e
                );
                Vec::new()
            }
        }
    }

    async fn load(&self, name: &str) -> Result<String> {
        if validate_persona_name(name).is_err() {
            return Err(ParleyError::not_found("persona", name));
        }

        match tokio::fs::read_to_string(self.path_for(name)).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ParleyError::not_found("persona", name)),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, name: &str, body: &str) -> Result<()> {
        validate_persona_name(name)?;
        self.ensure_dir().await?;

        tokio::fs::write(self.path_for(name), body).await?;
        tracing::info!("[PersonaRepository] Saved persona '{}'", name);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        if validate_persona_name(name).is_err() {
            // Such a name can never have been stored.
            return Ok(());
        }

        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => {
                tracing::info!("[PersonaRepository] Deleted persona '{}'", name);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, name: &str) -> bool {
        if validate_persona_name(name).is_err() {
            return false;
        }
        tokio::fs::metadata(self.path_for(name))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

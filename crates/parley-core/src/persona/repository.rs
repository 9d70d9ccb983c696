//! Persona repository trait.
//!
//! Defines the interface for persona persistence operations.

use super::model::Persona;
use crate::error::Result;

/// An abstract key-value store for personas.
///
/// This trait defines the contract for persisting and retrieving personas,
/// decoupling the application's core logic from the specific storage mechanism
/// (e.g., a directory of text files, an embedded store, a remote API).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Creating the storage location lazily
/// - Name validation before any write
/// - No concurrent-access protection is required (single user, single process)
#[async_trait::async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Lists the names of all stored personas, sorted lexicographically.
    ///
    /// Never fails: a missing storage location is created and an unreadable
    /// one yields an empty list.
    async fn list(&self) -> Vec<String>;

    /// Loads the body of the persona called `name`.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The stored body (an empty body is valid content)
    /// - `Err(ParleyError::NotFound)`: No persona with that name exists
    async fn load(&self, name: &str) -> Result<String>;

    /// Writes `body` under `name`, overwriting any existing persona.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Persona saved
    /// - `Err(ParleyError::InvalidName)`: `name` is empty or not a valid key
    async fn save(&self, name: &str, body: &str) -> Result<()>;

    /// Removes the persona called `name`. Deleting a missing name is a no-op.
    async fn delete(&self, name: &str) -> Result<()>;

    /// Returns whether a persona called `name` exists.
    async fn exists(&self, name: &str) -> bool {
        self.list().await.iter().any(|existing| existing == name)
    }

    /// Loads the full persona model.
    async fn get(&self, name: &str) -> Result<Persona> {
        let body = self.load(name).await?;
        Ok(Persona {
            name: name.to_string(),
            body,
        })
    }
}

//! Persona Service
//!
//! Entry points for every persona operation the client offers. The two write
//! paths ("add new" and "edit selected") share one repository but apply
//! different collision rules.

use std::sync::Arc;

use parley_core::catalog::{CatalogKind, CatalogRow};
use parley_core::error::{ParleyError, Result};
use parley_core::persona::{
    CreatePersonaRequest, Persona, PersonaRepository, UpdatePersonaRequest,
};

/// Service for managing stored personas.
pub struct PersonaService {
    persona_repository: Arc<dyn PersonaRepository>,
}

impl PersonaService {
    /// Create a new PersonaService
    pub fn new(persona_repository: Arc<dyn PersonaRepository>) -> Self {
        Self { persona_repository }
    }

    /// Sorted names of all stored personas. Never fails.
    pub async fn list(&self) -> Vec<String> {
        self.persona_repository.list().await
    }

    /// Loads a persona for use in a session.
    pub async fn get(&self, name: &str) -> Result<Persona> {
        self.persona_repository.get(name).await
    }

    pub async fn exists(&self, name: &str) -> bool {
        self.persona_repository.exists(name).await
    }

    /// "Add new" path: creates a persona, rejecting a name that is already taken.
    ///
    /// # Returns
    ///
    /// * `Ok(Persona)` - The stored persona
    /// * `Err(InvalidName)` - The name is empty or unusable
    /// * `Err(AlreadyExists)` - A persona with this name exists; storage is unchanged
    pub async fn create_new(&self, request: CreatePersonaRequest) -> Result<Persona> {
        request.validate()?;

        if self.persona_repository.exists(&request.name).await {
            tracing::info!(
                "[PersonaService] Rejected new persona '{}': name already exists",
                request.name
            );
            return Err(ParleyError::already_exists("persona", request.name));
        }

        let persona = request.into_persona()?;
        self.persona_repository
            .save(&persona.name, &persona.body)
            .await?;
        Ok(persona)
    }

    /// "Edit selected" path: overwrites the selected persona, renaming it when
    /// `new_name` differs.
    ///
    /// # Returns
    ///
    /// * `Ok(Persona)` - The persona as stored after the edit
    /// * `Err(NotFound)` - The selected persona no longer exists
    /// * `Err(AlreadyExists)` - A rename target is taken by a different persona
    pub async fn update_existing(&self, request: UpdatePersonaRequest) -> Result<Persona> {
        request.validate()?;

        if !self.persona_repository.exists(&request.current_name).await {
            return Err(ParleyError::not_found("persona", request.current_name));
        }

        if request.is_rename() && self.persona_repository.exists(&request.new_name).await {
            return Err(ParleyError::already_exists("persona", request.new_name));
        }

        self.persona_repository
            .save(&request.new_name, &request.body)
            .await?;

        if request.is_rename() {
            self.persona_repository
                .delete(&request.current_name)
                .await?;
            tracing::info!(
                "[PersonaService] Renamed persona '{}' to '{}'",
                request.current_name,
                request.new_name
            );
        }

        Ok(Persona {
            name: request.new_name,
            body: request.body,
        })
    }

    /// Deletes a persona. Deleting a missing name is a no-op.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.persona_repository.delete(name).await
    }

    /// Promotes a catalog row into a stored persona named `key + suffix`.
    ///
    /// An existing persona with the same name is overwritten.
    pub async fn import_from_catalog(&self, row: &CatalogRow, kind: CatalogKind) -> Result<Persona> {
        let persona = row.to_persona(kind)?;
        self.persona_repository
            .save(&persona.name, &persona.body)
            .await?;
        tracing::info!(
            "[PersonaService] Imported '{}' from {} catalog",
            persona.name,
            kind
        );
        Ok(persona)
    }
}

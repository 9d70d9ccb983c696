//! Persona creation and update request models.
//!
//! Two write paths reach the same store with different collision rules:
//! - "add new" rejects a name that is already taken
//! - "edit selected" overwrites the selected persona, optionally renaming it

use serde::{Deserialize, Serialize};

use super::model::{Persona, validate_persona_name};
use crate::error::Result;

/// Request to create a new persona ("add new" path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonaRequest {
    /// Name of the new persona (must not exist yet)
    pub name: String,
    /// Body text (may be empty)
    #[serde(default)]
    pub body: String,
}

impl CreatePersonaRequest {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<()> {
        validate_persona_name(&self.name)
    }

    /// Convert this request into a Persona.
    pub fn into_persona(self) -> Result<Persona> {
        Persona::new(self.name, self.body)
    }
}

/// Request to edit the currently selected persona ("edit selected" path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePersonaRequest {
    /// Name of the persona being edited
    pub current_name: String,
    /// Name to store it under; equal to `current_name` for an in-place edit
    pub new_name: String,
    /// Replacement body
    #[serde(default)]
    pub body: String,
}

impl UpdatePersonaRequest {
    /// In-place edit of the body only.
    pub fn in_place(name: impl Into<String>, body: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            current_name: name.clone(),
            new_name: name,
            body: body.into(),
        }
    }

    /// Edit that also renames the persona.
    pub fn rename(
        current_name: impl Into<String>,
        new_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            current_name: current_name.into(),
            new_name: new_name.into(),
            body: body.into(),
        }
    }

    pub fn is_rename(&self) -> bool {
        self.current_name != self.new_name
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<()> {
        validate_persona_name(&self.current_name)?;
        validate_persona_name(&self.new_name)
    }
}

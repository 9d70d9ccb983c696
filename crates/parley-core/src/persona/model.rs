//! Persona domain model.
//!
//! A persona is a named block of system-prompt text injected ahead of the
//! user's message. The name doubles as the storage key (a file stem for the
//! directory-backed repository), so it is restricted to characters that are
//! safe in a single path component.

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// Label recorded in the transcript when no persona is active.
pub const NO_PERSONA_LABEL: &str = "None";

/// A named, reusable block of system-prompt text.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Unique human-readable identifier, also the storage key
    pub name: String,
    /// Free-text instruction content (may be empty)
    #[serde(default)]
    pub body: String,
}

impl Persona {
    /// Creates a persona after validating its name.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_persona_name(&name)?;
        Ok(Self {
            name,
            body: body.into(),
        })
    }

    /// Returns the body as it is injected into a request.
    ///
    /// Surrounding whitespace is dropped; `None` when nothing remains.
    pub fn injected_text(&self) -> Option<&str> {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Checks that `name` can be used as a persona identifier.
///
/// Rejects empty or whitespace-only names, anything that would escape a
/// single path component, and the no-persona label in any letter case.
pub fn validate_persona_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ParleyError::invalid_name("Persona name cannot be empty"));
    }

    if name.trim().eq_ignore_ascii_case(NO_PERSONA_LABEL) {
        return Err(ParleyError::invalid_name(format!(
            "'{name}' is reserved for \"no persona\""
        )));
    }

    if name == "." || name == ".." {
        return Err(ParleyError::invalid_name(format!(
            "'{name}' is not a valid persona name"
        )));
    }

    if let Some(bad) = name.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(ParleyError::invalid_name(format!(
            "Persona name cannot contain {bad:?}"
        )));
    }

    Ok(())
}

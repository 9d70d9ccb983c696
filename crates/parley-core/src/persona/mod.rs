//! Persona domain module.
//!
//! This module contains the persona model, the repository interface used to
//! persist personas, and the request types for the two write paths.
//!
//! # Module Structure
//!
//! - `model`: Core persona domain model (`Persona`) and name rules
//! - `repository`: Repository trait for persona persistence
//! - `request`: "add new" and "edit selected" request models
//!
//! # Usage
//!
//! ```ignore
//! use parley_core::persona::{Persona, PersonaRepository, CreatePersonaRequest};
//! ```

mod model;
mod repository;
pub mod request;

// Re-export public API
pub use model::{NO_PERSONA_LABEL, Persona, validate_persona_name};
pub use repository::PersonaRepository;
pub use request::{CreatePersonaRequest, UpdatePersonaRequest};

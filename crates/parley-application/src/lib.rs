//! Application layer for Parley.
//!
//! Use cases that coordinate the domain types with the storage and gateway
//! implementations injected by the binary.

pub mod chat_usecase;
pub mod persona_service;

pub use chat_usecase::ChatUseCase;
pub use persona_service::PersonaService;

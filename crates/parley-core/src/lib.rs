//! Domain layer for Parley.
//!
//! Personas, catalogs, the conversation session and transcript rendering.
//! This crate performs no I/O; storage, HTTP and the terminal live in the
//! infrastructure, interaction and readline crates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod persona;
pub mod session;
pub mod transcript;

// Re-export common error type
pub use error::{ParleyError, Result};

//! Error types for the Parley application.

use thiserror::Error;

/// A shared error type for the entire Parley application.
///
/// Each variant maps to one failure class of the chat client. Only
/// `MissingCredential` is fatal; everything else is reported inline and
/// leaves the transcript and session settings untouched.
#[derive(Error, Debug, Clone)]
pub enum ParleyError {
    /// No API credential could be resolved at startup
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A remote catalog could not be fetched or parsed
    #[error("Catalog fetch failed for {source_url}: {message}")]
    CatalogFetch { source_url: String, message: String },

    /// The completion service rejected or failed the request
    #[error("Completion gateway error{}: {message}", .status_code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Gateway {
        status_code: Option<u16>,
        message: String,
    },

    /// A persona name that cannot be used as an identifier
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Entity already exists and the operation does not overwrite
    #[error("Entity already exists: {entity_type} '{id}'")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// User input was empty or whitespace only
    #[error("Empty input")]
    EmptyInput,

    /// A session parameter outside its allowed range or list
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// IO error (persona files, transcript export)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl ParleyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an AlreadyExists error
    pub fn already_exists(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidName error
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName(message.into())
    }

    /// Creates an InvalidParameter error
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates a Gateway error
    pub fn gateway(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Gateway {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a CatalogFetch error
    pub fn catalog_fetch(source_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CatalogFetch {
            source_url: source_url.into(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an AlreadyExists error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if this is an EmptyInput error
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Check if this is a Gateway error
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    /// Only a missing credential stops the program.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParleyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, ParleyError>`.
pub type Result<T> = std::result::Result<T, ParleyError>;

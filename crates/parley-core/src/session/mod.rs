//! Conversation session domain.
//!
//! - `model`: session parameters and the model allow-list
//! - `message`: turns, exchanges and the append-only transcript
//! - `request`: the outbound completion request
//! - `conversation`: the session object tying them together

pub mod conversation;
pub mod message;
pub mod model;
pub mod request;

pub use conversation::{ConversationSession, DEFAULT_BASE_INSTRUCTION};
pub use message::{Exchange, Transcript, Turn, TurnRole};
pub use model::{
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, MAX_OUTPUT_TOKENS_RANGE,
    SUPPORTED_MODELS, SessionParameters, TEMPERATURE_RANGE,
};
pub use request::CompletionRequest;

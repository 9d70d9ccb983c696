//! Outbound completion request.

use serde::{Deserialize, Serialize};

/// Everything the completion gateway needs for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Base instruction, followed by a blank line and the persona body when one is active
    pub system_content: String,
    /// The user's message, verbatim
    pub user_content: String,
}

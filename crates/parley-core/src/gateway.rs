//! Completion gateway trait.
//!
//! The remote LLM service is an external collaborator. Anything that can turn
//! a [`CompletionRequest`] into generated text implements this trait.

use crate::error::Result;
use crate::session::CompletionRequest;

#[async_trait::async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends one request and returns the generated text.
    ///
    /// Transport, authentication and quota problems are reported as
    /// `ParleyError::Gateway`. Implementations do not retry.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

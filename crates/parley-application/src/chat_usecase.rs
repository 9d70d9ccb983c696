//! Chat use case.
//!
//! Drives one interaction: compose the request from the session, call the
//! completion gateway, record the exchange. Owned by the control loop; every
//! method runs to completion before the next input is read.

use std::path::Path;
use std::sync::Arc;

use parley_core::error::Result;
use parley_core::gateway::CompletionGateway;
use parley_core::persona::Persona;
use parley_core::session::{ConversationSession, Exchange};
use parley_core::transcript::{self, DisplayRow};

pub struct ChatUseCase {
    session: ConversationSession,
    gateway: Arc<dyn CompletionGateway>,
}

impl ChatUseCase {
    pub fn new(session: ConversationSession, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { session, gateway }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Mutable access for parameter changes.
    pub fn session_mut(&mut self) -> &mut ConversationSession {
        &mut self.session
    }

    pub fn set_active_persona(&mut self, persona: Option<Persona>) {
        match &persona {
            Some(p) => tracing::info!("[ChatUseCase] Active persona: {}", p.name),
            None => tracing::info!("[ChatUseCase] Active persona cleared"),
        }
        self.session.set_active_persona(persona);
    }

    /// Sends `user_text` and records the exchange.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` - nothing was sent and the transcript is unchanged
    /// * `Gateway` - the exchange is aborted; transcript and settings survive
    pub async fn send(&mut self, user_text: &str) -> Result<&Exchange> {
        let request = self.session.compose_request(user_text)?;

        let reply = match self.gateway.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("[ChatUseCase] Completion failed: {}", e);
                return Err(e);
            }
        };

        let persona_name = self.session.active_persona().map(|p| p.name.clone());
        let model = request.model;
        tracing::info!(
            "[ChatUseCase] Exchange recorded (model={}, persona={})",
            model,
            persona_name.as_deref().unwrap_or("-")
        );
        Ok(self
            .session
            .record_exchange(user_text, &reply, persona_name.as_deref(), &model))
    }

    /// Display rows, newest exchange first.
    pub fn render(&self) -> Vec<DisplayRow> {
        transcript::render(self.session.transcript())
    }

    /// The flat text export of the transcript.
    pub fn export(&self) -> String {
        transcript::export_flat(self.session.transcript())
    }

    /// Writes the flat export to `path`.
    pub async fn export_to(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, self.export()).await?;
        tracing::info!(
            "[ChatUseCase] Exported {} turns to {}",
            self.session.transcript().turn_count(),
            path.display()
        );
        Ok(())
    }
}

//! The conversation session object.
//!
//! Holds the transcript and the active settings for one interactive session.
//! It is owned by the control loop and passed explicitly; nothing here is
//! global.

use super::message::{Exchange, Transcript};
use super::model::SessionParameters;
use super::request::CompletionRequest;
use crate::error::{ParleyError, Result};
use crate::persona::{NO_PERSONA_LABEL, Persona};

/// Base instruction placed at the start of every system message.
pub const DEFAULT_BASE_INSTRUCTION: &str = "You are a helpful assistant.";

/// Prefix applied to the user's message in the transcript.
const USER_PREFIX: &str = "You: ";

/// State of one chat session.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    base_instruction: String,
    parameters: SessionParameters,
    active_persona: Option<Persona>,
    transcript: Transcript,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_INSTRUCTION, SessionParameters::default())
    }
}

impl ConversationSession {
    pub fn new(base_instruction: impl Into<String>, parameters: SessionParameters) -> Self {
        Self {
            base_instruction: base_instruction.into(),
            parameters,
            active_persona: None,
            transcript: Transcript::new(),
        }
    }

    pub fn base_instruction(&self) -> &str {
        &self.base_instruction
    }

    pub fn parameters(&self) -> &SessionParameters {
        &self.parameters
    }

    pub fn set_model(&mut self, model: &str) -> Result<()> {
        self.parameters.set_model(model)
    }

    pub fn set_temperature(&mut self, temperature: f32) -> Result<()> {
        self.parameters.set_temperature(temperature)
    }

    pub fn set_max_output_tokens(&mut self, max_output_tokens: u32) -> Result<()> {
        self.parameters.set_max_output_tokens(max_output_tokens)
    }

    pub fn active_persona(&self) -> Option<&Persona> {
        self.active_persona.as_ref()
    }

    /// Name recorded in the persona-label turn.
    pub fn persona_label(&self) -> &str {
        self.active_persona
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(NO_PERSONA_LABEL)
    }

    /// Sets (or clears) the active persona. The session keeps a snapshot of
    /// the body read at selection time.
    pub fn set_active_persona(&mut self, persona: Option<Persona>) {
        self.active_persona = persona;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Builds the request for `user_text`.
    ///
    /// # Errors
    ///
    /// `EmptyInput` when `user_text` is empty or whitespace only. The session
    /// is not modified either way.
    pub fn compose_request(&self, user_text: &str) -> Result<CompletionRequest> {
        if user_text.trim().is_empty() {
            return Err(ParleyError::EmptyInput);
        }

        let system_content = match self.active_persona.as_ref().and_then(Persona::injected_text) {
            Some(persona_text) => format!("{}\n\n{}", self.base_instruction, persona_text),
            None => self.base_instruction.clone(),
        };

        Ok(CompletionRequest {
            model: self.parameters.model().to_string(),
            temperature: self.parameters.temperature(),
            max_tokens: self.parameters.max_output_tokens(),
            system_content,
            user_content: user_text.to_string(),
        })
    }

    /// Appends one exchange: reply, persona label, user message, model label.
    pub fn record_exchange(
        &mut self,
        user_text: &str,
        reply_text: &str,
        persona_name: Option<&str>,
        model_name: &str,
    ) -> &Exchange {
        self.transcript.push(Exchange {
            reply: reply_text.to_string(),
            persona_label: persona_name.unwrap_or(NO_PERSONA_LABEL).to_string(),
            user_message: format!("{USER_PREFIX}{user_text}"),
            model_label: model_name.to_string(),
        });
        // Just pushed, so the transcript is non-empty.
        &self.transcript.exchanges()[self.transcript.exchanges().len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::{Turn, TurnRole};

    fn session_with_persona(body: &str) -> ConversationSession {
        let mut session = ConversationSession::default();
        session.set_active_persona(Some(Persona::new("terse", body).unwrap()));
        session
    }

    #[test]
    fn test_compose_without_persona_uses_base_instruction() {
        let session = ConversationSession::default();
        let request = session.compose_request("hello").unwrap();

        assert_eq!(request.system_content, "You are a helpful assistant.");
        assert_eq!(request.user_content, "hello");
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 1.0);
        assert_eq!(request.max_tokens, 512);
    }

    #[test]
    fn test_compose_with_persona_joins_with_blank_line() {
        let session = session_with_persona("Be terse.");
        let request = session.compose_request("hello").unwrap();
        assert_eq!(
            request.system_content,
            "You are a helpful assistant.\n\nBe terse."
        );
    }

    #[test]
    fn test_compose_with_blank_persona_body_injects_nothing() {
        let session = session_with_persona("   \n");
        let request = session.compose_request("hello").unwrap();
        assert_eq!(request.system_content, "You are a helpful assistant.");
    }

    #[test]
    fn test_compose_keeps_user_text_verbatim() {
        let session = ConversationSession::default();
        let request = session.compose_request("  spaced out \n").unwrap();
        assert_eq!(request.user_content, "  spaced out \n");
    }

    #[test]
    fn test_compose_rejects_empty_input_without_mutation() {
        let session = ConversationSession::default();
        for input in ["", "   ", "\n\t"] {
            let err = session.compose_request(input).unwrap_err();
            assert!(err.is_empty_input());
        }
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_compose_uses_current_parameters() {
        let mut session = ConversationSession::default();
        session.set_model("gpt-4o").unwrap();
        session.set_temperature(0.2).unwrap();
        session.set_max_output_tokens(1024).unwrap();

        let request = session.compose_request("hi").unwrap();
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 1024);
    }

    #[test]
    fn test_invalid_parameter_leaves_session_unchanged() {
        let mut session = ConversationSession::default();
        assert!(session.set_temperature(3.0).is_err());
        assert!(session.set_max_output_tokens(10).is_err());
        assert!(session.set_model("unknown").is_err());
        assert_eq!(session.parameters(), &SessionParameters::default());
    }

    #[test]
    fn test_record_exchange_appends_four_turns_in_order() {
        let mut session = ConversationSession::default();
        session.record_exchange("hi", "hello!", None, "gpt-4o-mini");

        let turns = session.transcript().turns();
        assert_eq!(
            turns,
            vec![
                Turn::new(TurnRole::Ai, "hello!"),
                Turn::new(TurnRole::Persona, "None"),
                Turn::new(TurnRole::User, "You: hi"),
                Turn::new(TurnRole::Model, "gpt-4o-mini"),
            ]
        );
    }

    #[test]
    fn test_record_exchange_uses_persona_name() {
        let mut session = ConversationSession::default();
        let exchange = session.record_exchange("q", "a", Some("pirate"), "gpt-4o");
        assert_eq!(exchange.persona_label, "pirate");
        assert_eq!(exchange.model_label, "gpt-4o");
        assert_eq!(session.transcript().turn_count(), 4);
    }

    #[test]
    fn test_persona_label_defaults_to_none() {
        let mut session = ConversationSession::default();
        assert_eq!(session.persona_label(), "None");
        session.set_active_persona(Some(Persona::new("pirate", "Arr.").unwrap()));
        assert_eq!(session.persona_label(), "pirate");
        session.set_active_persona(None);
        assert_eq!(session.persona_label(), "None");
    }
}

//! Transcript types.
//!
//! A transcript is an append-only list of exchanges. Each exchange groups the
//! four turns recorded for one user message, so the display layer never has
//! to recover the grouping from positions.

use serde::{Deserialize, Serialize};

/// Role of a single transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The user's message, prefixed for display
    User,
    /// The generated reply
    Ai,
    /// Name of the persona active during the exchange
    Persona,
    /// Name of the model that produced the reply
    Model,
}

impl TurnRole {
    /// Left column: user message and model label. Right column: reply and persona label.
    pub fn is_left(self) -> bool {
        matches!(self, TurnRole::User | TurnRole::Model)
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One user message with its reply and metadata labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Generated reply
    pub reply: String,
    /// Persona label ("None" when no persona was active)
    pub persona_label: String,
    /// User message as displayed ("You: ...")
    pub user_message: String,
    /// Model label
    pub model_label: String,
}

impl Exchange {
    /// The four turns of this exchange in recording order:
    /// reply, persona label, user message, model label.
    pub fn turns(&self) -> [Turn; 4] {
        [
            Turn::new(TurnRole::Ai, self.reply.clone()),
            Turn::new(TurnRole::Persona, self.persona_label.clone()),
            Turn::new(TurnRole::User, self.user_message.clone()),
            Turn::new(TurnRole::Model, self.model_label.clone()),
        ]
    }
}

/// Append-only log of exchanges for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    exchanges: Vec<Exchange>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.exchanges.iter().flat_map(Exchange::turns).collect()
    }

    pub fn turn_count(&self) -> usize {
        self.exchanges.len() * 4
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

//! Transcript rendering and export.
//!
//! Rendering pairs the left and right turns of each exchange and lists the
//! newest exchange first. Export flattens every turn, oldest first, into the
//! downloadable text artifact.

use serde::{Deserialize, Serialize};

use crate::session::{Transcript, Turn};

/// Fixed file name of the exported transcript.
pub const EXPORT_FILE_NAME: &str = "chat_history.txt";

/// One display row: a left turn (user message or model label) next to a
/// right turn (reply or persona label) from the same exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub left: Turn,
    pub right: Turn,
}

/// Renders the transcript into display rows, most recent exchange first.
///
/// Each exchange yields two rows: the metadata row (model label, persona
/// label) followed by the content row (user message, reply).
pub fn render(transcript: &Transcript) -> Vec<DisplayRow> {
    transcript
        .exchanges()
        .iter()
        .rev()
        .flat_map(|exchange| {
            let [reply, persona, user, model] = exchange.turns();
            [
                DisplayRow {
                    left: model,
                    right: persona,
                },
                DisplayRow {
                    left: user,
                    right: reply,
                },
            ]
        })
        .collect()
}

/// Flattens the transcript: every turn's content, one per line, oldest first.
pub fn export_flat(transcript: &Transcript) -> String {
    transcript
        .turns()
        .into_iter()
        .map(|turn| turn.content)
        .collect::<Vec<_>>()
        .join("\n")
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-text annotation attached to a course. Notes are addressed by their
/// stable id, never by position, so concurrent edits from another session
/// cannot redirect a toggle or delete to the wrong note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Payload for creating a note. The id is generated client-side at
/// submission time and doubles as an idempotency key for the add call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub id: Uuid,
    pub text: String,
    pub done: bool,
}

impl NewNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            done: false,
        }
    }
}

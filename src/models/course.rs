use serde::{Deserialize, Serialize};

use crate::models::Note;

/// A course as returned by the remote store. The store owns all durable
/// state; instances held by the client are disposable snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub enrolled: bool,
    #[serde(default)]
    pub progress: u8,
    /// True iff progress == 100. Computed by the store, never client-side.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseUpdate {
    pub name: String,
    pub description: String,
}

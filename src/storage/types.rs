use serde::{Deserialize, Serialize};

use crate::providers::Message;

/// Persisted form of a draft session
///
/// Field names follow the layout the browser client wrote, so existing
/// `teachassist_*_current` values load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// Raw notes the draft was generated from
    pub input_text: String,
    /// Most recent generated output
    pub generated_output: String,
    /// User/assistant exchange so far
    #[serde(default)]
    pub conversation_history: Vec<Message>,
}

/// One completed generation or refinement, kept for recall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Display-formatted creation time (e.g. `Oct 17, 2026, 3:04 PM`)
    pub timestamp: String,
    /// Notes or instruction that produced the content
    pub input: String,
    /// Generated content
    pub content: String,
}

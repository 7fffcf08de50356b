//! Draft session state for one assistant kind

use crate::providers::{Message, Role};
use crate::storage::StoredSession;

/// Stable and transient states of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing generated yet
    Empty,
    /// First generation in flight
    Generating,
    /// A generated output is available
    Ready,
    /// Refinement in flight; the last good output is still shown
    Refining,
}

/// Mutable state of the active assistant tab
///
/// If `generated_output` is `Some`, `transcript` holds at least one `user`
/// message and ends with an `assistant` message whose content equals the
/// output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSession {
    /// Raw notes typed by the teacher
    pub input_text: String,
    /// Most recent result, `None` before the first generation
    pub generated_output: Option<String>,
    /// User/assistant exchange so far
    pub transcript: Vec<Message>,
}

impl DraftSession {
    /// An empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything has been generated
    pub fn has_output(&self) -> bool {
        self.generated_output.is_some()
    }

    /// Stable phase implied by the contents
    pub fn stable_phase(&self) -> SessionPhase {
        if self.has_output() {
            SessionPhase::Ready
        } else {
            SessionPhase::Empty
        }
    }

    /// Check the output/transcript invariant
    pub fn is_consistent(&self) -> bool {
        match &self.generated_output {
            None => true,
            Some(output) => {
                self.transcript.len() >= 2
                    && self.transcript.iter().any(|m| m.role == Role::User)
                    && self
                        .transcript
                        .last()
                        .map(|m| m.role == Role::Assistant && &m.content == output)
                        .unwrap_or(false)
            }
        }
    }

    /// Start a fresh exchange: `[user(prompt), assistant(response)]`
    pub(crate) fn apply_generation(&mut self, prompt: &str, response: &str) {
        self.transcript = vec![Message::user(prompt), Message::assistant(response)];
        self.generated_output = Some(response.to_string());
    }

    /// Extend the exchange with an instruction and its answer
    pub(crate) fn apply_refinement(&mut self, instruction: &str, response: &str) {
        self.transcript.push(Message::user(instruction));
        self.transcript.push(Message::assistant(response));
        self.generated_output = Some(response.to_string());
    }

    /// Persisted form; `None` when there is nothing worth saving
    pub fn to_stored(&self) -> Option<StoredSession> {
        self.generated_output.as_ref().map(|output| StoredSession {
            input_text: self.input_text.clone(),
            generated_output: output.clone(),
            conversation_history: self.transcript.clone(),
        })
    }

    /// Rebuild from the persisted form
    ///
    /// Stored `system` messages (written by older clients) are dropped. A
    /// transcript that does not end in the stored output is replaced by a
    /// minimal `[user, assistant]` exchange so the invariant holds.
    pub fn from_stored(stored: StoredSession) -> Self {
        let transcript: Vec<Message> = stored
            .conversation_history
            .into_iter()
            .filter(|m| m.role != Role::System)
            .collect();

        let mut session = Self {
            input_text: stored.input_text,
            generated_output: Some(stored.generated_output),
            transcript,
        };

        if !session.is_consistent() {
            tracing::warn!("Stored transcript does not match stored output, rebuilding it");
            let output = session.generated_output.clone().unwrap_or_default();
            let input = session.input_text.clone();
            session.apply_generation(&input, &output);
        }

        session
    }
}

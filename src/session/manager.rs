//! Session manager coordinating drafts, history, persistence and the provider
//!
//! The manager owns the state of the active assistant kind. Every operation
//! acts on that kind. A request captures the kind and the activation epoch
//! when it starts; the epoch advances on every `activate` and `clear`, and a
//! response whose capture no longer matches is dropped instead of applied.
//!
//! The state lock is never held while a provider call is outstanding.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard as StdMutexGuard};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::assessment::{validate_image, AssessmentResult, YearLevel};
use crate::config::{Config, SessionConfig};
use crate::error::{Result, TeachAssistError};
use crate::kind::AssistantKind;
use crate::prompts::{self, RefinementPreset};
use crate::providers::{ImageInput, Message, Provider};
use crate::storage::{HistoryEntry, KeyValueStore, Persistence, StoredSession};

use super::composer::compose_refinement;
use super::draft::{DraftSession, SessionPhase};
use super::history::{push_capped, HistoryLog};

/// Result of a request that may have been overtaken by a kind switch
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The response was applied to the session
    Applied(T),
    /// The originating kind was switched away from or cleared before the
    /// response arrived; nothing was changed
    Discarded(AssistantKind),
}

impl<T> Outcome<T> {
    /// The applied value, if any
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Discarded(_) => None,
        }
    }

    /// Whether the response was dropped
    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded(_))
    }
}

/// A draft produced by `generate`, `refine` or `assess`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Kind the draft belongs to
    pub kind: AssistantKind,
    /// Text returned by the provider
    pub content: String,
    /// The session or history could not be written to the store
    pub storage_warning: bool,
}

/// Outcome of a handwriting assessment
#[derive(Debug, Clone, PartialEq)]
pub struct Assessed {
    /// The raw response as stored in the session
    pub generated: Generated,
    /// Parsed criteria, or the raw text when parsing failed
    pub result: AssessmentResult,
}

/// Read-only copy of the active state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Active kind
    pub kind: AssistantKind,
    /// Phase, including an in-flight request for this activation
    pub phase: SessionPhase,
    /// Draft contents
    pub session: DraftSession,
    /// History for the active kind, newest first
    pub history: Vec<HistoryEntry>,
}

struct ActiveState {
    kind: AssistantKind,
    epoch: u64,
    session: DraftSession,
    history: Vec<HistoryEntry>,
}

impl ActiveState {
    fn matches(&self, ticket: &Ticket) -> bool {
        self.kind == ticket.kind && self.epoch == ticket.epoch
    }
}

#[derive(Debug, Clone, Copy)]
struct Ticket {
    kind: AssistantKind,
    epoch: u64,
}

type PendingMap = HashMap<AssistantKind, (SessionPhase, u64)>;

/// Releases the per-kind request slot, also when the request future is dropped
struct PendingGuard<'a> {
    pending: &'a StdMutex<PendingMap>,
    kind: AssistantKind,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock_pending(self.pending).remove(&self.kind);
    }
}

fn lock_pending(pending: &StdMutex<PendingMap>) -> StdMutexGuard<'_, PendingMap> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Orchestrates generation, refinement and assessment for the active kind
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use teachassist::config::Config;
/// use teachassist::kind::AssistantKind;
/// use teachassist::session::SessionManager;
/// use teachassist::storage::MemoryStore;
///
/// # async fn example(provider: Arc<dyn teachassist::providers::Provider>) -> teachassist::error::Result<()> {
/// let manager = SessionManager::new(provider, Arc::new(MemoryStore::new()), &Config::default());
/// manager.activate(AssistantKind::Report).await;
/// let outcome = manager.generate("Sophie works hard in maths").await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    provider: Option<Arc<dyn Provider>>,
    persistence: Persistence,
    history_log: HistoryLog,
    settings: SessionConfig,
    request_timeout: Duration,
    state: Mutex<ActiveState>,
    pending: StdMutex<PendingMap>,
}

impl SessionManager {
    /// Creates a manager with the report assistant active
    ///
    /// The persisted report session and history are loaded immediately.
    pub fn new(provider: Arc<dyn Provider>, store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        Self::build(Some(provider), store, config)
    }

    /// Creates a manager over the store alone
    ///
    /// Viewing, clearing and history work as usual; `generate`, `refine` and
    /// `assess` fail with a configuration error.
    pub fn local(store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        Self::build(None, store, config)
    }

    fn build(
        provider: Option<Arc<dyn Provider>>,
        store: Arc<dyn KeyValueStore>,
        config: &Config,
    ) -> Self {
        let persistence = Persistence::new(store);
        let history_log = HistoryLog::new(persistence.clone());
        let kind = AssistantKind::Report;
        let session = load_session(&persistence, kind);
        let history = history_log.list(kind);

        Self {
            provider,
            persistence,
            history_log,
            settings: config.session.clone(),
            request_timeout: Duration::from_secs(config.provider.timeout_seconds),
            state: Mutex::new(ActiveState {
                kind,
                epoch: 0,
                session,
                history,
            }),
            pending: StdMutex::new(HashMap::new()),
        }
    }

    /// Override the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Switch the active kind
    ///
    /// The outgoing session is persisted when it has output, then the incoming
    /// session and its history are loaded. Returns `false` if `kind` was
    /// already active.
    pub async fn activate(&self, kind: AssistantKind) -> bool {
        let mut state = self.state.lock().await;
        if state.kind == kind {
            return false;
        }

        if let Some(stored) = state.session.to_stored() {
            self.persistence.save(&state.kind.current_key(), &stored);
        }

        debug!("Switching from {} to {}", state.kind, kind);
        state.kind = kind;
        state.epoch += 1;
        state.session = load_session(&self.persistence, kind);
        state.history = self.history_log.list(kind);
        true
    }

    /// Currently active kind
    pub async fn active_kind(&self) -> AssistantKind {
        self.state.lock().await.kind
    }

    /// Replace the input notes; nothing is persisted
    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.session.input_text = text.into();
    }

    /// Reset the active session and delete its persisted slot
    ///
    /// History is kept. A response still in flight for this kind is dropped.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.session = DraftSession::new();
        state.epoch += 1;
        self.persistence.clear(&state.kind.current_key());
        info!("Cleared {} session", state.kind);
    }

    /// Delete the history of the active kind
    pub async fn clear_history(&self) {
        let mut state = self.state.lock().await;
        state.history.clear();
        self.history_log.clear(state.kind);
        info!("Cleared {} history", state.kind);
    }

    /// History of the active kind, newest first
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history.clone()
    }

    /// Phase of the active session
    pub async fn phase(&self) -> SessionPhase {
        let state = self.state.lock().await;
        self.phase_of(&state)
    }

    /// Copy of the active state
    pub async fn snapshot(&self) -> SessionView {
        let state = self.state.lock().await;
        SessionView {
            kind: state.kind,
            phase: self.phase_of(&state),
            session: state.session.clone(),
            history: state.history.clone(),
        }
    }

    /// Generate a first draft from `input`
    ///
    /// On success the transcript becomes exactly `[user(input),
    /// assistant(response)]`, the session is persisted and a history entry
    /// is recorded.
    ///
    /// # Errors
    ///
    /// - `InputRequired` if `input` is blank
    /// - `UnsupportedKind` when the writing assessment is active
    /// - `Busy` if a request for this kind is outstanding
    /// - `Generation` if the provider fails, times out or returns nothing
    ///
    /// None of these change the session.
    pub async fn generate(&self, input: &str) -> Result<Outcome<Generated>> {
        if input.trim().is_empty() {
            return Err(TeachAssistError::InputRequired.into());
        }

        let (ticket, _guard) = {
            let state = self.state.lock().await;
            require_text_kind(state.kind, "drafts are generated from an uploaded image")?;
            let guard = self.reserve(state.kind, state.epoch, SessionPhase::Generating)?;
            (ticket_of(&state), guard)
        };
        let provider = self.provider()?;

        info!("Generating {} draft", ticket.kind);
        let system_prompt = prompts::system_prompt(ticket.kind);
        let messages = [Message::user(input)];
        let response = self
            .call_provider(provider.name(), provider.complete(&system_prompt, &messages))
            .await?;

        let mut state = self.state.lock().await;
        if !state.matches(&ticket) {
            warn!("Discarding stale {} draft", ticket.kind);
            return Ok(Outcome::Discarded(ticket.kind));
        }

        state.session.input_text = input.to_string();
        state.session.apply_generation(input, &response);
        let entry = HistoryEntry::now(input, response.as_str());
        let storage_warning = !self.persist(&mut state, Some(entry));

        Ok(Outcome::Applied(Generated {
            kind: ticket.kind,
            content: response,
            storage_warning,
        }))
    }

    /// Refine the current draft with `instruction`
    ///
    /// The provider receives the whole transcript followed by the
    /// instruction. On failure the transcript is left as it was.
    ///
    /// # Errors
    ///
    /// - `NoRefinementsSelected` if `instruction` is blank
    /// - `NothingToRefine` if nothing has been generated yet
    /// - `UnsupportedKind` when the writing assessment is active
    /// - `Busy` if a request for this kind is outstanding
    /// - `Generation` if the provider call fails
    pub async fn refine(&self, instruction: &str) -> Result<Outcome<Generated>> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(TeachAssistError::NoRefinementsSelected.into());
        }

        let (ticket, messages, _guard) = {
            let state = self.state.lock().await;
            require_text_kind(state.kind, "assessments cannot be refined")?;
            if !state.session.has_output() {
                return Err(TeachAssistError::NothingToRefine(state.kind).into());
            }
            let guard = self.reserve(state.kind, state.epoch, SessionPhase::Refining)?;
            let mut messages = state.session.transcript.clone();
            messages.push(Message::user(instruction));
            (ticket_of(&state), messages, guard)
        };
        let provider = self.provider()?;

        info!("Refining {} draft", ticket.kind);
        debug!("Refinement instruction: {}", instruction);
        let system_prompt = prompts::system_prompt(ticket.kind);
        let response = self
            .call_provider(provider.name(), provider.complete(&system_prompt, &messages))
            .await?;

        let mut state = self.state.lock().await;
        if !state.matches(&ticket) {
            warn!("Discarding stale {} refinement", ticket.kind);
            return Ok(Outcome::Discarded(ticket.kind));
        }

        state.session.apply_refinement(instruction, &response);
        let entry = self
            .settings
            .record_refinements
            .then(|| HistoryEntry::now(instruction, response.as_str()));
        let storage_warning = !self.persist(&mut state, entry);

        Ok(Outcome::Applied(Generated {
            kind: ticket.kind,
            content: response,
            storage_warning,
        }))
    }

    /// Compose presets and free text into one instruction, then refine
    ///
    /// # Errors
    ///
    /// `UnsupportedKind` if a preset is not offered for the active kind, plus
    /// everything [`refine`](Self::refine) returns
    pub async fn refine_with(
        &self,
        presets: &[RefinementPreset],
        custom: Option<&str>,
    ) -> Result<Outcome<Generated>> {
        let kind = self.active_kind().await;
        if let Some(preset) = presets.iter().find(|p| !p.applies_to(kind)) {
            return Err(TeachAssistError::UnsupportedKind {
                kind,
                message: format!("preset '{}' is not offered", preset),
            }
            .into());
        }

        let instruction = compose_refinement(presets, custom)?;
        self.refine(&instruction).await
    }

    /// Assess a handwriting sample for a student at `year_level`
    ///
    /// Only available while the writing assessment is active. The session
    /// input stays empty; the transcript holds the year-level request and the
    /// raw response.
    ///
    /// # Errors
    ///
    /// - `InvalidImage` for a missing, oversized or non-image upload
    /// - `UnsupportedKind` when another kind is active
    /// - `Busy` if an assessment is outstanding
    /// - `Generation` if the provider call fails
    pub async fn assess(
        &self,
        year_level: YearLevel,
        image: &ImageInput,
    ) -> Result<Outcome<Assessed>> {
        validate_image(image)?;

        let (ticket, _guard) = {
            let state = self.state.lock().await;
            if state.kind != AssistantKind::WritingAssessment {
                return Err(TeachAssistError::UnsupportedKind {
                    kind: state.kind,
                    message: "handwriting assessment needs the writing-assessment kind"
                        .to_string(),
                }
                .into());
            }
            let guard = self.reserve(state.kind, state.epoch, SessionPhase::Generating)?;
            (ticket_of(&state), guard)
        };
        let provider = self.provider()?;

        let request = year_level.request_text();
        info!("Assessing {} handwriting sample", year_level);
        let system_prompt = prompts::system_prompt(ticket.kind);
        let response = self
            .call_provider(
                provider.name(),
                provider.complete_with_image(&system_prompt, &request, image),
            )
            .await?;

        let mut state = self.state.lock().await;
        if !state.matches(&ticket) {
            warn!("Discarding stale assessment");
            return Ok(Outcome::Discarded(ticket.kind));
        }

        state.session.input_text = String::new();
        state.session.apply_generation(&request, &response);
        let entry = HistoryEntry::now(request.as_str(), response.as_str());
        let storage_warning = !self.persist(&mut state, Some(entry));
        let result = AssessmentResult::parse(&response);

        Ok(Outcome::Applied(Assessed {
            generated: Generated {
                kind: ticket.kind,
                content: response,
                storage_warning,
            },
            result,
        }))
    }

    fn phase_of(&self, state: &ActiveState) -> SessionPhase {
        match lock_pending(&self.pending).get(&state.kind) {
            Some((phase, epoch)) if *epoch == state.epoch => *phase,
            _ => state.session.stable_phase(),
        }
    }

    fn reserve(
        &self,
        kind: AssistantKind,
        epoch: u64,
        phase: SessionPhase,
    ) -> Result<PendingGuard<'_>> {
        let mut pending = lock_pending(&self.pending);
        if pending.contains_key(&kind) {
            return Err(TeachAssistError::Busy(kind).into());
        }
        pending.insert(kind, (phase, epoch));
        Ok(PendingGuard {
            pending: &self.pending,
            kind,
        })
    }

    fn provider(&self) -> Result<&Arc<dyn Provider>> {
        self.provider.as_ref().ok_or_else(|| {
            TeachAssistError::Config("no generation provider is configured".to_string()).into()
        })
    }

    /// Run a provider call under the request timeout
    ///
    /// Every failure comes back as `TeachAssistError::Generation`, and a blank
    /// response counts as a failure.
    async fn call_provider<F>(&self, provider_name: &str, call: F) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        let response = match tokio::time::timeout(self.request_timeout, call).await {
            Err(_) => {
                warn!(
                    "{} request timed out after {:?}",
                    provider_name, self.request_timeout
                );
                return Err(TeachAssistError::generation(format!(
                    "Request timed out after {} seconds",
                    self.request_timeout.as_secs_f64()
                ))
                .into());
            }
            Ok(Err(e)) => {
                warn!("{} request failed: {}", provider_name, e);
                return Err(match e.downcast::<TeachAssistError>() {
                    Ok(err @ TeachAssistError::Generation { .. }) => err.into(),
                    Ok(other) => TeachAssistError::generation(other.to_string()).into(),
                    Err(other) => TeachAssistError::generation(other.to_string()).into(),
                });
            }
            Ok(Ok(response)) => response,
        };

        if response.trim().is_empty() {
            return Err(
                TeachAssistError::generation("No content generated from AI service").into(),
            );
        }
        Ok(response)
    }

    /// Save the session and, when given, record a history entry
    ///
    /// Returns `false` if any write failed; the in-memory state is updated
    /// either way.
    fn persist(&self, state: &mut ActiveState, entry: Option<HistoryEntry>) -> bool {
        let mut saved = match state.session.to_stored() {
            Some(stored) => self.persistence.save(&state.kind.current_key(), &stored),
            None => true,
        };

        if let Some(entry) = entry {
            saved &= self.history_log.append(state.kind, entry.clone());
            push_capped(&mut state.history, entry);
        }

        if !saved {
            warn!("{} output was not saved; it may be lost on restart", state.kind);
        }
        saved
    }
}

fn ticket_of(state: &ActiveState) -> Ticket {
    Ticket {
        kind: state.kind,
        epoch: state.epoch,
    }
}

fn require_text_kind(kind: AssistantKind, reason: &str) -> Result<()> {
    if kind.is_text() {
        Ok(())
    } else {
        Err(TeachAssistError::UnsupportedKind {
            kind,
            message: reason.to_string(),
        }
        .into())
    }
}

fn load_session(persistence: &Persistence, kind: AssistantKind) -> DraftSession {
    persistence
        .load::<StoredSession>(&kind.current_key())
        .map(DraftSession::from_stored)
        .unwrap_or_default()
}

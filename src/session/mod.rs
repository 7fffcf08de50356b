//! Draft sessions, history, refinement composition and orchestration

pub mod composer;
pub mod draft;
pub mod history;
pub mod manager;

pub use composer::{compose_refinement, RefinementSelection, REFINEMENT_PREFIX};
pub use draft::{DraftSession, SessionPhase};
pub use history::{HistoryLog, HISTORY_CAPACITY};
pub use manager::{Assessed, Generated, Outcome, SessionManager, SessionView};

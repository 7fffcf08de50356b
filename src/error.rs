//! Error types for TeachAssist
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::kind::AssistantKind;

/// Main error type for TeachAssist operations
///
/// Validation conditions (`InputRequired`, `NoRefinementsSelected`,
/// `NothingToRefine`, `InvalidImage`, `Busy`) are raised before any state is
/// touched or any request is issued. `Generation` covers everything that can
/// go wrong at the provider boundary.
#[derive(Error, Debug)]
pub enum TeachAssistError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider construction or protocol errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// The input notes were empty after trimming
    #[error("Input required: please enter information to generate content")]
    InputRequired,

    /// No preset was selected and no custom instruction was given
    #[error("No refinements selected: select at least one refinement option or enter custom instructions")]
    NoRefinementsSelected,

    /// Refinement was requested before anything was generated
    #[error("Nothing to refine: generate a draft for {0} first")]
    NothingToRefine(AssistantKind),

    /// A request for this kind is already outstanding
    #[error("A request for {0} is already in progress")]
    Busy(AssistantKind),

    /// The operation is not available for this kind
    #[error("Operation not supported for {kind}: {message}")]
    UnsupportedKind {
        /// The kind the operation was attempted on
        kind: AssistantKind,
        /// What was attempted
        message: String,
    },

    /// The handwriting sample was missing, too large, or not an image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The provider call failed, timed out, or returned nothing usable
    #[error("Generation failed: {message}")]
    Generation {
        /// Upstream detail when available, otherwise a generic description
        message: String,
    },

    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TeachAssistError {
    /// Builds a `Generation` error from any displayable message
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

/// Result type alias for TeachAssist operations
///
/// Uses `anyhow::Error` so call sites can attach context; callers that need
/// to branch on a condition use `downcast_ref::<TeachAssistError>()`.
pub type Result<T> = anyhow::Result<T>;

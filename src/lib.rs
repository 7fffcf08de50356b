//! TeachAssist - AI drafting assistant library
//!
//! This library provides the core functionality behind the `teachassist`
//! CLI: drafting school reports, learning plans and lesson plans from a
//! teacher's notes, refining drafts through follow-up instructions, keeping
//! a short history per assistant, and assessing handwriting samples.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `kind`: The fixed set of assistant kinds and their storage keys
//! - `session`: Draft state, history, refinement composition and the
//!   session manager that orchestrates requests
//! - `prompts`: System prompts and refinement presets
//! - `providers`: Generation boundary and the OpenRouter implementation
//! - `storage`: Key-value persistence (sled, in-memory)
//! - `assessment`: Year levels, image validation and assessment parsing
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use teachassist::{Config, SessionManager};
//! use teachassist::providers::create_provider;
//! use teachassist::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let manager = SessionManager::new(provider, Arc::new(MemoryStore::new()), &config);
//!     manager.generate("Sophie is a keen reader who struggles with fractions").await?;
//!     Ok(())
//! }
//! ```

pub mod assessment;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod kind;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TeachAssistError};
pub use kind::AssistantKind;
pub use session::{Outcome, SessionManager};

#[cfg(test)]
pub mod test_utils;

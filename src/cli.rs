//! Command-line interface definition for TeachAssist
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for drafting, refining, assessing and history.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::assessment::YearLevel;
use crate::kind::AssistantKind;
use crate::prompts::RefinementPreset;

/// TeachAssist - AI drafting assistant for teachers
///
/// Turns rough notes into school reports, learning plans and lesson plans,
/// refines them with follow-up instructions, and assesses handwriting
/// samples.
#[derive(Parser, Debug, Clone)]
#[command(name = "teachassist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the local store location
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for TeachAssist
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a first draft from notes
    Generate {
        /// Assistant kind (report, learning-plan, lesson-plan)
        #[arg(short, long)]
        kind: AssistantKind,

        /// Notes to draft from
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        input: Option<String>,

        /// Read notes from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Refine the current draft
    Refine {
        /// Assistant kind (report, learning-plan, lesson-plan)
        #[arg(short, long)]
        kind: AssistantKind,

        /// Preset to apply; repeat for several (see `presets`)
        #[arg(short, long = "preset")]
        presets: Vec<RefinementPreset>,

        /// Free-text instruction, applied after the presets
        #[arg(long)]
        custom: Option<String>,
    },

    /// Print the current draft
    Show {
        /// Assistant kind
        #[arg(short, long)]
        kind: AssistantKind,
    },

    /// Discard the current draft; history is kept
    Clear {
        /// Assistant kind
        #[arg(short, long)]
        kind: AssistantKind,
    },

    /// List the refinement presets offered for a kind
    Presets {
        /// Assistant kind
        #[arg(short, long)]
        kind: AssistantKind,
    },

    /// Inspect or clear generation history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Assess a handwriting sample
    Assess {
        /// Year level of the student (Foundation, Year1 .. Year6)
        #[arg(short, long)]
        year_level: YearLevel,

        /// Image of the handwriting sample (max 3MB)
        #[arg(long)]
        image: PathBuf,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List the most recent generations
    List {
        /// Assistant kind
        #[arg(short, long)]
        kind: AssistantKind,

        /// Print full contents instead of a table
        #[arg(long)]
        full: bool,
    },

    /// Delete all history for a kind
    Clear {
        /// Assistant kind
        #[arg(short, long)]
        kind: AssistantKind,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// Whether the command talks to the generation provider
    pub fn needs_provider(&self) -> bool {
        matches!(
            self,
            Self::Generate { .. } | Self::Refine { .. } | Self::Assess { .. }
        )
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            store: None,
            command: Commands::Show {
                kind: AssistantKind::Report,
            },
        }
    }
}

//! TeachAssist - AI drafting assistant for teachers
//!
#![doc = "TeachAssist - AI drafting assistant for teachers"]
#![doc = "Main entry point for the TeachAssist command-line tool."]

use anyhow::Result;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use teachassist::cli::{Cli, Commands};
use teachassist::commands;
use teachassist::config::Config;
use teachassist::providers::create_provider;
use teachassist::session::SessionManager;
use teachassist::storage::{KeyValueStore, SledStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Presets are static and need neither config nor credentials
    if let Commands::Presets { kind } = &cli.command {
        return commands::draft::run_presets(*kind);
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Process-wide resources, created once and shared
    let store: Arc<dyn KeyValueStore> = match &config.storage.path {
        Some(path) => Arc::new(SledStore::open(path)?),
        None => Arc::new(SledStore::open_default()?),
    };
    // Only requests need credentials; viewing and clearing work offline
    let manager = if cli.command.needs_provider() {
        let provider = create_provider(&config.provider)?;
        tracing::debug!("Using model {}", config.provider.model);
        SessionManager::new(provider, store, &config)
    } else {
        SessionManager::local(store, &config)
    };

    // Execute command
    match cli.command {
        Commands::Generate { kind, input, file } => {
            tracing::info!("Starting {} generation", kind);
            commands::draft::run_generate(&manager, kind, input, file).await?;
        }
        Commands::Refine {
            kind,
            presets,
            custom,
        } => {
            tracing::info!("Starting {} refinement", kind);
            commands::draft::run_refine(&manager, kind, presets, custom).await?;
        }
        Commands::Show { kind } => {
            commands::draft::run_show(&manager, kind).await?;
        }
        Commands::Clear { kind } => {
            commands::draft::run_clear(&manager, kind).await?;
        }
        Commands::Presets { kind } => {
            commands::draft::run_presets(kind)?;
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(&manager, command).await?;
        }
        Commands::Assess { year_level, image } => {
            tracing::info!("Starting handwriting assessment");
            commands::assess::run_assess(&manager, year_level, &image).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "teachassist=debug"
    } else {
        "teachassist=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

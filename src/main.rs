//! TrimX timeline trimmer
//!
//! Command-line front end of the trim timeline engine. Clips come from a TOML
//! catalog and committed trims are written to a directory of JSON records.
//!
//! # Usage
//!
//! ```bash
//! trimmer show --clip beach
//! trimmer trim --clip beach --start 0:10 --end 0:25 --aspect 9:16 --name "Beach short"
//! trimmer replay --clip beach --script session.json
//! trimmer overlay --width 400 --height 300
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use trimx_timeline::adapters::{init_tracing, EditorConfig};
use trimx_timeline::app::DefaultAppContainer;
use trimx_timeline::cli::{commands, Cli, Commands};
use trimx_timeline::config_initialization::initialize_configuration;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!("Starting TrimX timeline trimmer");

    // Execute the requested command
    match cli.command {
        Commands::Show(args) => commands::show(&container(&config)?, args).await?,
        Commands::Trim(args) => commands::trim(&container(&config)?, args).await?,
        Commands::Replay(args) => commands::replay(&container(&config)?, args).await?,
        Commands::Overlay(args) => commands::overlay(args)?,
    }

    Ok(())
}

/// Catalog and store are only wired for commands that open a clip
fn container(config: &EditorConfig) -> Result<DefaultAppContainer> {
    DefaultAppContainer::new(config).context("Failed to initialize application")
}

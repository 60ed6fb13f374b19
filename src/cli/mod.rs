//! CLI module for the trimmer
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::ConfigOverrides;

pub mod args;
pub mod commands;
pub mod script;

pub use args::{OverlayArgs, ReplayArgs, ShowArgs, TrimArgs};

/// TrimX timeline trimmer
///
/// Opens a clip from the catalog, applies an in/out selection and commits it
/// to the trim store, either over the original clip or as a new one.
#[derive(Parser)]
#[command(name = "trimmer")]
#[command(about = "TrimX timeline trimmer - select a range of a clip and commit it")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./trimmer.toml when present)
    #[arg(long, env = "TRIMX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Clip catalog file
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory receiving committed trims
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Timeline track width in pixels
    #[arg(long, global = true)]
    pub track_width: Option<f64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Command-line layer of the configuration hierarchy
    pub fn overrides(&self) -> ConfigOverrides {
        let default_owner = match &self.command {
            Commands::Trim(args) => args.owner.clone(),
            _ => None,
        };
        ConfigOverrides {
            catalog_path: self.catalog.clone(),
            store_dir: self.store_dir.clone(),
            track_width_px: self.track_width,
            default_owner,
            log_level: self.log_level.clone(),
            log_json: self.log_json,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show a clip's editing state after its media loads
    Show(ShowArgs),
    /// Select a range and commit it
    Trim(TrimArgs),
    /// Replay a recorded script of editor events against a clip
    Replay(ReplayArgs),
    /// Compute the crop overlay for a rendered frame box
    Overlay(OverlayArgs),
}

//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::AspectPreset;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Clip id in the catalog
    #[arg(short, long)]
    pub clip: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Clip id in the catalog
    #[arg(short, long)]
    pub clip: String,

    /// Start time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// End time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Aspect ratio preset (16:9, 1:1, 3:4, 9:16)
    #[arg(long)]
    pub aspect: Option<AspectPreset>,

    /// Save as a new clip with this name instead of overwriting
    #[arg(long)]
    pub name: Option<String>,

    /// Owner id used when the clip record has none
    #[arg(long)]
    pub owner: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the replay command
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Clip id in the catalog
    #[arg(short, long)]
    pub clip: String,

    /// JSON script of editor events
    #[arg(short, long)]
    pub script: PathBuf,
}

/// Arguments for the overlay command
#[derive(Args, Debug)]
pub struct OverlayArgs {
    /// Rendered frame width in pixels
    #[arg(long)]
    pub width: f64,

    /// Rendered frame height in pixels
    #[arg(long)]
    pub height: f64,

    /// Only this preset (default: all presets)
    #[arg(long)]
    pub aspect: Option<AspectPreset>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

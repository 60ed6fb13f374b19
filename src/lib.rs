//! TrimX Timeline Library
//!
//! The trim timeline engine: an in/out selection over a media clip, a
//! playback controller that keeps the media element inside it, the crop
//! overlay for aspect presets, and the save workflow that commits the
//! selection to a persistence service.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{EditSession, OpenSessionInteractor, SaveCommand};
pub use domain::errors::DomainError;
pub use domain::model::{AspectPreset, ClipRecord, ClipTimeRange, TrimRequest, TrimResponse};
pub use error::{TrimlineError, TrimlineResult};

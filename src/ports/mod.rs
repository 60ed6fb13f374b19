// Ports - Interface definitions (contracts) for the collaborators the engine drives

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Notifications emitted by a media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MediaEvent {
    MetadataLoaded { duration: f64 },
    TimeUpdate { current_time: f64 },
    PlayStateChanged { playing: bool },
    Error { reason: String },
}

/// Port for the media element that decodes and renders the clip.
///
/// The engine holds a reference to it and issues commands; it never manages
/// the element's lifecycle. Results of `load` arrive later as `MediaEvent`s.
pub trait MediaElementPort: Send + Sync {
    /// Begin loading a source
    fn load(&self, source_url: &str);

    /// Move the playback position
    fn set_current_time(&self, seconds: f64);

    /// Volume in `[0.0, 1.0]`
    fn set_volume(&self, volume: f64);

    fn play(&self);

    fn pause(&self);
}

/// Port for the service that performs the actual trim and stores the result
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Commit one trim. Transport failures are `Err`; a service-side
    /// rejection is `Ok` with `success == false`.
    async fn trim(&self, request: &TrimRequest) -> Result<TrimResponse, DomainError>;
}

/// Port for resolving a clip identifier to its metadata
#[async_trait]
pub trait ClipLookupPort: Send + Sync {
    /// Fetch a clip record; `DomainError::NotFound` when the id is unknown
    async fn find_clip(&self, id: &str) -> Result<ClipRecord, DomainError>;
}

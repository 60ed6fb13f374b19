// Open session interactor - Resolves a clip once and starts an editing session

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::edit_session::{EditSession, SessionSettings};
use crate::domain::errors::*;
use crate::ports::*;

/// Interactor for the "open clip for editing" use case
pub struct OpenSessionInteractor {
    lookup_port: Arc<dyn ClipLookupPort>,
    persistence_port: Arc<dyn PersistencePort>,
    settings: SessionSettings,
}

impl OpenSessionInteractor {
    /// Create new interactor with injected ports
    pub fn new(
        lookup_port: Arc<dyn ClipLookupPort>,
        persistence_port: Arc<dyn PersistencePort>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            lookup_port,
            persistence_port,
            settings,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Look the clip up and open a session driving `media`.
    /// The lookup service is consulted exactly once per call.
    pub async fn open(
        &self,
        clip_id: &str,
        media: Arc<dyn MediaElementPort>,
    ) -> Result<EditSession, DomainError> {
        let clip_id = clip_id.trim();
        if clip_id.is_empty() {
            return Err(DomainError::BadArgs("Clip id cannot be empty".to_string()));
        }

        let clip = self.lookup_port.find_clip(clip_id).await.map_err(|err| {
            warn!(clip = clip_id, error = %err, "Clip lookup failed");
            err
        })?;
        if clip.url.trim().is_empty() {
            return Err(DomainError::ValidationFailed(format!(
                "Clip {} has no media url",
                clip.id
            )));
        }

        info!(clip = %clip.id, url = %clip.url, "Opening clip for editing");
        Ok(EditSession::new(
            clip,
            media,
            Arc::clone(&self.persistence_port),
            self.settings.clone(),
        ))
    }
}

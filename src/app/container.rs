use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::adapters::{CatalogAdapter, EditorConfig, HeadlessMediaElement, JsonStoreAdapter};
use crate::app::edit_session::SessionSettings;
use crate::app::open_interactor::OpenSessionInteractor;
use crate::error::TrimlineResult;
use crate::ports::{ClipLookupPort, PersistencePort};

pub trait AppContainer: Send + Sync {
    fn open_session_interactor(&self) -> Arc<OpenSessionInteractor>;
    /// A fresh media element for one editing session
    fn media_element(&self) -> Arc<HeadlessMediaElement>;
}

pub struct DefaultAppContainer {
    open_session_interactor: Arc<OpenSessionInteractor>,
    media_library: HashMap<String, f64>,
}

impl DefaultAppContainer {
    /// Wire the catalog and JSON store named by `config`
    pub fn new(config: &EditorConfig) -> TrimlineResult<Self> {
        let catalog = CatalogAdapter::load(&config.catalog_path)?;
        let media_library = catalog.durations();
        let store = JsonStoreAdapter::new(config.store_dir.clone(), config.store_quota);
        debug!(
            catalog = %config.catalog_path.display(),
            store = %config.store_dir.display(),
            "Wiring application container"
        );

        Ok(Self::with_ports(
            Arc::new(catalog),
            Arc::new(store),
            media_library,
            Self::settings(config),
        ))
    }

    /// Wire explicit ports; the media library maps source urls to durations
    pub fn with_ports(
        lookup_port: Arc<dyn ClipLookupPort>,
        persistence_port: Arc<dyn PersistencePort>,
        media_library: HashMap<String, f64>,
        settings: SessionSettings,
    ) -> Self {
        let open_session_interactor = Arc::new(OpenSessionInteractor::new(
            lookup_port,
            persistence_port,
            settings,
        ));

        Self {
            open_session_interactor,
            media_library,
        }
    }

    pub fn settings(config: &EditorConfig) -> SessionSettings {
        SessionSettings {
            track_width_px: config.track_width_px,
            default_aspect: config.default_aspect,
            default_owner: config.default_owner.clone(),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn open_session_interactor(&self) -> Arc<OpenSessionInteractor> {
        Arc::clone(&self.open_session_interactor)
    }

    fn media_element(&self) -> Arc<HeadlessMediaElement> {
        Arc::new(HeadlessMediaElement::new(self.media_library.clone()))
    }
}

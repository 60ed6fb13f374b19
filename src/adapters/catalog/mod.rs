// Catalog adapter - Clip lookup backed by a TOML catalog file

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::{TrimlineError, TrimlineResult};
use crate::ports::*;

/// One `[[clips]]` entry of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<AspectPreset>,
    /// Known media length, used by the headless media element
    #[serde(default)]
    pub duration: Option<f64>,
}

impl CatalogEntry {
    pub fn record(&self) -> ClipRecord {
        ClipRecord {
            id: self.id.clone(),
            url: self.url.clone(),
            name: self.name.clone(),
            owner_id: self.owner_id.clone(),
            aspect_ratio: self.aspect_ratio,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    clips: Vec<CatalogEntry>,
}

/// Clip lookup over an in-memory catalog
#[derive(Debug, Default)]
pub struct CatalogAdapter {
    clips: HashMap<String, CatalogEntry>,
}

impl CatalogAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document
    pub fn from_toml(content: &str) -> TrimlineResult<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| TrimlineError::CatalogError {
            message: e.to_string(),
        })?;

        let mut adapter = Self::new();
        for entry in file.clips {
            if adapter.clips.contains_key(&entry.id) {
                return Err(TrimlineError::CatalogError {
                    message: format!("Duplicate clip id: {}", entry.id),
                });
            }
            adapter.clips.insert(entry.id.clone(), entry);
        }
        Ok(adapter)
    }

    /// Read a catalog file
    pub fn load(path: &Path) -> TrimlineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let adapter = Self::from_toml(&content)?;
        debug!(path = %path.display(), clips = adapter.clips.len(), "Loaded clip catalog");
        Ok(adapter)
    }

    /// Known durations keyed by source url
    pub fn durations(&self) -> HashMap<String, f64> {
        self.clips
            .values()
            .filter_map(|entry| entry.duration.map(|d| (entry.url.clone(), d)))
            .collect()
    }
}

#[async_trait]
impl ClipLookupPort for CatalogAdapter {
    async fn find_clip(&self, id: &str) -> Result<ClipRecord, DomainError> {
        self.clips
            .get(id)
            .map(CatalogEntry::record)
            .ok_or_else(|| DomainError::NotFound(format!("Video not found: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        [[clips]]
        id = "abc"
        url = "https://cdn.example/abc.mp4"
        name = "Beach"
        owner_id = "u1"
        aspect_ratio = "1:1"
        duration = 42.0

        [[clips]]
        id = "def"
        url = "https://cdn.example/def.mp4"
        name = "City"
    "#;

    #[tokio::test]
    async fn test_find_clip() {
        let catalog = CatalogAdapter::from_toml(CATALOG).unwrap();
        let clip = catalog.find_clip("abc").await.unwrap();
        assert_eq!(clip.name, "Beach");
        assert_eq!(clip.aspect_ratio, Some(AspectPreset::Square));
        assert_eq!(clip.owner_id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_unknown_clip_not_found() {
        let catalog = CatalogAdapter::from_toml(CATALOG).unwrap();
        let err = catalog.find_clip("zzz").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_durations_only_for_known_lengths() {
        let catalog = CatalogAdapter::from_toml(CATALOG).unwrap();
        let durations = catalog.durations();
        assert_eq!(durations.len(), 1);
        assert_eq!(durations["https://cdn.example/abc.mp4"], 42.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let doubled = format!("{}\n{}", CATALOG, CATALOG);
        assert!(CatalogAdapter::from_toml(&doubled).is_err());
    }
}

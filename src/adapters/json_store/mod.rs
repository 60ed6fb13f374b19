// JSON store adapter - Persists committed trims as JSON records in a directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Message returned when the store is full
pub const QUOTA_EXCEEDED: &str = "quota exceeded";

/// A committed trim as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTrim {
    pub committed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: TrimRequest,
}

/// Persistence adapter writing one JSON file per commit
pub struct JsonStoreAdapter {
    dir: PathBuf,
    quota: Option<usize>,
}

impl JsonStoreAdapter {
    pub fn new(dir: impl Into<PathBuf>, quota: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            quota,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every stored record, oldest first
    pub async fn list(&self) -> Result<Vec<StoredTrim>, DomainError> {
        let mut records = Vec::new();
        for path in self.record_paths().await? {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                DomainError::FsFail(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let record: StoredTrim = serde_json::from_str(&content).map_err(|e| {
                DomainError::FsFail(format!("Corrupt trim record {}: {}", path.display(), e))
            })?;
            records.push(record);
        }
        records.sort_by_key(|r| r.committed_at);
        Ok(records)
    }

    async fn record_paths(&self) -> Result<Vec<PathBuf>, DomainError> {
        let mut paths = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(paths),
            Err(e) => return Err(DomainError::FsFail(format!("Failed to read store: {}", e))),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to read store: {}", e)))?
        {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Service-side checks; a failure here is a rejection, not a transport error
    fn check_request(request: &TrimRequest) -> Option<String> {
        if request.source_url.trim().is_empty() {
            return Some("source url is required".to_string());
        }
        if request.name.trim().is_empty() {
            return Some("name is required".to_string());
        }
        if !(request.start_time >= 0.0 && request.end_time > request.start_time) {
            return Some(format!(
                "invalid range {}..{}",
                request.start_time, request.end_time
            ));
        }
        None
    }

    fn file_name(committed_at: &DateTime<Utc>, name: &str) -> String {
        let slug: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        format!("{}-{}.json", committed_at.format("%Y%m%dT%H%M%S%.6f"), slug)
    }
}

#[async_trait]
impl PersistencePort for JsonStoreAdapter {
    async fn trim(&self, request: &TrimRequest) -> Result<TrimResponse, DomainError> {
        if let Some(reason) = Self::check_request(request) {
            warn!(%reason, "Rejecting trim request");
            return Ok(TrimResponse::rejected(reason));
        }

        if let Some(quota) = self.quota {
            if self.record_paths().await?.len() >= quota {
                warn!(quota, "Trim store is full");
                return Ok(TrimResponse::rejected(QUOTA_EXCEEDED));
            }
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to create store directory: {}", e)))?;

        let record = StoredTrim {
            committed_at: Utc::now(),
            request: request.clone(),
        };
        let path = self.dir.join(Self::file_name(&record.committed_at, &request.name));
        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| DomainError::FsFail(format!("Failed to encode trim record: {}", e)))?;
        tokio::fs::write(&path, content).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "Stored trim record");
        Ok(TrimResponse::ok())
    }
}

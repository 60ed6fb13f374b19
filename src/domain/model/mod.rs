// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Smallest selection the editor allows, in seconds
pub const MIN_SELECTION: f64 = 0.1;

/// Window opened by `set_start` when no end has been chosen yet
pub const DEFAULT_WINDOW: f64 = 1.0;

/// Selection and playhead state for one clip-editing session.
///
/// The setters never reject input: out-of-range values are clamped so that
/// continuous pointer input always lands on a valid selection. Non-finite
/// values are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipTimeRange {
    pub duration: f64,
    pub start: f64,
    pub end: f64,
    pub playhead: f64,
}

impl ClipTimeRange {
    /// Create a range for media of known length, selecting all of it
    pub fn with_duration(duration: f64) -> Self {
        let mut range = Self::default();
        range.set_duration(duration);
        range
    }

    /// True once metadata has reported a positive duration
    pub fn is_loaded(&self) -> bool {
        self.duration > 0.0
    }

    /// Playhead has reached the end of the selection
    pub fn is_exhausted(&self) -> bool {
        self.playhead >= self.end
    }

    /// Reset the range to `[0, d]`. Returns false (and changes nothing) for
    /// negative or non-finite durations.
    pub fn set_duration(&mut self, d: f64) -> bool {
        if !d.is_finite() || d < 0.0 {
            return false;
        }
        self.duration = d;
        self.start = 0.0;
        self.end = d;
        self.playhead = 0.0;
        true
    }

    /// Move the selection start, keeping at least `MIN_SELECTION` before `end`
    pub fn set_start(&mut self, t: f64) -> bool {
        if !t.is_finite() {
            return false;
        }

        if self.end == 0.0 {
            // No end chosen yet: open a default window after the new start
            let start = t.max(0.0);
            let mut end = start + DEFAULT_WINDOW;
            if self.is_loaded() {
                end = end.min(self.duration);
            }
            self.start = start.min((end - MIN_SELECTION).max(0.0));
            self.end = end;
        } else {
            let upper = (self.end - MIN_SELECTION).max(0.0);
            self.start = t.max(0.0).min(upper);
        }

        self.clamp_playhead();
        true
    }

    /// Move the selection end, keeping at least `MIN_SELECTION` after `start`
    pub fn set_end(&mut self, t: f64) -> bool {
        if !t.is_finite() {
            return false;
        }

        let lower = self.start + MIN_SELECTION;
        self.end = if self.is_loaded() {
            t.min(self.duration).max(lower.min(self.duration))
        } else {
            t.max(lower)
        };

        self.clamp_playhead();
        true
    }

    /// Move the playhead inside the selection
    pub fn set_playhead(&mut self, t: f64) -> bool {
        if !t.is_finite() {
            return false;
        }
        self.playhead = t.max(self.start).min(self.end);
        true
    }

    fn clamp_playhead(&mut self) {
        self.playhead = self.playhead.max(self.start).min(self.end);
    }
}

/// Crop presets offered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectPreset {
    #[default]
    Widescreen,
    Square,
    Portrait,
    Vertical,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 4] = [
        AspectPreset::Widescreen,
        AspectPreset::Square,
        AspectPreset::Portrait,
        AspectPreset::Vertical,
    ];

    /// Ratio as `(width, height)` units
    pub fn ratio(&self) -> (f64, f64) {
        match self {
            AspectPreset::Widescreen => (16.0, 9.0),
            AspectPreset::Square => (1.0, 1.0),
            AspectPreset::Portrait => (3.0, 4.0),
            AspectPreset::Vertical => (9.0, 16.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectPreset::Widescreen => "16:9",
            AspectPreset::Square => "1:1",
            AspectPreset::Portrait => "3:4",
            AspectPreset::Vertical => "9:16",
        }
    }

    /// Label shown in the preset picker
    pub fn label(&self) -> &'static str {
        match self {
            AspectPreset::Widescreen => "16:9 (Default)",
            AspectPreset::Square => "1:1 (Square)",
            AspectPreset::Portrait => "3:4 (Portrait)",
            AspectPreset::Vertical => "9:16 (Vertical)",
        }
    }

    /// The default preset matches the rendered frame, so no overlay is drawn
    pub fn is_native(&self) -> bool {
        *self == AspectPreset::Widescreen
    }
}

impl FromStr for AspectPreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectPreset::Widescreen),
            "1:1" => Ok(AspectPreset::Square),
            "3:4" => Ok(AspectPreset::Portrait),
            "9:16" => Ok(AspectPreset::Vertical),
            other => Err(DomainError::BadArgs(format!(
                "Unknown aspect ratio: {}. Supported: 16:9, 1:1, 3:4, 9:16",
                other
            ))),
        }
    }
}

impl TryFrom<String> for AspectPreset {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectPreset> for String {
    fn from(preset: AspectPreset) -> Self {
        preset.as_str().to_string()
    }
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Size of a rendered box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Overlay rectangle, relative to the top-left corner of the media box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Which selection handle a pointer drag is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragTarget {
    #[default]
    None,
    Start,
    End,
}

/// How a commit is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    Overwrite,
    SaveAsNew,
}

/// Clip metadata returned by the lookup service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRecord {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<AspectPreset>,
}

impl ClipRecord {
    /// File name offered for download; always ends in `.mp4`
    pub fn download_name(&self) -> String {
        if self.name.ends_with(".mp4") {
            self.name.clone()
        } else if self.name.is_empty() {
            "video.mp4".to_string()
        } else {
            format!("{}.mp4", self.name)
        }
    }
}

/// Request sent to the persistence service for one commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimRequest {
    pub source_url: String,
    pub start_time: f64,
    pub end_time: f64,
    pub owner_id: String,
    pub name: String,
    pub aspect_ratio: AspectPreset,
}

/// Response from the persistence service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrimResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests;

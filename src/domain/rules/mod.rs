// Domain rules - Geometry of the timeline track and the crop overlay

use serde::{Deserialize, Serialize};

use crate::domain::model::*;

/// Maps between clip time and horizontal pixels on the timeline track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub width_px: f64,
    pub duration: f64,
}

impl TrackGeometry {
    pub fn new(width_px: f64, duration: f64) -> Self {
        Self { width_px, duration }
    }

    fn is_degenerate(&self) -> bool {
        !(self.duration > 0.0 && self.width_px > 0.0)
    }

    /// Pixel offset of time `t` from the left edge of the track
    pub fn pixel_for_time(&self, t: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (t / self.duration) * self.width_px
    }

    /// Time under pixel `x`, clamped to the clip
    pub fn time_for_pixel(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (x / self.width_px).clamp(0.0, 1.0) * self.duration
    }
}

/// Computes the centered crop rectangle for an aspect preset
pub struct OverlayCalculator;

impl OverlayCalculator {
    /// Largest rectangle of the preset's ratio that fits inside `frame`,
    /// centered on both axes
    pub fn overlay_for(frame: BoxSize, preset: AspectPreset) -> OverlayRect {
        if frame.is_empty() {
            return OverlayRect::default();
        }

        let (rw, rh) = preset.ratio();
        let (width, height) = if rw == rh {
            let side = frame.width.min(frame.height);
            (side, side)
        } else if frame.width / frame.height > rw / rh {
            // Frame is wider than the target: bound by height
            (frame.height * rw / rh, frame.height)
        } else {
            (frame.width, frame.width * rh / rw)
        };

        OverlayRect {
            left: (frame.width - width) / 2.0,
            top: (frame.height - height) / 2.0,
            width,
            height,
        }
    }
}

/// Pixel positions of everything drawn on the timeline track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub selection_left: f64,
    pub selection_width: f64,
    pub start_handle: f64,
    pub end_handle: f64,
    pub playhead: f64,
}

impl TimelineLayout {
    /// Derive the layout from a range snapshot; all zero before metadata loads
    pub fn compute(range: &ClipTimeRange, width_px: f64) -> Self {
        if !range.is_loaded() {
            return Self::default();
        }
        let geometry = TrackGeometry::new(width_px, range.duration);
        let start = geometry.pixel_for_time(range.start);
        let end = geometry.pixel_for_time(range.end);
        Self {
            selection_left: start,
            selection_width: end - start,
            start_handle: start,
            end_handle: end,
            playhead: geometry.pixel_for_time(range.playhead),
        }
    }
}

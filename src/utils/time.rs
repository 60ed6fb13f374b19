//! Time parsing and formatting utilities

use crate::error::{TrimlineError, TrimlineResult};

/// Time parser for values typed into the start/end fields
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse seconds, `MM:SS.ms` or `HH:MM:SS.ms` into seconds
    pub fn parse_time(&self, time_str: &str) -> TrimlineResult<f64> {
        let time_str = time_str.trim();
        let invalid = || TrimlineError::InvalidTimeFormat {
            time: time_str.to_string(),
        };

        let parts: Vec<&str> = time_str.split(':').collect();
        let seconds = match parts.as_slice() {
            [secs] => secs.parse::<f64>().map_err(|_| invalid())?,
            [mins, secs] => {
                let minutes = Self::parse_unit(mins).ok_or_else(invalid)?;
                let seconds = Self::parse_seconds(secs).ok_or_else(invalid)?;
                minutes * 60.0 + seconds
            }
            [hours, mins, secs] => {
                let hours = Self::parse_unit(hours).ok_or_else(invalid)?;
                let minutes = Self::parse_unit(mins).ok_or_else(invalid)?;
                if minutes >= 60.0 {
                    return Err(invalid());
                }
                let seconds = Self::parse_seconds(secs).ok_or_else(invalid)?;
                hours * 3600.0 + minutes * 60.0 + seconds
            }
            _ => return Err(invalid()),
        };

        if !seconds.is_finite() {
            return Err(invalid());
        }
        Ok(seconds)
    }

    fn parse_unit(part: &str) -> Option<f64> {
        part.parse::<u32>().ok().map(f64::from)
    }

    fn parse_seconds(part: &str) -> Option<f64> {
        part.parse::<f64>()
            .ok()
            .filter(|s| (0.0..60.0).contains(s))
    }
}

/// Format seconds as `m:ss` for the start/end/duration readout
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// Round to hundredths, as the playhead marks do
pub fn round_centis(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

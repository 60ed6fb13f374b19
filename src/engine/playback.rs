//! Keeps the external media element inside the selected range

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::engine::time_model::TimeModel;
use crate::ports::{MediaElementPort, MediaEvent};

/// Load state of the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlaybackStatus {
    NoSource,
    Loading,
    Ready,
    /// Terminal for the current load; a new `load` starts fresh
    Unavailable { reason: String },
}

/// Transport commands issued by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlaybackCommand {
    TogglePlayPause,
    Seek { time: f64 },
    SkipToStart,
    SkipToEnd,
    /// Volume slider position, 0 to 100
    SetVolume { percent: f64 },
}

pub struct PlaybackController {
    media: Arc<dyn MediaElementPort>,
    status: PlaybackStatus,
    playing: bool,
    volume: f64,
}

impl PlaybackController {
    pub fn new(media: Arc<dyn MediaElementPort>) -> Self {
        Self {
            media,
            status: PlaybackStatus::NoSource,
            playing: false,
            volume: 1.0,
        }
    }

    pub fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Start loading a source; any previous failure is forgotten
    pub fn load(&mut self, source_url: &str) {
        info!(source = source_url, "Loading media");
        self.status = PlaybackStatus::Loading;
        self.playing = false;
        self.media.load(source_url);
    }

    /// Apply a notification from the media element
    pub fn on_media_event(
        &mut self,
        event: MediaEvent,
        time: &TimeModel,
    ) -> Result<(), DomainError> {
        if let PlaybackStatus::Unavailable { .. } = self.status {
            debug!(?event, "Ignoring media event for unavailable source");
            return Ok(());
        }

        match event {
            MediaEvent::MetadataLoaded { duration } => {
                if !time.set_duration(duration) {
                    return Err(DomainError::ValidationFailed(format!(
                        "Media reported an invalid duration: {}",
                        duration
                    )));
                }
                info!(duration, "Media metadata loaded");
                self.status = PlaybackStatus::Ready;
                Ok(())
            }
            MediaEvent::TimeUpdate { current_time } => {
                if self.status != PlaybackStatus::Ready {
                    return Ok(());
                }
                let range = time.snapshot();
                if current_time >= range.end {
                    // The selection end is a hard stop
                    if self.playing {
                        debug!(current_time, end = range.end, "Reached selection end, pausing");
                        self.media.pause();
                        self.playing = false;
                    }
                    time.set_playhead(range.end);
                } else {
                    time.set_playhead(current_time);
                }
                Ok(())
            }
            MediaEvent::PlayStateChanged { playing } => {
                self.playing = playing;
                Ok(())
            }
            MediaEvent::Error { reason } => {
                warn!(%reason, "Media element failed to load");
                self.playing = false;
                self.status = PlaybackStatus::Unavailable {
                    reason: reason.clone(),
                };
                Err(DomainError::MediaUnavailable(reason))
            }
        }
    }

    /// Play or pause. A paused playhead at the selection end restarts from
    /// the selection start. Returns whether playback is now running.
    pub fn toggle_play_pause(&mut self, time: &TimeModel) -> Result<bool, DomainError> {
        self.ensure_ready()?;

        if self.playing {
            self.media.pause();
            self.playing = false;
            return Ok(false);
        }

        let range = time.snapshot();
        if range.is_exhausted() {
            self.media.set_current_time(range.start);
            time.set_playhead(range.start);
        }
        self.media.play();
        self.playing = true;
        Ok(true)
    }

    /// Move the media element to `t`, clamped into the selection.
    /// Returns the position actually written.
    pub fn seek(&mut self, t: f64, time: &TimeModel) -> Result<f64, DomainError> {
        self.ensure_ready()?;
        if !t.is_finite() {
            return Err(DomainError::BadArgs(format!("Cannot seek to {}", t)));
        }

        let range = time.snapshot();
        let clamped = t.max(range.start).min(range.end);
        self.media.set_current_time(clamped);
        time.set_playhead(clamped);
        Ok(clamped)
    }

    /// Map a 0-100 slider value onto the element's 0.0-1.0 volume
    pub fn set_volume(&mut self, percent: f64) {
        self.volume = percent / 100.0;
        self.media.set_volume(self.volume);
    }

    /// Execute a transport command
    pub fn execute(
        &mut self,
        command: PlaybackCommand,
        time: &TimeModel,
    ) -> Result<(), DomainError> {
        match command {
            PlaybackCommand::TogglePlayPause => self.toggle_play_pause(time).map(|_| ()),
            PlaybackCommand::Seek { time: t } => self.seek(t, time).map(|_| ()),
            PlaybackCommand::SkipToStart => {
                let start = time.snapshot().start;
                self.seek(start, time).map(|_| ())
            }
            PlaybackCommand::SkipToEnd => {
                let end = time.snapshot().end;
                self.seek(end, time).map(|_| ())
            }
            PlaybackCommand::SetVolume { percent } => {
                self.set_volume(percent);
                Ok(())
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), DomainError> {
        match &self.status {
            PlaybackStatus::Ready => Ok(()),
            PlaybackStatus::Unavailable { reason } => {
                Err(DomainError::MediaUnavailable(reason.clone()))
            }
            PlaybackStatus::NoSource | PlaybackStatus::Loading => Err(DomainError::InvalidState(
                "Media is not ready for playback".to_string(),
            )),
        }
    }
}

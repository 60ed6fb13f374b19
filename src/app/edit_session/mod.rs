// Edit session - Composes the timeline engine for one clip and dispatches external events

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::*;
use crate::ports::*;
use crate::utils::time::{format_timestamp, round_centis, TimeParser};

/// Session-wide settings resolved from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub track_width_px: f64,
    pub default_aspect: AspectPreset,
    pub default_owner: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            track_width_px: 800.0,
            default_aspect: AspectPreset::default(),
            default_owner: "default-user".to_string(),
        }
    }
}

/// User actions on the save dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "save", rename_all = "snake_case")]
pub enum SaveCommand {
    Open,
    Close,
    Overwrite,
    SaveAsNew,
    SetName { name: String },
    Back,
    SubmitName,
}

/// A submitted commit waiting to be sent to the persistence service.
///
/// Running it needs no access to the session, so the caller may drive it on
/// any task and hand the result back through `EditSession::finish_commit`.
pub struct PendingCommit {
    submission: Submission,
    store: Arc<dyn PersistencePort>,
}

/// The single resolution of one `PendingCommit`
#[derive(Debug, Clone)]
pub struct CommitResult {
    pub ticket: SubmissionTicket,
    pub outcome: Result<TrimResponse, DomainError>,
}

impl PendingCommit {
    pub fn request(&self) -> &TrimRequest {
        &self.submission.request
    }

    pub fn mode(&self) -> SaveMode {
        self.submission.mode
    }

    /// Call the persistence service exactly once
    pub async fn run(self) -> CommitResult {
        let outcome = self.store.trim(&self.submission.request).await;
        CommitResult {
            ticket: self.submission.ticket,
            outcome,
        }
    }
}

/// `m:ss` strings shown next to the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readout {
    pub start: String,
    pub end: String,
    pub duration: String,
}

/// Everything a front end needs to render the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub clip_id: String,
    pub name: String,
    pub download_name: String,
    pub range: ClipTimeRange,
    pub readout: Readout,
    pub layout: TimelineLayout,
    pub aspect: AspectPreset,
    pub aspect_label: String,
    pub playback: PlaybackStatus,
    pub playing: bool,
    pub volume: f64,
    pub save: SaveState,
    pub candidate_name: String,
    pub last_error: Option<String>,
}

/// One clip-editing session.
///
/// Owns the time model and the three controllers. Every external event type
/// has one dispatch method; all of them fail with `InvalidState` once the
/// session is closed.
pub struct EditSession {
    clip: ClipRecord,
    time: TimeModel,
    track_width_px: f64,
    drag: DragController,
    playback: PlaybackController,
    save: SaveWorkflow,
    aspect: AspectPreset,
    store: Arc<dyn PersistencePort>,
    default_owner: String,
    parser: TimeParser,
    closed: bool,
}

impl EditSession {
    /// Build a session for `clip` and start loading its media
    pub fn new(
        clip: ClipRecord,
        media: Arc<dyn MediaElementPort>,
        store: Arc<dyn PersistencePort>,
        settings: SessionSettings,
    ) -> Self {
        let aspect = clip.aspect_ratio.unwrap_or(settings.default_aspect);
        let mut playback = PlaybackController::new(media);
        playback.load(&clip.url);
        info!(clip = %clip.id, name = %clip.name, aspect = %aspect, "Editing session opened");

        Self {
            clip,
            time: TimeModel::new(),
            track_width_px: settings.track_width_px,
            drag: DragController::new(),
            playback,
            save: SaveWorkflow::new(),
            aspect,
            store,
            default_owner: settings.default_owner,
            parser: TimeParser::new(),
            closed: false,
        }
    }

    pub fn clip(&self) -> &ClipRecord {
        &self.clip
    }

    pub fn snapshot(&self) -> ClipTimeRange {
        self.time.snapshot()
    }

    /// Observe every published change of the time range
    pub fn subscribe(&self) -> watch::Receiver<ClipTimeRange> {
        self.time.subscribe()
    }

    pub fn aspect(&self) -> AspectPreset {
        self.aspect
    }

    pub fn drag_target(&self) -> DragTarget {
        self.drag.target()
    }

    pub fn playback_status(&self) -> &PlaybackStatus {
        self.playback.status()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn save_state(&self) -> SaveState {
        self.save.state()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.save.last_error()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pointer input on the timeline track
    pub fn on_pointer(&mut self, event: PointerEvent) -> Result<DragOutcome, DomainError> {
        self.ensure_open()?;
        let outcome = self.drag.handle(event, self.track_width_px, &self.time);
        if let DragOutcome::Seek(t) = outcome {
            self.playback.seek(t, &self.time)?;
        }
        Ok(outcome)
    }

    /// Notification from the media element
    pub fn on_media(&mut self, event: MediaEvent) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.playback.on_media_event(event, &self.time)
    }

    /// Transport command from the user
    pub fn on_playback(&mut self, command: PlaybackCommand) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.playback.execute(command, &self.time)
    }

    /// Save dialog action. Returns the commit to run when the action submits.
    pub fn on_save(&mut self, command: SaveCommand) -> Result<Option<PendingCommit>, DomainError> {
        self.ensure_open()?;
        debug!(?command, state = ?self.save.state(), "Save command");

        let draft = self.draft();
        let submission = match command {
            SaveCommand::Open => self.save.open().map(|_| None),
            SaveCommand::Close => self.save.close().map(|_| None),
            SaveCommand::Overwrite => self.save.choose_overwrite(draft).map(Some),
            SaveCommand::SaveAsNew => self.save.choose_save_as_new().map(|_| None),
            SaveCommand::SetName { name } => self.save.set_candidate_name(&name).map(|_| None),
            SaveCommand::Back => self.save.back().map(|_| None),
            SaveCommand::SubmitName => self.save.submit_name(draft).map(Some),
        };

        let submission = submission.map_err(|err| {
            warn!(error = %err, "Save command rejected");
            err
        })?;

        Ok(submission.map(|submission| PendingCommit {
            submission,
            store: Arc::clone(&self.store),
        }))
    }

    /// Apply the result of a commit. Results arriving after `close` are
    /// discarded without touching the workflow.
    pub fn finish_commit(&mut self, result: CommitResult) -> SaveResolution {
        if self.closed {
            debug!(ticket = ?result.ticket, "Discarding commit result for closed session");
            return SaveResolution::Discarded;
        }
        self.save.complete(result.ticket, result.outcome)
    }

    /// Dispatch a save command and, if it submits, wait for the result.
    /// Returns `None` when the command did not submit anything.
    pub async fn commit(
        &mut self,
        command: SaveCommand,
    ) -> Result<Option<SaveResolution>, DomainError> {
        match self.on_save(command)? {
            Some(pending) => {
                let result = pending.run().await;
                Ok(Some(self.finish_commit(result)))
            }
            None => Ok(None),
        }
    }

    /// Set the selection start at the playhead
    pub fn mark_start(&mut self) -> Result<bool, DomainError> {
        self.ensure_open()?;
        let range = self.time.snapshot();
        let t = round_centis(range.playhead);
        let mut changed = false;
        if range.end > 0.0 && range.end <= t {
            changed |= self.time.set_end(t + DEFAULT_WINDOW);
        }
        changed |= self.time.set_start(t);
        Ok(changed)
    }

    /// Set the selection end at the playhead
    pub fn mark_end(&mut self) -> Result<bool, DomainError> {
        self.ensure_open()?;
        let t = round_centis(self.time.snapshot().playhead);
        Ok(self.time.set_end(t))
    }

    /// Value typed into the start field
    pub fn edit_start_field(&mut self, text: &str) -> Result<bool, DomainError> {
        self.ensure_open()?;
        let t = self.parse_field(text)?;
        Ok(self.time.set_start(t))
    }

    /// Value typed into the end field
    pub fn edit_end_field(&mut self, text: &str) -> Result<bool, DomainError> {
        self.ensure_open()?;
        let t = self.parse_field(text)?;
        Ok(self.time.set_end(t))
    }

    pub fn set_aspect(&mut self, aspect: AspectPreset) -> Result<(), DomainError> {
        self.ensure_open()?;
        if aspect != self.aspect {
            debug!(from = %self.aspect, to = %aspect, "Aspect preset changed");
            self.aspect = aspect;
        }
        Ok(())
    }

    /// The track was resized
    pub fn set_track_width(&mut self, width_px: f64) -> Result<(), DomainError> {
        self.ensure_open()?;
        if !(width_px.is_finite() && width_px > 0.0) {
            return Err(DomainError::BadArgs(format!("Invalid track width: {}", width_px)));
        }
        self.track_width_px = width_px;
        Ok(())
    }

    /// Crop overlay for the current preset against the rendered frame box
    pub fn overlay(&self, frame: BoxSize) -> OverlayRect {
        OverlayCalculator::overlay_for(frame, self.aspect)
    }

    /// Pixel positions of the selection, handles and playhead
    pub fn layout(&self) -> TimelineLayout {
        TimelineLayout::compute(&self.time.snapshot(), self.track_width_px)
    }

    pub fn readout(&self) -> Readout {
        let range = self.time.snapshot();
        Readout {
            start: format_timestamp(range.start),
            end: format_timestamp(range.end),
            duration: format_timestamp(range.duration),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            clip_id: self.clip.id.clone(),
            name: self.clip.name.clone(),
            download_name: self.clip.download_name(),
            range: self.time.snapshot(),
            readout: self.readout(),
            layout: self.layout(),
            aspect: self.aspect,
            aspect_label: self.aspect.label().to_string(),
            playback: self.playback.status().clone(),
            playing: self.playback.is_playing(),
            volume: self.playback.volume(),
            save: self.save.state(),
            candidate_name: self.save.candidate_name().to_string(),
            last_error: self.save.last_error().map(str::to_string),
        }
    }

    /// Tear the session down: drop any drag and forget in-flight commits
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.drag.detach();
        self.save.abandon();
        self.closed = true;
        info!(clip = %self.clip.id, "Editing session closed");
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.closed {
            return Err(DomainError::InvalidState("Editing session is closed".to_string()));
        }
        Ok(())
    }

    fn parse_field(&self, text: &str) -> Result<f64, DomainError> {
        self.parser
            .parse_time(text)
            .map_err(|e| DomainError::ValidationFailed(e.to_string()))
    }

    fn draft(&self) -> CommitDraft {
        CommitDraft {
            source_url: self.clip.url.clone(),
            owner_id: self
                .clip
                .owner_id
                .clone()
                .filter(|owner| !owner.trim().is_empty())
                .unwrap_or_else(|| self.default_owner.clone()),
            current_name: self.clip.name.clone(),
            range: self.time.snapshot(),
            aspect: self.aspect,
        }
    }
}

//! Commit workflow: overwrite the clip or save the selection as a new one

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::{AspectPreset, ClipTimeRange, SaveMode, TrimRequest, TrimResponse};

/// Message shown when the service fails without saying why
pub const GENERIC_SAVE_FAILURE: &str = "Failed to save video";

/// Message shown when save-as-new is submitted without a name
pub const EMPTY_NAME_MESSAGE: &str = "Please enter a valid name";

/// Where the save dialog currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "mode", rename_all = "snake_case")]
pub enum SaveState {
    Idle,
    Choosing,
    AwaitingName,
    Submitting(SaveMode),
}

/// Identifies one submission; results carrying a stale ticket are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

/// Everything about the session a commit needs, captured at submit time
#[derive(Debug, Clone)]
pub struct CommitDraft {
    pub source_url: String,
    pub owner_id: String,
    pub current_name: String,
    pub range: ClipTimeRange,
    pub aspect: AspectPreset,
}

impl CommitDraft {
    fn into_request(self, name: String) -> TrimRequest {
        TrimRequest {
            source_url: self.source_url,
            start_time: self.range.start,
            end_time: self.range.end,
            owner_id: self.owner_id,
            name,
            aspect_ratio: self.aspect,
        }
    }
}

/// A request ready to be sent to the persistence service
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub mode: SaveMode,
    pub request: TrimRequest,
}

/// How a completed submission was applied
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum SaveResolution {
    Succeeded { mode: SaveMode, name: String },
    /// The workflow is back in its pre-submit state with `message` surfaced
    Failed { mode: SaveMode, message: String },
    /// The result did not belong to the in-flight submission
    Discarded,
}

#[derive(Debug)]
pub struct SaveWorkflow {
    state: SaveState,
    candidate_name: String,
    last_error: Option<String>,
    in_flight: Option<(SubmissionTicket, String)>,
    next_ticket: u64,
}

impl SaveWorkflow {
    pub fn new() -> Self {
        Self {
            state: SaveState::Idle,
            candidate_name: String::new(),
            last_error: None,
            in_flight: None,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn candidate_name(&self) -> &str {
        &self.candidate_name
    }

    /// Error surfaced by the most recent failed step, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Trigger controls are disabled while a submission is in flight
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SaveState::Submitting(_))
    }

    /// Open the save dialog
    pub fn open(&mut self) -> Result<(), DomainError> {
        self.ensure_idle_controls()?;
        if self.state == SaveState::Idle {
            self.state = SaveState::Choosing;
            self.last_error = None;
        }
        Ok(())
    }

    /// Close the dialog and forget any typed name
    pub fn close(&mut self) -> Result<(), DomainError> {
        self.ensure_idle_controls()?;
        self.reset();
        Ok(())
    }

    /// Commit over the original clip, keeping its name
    pub fn choose_overwrite(&mut self, draft: CommitDraft) -> Result<Submission, DomainError> {
        self.expect_state(SaveState::Choosing, "overwrite")?;
        let name = draft.current_name.clone();
        Ok(self.submit(SaveMode::Overwrite, draft.into_request(name)))
    }

    /// Switch the dialog to the name prompt
    pub fn choose_save_as_new(&mut self) -> Result<(), DomainError> {
        self.expect_state(SaveState::Choosing, "save as new")?;
        self.state = SaveState::AwaitingName;
        self.candidate_name.clear();
        self.last_error = None;
        Ok(())
    }

    pub fn set_candidate_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.expect_state(SaveState::AwaitingName, "edit the name")?;
        self.candidate_name = name.to_string();
        Ok(())
    }

    /// Leave the name prompt without submitting
    pub fn back(&mut self) -> Result<(), DomainError> {
        self.expect_state(SaveState::AwaitingName, "go back")?;
        self.state = SaveState::Choosing;
        self.last_error = None;
        Ok(())
    }

    /// Submit the typed name. An empty name is rejected here and never
    /// reaches the service.
    pub fn submit_name(&mut self, draft: CommitDraft) -> Result<Submission, DomainError> {
        self.expect_state(SaveState::AwaitingName, "submit a name")?;

        let name = self.candidate_name.trim().to_string();
        if name.is_empty() {
            self.last_error = Some(EMPTY_NAME_MESSAGE.to_string());
            return Err(DomainError::ValidationFailed(EMPTY_NAME_MESSAGE.to_string()));
        }

        Ok(self.submit(SaveMode::SaveAsNew, draft.into_request(name)))
    }

    /// Apply the service's answer to a submission
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<TrimResponse, DomainError>,
    ) -> SaveResolution {
        let (mode, name) = match (self.state, &self.in_flight) {
            (SaveState::Submitting(mode), Some((current, name))) if *current == ticket => {
                (mode, name.clone())
            }
            _ => {
                debug!(?ticket, "Discarding result of a stale submission");
                return SaveResolution::Discarded;
            }
        };
        self.in_flight = None;

        let failure = match outcome {
            Ok(response) if response.success => None,
            Ok(response) => Some(
                response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_SAVE_FAILURE.to_string()),
            ),
            Err(err) => {
                warn!(error = %err, "Trim request failed");
                Some(GENERIC_SAVE_FAILURE.to_string())
            }
        };

        match failure {
            None => {
                info!(?mode, %name, "Trim committed");
                self.reset();
                SaveResolution::Succeeded { mode, name }
            }
            Some(message) => {
                warn!(?mode, %message, "Trim rejected");
                self.state = match mode {
                    SaveMode::Overwrite => SaveState::Choosing,
                    SaveMode::SaveAsNew => SaveState::AwaitingName,
                };
                self.last_error = Some(message.clone());
                SaveResolution::Failed { mode, message }
            }
        }
    }

    /// Forget any in-flight submission so its result is discarded
    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("Abandoning in-flight submission");
        }
        self.reset();
    }

    fn submit(&mut self, mode: SaveMode, request: TrimRequest) -> Submission {
        let ticket = SubmissionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = SaveState::Submitting(mode);
        self.last_error = None;
        self.in_flight = Some((ticket, request.name.clone()));
        info!(
            ?mode,
            name = %request.name,
            start = request.start_time,
            end = request.end_time,
            "Submitting trim"
        );
        Submission {
            ticket,
            mode,
            request,
        }
    }

    fn reset(&mut self) {
        self.state = SaveState::Idle;
        self.candidate_name.clear();
        self.last_error = None;
    }

    fn ensure_idle_controls(&self) -> Result<(), DomainError> {
        if self.is_submitting() {
            return Err(DomainError::Busy("A save is already in progress".to_string()));
        }
        Ok(())
    }

    fn expect_state(&self, expected: SaveState, action: &str) -> Result<(), DomainError> {
        self.ensure_idle_controls()?;
        if self.state != expected {
            return Err(DomainError::InvalidState(format!(
                "Cannot {} while the save dialog is {:?}",
                action, self.state
            )));
        }
        Ok(())
    }
}

impl Default for SaveWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

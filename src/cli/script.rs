//! Replay scripts: recorded editor events applied to a headless session

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapters::HeadlessMediaElement;
use crate::app::edit_session::{EditSession, SaveCommand, SessionView};
use crate::domain::errors::DomainError;
use crate::domain::model::AspectPreset;
use crate::engine::{PlaybackCommand, PointerEvent, SaveResolution};
use crate::error::{TrimlineError, TrimlineResult};
use crate::ports::MediaEvent;

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// The media element finished loading its source
    FinishLoad,
    /// Wall clock advanced while the media element was playing
    Advance { seconds: f64 },
    Pointer { event: PointerEvent },
    Playback { command: PlaybackCommand },
    Save { command: SaveCommand },
    MarkStart,
    MarkEnd,
    EditStart { value: String },
    EditEnd { value: String },
    Aspect { preset: AspectPreset },
    TrackWidth { px: f64 },
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub steps: Vec<ScriptStep>,
}

impl ReplayScript {
    pub fn parse(content: &str) -> TrimlineResult<Self> {
        serde_json::from_str(content).map_err(|e| TrimlineError::ScriptError {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> TrimlineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

/// What happened when one step was applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: ScriptStep,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<SaveResolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub view: SessionView,
}

/// Apply every step in order. Rejected steps are recorded and the replay
/// carries on, the way an editor keeps running after showing an error.
pub async fn run_script(
    session: &mut EditSession,
    media: &HeadlessMediaElement,
    script: &ReplayScript,
) -> ReplayReport {
    let mut steps = Vec::with_capacity(script.steps.len());

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "Replaying step");
        let mut report = StepReport {
            index,
            step: step.clone(),
            errors: Vec::new(),
            commit: None,
        };

        let mut events = Vec::new();
        let applied = match step {
            ScriptStep::FinishLoad => {
                events = media.finish_load();
                Ok(())
            }
            ScriptStep::Advance { seconds } => {
                events = media.advance(*seconds);
                Ok(())
            }
            ScriptStep::Pointer { event } => session.on_pointer(*event).map(|_| ()),
            ScriptStep::Playback { command } => session.on_playback(*command),
            ScriptStep::Save { command } => match session.on_save(command.clone()) {
                Ok(Some(pending)) => {
                    let result = pending.run().await;
                    report.commit = Some(session.finish_commit(result));
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
            ScriptStep::MarkStart => session.mark_start().map(|_| ()),
            ScriptStep::MarkEnd => session.mark_end().map(|_| ()),
            ScriptStep::EditStart { value } => session.edit_start_field(value).map(|_| ()),
            ScriptStep::EditEnd { value } => session.edit_end_field(value).map(|_| ()),
            ScriptStep::Aspect { preset } => session.set_aspect(*preset),
            ScriptStep::TrackWidth { px } => session.set_track_width(*px),
            ScriptStep::Close => {
                session.close();
                Ok(())
            }
        };
        record(&mut report, applied);

        if !session.is_closed() {
            events.extend(media.take_events());
            pump(session, events, &mut report);
        }
        steps.push(report);
    }

    ReplayReport {
        steps,
        view: session.view(),
    }
}

fn pump(session: &mut EditSession, events: Vec<MediaEvent>, report: &mut StepReport) {
    for event in events {
        let applied = session.on_media(event);
        record(report, applied);
    }
}

fn record(report: &mut StepReport, result: Result<(), DomainError>) {
    if let Err(err) = result {
        warn!(index = report.index, error = %err, "Replay step rejected");
        report.errors.push(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = ReplayScript::parse(
            r#"{"steps": [
                {"step": "finish_load"},
                {"step": "pointer", "event": {"pointer": "down", "target": "start_handle", "x": 0}},
                {"step": "pointer", "event": {"pointer": "cancel"}},
                {"step": "playback", "command": {"command": "set_volume", "percent": 40}},
                {"step": "save", "command": {"save": "set_name", "name": "Clip"}},
                {"step": "aspect", "preset": "9:16"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 6);
        assert_eq!(script.steps[2], ScriptStep::Pointer { event: PointerEvent::Cancel });
        assert_eq!(
            script.steps[5],
            ScriptStep::Aspect {
                preset: AspectPreset::Vertical
            }
        );
    }

    #[test]
    fn test_unknown_step_is_script_error() {
        let err = ReplayScript::parse(r#"{"steps": [{"step": "explode"}]}"#).unwrap_err();
        assert!(matches!(err, TrimlineError::ScriptError { .. }));
    }
}

//! Pointer interaction state machine for the timeline track

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::model::{DragTarget, MIN_SELECTION};
use crate::domain::rules::TrackGeometry;
use crate::engine::time_model::TimeModel;

/// Element under the pointer when a button goes down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    StartHandle,
    EndHandle,
    Track,
}

/// Raw pointer input, with `x` relative to the left edge of the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pointer", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { target: PointerTarget, x: f64 },
    Move { x: f64 },
    Up { x: f64 },
    Cancel,
    Click { x: f64 },
}

/// What the controller did with an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Ignored,
    Began(DragTarget),
    Moved,
    Ended,
    /// A plain click on the track; the caller performs the seek
    Seek(f64),
}

/// Turns pointer events into selection edits.
///
/// While a drag is active the controller captures every move and release,
/// regardless of which element the pointer is over.
#[derive(Debug, Default)]
pub struct DragController {
    target: DragTarget,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle currently being dragged
    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.target != DragTarget::None
    }

    /// Feed one pointer event. `width_px` is the current track width.
    pub fn handle(&mut self, event: PointerEvent, width_px: f64, time: &TimeModel) -> DragOutcome {
        match (self.target, event) {
            (DragTarget::None, PointerEvent::Down { target, .. }) => {
                let next = match target {
                    PointerTarget::StartHandle => DragTarget::Start,
                    PointerTarget::EndHandle => DragTarget::End,
                    PointerTarget::Track => return DragOutcome::Ignored,
                };
                if !time.snapshot().is_loaded() {
                    return DragOutcome::Ignored;
                }
                self.target = next;
                debug!(handle = ?next, "Drag started");
                DragOutcome::Began(next)
            }
            (DragTarget::None, PointerEvent::Click { x }) => {
                let range = time.snapshot();
                if !range.is_loaded() {
                    return DragOutcome::Ignored;
                }
                DragOutcome::Seek(TrackGeometry::new(width_px, range.duration).time_for_pixel(x))
            }
            (DragTarget::None, _) => DragOutcome::Ignored,
            (active, PointerEvent::Move { x }) => {
                self.apply_move(active, x, width_px, time);
                DragOutcome::Moved
            }
            (_, PointerEvent::Up { .. }) | (_, PointerEvent::Cancel) => {
                self.detach();
                DragOutcome::Ended
            }
            // Clicks and new presses are swallowed while a drag owns the pointer
            (_, PointerEvent::Down { .. }) | (_, PointerEvent::Click { .. }) => {
                DragOutcome::Ignored
            }
        }
    }

    /// Drop any active drag session
    pub fn detach(&mut self) {
        if self.target != DragTarget::None {
            debug!(handle = ?self.target, "Drag ended");
        }
        self.target = DragTarget::None;
    }

    fn apply_move(&self, active: DragTarget, x: f64, width_px: f64, time: &TimeModel) {
        let range = time.snapshot();
        let t = TrackGeometry::new(width_px, range.duration).time_for_pixel(x);
        trace!(x, t, "Drag move");
        match active {
            DragTarget::Start => {
                time.set_start(t.min(range.end - MIN_SELECTION));
            }
            DragTarget::End => {
                time.set_end(t.max(range.start + MIN_SELECTION));
            }
            DragTarget::None => {}
        }
    }
}

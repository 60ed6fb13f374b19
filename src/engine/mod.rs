//! Trim timeline engine: time model and the controllers that mutate it

pub mod drag;
pub mod playback;
pub mod save;
pub mod time_model;

pub use drag::{DragController, DragOutcome, PointerEvent, PointerTarget};
pub use playback::{PlaybackCommand, PlaybackController, PlaybackStatus};
pub use save::{
    CommitDraft, SaveResolution, SaveState, SaveWorkflow, Submission, SubmissionTicket,
};
pub use time_model::TimeModel;

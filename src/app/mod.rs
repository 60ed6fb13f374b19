// Application layer - Session composition and use case interactors

pub mod container;
pub mod edit_session;
pub mod open_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use edit_session::{
    CommitResult, EditSession, PendingCommit, Readout, SaveCommand, SessionSettings, SessionView,
};
pub use open_interactor::OpenSessionInteractor;

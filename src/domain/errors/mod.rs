// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Local input validation failed (never reaches a collaborator)
    ValidationFailed(String),
    /// Clip or resource not found
    NotFound(String),
    /// Operation not allowed in the current workflow state
    InvalidState(String),
    /// A submission is already in flight
    Busy(String),
    /// Media element failed to load
    MediaUnavailable(String),
    /// Persistence collaborator rejected or failed the request
    PersistenceFailed(String),
    /// File system failure
    FsFail(String),
}

impl DomainError {
    /// Message suitable for inline display, without the category prefix
    pub fn user_message(&self) -> &str {
        match self {
            DomainError::BadArgs(msg)
            | DomainError::ValidationFailed(msg)
            | DomainError::NotFound(msg)
            | DomainError::InvalidState(msg)
            | DomainError::Busy(msg)
            | DomainError::MediaUnavailable(msg)
            | DomainError::PersistenceFailed(msg)
            | DomainError::FsFail(msg) => msg,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            DomainError::Busy(msg) => write!(f, "Busy: {}", msg),
            DomainError::MediaUnavailable(msg) => write!(f, "Media unavailable: {}", msg),
            DomainError::PersistenceFailed(msg) => write!(f, "Persistence failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

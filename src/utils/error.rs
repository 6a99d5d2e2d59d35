use thiserror::Error;

use crate::models::SessionState;

/// Errors raised by the acceptance engine itself.
///
/// Rejected scans are not errors: a data mismatch or malformed field is a
/// normal outcome reported through [`crate::models::Decision`].
#[derive(Debug, Error)]
pub enum AcceptanceError {
    #[error("Invalid transition: cannot {event} while {state}")]
    InvalidTransition {
        state: SessionState,
        event: &'static str,
    },
    #[error("Session already terminated: {0}")]
    SessionTerminated(SessionState),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Handoff error: {0}")]
    Handoff(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

use crate::models::{
    DocumentFields, MrzFields, RejectionReason, ScannedArtifacts, ValidationIssue,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Scanning,
    Deciding,
    AwaitingUserRetry(RejectionReason),
    Finalized,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Finalized | SessionState::Cancelled)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionState::Scanning => write!(f, "scanning"),
            SessionState::Deciding => write!(f, "deciding"),
            SessionState::AwaitingUserRetry(reason) => {
                write!(f, "awaiting user retry ({})", reason)
            }
            SessionState::Finalized => write!(f, "finalized"),
            SessionState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Command for the scanning engine's result intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeCommand {
    Pause,
    /// `reset_state` discards partial detections made before the pause.
    Resume { reset_state: bool },
}

/// The pause/resume capability of a scanning engine.
pub trait ScanIntake {
    fn pause_intake(&mut self);
    fn resume_intake(&mut self, reset_state: bool);
}

impl IntakeCommand {
    pub fn apply_to<I: ScanIntake + ?Sized>(&self, intake: &mut I) {
        match *self {
            IntakeCommand::Pause => intake.pause_intake(),
            IntakeCommand::Resume { reset_state } => intake.resume_intake(reset_state),
        }
    }
}

/// Modal prompt shown after a rejection. Acknowledging it resumes scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPrompt {
    pub reason: RejectionReason,
    pub title: String,
    pub message: String,
    pub acknowledge_label: String,
}

/// Everything handed to the host once a scan is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedScan {
    pub document: DocumentFields,
    pub mrz: MrzFields,
    #[serde(default)]
    pub artifacts: ScannedArtifacts,
    /// Valid results evaluated in the session, the accepted one included.
    pub attempts: u32,
    pub accepted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Success(Box<AcceptedScan>),
    Cancelled,
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub commands: Vec<IntakeCommand>,
    pub prompt: Option<RetryPrompt>,
    /// Why the candidate was rejected; empty unless `prompt` is set.
    pub issues: Vec<ValidationIssue>,
    pub outcome: Option<SessionOutcome>,
}

impl Transition {
    pub(crate) fn to(state: SessionState) -> Self {
        Transition {
            state,
            commands: Vec::new(),
            prompt: None,
            issues: Vec::new(),
            outcome: None,
        }
    }

    pub(crate) fn with_command(mut self, command: IntakeCommand) -> Self {
        self.commands.push(command);
        self
    }

    /// Applies the emitted commands to the engine, in order.
    pub fn apply_to<I: ScanIntake + ?Sized>(&self, intake: &mut I) {
        for command in &self.commands {
            command.apply_to(intake);
        }
    }

    pub fn accepted(&self) -> Option<&AcceptedScan> {
        match &self.outcome {
            Some(SessionOutcome::Success(scan)) => Some(&**scan),
            _ => None,
        }
    }
}

use crate::config::AcceptanceConfig;
use crate::decision_engine::DecisionEngine;
use crate::models::*;
use crate::utils::AcceptanceError;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Requests cancellation of a session from outside the controller, e.g. from
/// a back-button callback on another thread.
#[derive(Clone, Debug)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// The candidate currently being decided.
struct PendingScan {
    document: DocumentFields,
    mrz: MrzFields,
    artifacts: ScannedArtifacts,
}

/// Drives one scan session from the first result to acceptance or
/// cancellation. Create a new controller for every session.
pub struct AcceptanceController {
    config: AcceptanceConfig,
    engine: DecisionEngine,
    state: SessionState,
    pending: Option<PendingScan>,
    attempts: u32,
    cancel_requested: Arc<AtomicBool>,
}

impl AcceptanceController {
    pub fn new() -> Self {
        Self::with_engine(AcceptanceConfig::default(), DecisionEngine::new())
    }

    pub fn with_config(config: AcceptanceConfig) -> Result<Self, AcceptanceError> {
        let engine = DecisionEngine::from_config(&config)?;
        Ok(Self::with_engine(config, engine))
    }

    pub fn with_engine(config: AcceptanceConfig, engine: DecisionEngine) -> Self {
        AcceptanceController {
            config,
            engine,
            state: SessionState::Scanning,
            pending: None,
            attempts: 0,
            cancel_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current state. A pending cancel request already reads as `Cancelled`.
    pub fn state(&self) -> SessionState {
        if !self.state.is_terminal() && self.cancel_requested.load(Ordering::SeqCst) {
            SessionState::Cancelled
        } else {
            self.state
        }
    }

    /// Valid results evaluated so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DecisionEngine {
        &mut self.engine
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancel_requested))
    }

    pub fn retry_prompt(&self) -> Option<RetryPrompt> {
        match self.state() {
            SessionState::AwaitingUserRetry(reason) => Some(self.config.retry_prompt(reason)),
            _ => None,
        }
    }

    /// Single inbound handler for scanning engine notifications: admits a
    /// `Valid` result and decides it in the same call.
    pub fn on_scan_result(&mut self, result: ScanAttemptResult) -> Transition {
        let admitted = self.state == SessionState::Scanning;
        let submitted = self.submit(result);
        // A result dropped while another is in flight must not resolve it.
        if !admitted || submitted.state != SessionState::Deciding {
            return submitted;
        }

        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return submitted,
        };
        let mut decided = self.conclude(pending);
        let mut commands = submitted.commands;
        commands.append(&mut decided.commands);
        decided.commands = commands;
        decided
    }

    /// Admits a `Valid` result and pauses intake. Anything arriving while the
    /// session is not scanning is dropped.
    pub fn submit(&mut self, result: ScanAttemptResult) -> Transition {
        if let Some(cancelled) = self.poll_cancellation() {
            return cancelled;
        }

        if self.state != SessionState::Scanning {
            debug!("Dropping scan result delivered while {}", self.state);
            return Transition::to(self.state);
        }

        match result {
            ScanAttemptResult::Valid {
                document,
                mrz,
                artifacts,
            } => {
                self.attempts += 1;
                self.pending = Some(PendingScan {
                    document,
                    mrz,
                    artifacts,
                });
                self.state = SessionState::Deciding;
                debug!("Deciding scan attempt {}", self.attempts);
                Transition::to(SessionState::Deciding).with_command(IntakeCommand::Pause)
            }
            ScanAttemptResult::Invalid | ScanAttemptResult::NoDocument => {
                Transition::to(SessionState::Scanning)
            }
        }
    }

    /// Decides the candidate admitted by [`submit`](Self::submit).
    pub fn resolve(&mut self) -> Result<Transition, AcceptanceError> {
        if let Some(cancelled) = self.poll_cancellation() {
            return Ok(cancelled);
        }

        match (self.state, self.pending.take()) {
            (SessionState::Deciding, Some(pending)) => Ok(self.conclude(pending)),
            (state, _) if state.is_terminal() => Err(AcceptanceError::SessionTerminated(state)),
            (state, _) => Err(AcceptanceError::InvalidTransition {
                state,
                event: "resolve a decision",
            }),
        }
    }

    /// The user dismissed the retry prompt: resume intake with a clean slate.
    pub fn acknowledge_retry(&mut self) -> Result<Transition, AcceptanceError> {
        if let Some(cancelled) = self.poll_cancellation() {
            return Ok(cancelled);
        }

        match self.state {
            SessionState::AwaitingUserRetry(reason) => {
                debug!("Retry after {} acknowledged, resuming intake", reason);
                self.state = SessionState::Scanning;
                Ok(Transition::to(SessionState::Scanning)
                    .with_command(IntakeCommand::Resume { reset_state: true }))
            }
            state if state.is_terminal() => Err(AcceptanceError::SessionTerminated(state)),
            state => Err(AcceptanceError::InvalidTransition {
                state,
                event: "acknowledge a retry prompt",
            }),
        }
    }

    pub fn cancel(&mut self) -> Result<Transition, AcceptanceError> {
        if self.state.is_terminal() {
            return Err(AcceptanceError::SessionTerminated(self.state));
        }
        self.cancel_requested.store(true, Ordering::SeqCst);
        Ok(self.enter_cancelled())
    }

    /// Folds a request made through a [`CancelHandle`] into the state machine.
    /// Returns the cancellation transition the first time it is observed.
    pub fn poll_cancellation(&mut self) -> Option<Transition> {
        if self.state.is_terminal() || !self.cancel_requested.load(Ordering::SeqCst) {
            return None;
        }
        Some(self.enter_cancelled())
    }

    fn enter_cancelled(&mut self) -> Transition {
        let previous = self.state;
        self.state = SessionState::Cancelled;
        self.pending = None;
        info!("Scan session cancelled while {}", previous);

        let mut transition = Transition::to(SessionState::Cancelled);
        // Intake is already paused everywhere except while scanning.
        if previous == SessionState::Scanning {
            transition = transition.with_command(IntakeCommand::Pause);
        }
        transition.outcome = Some(SessionOutcome::Cancelled);
        transition
    }

    fn conclude(&mut self, pending: PendingScan) -> Transition {
        let decision = self.engine.decide(&pending.document, &pending.mrz);

        // A cancel raised while deciding wins over the verdict.
        if let Some(cancelled) = self.poll_cancellation() {
            return cancelled;
        }

        match decision {
            Decision::Accepted(document) => {
                self.state = SessionState::Finalized;
                info!("Scan accepted after {} attempt(s)", self.attempts);

                let artifacts = ScannedArtifacts {
                    full_document_image: pending
                        .artifacts
                        .full_document_image
                        .filter(|_| self.config.return_full_document_image),
                    face_image: pending
                        .artifacts
                        .face_image
                        .filter(|_| self.config.return_face_image),
                };

                let mut transition = Transition::to(SessionState::Finalized);
                transition.outcome = Some(SessionOutcome::Success(Box::new(AcceptedScan {
                    document,
                    mrz: pending.mrz,
                    artifacts,
                    attempts: self.attempts,
                    accepted_at: Utc::now(),
                })));
                transition
            }
            Decision::Rejected { reason, issues } => {
                for issue in &issues {
                    warn!("Scan attempt {} rejected: {}", self.attempts, issue.message);
                }
                let state = SessionState::AwaitingUserRetry(reason);
                self.state = state;

                let mut transition = Transition::to(state);
                transition.prompt = Some(self.config.retry_prompt(reason));
                transition.issues = issues;
                transition
            }
        }
    }
}

impl Default for AcceptanceController {
    fn default() -> Self {
        Self::new()
    }
}

use crate::acceptance_controller::AcceptanceController;
use crate::models::{ScanAttemptResult, ScanIntake, Transition};
use crate::utils::AcceptanceError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A recorded host/engine event, as stored in a session script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Scan { result: ScanAttemptResult },
    Acknowledge,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionScript {
    pub events: Vec<SessionEvent>,
}

impl SessionScript {
    pub fn from_json_str(json: &str) -> Result<Self, AcceptanceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AcceptanceError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Feeds the events to `controller` until the session terminates, applying
    /// every emitted intake command to `intake`.
    pub fn replay<I: ScanIntake + ?Sized>(
        &self,
        controller: &mut AcceptanceController,
        intake: &mut I,
    ) -> Result<Vec<Transition>, AcceptanceError> {
        let mut transitions = Vec::new();

        for (index, event) in self.events.iter().enumerate() {
            if controller.state().is_terminal() {
                debug!(
                    "Session ended, ignoring {} remaining event(s)",
                    self.events.len() - index
                );
                break;
            }

            let transition = match event {
                SessionEvent::Scan { result } => controller.on_scan_result(result.clone()),
                SessionEvent::Acknowledge => controller.acknowledge_retry()?,
                SessionEvent::Cancel => controller.cancel()?,
            };
            transition.apply_to(intake);
            transitions.push(transition);
        }

        Ok(transitions)
    }
}

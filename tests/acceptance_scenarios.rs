use scanaccept::models::*;
use scanaccept::{AcceptanceController, AcceptanceError};

fn valid(name: &str, pin: &str, opt1: &str) -> ScanAttemptResult {
    ScanAttemptResult::valid(DocumentFields::new(name, pin), MrzFields::new(opt1, ""))
}

#[test]
fn scenario_a_matching_scan_is_finalized() {
    let mut controller = AcceptanceController::new();
    let transition = controller.on_scan_result(valid("Jane Doe", "12-34-56", "123456"));

    assert_eq!(transition.state, SessionState::Finalized);
    assert_eq!(transition.commands, vec![IntakeCommand::Pause]);
    assert!(transition.prompt.is_none());

    let accepted = transition.accepted().expect("accepted scan");
    assert_eq!(accepted.document, DocumentFields::new("Jane Doe", "12-34-56"));
    assert_eq!(accepted.mrz.opt1, "123456");
    assert_eq!(controller.state(), SessionState::Finalized);
}

#[test]
fn scenario_b_mismatching_id_awaits_retry() {
    let mut controller = AcceptanceController::new();
    let transition = controller.on_scan_result(valid("Jane Doe", "12-34-56", "654321"));

    assert_eq!(
        transition.state,
        SessionState::AwaitingUserRetry(RejectionReason::DataMismatch)
    );
    assert_eq!(transition.commands, vec![IntakeCommand::Pause]);
    assert!(transition.outcome.is_none());
    assert_eq!(
        transition.prompt.map(|p| p.reason),
        Some(RejectionReason::DataMismatch)
    );
}

#[test]
fn scenario_c_malformed_name_awaits_retry() {
    let mut controller = AcceptanceController::new();
    let transition = controller.on_scan_result(valid("Jane123 Doe", "12-34-56", "123456"));

    assert_eq!(
        transition.state,
        SessionState::AwaitingUserRetry(RejectionReason::DataMalformed)
    );
    assert!(transition
        .issues
        .iter()
        .all(|issue| issue.issue_type == ValidationIssueType::Format));
}

#[test]
fn scenario_d_acknowledged_retry_evaluates_next_scan_fresh() {
    let mut controller = AcceptanceController::new();
    controller.on_scan_result(valid("Jane Doe", "12-34-56", "654321"));

    let resumed = controller.acknowledge_retry().unwrap();
    assert_eq!(resumed.state, SessionState::Scanning);
    assert_eq!(
        resumed.commands,
        vec![IntakeCommand::Resume { reset_state: true }]
    );

    let transition = controller.on_scan_result(valid("John Roe", "98-76", "9876"));
    assert_eq!(transition.state, SessionState::Finalized);
    let accepted = transition.accepted().unwrap();
    assert_eq!(accepted.document.full_name, "John Roe");
    assert_eq!(accepted.attempts, 2);
}

#[test]
fn scenario_e_cancel_while_deciding_wins() {
    let mut controller = AcceptanceController::new();
    let deciding = controller.submit(valid("Jane Doe", "12-34-56", "123456"));
    assert_eq!(deciding.state, SessionState::Deciding);

    let cancelled = controller.cancel().unwrap();
    assert_eq!(cancelled.state, SessionState::Cancelled);
    assert_eq!(cancelled.outcome, Some(SessionOutcome::Cancelled));
    // Intake was paused on entering Deciding.
    assert!(cancelled.commands.is_empty());

    assert!(matches!(
        controller.resolve(),
        Err(AcceptanceError::SessionTerminated(SessionState::Cancelled))
    ));
    assert_eq!(controller.state(), SessionState::Cancelled);
}

#[test]
fn scenario_e_cancel_handle_while_deciding_wins() {
    let mut controller = AcceptanceController::new();
    let handle = controller.cancel_handle();
    controller.submit(valid("Jane Doe", "12-34-56", "123456"));

    handle.cancel();
    assert_eq!(controller.state(), SessionState::Cancelled);

    let transition = controller.resolve().unwrap();
    assert_eq!(transition.state, SessionState::Cancelled);
    assert_eq!(transition.outcome, Some(SessionOutcome::Cancelled));
    assert!(transition.accepted().is_none());
}

#[test]
fn cancel_raised_from_inside_a_decision_wins() {
    let mut controller = AcceptanceController::new();
    let handle = controller.cancel_handle();

    // The user backs out while the rules run.
    controller
        .engine_mut()
        .rules_mut()
        .push_custom("cancel_midway", move |_, _| {
            handle.cancel();
            true
        });

    let transition = controller.on_scan_result(valid("Jane Doe", "12-34-56", "123456"));
    assert_eq!(transition.state, SessionState::Cancelled);
    assert_eq!(transition.outcome, Some(SessionOutcome::Cancelled));
    assert_eq!(transition.commands, vec![IntakeCommand::Pause]);
}

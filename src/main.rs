// Replays a recorded scan session against the acceptance engine and prints
// what the host would have seen.

use clap::Parser;
use log::info;
use scanaccept::{
    models::{ScanIntake, SessionOutcome, SessionState, Transition, ValidationIssueType},
    replay::SessionScript,
    AcceptanceConfig, AcceptanceController, AcceptanceError,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scanaccept", about = "Replay a document scan session through the acceptance engine")]
struct Args {
    /// JSON session script with scan, acknowledge and cancel events
    #[arg(short, long)]
    script: PathBuf,

    /// JSON acceptance config; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the accepted scan handoff
    #[arg(long)]
    handoff: Option<PathBuf>,
}

// Stands in for the scanning engine: only logs the commands it receives.
struct LoggingIntake;

impl ScanIntake for LoggingIntake {
    fn pause_intake(&mut self) {
        info!("engine: intake paused");
    }

    fn resume_intake(&mut self, reset_state: bool) {
        info!("engine: intake resumed (reset_state={})", reset_state);
    }
}

fn print_session_report(transitions: &[Transition], final_state: SessionState) {
    println!("\n===============================================");
    println!("        DOCUMENT SCAN SESSION REPORT");
    println!("===============================================\n");

    println!("EVENTS:");
    for (index, transition) in transitions.iter().enumerate() {
        println!("  {}. -> {}", index + 1, transition.state);

        if let Some(prompt) = &transition.prompt {
            println!("     Prompt: {} - {}", prompt.title, prompt.message);
        }
        for issue in &transition.issues {
            println!(
                "     - [{}] {}",
                match issue.issue_type {
                    ValidationIssueType::Format => "FORMAT",
                    ValidationIssueType::CrossMatch => "CROSS-MATCH",
                },
                issue.message
            );
        }
    }

    if let Some(accepted) = transitions.iter().rev().find_map(|t| t.accepted()) {
        println!("\nACCEPTED DOCUMENT:");
        println!("  Full Name: {}", accepted.document.full_name);
        println!("  Personal ID Number: {}", accepted.document.personal_id_number);
        println!("  MRZ Opt1: {}", accepted.mrz.opt1);
        println!("  Attempts: {}", accepted.attempts);
        println!(
            "  Full Document Image: {}",
            if accepted.artifacts.full_document_image.is_some() { "YES" } else { "NO" }
        );
        println!(
            "  Face Image: {}",
            if accepted.artifacts.face_image.is_some() { "YES" } else { "NO" }
        );
    }

    println!("\nSession result: {}", final_state);
}

fn run(args: &Args) -> Result<SessionState, AcceptanceError> {
    let config = match &args.config {
        Some(path) => AcceptanceConfig::from_json_file(path)?,
        None => AcceptanceConfig::default(),
    };
    let script = SessionScript::from_json_file(&args.script)?;

    let mut controller = AcceptanceController::with_config(config)?;
    let transitions = script.replay(&mut controller, &mut LoggingIntake)?;
    let final_state = controller.state();

    print_session_report(&transitions, final_state);

    if let Some(path) = &args.handoff {
        let accepted = transitions.iter().find_map(|t| match &t.outcome {
            Some(SessionOutcome::Success(scan)) => Some(scan),
            _ => None,
        });
        match accepted {
            Some(scan) => {
                scan.write_handoff(path)?;
                println!("Handoff written to: {}", path.display());
            }
            None => println!("No accepted scan, handoff not written"),
        }
    }

    Ok(final_state)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(SessionState::Finalized) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error replaying scan session: {}", err);
            ExitCode::FAILURE
        }
    }
}

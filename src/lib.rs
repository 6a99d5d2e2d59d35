pub mod acceptance_controller;
pub mod config;
pub mod decision_engine;
pub mod handoff;
pub mod models;
pub mod replay;
pub mod utils;
pub mod validation;

pub use acceptance_controller::{AcceptanceController, CancelHandle};
pub use config::AcceptanceConfig;
pub use decision_engine::DecisionEngine;
pub use utils::AcceptanceError;

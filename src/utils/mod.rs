pub mod error;

pub use error::AcceptanceError;

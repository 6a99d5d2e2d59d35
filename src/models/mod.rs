pub mod data;
pub mod rules;
pub mod session;

pub use data::*;
pub use rules::*;
pub use session::*;

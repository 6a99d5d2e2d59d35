pub mod format;
pub mod mrz;

pub use format::FieldValidator;
pub use mrz::CrossMatcher;

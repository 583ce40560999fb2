//! CLI command implementations

pub mod extract;
pub mod prompt;

pub use extract::run_extract;
pub use prompt::run_prompt;

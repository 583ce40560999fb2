//! tcparse-core: Core library for extracting test cases from AI replies
//!
//! An assistant asked for test cases may answer with fenced JSON, marker
//! delimited key/value blocks, or Markdown tables. This crate recognizes all
//! three and normalizes them into one [`TestCase`] shape.

/// Core error types for tcparse operations
pub mod error;

/// Configuration handling
pub mod config;

/// Core data types (TestCase, Step, Priority, ...)
pub mod types;

/// Field label and value normalization
pub mod normalize;

/// Step list parsing
pub mod steps;

/// Grammar extractors and the orchestrating entry point
pub mod extract;

/// Prompt text for requesting test cases
pub mod prompt;

// Re-exports for convenience
pub use config::{Config, ExtractConfig};
pub use error::{ExtractIssue, Severity, TcParseError};
pub use extract::{Extraction, extract_test_cases, extract_with_config};
pub use prompt::GENERATION_PROMPT;
pub use types::{ExecutionType, Grammar, Priority, Step, TestCase};

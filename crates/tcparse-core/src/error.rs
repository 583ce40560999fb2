//! Error types for tcparse operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Grammar;

/// Core error type for tcparse operations
#[derive(Error, Debug)]
pub enum TcParseError {
    // === Extraction errors (E101-E103) ===
    /// E101: Fenced block body is not valid JSON
    #[error("E101: fenced block {block} is not valid JSON: {message}")]
    InvalidJson { block: usize, message: String },

    /// E102: Region or table never produced a name
    #[error("E102: {grammar} #{ordinal} has no usable name")]
    MissingName { grammar: Grammar, ordinal: usize },

    /// E103: Fenced JSON parsed but held no test case shape
    #[error("E103: fenced block {block} holds no test case object")]
    NoRecordShape { block: usize },

    // === IO and system errors ===
    /// File not found or unreadable
    #[error("file not found or unreadable: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl TcParseError {
    /// Get the error code (e.g., "E101")
    pub fn code(&self) -> &'static str {
        match self {
            TcParseError::InvalidJson { .. } => "E101",
            TcParseError::MissingName { .. } => "E102",
            TcParseError::NoRecordShape { .. } => "E103",
            TcParseError::FileNotFound(_) => "E201",
            TcParseError::Io(_) => "E201",
            TcParseError::Config(_) => "E202",
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            TcParseError::InvalidJson { .. }
            | TcParseError::MissingName { .. }
            | TcParseError::NoRecordShape { .. } => 1,

            TcParseError::FileNotFound(_) | TcParseError::Io(_) => 2,

            TcParseError::Config(_) => 4,
        }
    }
}

/// Severity of an extraction issue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The block looked like it was meant to carry data and was lost
    Warning,
    /// Expected outcome worth reporting (duplicate dropped, nameless table)
    Info,
}

/// A piece of input that contributed nothing to the result, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractIssue {
    /// Error/info code (e.g., "E101", "I001")
    pub code: String,
    /// Severity level
    pub severity: Severity,
    /// Grammar the issue was found in
    pub grammar: Grammar,
    /// 1-based ordinal of the block/region/table within its grammar
    pub ordinal: usize,
    /// Human-readable message
    pub message: String,
}

impl ExtractIssue {
    /// Record an error that made a block contribute nothing
    pub fn from_error(grammar: Grammar, ordinal: usize, err: &TcParseError) -> Self {
        let severity = match err {
            TcParseError::InvalidJson { .. } => Severity::Warning,
            _ => Severity::Info,
        };
        Self {
            code: err.code().to_string(),
            severity,
            grammar,
            ordinal,
            message: err.to_string(),
        }
    }

    /// Record a record dropped because its name was already taken
    pub fn duplicate(grammar: Grammar, ordinal: usize, name: &str) -> Self {
        Self {
            code: "I001".to_string(),
            severity: Severity::Info,
            grammar,
            ordinal,
            message: format!("I001: duplicate test case name dropped: {}", name),
        }
    }
}

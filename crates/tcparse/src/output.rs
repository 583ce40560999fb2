//! JSON output formatting

use serde::{Deserialize, Serialize};
use tcparse_core::{ExtractIssue, Severity, TcParseError, TestCase};

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Skipped blocks, errors, etc.
    pub issues: Vec<JsonIssue>,
}

impl<T> JsonResponse<T> {
    /// Create a successful response with issues
    pub fn ok_with_issues(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues,
        }
    }

    /// Create a successful response
    pub fn ok(command: &str, data: T) -> Self {
        Self::ok_with_issues(command, data, vec![])
    }

    /// Create an error response
    pub fn error(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "error".to_string(),
            data,
            issues,
        }
    }
}

impl<T: Serialize> JsonResponse<T> {
    /// Print the response to stdout
    pub fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("error: failed to serialize response: {}", e),
        }
    }
}

/// Issue object structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIssue {
    /// Error/info code (e.g., "E101")
    pub code: String,
    /// Severity level
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// Grammar the issue came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
    /// 1-based block/region/table ordinal within its grammar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,
    /// Input file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl From<&ExtractIssue> for JsonIssue {
    fn from(issue: &ExtractIssue) -> Self {
        let severity = match issue.severity {
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        Self {
            code: issue.code.clone(),
            severity: severity.to_string(),
            message: issue.message.clone(),
            grammar: Some(issue.grammar.to_string()),
            ordinal: Some(issue.ordinal),
            file: None,
        }
    }
}

impl From<&TcParseError> for JsonIssue {
    fn from(err: &TcParseError) -> Self {
        Self {
            code: err.code().to_string(),
            severity: "error".to_string(),
            message: err.to_string(),
            grammar: None,
            ordinal: None,
            file: None,
        }
    }
}

impl JsonIssue {
    /// Set the file path
    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

/// Data payload for extract command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractData {
    /// Input file, absent for stdin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Extracted test cases
    pub test_cases: Vec<TestCase>,
}

/// Data payload for prompt command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptData {
    /// Prompt text
    pub prompt: String,
}

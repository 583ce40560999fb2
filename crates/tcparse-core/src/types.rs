//! Core data types for tcparse

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_execution_type;

/// A test case extracted from an assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Test case name (never empty)
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Normalized priority
    #[serde(default)]
    pub priority: Priority,
    /// Tags in source order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Precondition text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_condition: Option<String>,
    /// Postcondition text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_condition: Option<String>,
    /// Overall expected outcome (not per step)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_results: Option<String>,
    /// Whether the case is automated
    #[serde(default)]
    pub is_automated: bool,
    /// Manual, Automation, Hybrid, or free text the assistant supplied
    #[serde(default)]
    pub execution_type: ExecutionType,
    /// Test design technique (boundary value, equivalence partitioning, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_technique: Option<String>,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One action/expected-result pair within a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step number (1-based)
    pub step_number: u32,
    /// Action or input for this step
    pub description: String,
    /// Expected outcome for this step (empty when the source gave none)
    pub expected_result: String,
}

impl Step {
    pub fn new(
        step_number: u32,
        description: impl Into<String>,
        expected_result: impl Into<String>,
    ) -> Self {
        Self {
            step_number,
            description: description.into(),
            expected_result: expected_result.into(),
        }
    }
}

/// Test case priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a test case is executed
///
/// Serialized as a plain string. Values outside the known vocabulary are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ExecutionType {
    #[default]
    Manual,
    Automation,
    Hybrid,
    Other(String),
}

impl ExecutionType {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionType::Manual => "Manual",
            ExecutionType::Automation => "Automation",
            ExecutionType::Hybrid => "Hybrid",
            ExecutionType::Other(text) => text,
        }
    }
}

impl std::fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExecutionType> for String {
    fn from(value: ExecutionType) -> Self {
        match value {
            ExecutionType::Other(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

impl From<String> for ExecutionType {
    fn from(value: String) -> Self {
        normalize_execution_type(&value).unwrap_or_default()
    }
}

/// The textual encoding a record was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// ```json / ```testcase fenced code block
    Fenced,
    /// `=== TESTCASE START ===` ... `=== TESTCASE END ===` region
    Marker,
    /// `| field | value |` Markdown table
    Table,
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grammar::Fenced => write!(f, "fenced"),
            Grammar::Marker => write!(f, "marker"),
            Grammar::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::Low.to_string(), "LOW");
    }

    #[test]
    fn test_execution_type_string_form() {
        let json = serde_json::to_string(&ExecutionType::Automation).unwrap();
        assert_eq!(json, "\"Automation\"");

        let parsed: ExecutionType = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, ExecutionType::Automation);

        let other: ExecutionType = serde_json::from_str("\"Semi-scripted\"").unwrap();
        assert_eq!(other, ExecutionType::Other("Semi-scripted".to_string()));
        assert_eq!(
            serde_json::to_string(&other).unwrap(),
            "\"Semi-scripted\""
        );
    }

    #[test]
    fn test_test_case_camel_case_fields() {
        let tc = TestCase {
            name: "Login".to_string(),
            description: None,
            priority: Priority::High,
            tags: vec!["auth".to_string()],
            pre_condition: Some("User exists".to_string()),
            post_condition: None,
            expected_results: None,
            is_automated: true,
            execution_type: ExecutionType::Automation,
            test_technique: None,
            steps: vec![Step::new(1, "Open page", "Page loads")],
        };

        let value = serde_json::to_value(&tc).unwrap();
        assert_eq!(value["preCondition"], "User exists");
        assert_eq!(value["isAutomated"], true);
        assert_eq!(value["executionType"], "Automation");
        assert_eq!(value["steps"][0]["stepNumber"], 1);
        assert_eq!(value["steps"][0]["expectedResult"], "Page loads");
        assert!(value.get("description").is_none());
    }
}

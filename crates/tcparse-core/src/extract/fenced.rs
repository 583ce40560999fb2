//! Fenced-block extraction
//!
//! Finds ```json and ```testcase code blocks and reads test cases from the
//! JSON inside: a bare array, an object wrapping an array under one of the
//! [`WRAPPER_KEYS`], or a single test case object.

use serde_json::{Map, Value};

use super::{Extraction, Sourced};
use crate::error::{ExtractIssue, TcParseError};
use crate::normalize::{
    RecordDraft, normalize_execution_type, normalize_priority, parse_automation_flag, parse_tags,
    priority_from_level,
};
use crate::types::{Grammar, Step, TestCase};

mod patterns {
    use std::sync::LazyLock;

    pub static FENCED_BLOCK: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"(?is)```(?:json|testcase)[ \t]*\r?\n(.*?)(?:\r?\n)?[ \t]*```").unwrap()
    });
}

/// Object keys that may wrap an array of test cases
pub const WRAPPER_KEYS: &[&str] = &["testCases", "test_cases", "testcase", "test-cases", "cases"];

const PRE_CONDITION_KEYS: &[&str] = &["preCondition", "preconditions", "precondition", "pre_condition"];
const POST_CONDITION_KEYS: &[&str] = &["postCondition", "postcondition", "post_condition"];
const EXPECTED_RESULTS_KEYS: &[&str] = &["expectedResults", "expected_results", "expectedResult"];
const IS_AUTOMATED_KEYS: &[&str] = &["isAutomated", "is_automated", "automated"];
const EXECUTION_TYPE_KEYS: &[&str] = &["executionType", "execution_type"];
const TECHNIQUE_KEYS: &[&str] = &["testTechnique", "test_technique"];

const STEP_NUMBER_KEYS: &[&str] = &["stepNumber", "step_number", "number"];
const STEP_DESCRIPTION_KEYS: &[&str] = &["description", "action", "step"];
const STEP_EXPECTED_KEYS: &[&str] = &["expectedResult", "expected_result", "expected", "result"];

/// Extract test cases from every fenced JSON block, in source order
pub fn extract(content: &str) -> Extraction {
    scan(content).into_extraction()
}

pub(crate) fn scan(content: &str) -> Sourced {
    let mut sourced = Sourced::default();

    for (index, caps) in patterns::FENCED_BLOCK.captures_iter(content).enumerate() {
        let block = index + 1;
        match parse_block(caps[1].trim(), block) {
            Ok(records) => {
                tracing::debug!(block, count = records.len(), "fenced block parsed");
                sourced
                    .records
                    .extend(records.into_iter().map(|tc| (block, tc)));
            }
            Err(err) => {
                if matches!(err, TcParseError::InvalidJson { .. }) {
                    tracing::warn!(block, error = %err, "skipping fenced block");
                } else {
                    tracing::debug!(block, error = %err, "skipping fenced block");
                }
                sourced
                    .issues
                    .push(ExtractIssue::from_error(Grammar::Fenced, block, &err));
            }
        }
    }

    sourced
}

/// Parse the body of one fenced block
fn parse_block(body: &str, block: usize) -> Result<Vec<TestCase>, TcParseError> {
    let parsed: Value = serde_json::from_str(body).map_err(|e| TcParseError::InvalidJson {
        block,
        message: e.to_string(),
    })?;

    match &parsed {
        Value::Array(items) => Ok(records_from_array(items, block)),
        Value::Object(map) => {
            let wrapped = WRAPPER_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array));
            if let Some(items) = wrapped {
                return Ok(records_from_array(items, block));
            }
            record_from_object(map, block)
                .map(|tc| vec![tc])
                .ok_or(TcParseError::NoRecordShape { block })
        }
        _ => Err(TcParseError::NoRecordShape { block }),
    }
}

fn records_from_array(items: &[Value], block: usize) -> Vec<TestCase> {
    items
        .iter()
        .filter_map(|item| {
            let record = item.as_object().and_then(|map| record_from_object(map, block));
            if record.is_none() {
                tracing::debug!(block, "dropping array element without a name");
            }
            record
        })
        .collect()
}

/// Convert a JSON object into a test case; `None` unless `name` is a non-empty string
fn record_from_object(map: &Map<String, Value>, block: usize) -> Option<TestCase> {
    let name = map.get("name").and_then(Value::as_str)?;

    let draft = RecordDraft {
        name: Some(name.to_string()),
        description: string_field(map, &["description"]),
        priority: map.get("priority").and_then(|value| match value {
            Value::String(s) => Some(normalize_priority(s)),
            Value::Number(n) => n.as_u64().map(priority_from_level),
            _ => None,
        }),
        tags: map.get("tags").map(tags_from_value).unwrap_or_default(),
        pre_condition: string_field(map, PRE_CONDITION_KEYS),
        post_condition: string_field(map, POST_CONDITION_KEYS),
        expected_results: string_field(map, EXPECTED_RESULTS_KEYS),
        is_automated: first_value(map, IS_AUTOMATED_KEYS).and_then(|value| match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_automation_flag(s),
            Value::Number(n) => n.as_u64().map(|n| n != 0),
            _ => None,
        }),
        execution_type: string_field(map, EXECUTION_TYPE_KEYS)
            .as_deref()
            .and_then(normalize_execution_type),
        test_technique: string_field(map, TECHNIQUE_KEYS),
        steps: map
            .get("steps")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .map(steps_from_values)
            .unwrap_or_default(),
    };

    draft.finish(Grammar::Fenced, block).ok()
}

fn first_value<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key)).filter(|v| !v.is_null())
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_value(map, keys).and_then(value_to_text)
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn tags_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Value::String(s) => parse_tags(s),
        _ => Vec::new(),
    }
}

/// Steps keep their own `stepNumber`; steps without one are numbered by position
fn steps_from_values(items: &[Value]) -> Vec<Step> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let position = index as u32 + 1;
            match item {
                Value::String(text) => Some(Step::new(position, text.clone(), "")),
                Value::Object(map) => {
                    let number = first_value(map, STEP_NUMBER_KEYS)
                        .and_then(|v| match v {
                            Value::Number(n) => n.as_u64(),
                            Value::String(s) => s.trim().parse().ok(),
                            _ => None,
                        })
                        .and_then(|n| u32::try_from(n).ok())
                        .unwrap_or(position);
                    let description = string_field(map, STEP_DESCRIPTION_KEYS).unwrap_or_default();
                    let expected = string_field(map, STEP_EXPECTED_KEYS).unwrap_or_default();
                    Some(Step::new(number, description, expected))
                }
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExecutionType, Priority};

    #[test]
    fn test_single_object_block() {
        let content = r#"Here you go:

```json
{"name":"Login","priority":"HIGH","steps":[{"stepNumber":1,"description":"Open page","expectedResult":"Page loads"}]}
```
"#;
        let extraction = extract(content);
        assert!(extraction.issues.is_empty());
        assert_eq!(extraction.test_cases.len(), 1);

        let tc = &extraction.test_cases[0];
        assert_eq!(tc.name, "Login");
        assert_eq!(tc.priority, Priority::High);
        assert_eq!(tc.steps, vec![Step::new(1, "Open page", "Page loads")]);
    }

    #[test]
    fn test_array_block_filters_invalid() {
        let content = "```json\n[{\"name\":\"A\"},{\"title\":\"no name\"},{\"name\":\"\"},{\"name\":\"B\"}]\n```";
        let extraction = extract(content);
        let names: Vec<&str> = extraction.test_cases.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_wrapper_keys() {
        for key in WRAPPER_KEYS {
            let content = format!("```testcase\n{{\"{}\": [{{\"name\": \"Wrapped\"}}]}}\n```", key);
            let extraction = extract(&content);
            assert_eq!(extraction.test_cases.len(), 1, "wrapper key {}", key);
            assert_eq!(extraction.test_cases[0].name, "Wrapped");
        }
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let content = "```JSON\n{\"name\":\"Upper\"}\n```";
        assert_eq!(extract(content).test_cases.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_skipped() {
        let content = "```json\n{\"name\": \"Broken\",\n```\n\n```json\n{\"name\":\"Good\"}\n```";
        let extraction = extract(content);
        assert_eq!(extraction.test_cases.len(), 1);
        assert_eq!(extraction.test_cases[0].name, "Good");
        assert_eq!(extraction.issues.len(), 1);
        assert_eq!(extraction.issues[0].code, "E101");
        assert_eq!(extraction.issues[0].ordinal, 1);
    }

    #[test]
    fn test_object_without_shape() {
        let content = "```json\n{\"foo\": 1}\n```";
        let extraction = extract(content);
        assert!(extraction.test_cases.is_empty());
        assert_eq!(extraction.issues[0].code, "E103");
    }

    #[test]
    fn test_loose_json_fields() {
        let content = r#"```json
{
  "name": "Checkout",
  "priority": 1,
  "tags": "cart, payment",
  "preconditions": "Cart has items",
  "post_condition": "Order stored",
  "is_automated": "yes",
  "test_technique": "Boundary value",
  "steps": ["Open cart", {"action": "Pay", "expected": "Receipt shown"}]
}
```"#;
        let tc = &extract(content).test_cases[0];
        assert_eq!(tc.priority, Priority::High);
        assert_eq!(tc.tags, vec!["cart", "payment"]);
        assert_eq!(tc.pre_condition.as_deref(), Some("Cart has items"));
        assert_eq!(tc.post_condition.as_deref(), Some("Order stored"));
        assert!(tc.is_automated);
        assert_eq!(tc.execution_type, ExecutionType::Automation);
        assert_eq!(tc.test_technique.as_deref(), Some("Boundary value"));
        assert_eq!(tc.steps[0], Step::new(1, "Open cart", ""));
        assert_eq!(tc.steps[1], Step::new(2, "Pay", "Receipt shown"));
    }

    #[test]
    fn test_fence_closed_on_json_line() {
        let content = "```json\n{\"name\":\"A\"}```\n\nMore text.\n\n```json\n{\"name\":\"B\"}\n```";
        let extraction = extract(content);
        let names: Vec<&str> = extraction.test_cases.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(extraction.issues.is_empty());
    }

    #[test]
    fn test_priority_word_inside_longer_word() {
        let content = "```json\n[{\"name\":\"A\",\"priority\":\"Highest\"},{\"name\":\"B\",\"priority\":\"P0\"}]\n```";
        let test_cases = extract(content).test_cases;
        assert_eq!(test_cases[0].priority, Priority::High);
        assert_eq!(test_cases[1].priority, Priority::Low);
    }

    #[test]
    fn test_plain_code_block_ignored() {
        let content = "```\n{\"name\":\"Untagged\"}\n```\n```rust\nfn main() {}\n```";
        let extraction = extract(content);
        assert!(extraction.test_cases.is_empty());
        assert!(extraction.issues.is_empty());
    }
}

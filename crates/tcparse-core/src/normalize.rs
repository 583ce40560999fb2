//! Field normalization
//!
//! Maps the loosely spelled field labels and values an assistant produces
//! (English and Korean, several synonyms each) onto the canonical vocabulary
//! of [`TestCase`]. Every extractor funnels its findings through
//! [`RecordDraft::finish`], so defaults and cross-derivation rules live here
//! and nowhere else.

use crate::error::TcParseError;
use crate::types::{ExecutionType, Grammar, Priority, Step, TestCase};

/// Priority applied when absent or unrecognized
pub const DEFAULT_PRIORITY: Priority = Priority::Medium;

/// Execution type applied when neither it nor the automation flag is known
pub const DEFAULT_EXECUTION_TYPE: ExecutionType = ExecutionType::Manual;

/// Automation flag applied when undetermined
pub const DEFAULT_IS_AUTOMATED: bool = false;

/// Regex patterns for normalization (compiled once)
pub(crate) mod patterns {
    use std::sync::LazyLock;

    pub static PRIORITY_TOKEN: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"(?i)\bP(\d+)\b|high|medium|low|높음|보통|낮음").unwrap()
    });

    pub static BRACKETED_LIST: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"\[([^\]]+)\]").unwrap());

    pub static BR_TAG: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?i)<br\s*/?>").unwrap());
}

/// Canonical test case field a label can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Recognized but deliberately not stored (test case IDs)
    Ignored,
    Name,
    Description,
    Priority,
    Tags,
    PreCondition,
    Steps,
    ExpectedResults,
    PostCondition,
    IsAutomated,
    ExecutionType,
    TestTechnique,
}

/// Table/field label aliases, checked in order; the first contained alias wins.
///
/// Aliases are written in the squashed form produced by [`squash_label`].
static FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Ignored, &["tcid", "testcaseid"]),
    (Field::Name, &["name", "title", "제목", "테스트케이스제목"]),
    (Field::Description, &["description", "설명", "테스트목적", "목적"]),
    (Field::Priority, &["priority", "우선순위"]),
    (Field::Tags, &["tags", "태그"]),
    (
        Field::PreCondition,
        &["precondition", "전제조건", "사전조건"],
    ),
    (
        Field::Steps,
        &["steps", "teststeps", "inputdata", "테스트입력", "스텝"],
    ),
    (
        Field::ExpectedResults,
        &["expectedresult", "예상결과", "예상된결과", "기대결과"],
    ),
    (Field::PostCondition, &["postcondition", "사후조건"]),
    (
        Field::IsAutomated,
        &["isautomated", "automationflag", "자동화여부"],
    ),
    (
        Field::ExecutionType,
        &["manualautomation", "executiontype", "실행유형", "실행방식"],
    ),
    (Field::TestTechnique, &["testtechnique", "technique", "테스트기법"]),
];

/// Marker-block keys, matched exactly against the lower-cased key
static MARKER_KEYS: &[(Field, &[&str])] = &[
    (Field::Name, &["name", "이름", "testcase name"]),
    (Field::Description, &["description", "설명"]),
    (Field::Priority, &["priority", "우선순위"]),
    (Field::Tags, &["tags", "태그"]),
    (
        Field::PreCondition,
        &["precondition", "preconditions", "전제조건"],
    ),
    (
        Field::ExpectedResults,
        &["expectedresults", "expected results", "예상 결과"],
    ),
];

static TRUE_FLAGS: &[&str] = &["y", "yes", "true", "1", "자동", "자동화"];
static FALSE_FLAGS: &[&str] = &["n", "no", "false", "0", "수동"];

static EXECUTION_TYPES: &[(ExecutionType, &[&str])] = &[
    (ExecutionType::Automation, &["automation", "auto", "a", "자동화"]),
    (ExecutionType::Manual, &["manual", "m", "수동"]),
    (ExecutionType::Hybrid, &["hybrid", "mixed", "혼합", "복합"]),
];

/// Lower-case a label and drop whitespace, hyphens, underscores and slashes
pub fn squash_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '\u{2011}' | '_' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a table field label to its canonical field
pub fn canonical_field(label: &str) -> Option<Field> {
    let squashed = squash_label(&label.replace("**", ""));
    if squashed.is_empty() {
        return None;
    }
    FIELD_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| squashed.contains(alias)))
        .map(|(field, _)| *field)
}

/// Resolve a marker-block key to its canonical field
pub fn marker_field(key: &str) -> Option<Field> {
    let key = key.trim().to_lowercase();
    MARKER_KEYS
        .iter()
        .find(|(_, aliases)| aliases.contains(&key.as_str()))
        .map(|(field, _)| *field)
}

/// Normalize a priority value
///
/// Accepts `HIGH|MEDIUM|LOW` in any casing (also inside words such as
/// `Highest`), Korean equivalents, or a `P<n>` code anywhere in the text.
/// The first token found decides.
pub fn normalize_priority(raw: &str) -> Priority {
    let Some(caps) = patterns::PRIORITY_TOKEN.captures(raw) else {
        return DEFAULT_PRIORITY;
    };

    if let Some(level) = caps.get(1) {
        return match level.as_str().parse::<u64>() {
            Ok(n) => priority_from_level(n),
            Err(_) => Priority::Low,
        };
    }

    match caps[0].to_lowercase().as_str() {
        "high" | "높음" => Priority::High,
        "low" | "낮음" => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Map a numeric priority level (as in `P1`) onto a priority
///
/// Only 1 and 2 are special; P0 and P3 onwards are low.
pub fn priority_from_level(level: u64) -> Priority {
    match level {
        1 => Priority::High,
        2 => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Parse a tag list, either `[a, "b", 'c']` or plain `a, b, c`
pub fn parse_tags(raw: &str) -> Vec<String> {
    if let Some(caps) = patterns::BRACKETED_LIST.captures(raw) {
        return caps[1]
            .split(',')
            .map(|t| t.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Interpret an automation flag; `None` when the value says neither
pub fn parse_automation_flag(raw: &str) -> Option<bool> {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    if TRUE_FLAGS.iter().any(|token| lower.contains(token)) {
        Some(true)
    } else if FALSE_FLAGS.iter().any(|token| lower.contains(token)) {
        Some(false)
    } else {
        None
    }
}

/// Normalize an execution type; unknown text is kept verbatim
pub fn normalize_execution_type(raw: &str) -> Option<ExecutionType> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    let known = EXECUTION_TYPES
        .iter()
        .find(|(_, tokens)| tokens.contains(&lower.as_str()))
        .map(|(kind, _)| kind.clone());
    Some(known.unwrap_or_else(|| ExecutionType::Other(trimmed.to_string())))
}

/// Replace `<br>` tags with newlines
pub fn br_to_newlines(value: &str) -> String {
    patterns::BR_TAG.replace_all(value, "\n").into_owned()
}

/// Convert a value to Option, returning None only if empty
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Fields collected by an extractor before defaults are applied
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
    pub pre_condition: Option<String>,
    pub post_condition: Option<String>,
    pub expected_results: Option<String>,
    pub is_automated: Option<bool>,
    pub execution_type: Option<ExecutionType>,
    pub test_technique: Option<String>,
    pub steps: Vec<Step>,
}

impl RecordDraft {
    /// Apply defaults and cross-derivation, rejecting drafts without a name
    pub fn finish(self, grammar: Grammar, ordinal: usize) -> Result<TestCase, TcParseError> {
        let name = self
            .name
            .as_deref()
            .and_then(non_empty)
            .ok_or(TcParseError::MissingName { grammar, ordinal })?;

        let (is_automated, execution_type) =
            resolve_execution(self.is_automated, self.execution_type);

        Ok(TestCase {
            name,
            description: self.description.as_deref().and_then(non_empty),
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
            tags: self.tags,
            pre_condition: self.pre_condition.as_deref().and_then(non_empty),
            post_condition: self.post_condition.as_deref().and_then(non_empty),
            expected_results: self.expected_results.as_deref().and_then(non_empty),
            is_automated,
            execution_type,
            test_technique: self.test_technique.as_deref().and_then(non_empty),
            steps: self.steps,
        })
    }
}

/// Cross-derive the automation flag and execution type
///
/// An explicit execution type wins for display and fills the flag only when
/// the flag is unset. A known flag fills a missing execution type.
fn resolve_execution(
    is_automated: Option<bool>,
    execution_type: Option<ExecutionType>,
) -> (bool, ExecutionType) {
    match execution_type {
        Some(kind) => {
            let derived = match kind {
                ExecutionType::Automation => Some(true),
                ExecutionType::Manual => Some(false),
                _ => None,
            };
            let flag = is_automated.or(derived).unwrap_or(DEFAULT_IS_AUTOMATED);
            (flag, kind)
        }
        None => {
            let flag = is_automated.unwrap_or(DEFAULT_IS_AUTOMATED);
            let kind = match is_automated {
                Some(true) => ExecutionType::Automation,
                Some(false) => ExecutionType::Manual,
                None => DEFAULT_EXECUTION_TYPE,
            };
            (flag, kind)
        }
    }
}

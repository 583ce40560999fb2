//! Marker-block extraction
//!
//! Parses regions delimited by `=== TESTCASE START ===` and
//! `=== TESTCASE END ===`. Inside a region, `key: value` lines fill fields
//! until a `steps:` line switches to collecting `N. action | expected` rows.

use super::{Extraction, Sourced};
use crate::error::{ExtractIssue, TcParseError};
use crate::normalize::{Field, RecordDraft, marker_field, normalize_priority, parse_tags};
use crate::steps::steps_from_triples;
use crate::types::{Grammar, TestCase};

/// Regex patterns for parsing (compiled once)
mod patterns {
    use std::sync::LazyLock;

    pub static REGION: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"(?is)===\s*TESTCASE\s+START\s*===(.*?)===\s*TESTCASE\s+END\s*===")
            .unwrap()
    });

    pub static STEP_ROW: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^(\d+)\.\s*(.+?)\s*\|\s*(.+)$").unwrap());

    pub static KEY_VALUE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^([^:]+):\s*(.+)$").unwrap());
}

/// Where we are inside a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Fields,
    Steps,
}

/// Extract one test case per marker region, in source order
pub fn extract(content: &str) -> Extraction {
    scan(content).into_extraction()
}

pub(crate) fn scan(content: &str) -> Sourced {
    let mut sourced = Sourced::default();

    for (index, caps) in patterns::REGION.captures_iter(content).enumerate() {
        let ordinal = index + 1;
        match parse_region(&caps[1], ordinal) {
            Ok(tc) => sourced.records.push((ordinal, tc)),
            Err(err) => {
                tracing::debug!(region = ordinal, error = %err, "dropping marker region");
                sourced
                    .issues
                    .push(ExtractIssue::from_error(Grammar::Marker, ordinal, &err));
            }
        }
    }

    sourced
}

/// Parse the text between one START/END pair
fn parse_region(body: &str, ordinal: usize) -> Result<TestCase, TcParseError> {
    let mut draft = RecordDraft::default();
    let mut section = Section::Fields;
    let mut triples: Vec<(u32, String, String)> = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if opens_steps(line) {
            section = Section::Steps;
            continue;
        }

        if section == Section::Steps {
            if let Some(caps) = patterns::STEP_ROW.captures(line) {
                if let Ok(number) = caps[1].parse::<u32>() {
                    triples.push((
                        number,
                        caps[2].trim().to_string(),
                        caps[3].trim().to_string(),
                    ));
                    continue;
                }
            }
        }

        // Non-step lines are tried as key/value pairs in either section
        if let Some(caps) = patterns::KEY_VALUE.captures(line) {
            apply_key_value(&mut draft, &caps[1], caps[2].trim());
        }
    }

    draft.steps = steps_from_triples(triples);
    draft.finish(Grammar::Marker, ordinal)
}

/// A `steps:` (or `테스트 스텝:`) line opens step collection
fn opens_steps(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.ends_with("steps:") || lower.ends_with("스텝:")
}

fn apply_key_value(draft: &mut RecordDraft, key: &str, value: &str) {
    match marker_field(key) {
        Some(Field::Name) => draft.name = Some(value.to_string()),
        Some(Field::Description) => draft.description = Some(value.to_string()),
        Some(Field::Priority) => draft.priority = Some(normalize_priority(value)),
        Some(Field::Tags) => draft.tags = parse_tags(value),
        Some(Field::PreCondition) => draft.pre_condition = Some(value.to_string()),
        Some(Field::ExpectedResults) => draft.expected_results = Some(value.to_string()),
        _ => {}
    }
}

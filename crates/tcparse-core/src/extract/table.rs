//! Markdown-table extraction
//!
//! Each `| field | value |` table (header row, separator row, body rows)
//! yields at most one test case. Body labels are resolved through the field
//! alias table; `Step N` labels become steps, with the value cell read through
//! a small `**설명**: ... <br>**예상 결과**: ...` grammar.

use super::{Extraction, Sourced};
use crate::error::{ExtractIssue, TcParseError};
use crate::normalize::{
    Field, RecordDraft, br_to_newlines, canonical_field, normalize_execution_type,
    normalize_priority, parse_automation_flag, parse_tags,
};
use crate::steps::{is_numbered_list, steps_from_lists, steps_from_triples};
use crate::types::{Grammar, TestCase};

/// Regex patterns for parsing (compiled once)
mod patterns {
    use std::sync::LazyLock;

    pub static STEP_LABEL: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?i)(?:step|스텝)\s*(\d+)").unwrap());

    pub static STEP_DESCRIPTION: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(
            r"(?i)(?:^|\*\*)(?:설명|description|action)(?:\*\*)?\s*[：:]\s*(?:\*\*)?\s*(.+?)\s*(?:<br\s*/?>|\*\*(?:예상\s*결과|expected\s*results?)|(?:예상\s*결과|\bexpected\s*results?)\s*[：:]|$)",
        )
        .unwrap()
    });

    pub static STEP_EXPECTED: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(
            r"(?i)(?:\*\*)?(?:예상\s*결과|\bexpected\s*results?)(?:\*\*)?\s*[：:]\s*(?:\*\*)?\s*(.+?)\s*$",
        )
        .unwrap()
    });
}

/// Extract one test case per Markdown table, in source order
pub fn extract(content: &str) -> Extraction {
    scan(content).into_extraction()
}

pub(crate) fn scan(content: &str) -> Sourced {
    let mut sourced = Sourced::default();

    for (index, body) in find_tables(content).into_iter().enumerate() {
        let ordinal = index + 1;
        match parse_table(&body, ordinal) {
            Ok(tc) => sourced.records.push((ordinal, tc)),
            Err(err) => {
                tracing::debug!(table = ordinal, error = %err, "dropping table");
                sourced
                    .issues
                    .push(ExtractIssue::from_error(Grammar::Table, ordinal, &err));
            }
        }
    }

    sourced
}

/// Locate tables and return the body rows of each
///
/// A table starts at a pipe row directly followed by a separator row of
/// dashes and colons; its body is the run of pipe rows after that.
pub fn find_tables(content: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut tables = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() {
        if !(is_row(lines[i]) && is_separator(lines[i + 1])) {
            i += 1;
            continue;
        }

        let start = i + 2;
        let mut end = start;
        while end < lines.len() && is_row(lines[end]) && !is_separator(lines[end]) {
            end += 1;
        }

        if end > start {
            tables.push(lines[start..end].to_vec());
            i = end;
        } else {
            i = start;
        }
    }

    tables
}

fn is_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    is_row(trimmed)
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Turn the body rows of one table into a test case
fn parse_table(rows: &[&str], ordinal: usize) -> Result<TestCase, TcParseError> {
    let mut draft = RecordDraft::default();
    let mut triples: Vec<(u32, String, String)> = Vec::new();
    let mut steps_text: Option<String> = None;

    for row in rows {
        let cells: Vec<&str> = row
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();
        if cells.len() < 2 {
            continue;
        }

        let label = cells[0].replace("**", "");
        let label = label.trim();
        let value = cells[1];

        if let Some(caps) = patterns::STEP_LABEL.captures(label) {
            if let Ok(number) = caps[1].parse::<u32>() {
                let (description, expected) = split_step_cell(value);
                triples.push((number, description, expected));
                continue;
            }
        }

        match canonical_field(label) {
            Some(Field::Name) => draft.name = Some(value.to_string()),
            Some(Field::Description) => draft.description = Some(value.to_string()),
            Some(Field::Priority) => draft.priority = Some(normalize_priority(value)),
            Some(Field::Tags) => draft.tags = parse_tags(value),
            Some(Field::PreCondition) => draft.pre_condition = Some(br_to_newlines(value)),
            Some(Field::PostCondition) => draft.post_condition = Some(br_to_newlines(value)),
            Some(Field::Steps) => steps_text = Some(value.to_string()),
            Some(Field::ExpectedResults) => draft.expected_results = Some(value.to_string()),
            Some(Field::IsAutomated) => {
                if let Some(flag) = parse_automation_flag(value) {
                    draft.is_automated = Some(flag);
                }
            }
            Some(Field::ExecutionType) => draft.execution_type = normalize_execution_type(value),
            Some(Field::TestTechnique) => draft.test_technique = Some(value.to_string()),
            Some(Field::Ignored) | None => {}
        }
    }

    if !triples.is_empty() {
        draft.steps = steps_from_triples(triples);
    } else if let Some(text) = steps_text {
        let expected = draft
            .expected_results
            .as_deref()
            .filter(|text| is_numbered_list(text));
        draft.steps = steps_from_lists(&text, expected);
    }

    draft.finish(Grammar::Table, ordinal)
}

/// Split a `Step N` value cell into (description, expected result)
///
/// The description label counts only when bolded or leading the cell, and the
/// description runs until `<br>`, a bold expected-result label, or an
/// expected-result label followed by a colon. Without a recognizable
/// description label the whole cell is the description.
fn split_step_cell(value: &str) -> (String, String) {
    let description = patterns::STEP_DESCRIPTION
        .captures(value)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| value.trim().to_string());

    let expected = patterns::STEP_EXPECTED
        .captures(value)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    (description, expected)
}

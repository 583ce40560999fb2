//! Step list parsing
//!
//! Two ways in: a free-text numbered list (optionally paired with a parallel
//! numbered list of expected results), or triples that already carry their
//! own step numbers.

use crate::types::Step;

mod patterns {
    use std::sync::LazyLock;

    pub static HTML_BREAK: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"(?i)<br\s*/?>|</?(?:p|div|li)\s*>").unwrap()
    });

    pub static NUMBERED_ITEM: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^(\d+)\.\s+(.+)$").unwrap());
}

/// Split a numbered list into its items, leading numbers stripped
///
/// `<br>`, `<p>`, `<div>` and `<li>` tags count as line breaks. A line that
/// does not start with `N.` continues the item before it.
pub fn parse_numbered_list(content: &str) -> Vec<String> {
    let normalized = patterns::HTML_BREAK.replace_all(content, "\n");

    let mut items = Vec::new();
    let mut current: Option<String> = None;

    for line in normalized.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = patterns::NUMBERED_ITEM.captures(trimmed) {
            if let Some(item) = current.take() {
                items.push(item);
            }
            current = Some(caps[2].trim().to_string());
        } else {
            match current.as_mut() {
                Some(item) => {
                    item.push(' ');
                    item.push_str(trimmed);
                }
                None => current = Some(trimmed.to_string()),
            }
        }
    }

    if let Some(item) = current {
        items.push(item);
    }

    items
}

/// Whether any line of the text starts a numbered item
pub fn is_numbered_list(content: &str) -> bool {
    patterns::HTML_BREAK
        .replace_all(content, "\n")
        .lines()
        .any(|line| patterns::NUMBERED_ITEM.is_match(line.trim()))
}

/// Pair step items with expected-result items by position, numbering 1..N
pub fn pair_steps(steps: &[String], expected: &[String]) -> Vec<Step> {
    steps
        .iter()
        .enumerate()
        .map(|(index, description)| {
            let expected_result = expected.get(index).cloned().unwrap_or_default();
            Step::new(index as u32 + 1, description.clone(), expected_result)
        })
        .collect()
}

/// Build steps from a numbered steps text and an optional expected-results text
pub fn steps_from_lists(steps_text: &str, expected_text: Option<&str>) -> Vec<Step> {
    let steps = parse_numbered_list(steps_text);
    let expected = expected_text.map(parse_numbered_list).unwrap_or_default();
    pair_steps(&steps, &expected)
}

/// Build steps from triples that carry their own numbers; numbers are kept
pub fn steps_from_triples<I, D, E>(triples: I) -> Vec<Step>
where
    I: IntoIterator<Item = (u32, D, E)>,
    D: Into<String>,
    E: Into<String>,
{
    triples
        .into_iter()
        .map(|(number, description, expected)| Step::new(number, description, expected))
        .collect()
}

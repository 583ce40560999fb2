//! Test case extraction from assistant replies
//!
//! Three independent grammar passes run over the same text in a fixed order
//! (fenced JSON, marker regions, Markdown tables). Their records are
//! concatenated and deduplicated by name, keeping the first occurrence.

pub mod fenced;
pub mod marker;
pub mod table;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ExtractConfig;
use crate::error::ExtractIssue;
use crate::types::{Grammar, TestCase};

/// Records found in a piece of text, plus what was skipped along the way
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted test cases, first-seen order
    pub test_cases: Vec<TestCase>,
    /// Blocks, regions, tables or records that contributed nothing
    pub issues: Vec<ExtractIssue>,
}

/// One grammar pass, each record tagged with the ordinal of its block,
/// region or table
#[derive(Debug, Default)]
pub(crate) struct Sourced {
    pub records: Vec<(usize, TestCase)>,
    pub issues: Vec<ExtractIssue>,
}

impl Sourced {
    /// Drop the ordinals
    pub fn into_extraction(self) -> Extraction {
        Extraction {
            test_cases: self.records.into_iter().map(|(_, tc)| tc).collect(),
            issues: self.issues,
        }
    }
}

type GrammarPass = fn(&str) -> Sourced;

/// Extract test cases from one assistant message using every grammar
///
/// Never fails: malformed pieces are skipped and an input with no
/// recognizable encoding yields an empty list.
pub fn extract_test_cases(content: &str) -> Vec<TestCase> {
    extract_with_config(content, &ExtractConfig::default()).test_cases
}

/// Extract test cases using the enabled grammars, reporting skipped pieces
pub fn extract_with_config(content: &str, config: &ExtractConfig) -> Extraction {
    let passes: [(Grammar, bool, GrammarPass); 3] = [
        (Grammar::Fenced, config.fenced, fenced::scan),
        (Grammar::Marker, config.markers, marker::scan),
        (Grammar::Table, config.tables, table::scan),
    ];

    let mut result = Extraction::default();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (grammar, enabled, pass) in passes {
        if !enabled {
            tracing::debug!(%grammar, "grammar disabled");
            continue;
        }

        let Sourced { records, issues } = pass(content);
        tracing::debug!(%grammar, found = records.len(), skipped = issues.len(), "grammar pass finished");
        result.issues.extend(issues);

        for (ordinal, tc) in records {
            if seen_names.contains(&tc.name) {
                tracing::debug!(%grammar, ordinal, name = %tc.name, "dropping duplicate test case");
                result
                    .issues
                    .push(ExtractIssue::duplicate(grammar, ordinal, &tc.name));
            } else {
                seen_names.insert(tc.name.clone());
                result.test_cases.push(tc);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    const MIXED: &str = r#"Two formats for you.

```json
{"name": "A", "priority": "LOW", "description": "from json"}
```

=== TESTCASE START ===
name: B
priority: high
=== TESTCASE END ===

| Field | Value |
|-------|-------|
| name | A |
| description | from table |
"#;

    #[test]
    fn test_first_occurrence_wins() {
        let extraction = extract_with_config(MIXED, &ExtractConfig::default());
        let names: Vec<&str> = extraction.test_cases.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(extraction.test_cases[0].description.as_deref(), Some("from json"));
        assert_eq!(extraction.test_cases[0].priority, Priority::Low);

        let dup: Vec<_> = extraction.issues.iter().filter(|i| i.code == "I001").collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].grammar, Grammar::Table);
    }

    #[test]
    fn test_disabled_grammar_skipped() {
        let config = ExtractConfig {
            fenced: false,
            ..Default::default()
        };
        let extraction = extract_with_config(MIXED, &config);
        let names: Vec<&str> = extraction.test_cases.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(extraction.test_cases[1].description.as_deref(), Some("from table"));
    }

    #[test]
    fn test_duplicate_reports_source_ordinal() {
        let content = r#"```json
{"name": "A"}
```

| Browser | Version |
|---|---|
| Chrome | 120 |

| Field | Value |
|---|---|
| name | A |
"#;
        let extraction = extract_with_config(content, &ExtractConfig::default());
        let dup: Vec<_> = extraction.issues.iter().filter(|i| i.code == "I001").collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].grammar, Grammar::Table);
        assert_eq!(dup[0].ordinal, 2);
    }

    #[test]
    fn test_duplicate_inside_one_fenced_array() {
        let content = "```json\n{\"name\": \"Z\"}\n```\n\n```json\n[{\"name\": \"X\"}, {\"name\": \"X\"}]\n```";
        let extraction = extract_with_config(content, &ExtractConfig::default());
        assert_eq!(extraction.test_cases.len(), 2);
        let dup: Vec<_> = extraction.issues.iter().filter(|i| i.code == "I001").collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].grammar, Grammar::Fenced);
        assert_eq!(dup[0].ordinal, 2);
    }

    #[test]
    fn test_plain_text_is_empty() {
        assert!(extract_test_cases("").is_empty());
        assert!(extract_test_cases("No test cases here, just chatting.").is_empty());
    }
}

//! Implementation of the `tcparse extract` command

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use owo_colors::OwoColorize;
use tcparse_core::{
    Config, ExtractIssue, Extraction, TcParseError, TestCase, extract_with_config,
};

use crate::colors::COLORS;
use crate::output::{ExtractData, JsonIssue, JsonResponse};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "tcparse.toml";

/// Run the extract command
pub fn run_extract(
    file: Option<String>,
    config_path: Option<PathBuf>,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let file = file.filter(|f| f != "-");

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => return Ok(report_error(&err, file.as_deref(), json_output)),
    };

    let content = match read_input(file.as_deref()) {
        Ok(content) => content,
        Err(err) => {
            let err = match (&file, err.downcast::<io::Error>()) {
                (Some(f), Ok(io_err)) if io_err.kind() == io::ErrorKind::NotFound => {
                    TcParseError::FileNotFound(f.clone())
                }
                (_, Ok(io_err)) => TcParseError::Io(io_err),
                (_, Err(other)) => return Err(format!("{:#}", other)),
            };
            return Ok(report_error(&err, file.as_deref(), json_output));
        }
    };

    let Extraction { test_cases, issues } = extract_with_config(&content, &config.extract);
    tracing::info!(found = test_cases.len(), skipped = issues.len(), "extraction finished");

    if json_output {
        let json_issues = issues
            .iter()
            .map(|issue| {
                let json = JsonIssue::from(issue);
                match &file {
                    Some(f) => json.with_file(f),
                    None => json,
                }
            })
            .collect();
        JsonResponse::ok_with_issues(
            "extract",
            ExtractData {
                file: file.clone(),
                test_cases,
            },
            json_issues,
        )
        .print();
    } else if !quiet {
        print_text(&test_cases, &issues);
    }

    Ok(0)
}

/// `--config` wins; otherwise `./tcparse.toml` if present; otherwise defaults
fn load_config(explicit: Option<&Path>) -> Result<Config, TcParseError> {
    if let Some(path) = explicit {
        return Config::load(path);
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        tracing::debug!(path = %fallback.display(), "loading config");
        return Config::load(fallback);
    }
    Ok(Config::default())
}

fn read_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path)),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("reading stdin")?;
            Ok(content)
        }
    }
}

fn report_error(err: &TcParseError, file: Option<&str>, json_output: bool) -> i32 {
    if json_output {
        let mut issue = JsonIssue::from(err);
        if let Some(f) = file {
            issue = issue.with_file(f);
        }
        JsonResponse::error(
            "extract",
            ExtractData {
                file: file.map(str::to_string),
                test_cases: vec![],
            },
            vec![issue],
        )
        .print();
    } else {
        eprintln!("error: {}", err);
    }
    err.exit_code()
}

fn print_text(test_cases: &[TestCase], issues: &[ExtractIssue]) {
    for tc in test_cases {
        let priority = format!("[{}]", tc.priority);
        println!(
            "{} {} ({})",
            priority.style(COLORS.priority(tc.priority)),
            tc.name.style(COLORS.active),
            tc.execution_type
        );
        if let Some(description) = &tc.description {
            println!("    {}", description);
        }
        if !tc.tags.is_empty() {
            println!("    tags: {}", tc.tags.join(", "));
        }
        for step in &tc.steps {
            if step.expected_result.is_empty() {
                println!("    {}. {}", step.step_number, step.description);
            } else {
                println!(
                    "    {}. {} \u{2192} {}",
                    step.step_number, step.description, step.expected_result
                );
            }
        }
    }

    for issue in issues {
        eprintln!("{}: {}", "note".style(COLORS.warning), issue.message);
    }

    let summary = format!(
        "{} test case{} extracted",
        test_cases.len(),
        if test_cases.len() == 1 { "" } else { "s" }
    );
    if test_cases.is_empty() {
        println!("{}", summary.style(COLORS.warning));
    } else {
        println!("{}", summary.style(COLORS.success));
    }
}

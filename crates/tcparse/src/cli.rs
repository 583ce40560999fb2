//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// tcparse - Pull structured test cases out of AI assistant replies
#[derive(Parser)]
#[command(name = "tcparse")]
#[command(version = VERSION)]
#[command(about = "Pull structured test cases out of AI assistant replies")]
#[command(long_about = "tcparse reads the text of an assistant reply and extracts the test cases in it.\n\nUnderstood encodings:\n  ```json / ```testcase fenced blocks\n  === TESTCASE START === ... === TESTCASE END === regions\n  | field | value | Markdown tables\n\nRecords are normalized into one schema and deduplicated by name.")]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./tcparse.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract test cases from a reply
    ///
    /// Reads FILE, or stdin when FILE is omitted or `-`.
    #[command(long_about = "Extract test cases from an assistant reply.\n\nReads FILE, or stdin when FILE is omitted or '-'.\n\nGrammars run in a fixed order (fenced JSON, markers, tables); when two\nrecords share a name the first one found is kept.\n\nGrammars can be switched off in tcparse.toml:\n  [extract]\n  fenced = true\n  markers = true\n  tables = false")]
    Extract {
        /// Reply text file
        file: Option<String>,
    },

    /// Print a prompt asking an assistant for parseable test cases
    Prompt,
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}

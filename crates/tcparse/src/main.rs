//! tcparse CLI - Pull structured test cases out of AI assistant replies

mod cli;
mod colors;
mod commands;
mod output;

use std::process::ExitCode;

use cli::Commands;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "TCPARSE_LOG";

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Some(Commands::Extract { file }) => {
            commands::run_extract(file, cli.config, cli.json, cli.quiet)
        }
        Some(Commands::Prompt) => commands::run_prompt(cli.json, cli.quiet),
        None => {
            // No subcommand - print version info
            if !cli.quiet {
                println!("tcparse v{}", env!("CARGO_PKG_VERSION"));
                println!("Use --help for usage information");
            }
            Ok(0)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Send logs to stderr so stdout stays clean for --json
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

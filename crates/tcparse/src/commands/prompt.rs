//! Implementation of the `tcparse prompt` command

use tcparse_core::GENERATION_PROMPT;

use crate::output::{JsonResponse, PromptData};

/// Run the prompt command
pub fn run_prompt(json_output: bool, quiet: bool) -> Result<i32, String> {
    if json_output {
        JsonResponse::ok(
            "prompt",
            PromptData {
                prompt: GENERATION_PROMPT.to_string(),
            },
        )
        .print();
    } else if !quiet {
        print!("{}", GENERATION_PROMPT);
    }
    Ok(0)
}

//! Line-based terminal loop around a [`DialogueEngine`].
//!
//! Thin wrapper, not part of the core contract: reads a line, calls
//! `respond`, prints the reply, and stops on an exit word or end of input.

use anyhow::Result;
use dialogue_engine::DialogueEngine;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Exit sentinels, matched case-insensitively against the trimmed line.
const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// Runs the session loop until an exit word or end of input.
///
/// Contract violations and unbound-hook errors from the engine propagate;
/// they are script bugs, not user-facing conditions.
pub fn run(mut engine: DialogueEngine) -> Result<()> {
    info!(default_state = %engine.default_state(), "session started");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        // EOF ends the session cleanly.
        let Some(line) = lines.next() else { break };
        let message = line?;
        if EXIT_WORDS.contains(&message.trim().to_lowercase().as_str()) {
            break;
        }

        let response = engine.respond(&message)?;
        println!();
        println!("Bot: {response}");
        println!();
    }

    info!("session ended");
    Ok(())
}

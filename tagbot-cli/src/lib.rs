//! # tagbot-cli
//!
//! CLI wrapper around the dialogue engine: the line-based session loop and
//! the demo negotiation script. No core logic.

pub mod repl;
pub mod script;

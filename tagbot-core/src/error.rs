//! Error types for the dialogue framework.
//!
//! Construction-time findings that are merely suspicious are
//! [`ConstructionWarning`](crate::types::ConstructionWarning)s, not errors;
//! everything here is fatal to the operation that produced it.

use crate::types::{ConstructionWarning, Manner, StateId};
use thiserror::Error;

/// Top-level error for engine construction and dispatch.
#[derive(Error, Debug)]
pub enum TagbotError {
    #[error("Tag table error: {0}")]
    Table(#[from] TableError),

    #[error("Transition contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("Unbound hook: {0}")]
    Unbound(#[from] UnboundHook),

    /// Strict-mode construction failure; carries every validation finding.
    #[error("Validation failed in strict mode ({} problem(s))", .problems.len())]
    Validation { problems: Vec<ConstructionWarning> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed tag-table entries, rejected when the table is compiled.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Empty phrase in tag table")]
    EmptyPhrase,

    #[error("Phrase \"{phrase}\" maps to an empty tag sequence")]
    EmptyTags { phrase: String },

    #[error("Phrase \"{phrase}\" maps to a blank tag")]
    BlankTag { phrase: String },

    #[error("Phrase \"{phrase}\" does not compile to a valid pattern: {reason}")]
    Pattern { phrase: String, reason: String },
}

/// A transition request that the dialogue-script contract forbids.
///
/// These signal a bug in the script, not a recoverable runtime condition.
#[derive(Error, Debug)]
pub enum ContractViolation {
    #[error("State \"{state}\" is not defined")]
    UndeclaredState { state: StateId },

    #[error("Do not call `go_to_state` on the default state \"{state}\"; use `finish` instead")]
    DefaultState { state: StateId },
}

/// Dispatch reached a state or manner with no registered hook.
///
/// Validation only warns, so this surfaces at the first invocation instead
/// of being papered over; swallowing it would desynchronize the displayed
/// state from the actual state.
#[derive(Error, Debug)]
pub enum UnboundHook {
    #[error("State \"{state}\" has no entry hook")]
    Entry { state: StateId },

    #[error("State \"{state}\" has no response hook")]
    Respond { state: StateId },

    #[error("No completion hook is registered for manner \"{manner}\"")]
    Completion { manner: Manner },
}

pub type Result<T> = std::result::Result<T, TagbotError>;

//! # tagbot-core
//!
//! Core types for the tag-driven dialogue framework: state/tag/manner
//! identifiers, the error taxonomy, construction warnings with their
//! validation and completion policies, and tracing initialization.
//! Script-agnostic; used by tag-matcher and dialogue-engine.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{ContractViolation, Result, TableError, TagbotError, UnboundHook};
pub use logger::init_tracing;
pub use types::{
    ConstructionWarning, HookKind, Manner, MannerPolicy, StateId, Tag, ValidationMode,
};

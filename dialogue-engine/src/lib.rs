//! # dialogue-engine
//!
//! Tag-driven finite-state dialogue core: the state registry with
//! first-class hook bindings, the construction-time validation pass, and
//! the [`DialogueEngine`] dispatch/transition machinery.
//!
//! The engine is headless, one `respond(message) -> string` call per
//! conversation turn, so it can sit behind a terminal loop, a test
//! harness, or a network handler. A concrete dialogue script supplies the
//! states, the tag table, and the hooks through [`DialogueEngine::builder`].

pub mod engine;
pub mod registry;

pub use engine::{DialogueEngine, EngineBuilder, Reply, Turn};
pub use registry::{
    CompletionFn, CompletionHook, EntryFn, EntryHook, RespondFn, RespondHook, StateBinding,
    StateRegistry,
};

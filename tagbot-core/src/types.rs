//! Core identifiers and construction-time policy types.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a dialogue state.
///
/// States are declared once at engine construction and are immutable for the
/// engine's lifetime; only the *current* state of a conversation changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Semantic label attached to one or more trigger phrases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// Allows tag-count maps keyed by Tag to be probed with a plain &str.
impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Name of a completion hook: the reason a sub-dialogue ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manner(String);

impl Manner {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Manner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Manner {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Manner {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Which of a state's two hooks a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Entry,
    Respond,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Entry => f.write_str("entry"),
            HookKind::Respond => f.write_str("response"),
        }
    }
}

/// Non-fatal findings from the construction-time validation pass.
///
/// Incomplete dialogue scripts stay constructible so they can be authored
/// incrementally; a missing hook only fails later, at first dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionWarning {
    /// A non-default state has no entry hook.
    MissingEntryHook { state: StateId },
    /// A declared state has no response hook.
    MissingRespondHook { state: StateId },
    /// The nominated default state is not in the declared state list.
    UnknownDefaultState {
        default: StateId,
        suggestion: Option<StateId>,
    },
    /// A hook was registered for a state that was never declared.
    UndeclaredBinding { state: StateId, kind: HookKind },
}

impl fmt::Display for ConstructionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionWarning::MissingEntryHook { state } => {
                write!(f, "State \"{state}\" is declared but has no entry hook")
            }
            ConstructionWarning::MissingRespondHook { state } => {
                write!(f, "State \"{state}\" is declared but has no response hook")
            }
            ConstructionWarning::UnknownDefaultState {
                default,
                suggestion,
            } => {
                write!(f, "The default state \"{default}\" is not a declared state.")?;
                if let Some(suggestion) = suggestion {
                    write!(f, " Perhaps you mean \"{suggestion}\"?")?;
                }
                Ok(())
            }
            ConstructionWarning::UndeclaredBinding { state, kind } => {
                write!(
                    f,
                    "A {kind} hook is registered for \"{state}\", which is not a declared state"
                )
            }
        }
    }
}

/// How validation findings are treated at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Log findings as warnings and keep them on the engine (the default;
    /// partial scripts remain usable).
    #[default]
    Permissive,
    /// Fail construction if any finding is produced.
    Strict,
}

/// What `finish` does when no completion hook is registered for a manner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MannerPolicy {
    /// Surface an unbound-hook error (the default).
    #[default]
    Strict,
    /// Return the given text instead, still resetting to the default state.
    Fallback(String),
}

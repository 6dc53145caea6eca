//! State registry: declared states, hook bindings, completion hooks, and
//! the construction-time validation pass.

use crate::engine::{Reply, Turn};
use std::collections::BTreeMap;
use std::sync::Arc;
use tag_matcher::TagCount;
use tagbot_core::{ConstructionWarning, HookKind, Manner, Result, StateId, UnboundHook};

/// Entry hook: run when a non-default state is entered; produces the
/// state's opening line.
pub type EntryFn = dyn Fn() -> String + Send + Sync;

/// Completion hook: run when a sub-dialogue ends in some manner; produces
/// the closing line.
pub type CompletionFn = dyn Fn() -> String + Send + Sync;

/// Response hook: decides the next transition for the current state, given
/// the message text and its tags. The only way to produce the required
/// [`Reply`] is through the [`Turn`] argument, so every response goes
/// through exactly one transition primitive.
pub type RespondFn = dyn Fn(&mut Turn<'_>, &str, &TagCount) -> Result<Reply> + Send + Sync;

pub type EntryHook = Arc<EntryFn>;
pub type CompletionHook = Arc<CompletionFn>;
pub type RespondHook = Arc<RespondFn>;

/// Hook record for one state: the entry hook (required for every
/// non-default state) and the response hook (required for every state).
#[derive(Clone, Default)]
pub struct StateBinding {
    pub(crate) entry: Option<EntryHook>,
    pub(crate) respond: Option<RespondHook>,
}

/// Immutable lookup from states and manners to their hooks.
///
/// Populated by the engine builder, validated once, and shared read-only
/// between engine instances afterwards.
#[derive(Clone, Default)]
pub struct StateRegistry {
    states: Vec<StateId>,
    bindings: BTreeMap<StateId, StateBinding>,
    completions: BTreeMap<Manner, CompletionHook>,
}

impl StateRegistry {
    /// Declared states, in declaration order.
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn is_declared(&self, state: &StateId) -> bool {
        self.states.contains(state)
    }

    pub(crate) fn declare(&mut self, state: StateId) {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
    }

    pub(crate) fn set_entry(&mut self, state: StateId, hook: EntryHook) {
        self.bindings.entry(state).or_default().entry = Some(hook);
    }

    pub(crate) fn set_respond(&mut self, state: StateId, hook: RespondHook) {
        self.bindings.entry(state).or_default().respond = Some(hook);
    }

    pub(crate) fn set_completion(&mut self, manner: Manner, hook: CompletionHook) {
        self.completions.insert(manner, hook);
    }

    pub(crate) fn entry_hook(&self, state: &StateId) -> Result<&EntryFn> {
        self.bindings
            .get(state)
            .and_then(|binding| binding.entry.as_deref())
            .ok_or_else(|| {
                UnboundHook::Entry {
                    state: state.clone(),
                }
                .into()
            })
    }

    pub(crate) fn respond_hook(&self, state: &StateId) -> Result<&RespondFn> {
        self.bindings
            .get(state)
            .and_then(|binding| binding.respond.as_deref())
            .ok_or_else(|| {
                UnboundHook::Respond {
                    state: state.clone(),
                }
                .into()
            })
    }

    pub(crate) fn completion_hook(&self, manner: &Manner) -> Option<&CompletionFn> {
        self.completions.get(manner).map(|hook| hook.as_ref())
    }

    /// Construction-time validation pass.
    ///
    /// Checks that every non-default state has an entry hook, every declared
    /// state has a response hook, the default state is declared, and no hook
    /// is bound to an undeclared state. Findings are returned, not raised:
    /// the builder decides whether they warn or fail.
    pub(crate) fn validate(&self, default_state: &StateId) -> Vec<ConstructionWarning> {
        let mut warnings = Vec::new();

        if !self.is_declared(default_state) {
            warnings.push(ConstructionWarning::UnknownDefaultState {
                default: default_state.clone(),
                suggestion: self.states.first().cloned(),
            });
        }

        for state in &self.states {
            let binding = self.bindings.get(state);
            if state != default_state && binding.is_none_or(|b| b.entry.is_none()) {
                warnings.push(ConstructionWarning::MissingEntryHook {
                    state: state.clone(),
                });
            }
            if binding.is_none_or(|b| b.respond.is_none()) {
                warnings.push(ConstructionWarning::MissingRespondHook {
                    state: state.clone(),
                });
            }
        }

        for (state, binding) in &self.bindings {
            if !self.is_declared(state) {
                if binding.entry.is_some() {
                    warnings.push(ConstructionWarning::UndeclaredBinding {
                        state: state.clone(),
                        kind: HookKind::Entry,
                    });
                }
                if binding.respond.is_some() {
                    warnings.push(ConstructionWarning::UndeclaredBinding {
                        state: state.clone(),
                        kind: HookKind::Respond,
                    });
                }
            }
        }

        warnings
    }
}

//! Dialogue engine: per-turn dispatch and the two transition primitives.

use crate::registry::StateRegistry;
use std::sync::Arc;
use tag_matcher::{TagCount, TagMatcher, TagTable};
use tagbot_core::{
    ConstructionWarning, ContractViolation, Manner, MannerPolicy, Result, StateId, TagbotError,
    UnboundHook, ValidationMode,
};
use tracing::{debug, info, instrument, warn};

/// Proof that a response hook delegated to a transition primitive.
///
/// Only [`Turn::go_to_state`] and [`Turn::finish`] construct one; the
/// engine unwraps it into the reply text. A hook therefore cannot produce
/// output without also settling the next state; state and output always
/// update together.
#[derive(Debug)]
pub struct Reply(pub(crate) String);

/// Transition controller handed to a response hook for the duration of one
/// `respond` call.
pub struct Turn<'a> {
    current: &'a mut StateId,
    default_state: &'a StateId,
    registry: &'a StateRegistry,
    manner_policy: &'a MannerPolicy,
}

impl Turn<'_> {
    /// Enters `target`: runs its entry hook to obtain the opening line,
    /// then makes it the current state.
    ///
    /// Rejects an undeclared target, and rejects the default state:
    /// returning to the default must run completion semantics through
    /// [`Turn::finish`]. This is the only path to a non-default state.
    pub fn go_to_state(&mut self, target: impl Into<StateId>) -> Result<Reply> {
        let target = target.into();
        if !self.registry.is_declared(&target) {
            return Err(ContractViolation::UndeclaredState { state: target }.into());
        }
        if target == *self.default_state {
            return Err(ContractViolation::DefaultState { state: target }.into());
        }
        let hook = self.registry.entry_hook(&target)?;
        let response = hook();
        info!(state = %target, "step: entered state");
        *self.current = target;
        Ok(Reply(response))
    }

    /// Ends the sub-dialogue in the given `manner`: runs the matching
    /// completion hook to obtain the closing line, then resets the current
    /// state to the default. This is the only path back to the default.
    pub fn finish(&mut self, manner: impl Into<Manner>) -> Result<Reply> {
        let manner = manner.into();
        let response = match self.registry.completion_hook(&manner) {
            Some(hook) => hook(),
            None => match self.manner_policy {
                MannerPolicy::Strict => {
                    return Err(UnboundHook::Completion { manner }.into());
                }
                MannerPolicy::Fallback(text) => {
                    warn!(manner = %manner, "no completion hook; using fallback text");
                    text.clone()
                }
            },
        };
        info!(manner = %manner, "step: finished, back to default state");
        *self.current = self.default_state.clone();
        Ok(Reply(response))
    }
}

/// Tag-driven finite-state dialogue engine.
///
/// Holds the only mutable piece of conversation identity (the current
/// state) and dispatches each incoming message to the response hook bound
/// to that state. Synchronous: each [`respond`](DialogueEngine::respond)
/// call runs start to finish, one conversation turn at a time. For
/// concurrent conversations, create one instance per conversation with
/// [`conversation`](DialogueEngine::conversation); the registry and the
/// compiled matcher are shared read-only.
pub struct DialogueEngine {
    registry: Arc<StateRegistry>,
    matcher: Arc<TagMatcher>,
    default_state: StateId,
    current: StateId,
    manner_policy: MannerPolicy,
    warnings: Vec<ConstructionWarning>,
}

impl DialogueEngine {
    /// Starts a builder with the given default state (the initial state and
    /// the only state reachable via `finish`).
    pub fn builder(default_state: impl Into<StateId>) -> EngineBuilder {
        EngineBuilder {
            default_state: default_state.into(),
            table: TagTable::default(),
            registry: StateRegistry::default(),
            validation: ValidationMode::default(),
            manner_policy: MannerPolicy::default(),
        }
    }

    /// Responds to one message; the sole per-turn entry point.
    ///
    /// Tags the message, looks up the response hook bound to the current
    /// state, and invokes it with the message, the tags, and a [`Turn`].
    /// Dispatch to a state with no response hook, and contract violations
    /// inside the hook, propagate as errors.
    #[instrument(skip(self, message))]
    pub fn respond(&mut self, message: &str) -> Result<String> {
        let tags = self.matcher.tag(message);
        debug!(state = %self.current, tags = tags.len(), "step: message tagged");

        let hook = self.registry.respond_hook(&self.current)?;
        let mut turn = Turn {
            current: &mut self.current,
            default_state: &self.default_state,
            registry: self.registry.as_ref(),
            manner_policy: &self.manner_policy,
        };
        let reply = hook(&mut turn, message, &tags)?;

        info!(state = %self.current, "step: respond finished");
        Ok(reply.0)
    }

    /// State the next message will be dispatched from.
    pub fn current_state(&self) -> &StateId {
        &self.current
    }

    pub fn default_state(&self) -> &StateId {
        &self.default_state
    }

    /// Findings from the construction-time validation pass.
    pub fn warnings(&self) -> &[ConstructionWarning] {
        &self.warnings
    }

    /// A sibling engine for another concurrent conversation: shares the
    /// registry and matcher read-only, starts from the default state.
    pub fn conversation(&self) -> DialogueEngine {
        DialogueEngine {
            registry: Arc::clone(&self.registry),
            matcher: Arc::clone(&self.matcher),
            default_state: self.default_state.clone(),
            current: self.default_state.clone(),
            manner_policy: self.manner_policy.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

/// Builder for [`DialogueEngine`]: declare states, install the tag table,
/// register hooks, then [`build`](EngineBuilder::build).
pub struct EngineBuilder {
    default_state: StateId,
    table: TagTable,
    registry: StateRegistry,
    validation: ValidationMode,
    manner_policy: MannerPolicy,
}

impl EngineBuilder {
    /// Declares a state. Declaration order is kept; the first declared
    /// state is the suggestion offered when the default state is unknown.
    pub fn state(mut self, name: impl Into<StateId>) -> Self {
        self.registry.declare(name.into());
        self
    }

    /// Declares several states at once.
    pub fn states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        for name in names {
            self.registry.declare(name.into());
        }
        self
    }

    /// Installs the phrase → tag table.
    pub fn table(mut self, table: TagTable) -> Self {
        self.table = table;
        self
    }

    /// Registers the entry hook for `state`.
    pub fn on_enter<F>(mut self, state: impl Into<StateId>, hook: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.registry.set_entry(state.into(), Arc::new(hook));
        self
    }

    /// Registers the response hook for `state`.
    pub fn respond_from<F>(mut self, state: impl Into<StateId>, hook: F) -> Self
    where
        F: Fn(&mut Turn<'_>, &str, &TagCount) -> Result<Reply> + Send + Sync + 'static,
    {
        self.registry.set_respond(state.into(), Arc::new(hook));
        self
    }

    /// Registers the completion hook for `manner`.
    pub fn on_finish<F>(mut self, manner: impl Into<Manner>, hook: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.registry.set_completion(manner.into(), Arc::new(hook));
        self
    }

    /// Selects warning-vs-error handling for validation findings.
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Selects what `finish` does for a manner with no completion hook.
    pub fn manner_policy(mut self, policy: MannerPolicy) -> Self {
        self.manner_policy = policy;
        self
    }

    /// Compiles the tag table and runs the validation pass.
    ///
    /// Table errors are fatal in both modes. Validation findings are logged
    /// and kept on the engine in permissive mode; in strict mode they fail
    /// construction with [`TagbotError::Validation`].
    pub fn build(self) -> Result<DialogueEngine> {
        let matcher = TagMatcher::compile(&self.table)?;

        let warnings = self.registry.validate(&self.default_state);
        for warning in &warnings {
            warn!(detail = %warning, "construction warning");
        }
        if self.validation == ValidationMode::Strict && !warnings.is_empty() {
            return Err(TagbotError::Validation { problems: warnings });
        }

        info!(
            default_state = %self.default_state,
            states = self.registry.states().len(),
            phrases = matcher.len(),
            "step: engine built"
        );

        Ok(DialogueEngine {
            current: self.default_state.clone(),
            default_state: self.default_state,
            registry: Arc::new(self.registry),
            matcher: Arc::new(matcher),
            manner_policy: self.manner_policy,
            warnings,
        })
    }
}

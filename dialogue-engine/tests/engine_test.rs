//! Integration tests for [`dialogue_engine::DialogueEngine`].
//!
//! Covers: the waiting/thoughts_1 round-trip, transition contract
//! violations, unbound-hook dispatch failures, finish/re-entrancy
//! semantics, the validation pass in both modes, the manner policy, and
//! shared-registry sibling conversations.

use dialogue_engine::DialogueEngine;
use tag_matcher::TagTable;
use tagbot_core::{
    ConstructionWarning, ContractViolation, MannerPolicy, StateId, TagbotError, UnboundHook,
    ValidationMode,
};

const ENTRY_TEXT: &str = "Let's talk.";
const FALLBACK_TEXT: &str = "Please say hello.";
const DONE_TEXT: &str = "Bye.";

/// Two-state scenario: `waiting` (default) transitions to `thoughts_1` on
/// the hello tag, otherwise finishes with a fallback; `thoughts_1` always
/// finishes.
fn scenario_engine() -> DialogueEngine {
    DialogueEngine::builder("waiting")
        .states(["waiting", "thoughts_1"])
        .table(TagTable::new().phrase("hello", "hello"))
        .respond_from("waiting", |turn, _message, tags| {
            if tags.contains("hello") {
                turn.go_to_state("thoughts_1")
            } else {
                turn.finish("fallback")
            }
        })
        .on_enter("thoughts_1", || ENTRY_TEXT.to_string())
        .respond_from("thoughts_1", |turn, _message, _tags| turn.finish("done"))
        .on_finish("fallback", || FALLBACK_TEXT.to_string())
        .on_finish("done", || DONE_TEXT.to_string())
        .build()
        .unwrap()
}

/// **Test: Round-trip: greeting enters thoughts_1, next turn dispatches
/// from thoughts_1.**
///
/// **Setup:** Scenario engine in `waiting`.
/// **Action:** `respond("Hello there")`, then `respond("whatever")`.
/// **Expected:** First reply is thoughts_1's entry text and the state is
/// `thoughts_1`; second reply comes from thoughts_1's hook (finish) and the
/// state is back to `waiting`.
#[test]
fn test_round_trip_enters_and_dispatches_from_new_state() {
    let mut engine = scenario_engine();
    assert_eq!(engine.current_state(), &StateId::from("waiting"));

    let reply = engine.respond("Hello there").unwrap();
    assert_eq!(reply, ENTRY_TEXT);
    assert_eq!(engine.current_state(), &StateId::from("thoughts_1"));

    let reply = engine.respond("whatever").unwrap();
    assert_eq!(reply, DONE_TEXT);
    assert_eq!(engine.current_state(), &StateId::from("waiting"));
}

/// **Test: Unrecognized input from the default state finishes with the
/// fallback.**
///
/// **Setup:** Scenario engine in `waiting`.
/// **Action:** `respond("xyz")`.
/// **Expected:** Reply is the fallback completion text; state stays
/// `waiting`.
#[test]
fn test_unrecognized_message_finishes_with_fallback() {
    let mut engine = scenario_engine();

    let reply = engine.respond("xyz").unwrap();

    assert_eq!(reply, FALLBACK_TEXT);
    assert_eq!(engine.current_state(), &StateId::from("waiting"));
}

/// **Test: After a finish, the next respond dispatches through the default
/// state as if freshly constructed.**
///
/// **Setup:** Scenario engine; run a full greet-and-finish exchange.
/// **Action:** `respond("hello again everyone")` (contains "hello").
/// **Expected:** The default state's hook runs again: the engine re-enters
/// `thoughts_1` and returns its entry text.
#[test]
fn test_reentrancy_after_finish() {
    let mut engine = scenario_engine();
    engine.respond("hello").unwrap();
    engine.respond("anything").unwrap();
    assert_eq!(engine.current_state(), &StateId::from("waiting"));

    let reply = engine.respond("hello again everyone").unwrap();

    assert_eq!(reply, ENTRY_TEXT);
    assert_eq!(engine.current_state(), &StateId::from("thoughts_1"));
}

/// **Test: Tagging is case-insensitive end to end.**
///
/// **Setup:** Scenario engine.
/// **Action:** `respond("HELLO")`.
/// **Expected:** The hello tag is seen; the engine enters `thoughts_1`.
#[test]
fn test_case_insensitive_dispatch() {
    let mut engine = scenario_engine();

    let reply = engine.respond("HELLO").unwrap();

    assert_eq!(reply, ENTRY_TEXT);
    assert_eq!(engine.current_state(), &StateId::from("thoughts_1"));
}

/// **Test: go_to_state on the default state is a contract violation.**
///
/// **Setup:** Engine whose default-state hook calls
/// `go_to_state("waiting")`.
/// **Action:** `respond("anything")`.
/// **Expected:** `ContractViolation::DefaultState`; state unchanged.
#[test]
fn test_go_to_default_state_rejected() {
    let mut engine = DialogueEngine::builder("waiting")
        .states(["waiting"])
        .respond_from("waiting", |turn, _message, _tags| {
            turn.go_to_state("waiting")
        })
        .build()
        .unwrap();

    let err = engine.respond("anything").unwrap_err();

    assert!(matches!(
        err,
        TagbotError::Contract(ContractViolation::DefaultState { .. })
    ));
    assert_eq!(engine.current_state(), &StateId::from("waiting"));
}

/// **Test: go_to_state on an undeclared state is a contract violation.**
///
/// **Setup:** Engine whose default-state hook targets a state that was
/// never declared.
/// **Action:** `respond("anything")`.
/// **Expected:** `ContractViolation::UndeclaredState`; state unchanged.
#[test]
fn test_go_to_undeclared_state_rejected() {
    let mut engine = DialogueEngine::builder("waiting")
        .states(["waiting"])
        .respond_from("waiting", |turn, _message, _tags| {
            turn.go_to_state("nowhere")
        })
        .build()
        .unwrap();

    let err = engine.respond("anything").unwrap_err();

    assert!(matches!(
        err,
        TagbotError::Contract(ContractViolation::UndeclaredState { .. })
    ));
    assert_eq!(engine.current_state(), &StateId::from("waiting"));
}

/// **Test: Dispatching from a state with no response hook fails, after
/// construction succeeded with a warning.**
///
/// **Setup:** Permissive engine whose default state has no response hook.
/// **Action:** `build()`, then `respond("hi")`.
/// **Expected:** Construction succeeds and records the warning; respond
/// fails with `UnboundHook::Respond`.
#[test]
fn test_missing_respond_hook_fails_at_dispatch() {
    let mut engine = DialogueEngine::builder("waiting")
        .states(["waiting"])
        .build()
        .unwrap();

    assert_eq!(
        engine.warnings(),
        &[ConstructionWarning::MissingRespondHook {
            state: StateId::from("waiting"),
        }]
    );

    let err = engine.respond("hi").unwrap_err();
    assert!(matches!(
        err,
        TagbotError::Unbound(UnboundHook::Respond { .. })
    ));
}

/// **Test: go_to_state to a state with no entry hook fails and does not
/// change state.**
///
/// **Setup:** Permissive engine; `thoughts_1` is declared without an entry
/// hook; the default hook targets it.
/// **Action:** `respond("anything")`.
/// **Expected:** `UnboundHook::Entry`; current state still `waiting`.
#[test]
fn test_missing_entry_hook_fails_and_preserves_state() {
    let mut engine = DialogueEngine::builder("waiting")
        .states(["waiting", "thoughts_1"])
        .respond_from("waiting", |turn, _message, _tags| {
            turn.go_to_state("thoughts_1")
        })
        .respond_from("thoughts_1", |turn, _message, _tags| turn.finish("done"))
        .on_finish("done", || "done".to_string())
        .build()
        .unwrap();

    let err = engine.respond("anything").unwrap_err();

    assert!(matches!(
        err,
        TagbotError::Unbound(UnboundHook::Entry { .. })
    ));
    assert_eq!(engine.current_state(), &StateId::from("waiting"));
}

/// **Test: finish with an unregistered manner: strict errors, fallback
/// substitutes and still resets.**
///
/// **Setup:** Two engines whose default hook calls `finish("unknown")`:
/// one with the default (strict) policy, one with a fallback text.
/// **Action:** `respond("anything")` on each.
/// **Expected:** Strict: `UnboundHook::Completion`. Fallback: the fallback
/// text is returned and the state is the default.
#[test]
fn test_manner_policy() {
    let build = |policy: MannerPolicy| {
        DialogueEngine::builder("waiting")
            .states(["waiting"])
            .respond_from("waiting", |turn, _message, _tags| turn.finish("unknown"))
            .manner_policy(policy)
            .build()
            .unwrap()
    };

    let mut strict = build(MannerPolicy::Strict);
    let err = strict.respond("anything").unwrap_err();
    assert!(matches!(
        err,
        TagbotError::Unbound(UnboundHook::Completion { .. })
    ));

    let mut permissive = build(MannerPolicy::Fallback("So long.".to_string()));
    let reply = permissive.respond("anything").unwrap();
    assert_eq!(reply, "So long.");
    assert_eq!(permissive.current_state(), &StateId::from("waiting"));
}

/// **Test: Validation warns on missing hooks and an unknown default, and
/// strict mode turns the findings into a construction error.**
///
/// **Setup:** Builder with an undeclared default, a state missing both
/// hooks, and an entry hook for an undeclared state.
/// **Action:** `build()` permissively, then strictly.
/// **Expected:** Permissive: engine builds, warnings enumerate every
/// finding with the first declared state suggested for the default.
/// Strict: `TagbotError::Validation` with the same findings.
#[test]
fn test_validation_modes() {
    let build = |mode: ValidationMode| {
        DialogueEngine::builder("wating")
            .states(["waiting", "thoughts_1"])
            .on_enter("thoughts_9", || "lost".to_string())
            .respond_from("waiting", |turn, _message, _tags| turn.finish("done"))
            .on_finish("done", || "done".to_string())
            .validation(mode)
            .build()
    };

    let engine = build(ValidationMode::Permissive).unwrap();
    let warnings = engine.warnings();
    assert!(warnings.contains(&ConstructionWarning::UnknownDefaultState {
        default: StateId::from("wating"),
        suggestion: Some(StateId::from("waiting")),
    }));
    assert!(warnings.contains(&ConstructionWarning::MissingEntryHook {
        state: StateId::from("waiting"),
    }));
    assert!(warnings.contains(&ConstructionWarning::MissingEntryHook {
        state: StateId::from("thoughts_1"),
    }));
    assert!(warnings.contains(&ConstructionWarning::MissingRespondHook {
        state: StateId::from("thoughts_1"),
    }));

    match build(ValidationMode::Strict) {
        Err(TagbotError::Validation { problems }) => {
            assert_eq!(problems.as_slice(), warnings);
        }
        other => panic!("expected Validation error, got {:?}", other.map(|_| ())),
    }
}

/// **Test: A complete script validates without warnings.**
///
/// **Setup:** The scenario engine built in strict mode.
/// **Action:** `build()`.
/// **Expected:** Construction succeeds; no warnings recorded.
#[test]
fn test_complete_script_validates_cleanly() {
    let engine = DialogueEngine::builder("waiting")
        .states(["waiting", "thoughts_1"])
        .table(TagTable::new().phrase("hello", "hello"))
        .respond_from("waiting", |turn, _message, _tags| turn.finish("done"))
        .on_enter("thoughts_1", || ENTRY_TEXT.to_string())
        .respond_from("thoughts_1", |turn, _message, _tags| turn.finish("done"))
        .on_finish("done", || DONE_TEXT.to_string())
        .validation(ValidationMode::Strict)
        .build()
        .unwrap();

    assert!(engine.warnings().is_empty());
}

/// **Test: A malformed tag table fails construction in both modes.**
///
/// **Setup:** Builder with a phrase mapping to an empty tag list.
/// **Action:** `build()`.
/// **Expected:** `TagbotError::Table`.
#[test]
fn test_malformed_table_fails_construction() {
    let result = DialogueEngine::builder("waiting")
        .states(["waiting"])
        .table(TagTable::new().phrase("hello", Vec::<String>::new()))
        .respond_from("waiting", |turn, _message, _tags| turn.finish("done"))
        .on_finish("done", || DONE_TEXT.to_string())
        .build();

    assert!(matches!(result, Err(TagbotError::Table(_))));
}

/// **Test: Sibling conversations share bindings but advance independently.**
///
/// **Setup:** Scenario engine; a sibling created with `conversation()`.
/// **Action:** Greet on the first engine only.
/// **Expected:** First engine is in `thoughts_1`; the sibling is still in
/// `waiting` and still dispatches through the default hook.
#[test]
fn test_sibling_conversations_are_independent() {
    let mut first = scenario_engine();
    let mut second = first.conversation();

    first.respond("hello").unwrap();
    assert_eq!(first.current_state(), &StateId::from("thoughts_1"));
    assert_eq!(second.current_state(), &StateId::from("waiting"));

    let reply = second.respond("xyz").unwrap();
    assert_eq!(reply, FALLBACK_TEXT);
    assert_eq!(second.current_state(), &StateId::from("waiting"));
}

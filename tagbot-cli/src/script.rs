//! Demo dialogue script: an employee negotiating a raise with the boss.
//!
//! Pure configuration for the engine (states, tag table, and hooks wired
//! on the builder) and the fixture for the end-to-end tests. The flow:
//! greet, ask for a salary increase, fall back to asking for paid time off,
//! and close out on agreement, rejection, or confusion.

use dialogue_engine::DialogueEngine;
use tag_matcher::TagTable;
use tagbot_core::{Result, ValidationMode};

pub const OPENER: &str =
    "Hello boss, I would like to discuss increasing my salary. Can I discuss this with you?";

pub const SALARY_REASON: &str = "I believe that I deserve an increase in salary because for \
    the past year I have consistently submit top quality work benefitting the company image \
    and stock value. So what do you think?";

pub const TIME_OFF_ASK: &str = "Ok, then can I please discuss more paid time off?";

pub const TIME_OFF_REASON: &str = "I believe I have worked without taking any paid time off \
    for the past 6 months and produced top quality work consistently so I think a little \
    break would be nice. What do you think about this?";

pub const CONFUSED: &str = "I am sorry I do not understand what you are saying. Could we \
    please get back to the topic at hand?";

pub const SAY_HELLO: &str = "I am sorry I do not understand. Can you please say hello";

pub const SUCCESS: &str = "Great, thank you so much!";

pub const FAIL: &str = "I am sorry, I still do not understand what you are trying to say. \
    Maybe we can discuss this again at a later point.";

pub const REJECT: &str = "Ok, I understand. Thank you for your time.";

/// Tag table for the negotiation script: greetings plus yes/no phrasings.
pub fn negotiation_tags() -> TagTable {
    TagTable::new()
        // hello
        .phrase("hello", "hello")
        .phrase("hey", "hello")
        .phrase("hi", "hello")
        .phrase("whats up", "hello")
        .phrase("whats up?", "hello")
        // generic
        .phrase("thanks", "thanks")
        .phrase("bye", "success")
        // agreement
        .phrase("ok", "yes")
        .phrase("okay", "yes")
        .phrase("sounds good", "yes")
        .phrase("yes", "yes")
        .phrase("yep", "yes")
        .phrase("all right", "yes")
        .phrase("very well", "yes")
        .phrase("of course", "yes")
        .phrase("by all means", "yes")
        .phrase("sure", "yes")
        .phrase("certainly", "yes")
        .phrase("absolutely", "yes")
        .phrase("indeed", "yes")
        .phrase("right", "yes")
        .phrase("affirmative", "yes")
        .phrase("agreed", "yes")
        // refusal
        .phrase("no", "no")
        .phrase("nope", "no")
        .phrase("absolutely not", "no")
        .phrase("most certainly not", "no")
        .phrase("of course not", "no")
        .phrase("under no circumstances", "no")
        .phrase("by no means", "no")
        .phrase("not at all", "no")
        .phrase("negative", "no")
        .phrase("never", "no")
        .phrase("not really", "no")
}

/// Builds the negotiation bot.
///
/// `waiting` is the default state; the bot opens the topic on a greeting,
/// pitches the salary reason, retreats to the time-off ask on a refusal,
/// and detours through the unknown_benefit states when it cannot read the
/// boss's answer.
pub fn negotiation_bot(mode: ValidationMode) -> Result<DialogueEngine> {
    DialogueEngine::builder("waiting")
        .states([
            "waiting",
            "thoughts_1",
            "thoughts_2",
            "increase_reason_1",
            "increase_reason_2",
            "unknown_benefit_1",
            "unknown_benefit_2",
        ])
        .table(negotiation_tags())
        .validation(mode)
        .respond_from("waiting", |turn, _message, tags| {
            if tags.contains("hello") {
                turn.go_to_state("thoughts_1")
            } else {
                turn.finish("hello")
            }
        })
        .on_enter("thoughts_1", || OPENER.to_string())
        .respond_from("thoughts_1", |turn, _message, tags| {
            if tags.contains("yes") {
                turn.go_to_state("increase_reason_1")
            } else if tags.contains("no") {
                turn.go_to_state("thoughts_2")
            } else {
                turn.go_to_state("unknown_benefit_1")
            }
        })
        .on_enter("increase_reason_1", || SALARY_REASON.to_string())
        .respond_from("increase_reason_1", |turn, _message, tags| {
            if tags.contains("yes") {
                turn.finish("success")
            } else if tags.contains("no") {
                turn.go_to_state("thoughts_2")
            } else {
                turn.go_to_state("unknown_benefit_1")
            }
        })
        .on_enter("thoughts_2", || TIME_OFF_ASK.to_string())
        .respond_from("thoughts_2", |turn, _message, tags| {
            if tags.contains("yes") {
                turn.go_to_state("increase_reason_2")
            } else if tags.contains("no") {
                turn.finish("reject")
            } else {
                turn.go_to_state("unknown_benefit_2")
            }
        })
        .on_enter("increase_reason_2", || TIME_OFF_REASON.to_string())
        .respond_from("increase_reason_2", |turn, _message, tags| {
            if tags.contains("yes") {
                turn.finish("success")
            } else if tags.contains("no") {
                turn.finish("reject")
            } else {
                turn.go_to_state("unknown_benefit_2")
            }
        })
        // The unknown_benefit states open with the confused line and give
        // the boss one more chance before giving up.
        .on_enter("unknown_benefit_1", || CONFUSED.to_string())
        .respond_from("unknown_benefit_1", |turn, _message, tags| {
            if tags.contains("yes") {
                turn.go_to_state("increase_reason_1")
            } else {
                turn.finish("fail")
            }
        })
        .on_enter("unknown_benefit_2", || CONFUSED.to_string())
        .respond_from("unknown_benefit_2", |turn, _message, tags| {
            if tags.contains("yes") {
                turn.go_to_state("increase_reason_2")
            } else {
                turn.finish("fail")
            }
        })
        .on_finish("hello", || SAY_HELLO.to_string())
        .on_finish("success", || SUCCESS.to_string())
        .on_finish("fail", || FAIL.to_string())
        .on_finish("reject", || REJECT.to_string())
        .build()
}

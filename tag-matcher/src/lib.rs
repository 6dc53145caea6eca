//! # tag-matcher
//!
//! Compiles a phrase → tag table into a whole-word/phrase matcher. Given an
//! incoming message, [`TagMatcher::tag`] returns a [`TagCount`]: how many of
//! the table's phrases carrying each tag occur in the message.
//!
//! The table's authoring shape is permissive (a phrase may map to a single
//! tag or to a list of tags, in code or in a JSON document); it is normalized
//! and validated once, when the matcher is compiled, and read-only after.

pub mod matcher;
pub mod table;

pub use matcher::{TagCount, TagMatcher};
pub use table::{TagTable, TagValue};

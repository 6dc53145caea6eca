//! Compiled matcher: whole-word/phrase tagging of messages.

use crate::table::TagTable;
use regex::{Regex, RegexSet, RegexSetBuilder};
use std::collections::HashMap;
use tagbot_core::{Result, TableError, Tag};
use tracing::debug;

/// Count of each tag found in one message.
///
/// Rebuilt fresh per incoming message; never carried across messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCount {
    counts: HashMap<Tag, u32>,
}

impl TagCount {
    /// Whether the tag occurred at least once.
    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    /// Occurrence count for the tag (0 if absent).
    pub fn count(&self, tag: &str) -> u32 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, u32)> {
        self.counts.iter().map(|(tag, count)| (tag, *count))
    }

    fn bump(&mut self, tag: &Tag) {
        *self.counts.entry(tag.clone()).or_insert(0) += 1;
    }
}

/// Phrase matcher compiled once from a [`TagTable`].
///
/// One pattern per phrase, evaluated together as a case-insensitive
/// [`RegexSet`]. Matching is presence-based: each phrase that occurs at
/// least once contributes one increment to each of its tags, so a phrase
/// repeated in a message still counts once, while distinct phrases sharing
/// a tag accumulate.
pub struct TagMatcher {
    set: RegexSet,
    phrases: Vec<String>,
    tags: Vec<Vec<Tag>>,
}

impl TagMatcher {
    /// Compiles the table. Malformed entries and phrases that do not
    /// compile to a valid pattern are rejected here.
    pub fn compile(table: &TagTable) -> Result<Self> {
        let normalized = table.normalized()?;

        let mut patterns = Vec::with_capacity(normalized.len());
        let mut phrases = Vec::with_capacity(normalized.len());
        let mut tags = Vec::with_capacity(normalized.len());
        for (phrase, tag_seq) in normalized {
            let pattern = phrase_pattern(&phrase);
            // Compile individually first so a failure names the phrase.
            Regex::new(&pattern).map_err(|e| TableError::Pattern {
                phrase: phrase.clone(),
                reason: e.to_string(),
            })?;
            patterns.push(pattern);
            phrases.push(phrase);
            tags.push(tag_seq);
        }

        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()
            .map_err(|e| TableError::Pattern {
                phrase: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self { set, phrases, tags })
    }

    /// Tags a message: for every phrase that occurs, increments the count of
    /// each tag attached to that phrase by one. An empty or unmatched
    /// message yields an empty [`TagCount`].
    pub fn tag(&self, message: &str) -> TagCount {
        let mut counts = TagCount::default();
        for idx in self.set.matches(message).iter() {
            debug!(phrase = %self.phrases[idx], "phrase matched");
            for tag in &self.tags[idx] {
                counts.bump(tag);
            }
        }
        counts
    }

    /// Number of compiled phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Builds the boundary-delimited pattern for one phrase.
///
/// The phrase is escaped so punctuation matches literally. A `\b` assertion
/// is emitted only where the corresponding end of the phrase is a word
/// character: `\b` next to punctuation would demand a word character beyond
/// it and reject e.g. "whats up?" at the end of a message.
fn phrase_pattern(phrase: &str) -> String {
    let starts_word = phrase.chars().next().is_some_and(is_word);
    let ends_word = phrase.chars().last().is_some_and(is_word);
    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" },
    )
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

//! The phrase → tag table and its normalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tagbot_core::{Result, TableError, Tag};

/// Authoring shape of one table value: a bare tag or a sequence of tags.
///
/// A phrase may map to `"yes"` or to `["yes", "agreement"]`; both normalize
/// to a non-empty tag sequence when the table is compiled. Any other JSON
/// shape fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for TagValue {
    fn from(tag: &str) -> Self {
        TagValue::One(tag.to_string())
    }
}

impl From<String> for TagValue {
    fn from(tag: String) -> Self {
        TagValue::One(tag)
    }
}

impl From<Vec<String>> for TagValue {
    fn from(tags: Vec<String>) -> Self {
        TagValue::Many(tags)
    }
}

impl From<Vec<&str>> for TagValue {
    fn from(tags: Vec<&str>) -> Self {
        TagValue::Many(tags.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TagValue {
    fn from(tags: [&str; N]) -> Self {
        TagValue::Many(tags.iter().map(|t| t.to_string()).collect())
    }
}

/// Phrase → tags table.
///
/// Phrases are case-insensitive and may contain spaces or punctuation.
/// Duplicate phrases overwrite (last one wins). Built once by a dialogue
/// script, compiled into a [`TagMatcher`](crate::TagMatcher), and read-only
/// thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagTable {
    entries: BTreeMap<String, TagValue>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one phrase. The value is a tag (`"yes"`) or tags (`["yes", ..]`).
    pub fn phrase(mut self, phrase: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.entries.insert(phrase.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalizes every entry to `(phrase, non-empty tag sequence)`,
    /// rejecting malformed entries instead of coercing them.
    pub(crate) fn normalized(&self) -> Result<Vec<(String, Vec<Tag>)>> {
        let mut normalized = Vec::with_capacity(self.entries.len());
        for (phrase, value) in &self.entries {
            if phrase.trim().is_empty() {
                return Err(TableError::EmptyPhrase.into());
            }
            let raw = match value {
                TagValue::One(tag) => std::slice::from_ref(tag),
                TagValue::Many(tags) => tags.as_slice(),
            };
            if raw.is_empty() {
                return Err(TableError::EmptyTags {
                    phrase: phrase.clone(),
                }
                .into());
            }
            let mut tags = Vec::with_capacity(raw.len());
            for tag in raw {
                if tag.trim().is_empty() {
                    return Err(TableError::BlankTag {
                        phrase: phrase.clone(),
                    }
                    .into());
                }
                tags.push(Tag::from(tag.clone()));
            }
            normalized.push((phrase.clone(), tags));
        }
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagbot_core::TagbotError;

    #[test]
    fn test_phrase_overwrites_duplicates() {
        let table = TagTable::new()
            .phrase("okay", "success")
            .phrase("okay", "yes");
        assert_eq!(table.len(), 1);
        let normalized = table.normalized().unwrap();
        assert_eq!(normalized[0].1, vec![Tag::from("yes")]);
    }

    #[test]
    fn test_normalized_rejects_empty_tag_list() {
        let table = TagTable::new().phrase("hello", Vec::<String>::new());
        match table.normalized() {
            Err(TagbotError::Table(TableError::EmptyTags { phrase })) => {
                assert_eq!(phrase, "hello");
            }
            other => panic!("expected EmptyTags, got {other:?}"),
        }
    }

    #[test]
    fn test_normalized_rejects_blank_phrase_and_tag() {
        let table = TagTable::new().phrase("  ", "hello");
        assert!(matches!(
            table.normalized(),
            Err(TagbotError::Table(TableError::EmptyPhrase))
        ));

        let table = TagTable::new().phrase("hello", "");
        assert!(matches!(
            table.normalized(),
            Err(TagbotError::Table(TableError::BlankTag { .. }))
        ));
    }
}

//! Entity filtering and key-phrase selection.

use std::collections::HashSet;

use crate::types::{EntitySpan, RawEntity};

/// Punctuation tokens the NER models emit as spurious entities.
pub const IGNORED_TOKENS: [&str; 4] = [".", ",", "-", ":"];

/// Entity groups kept as key phrases by the basic profile.
pub const KEY_PHRASE_GROUPS: [&str; 3] = ["ORG", "PER", "MISC"];

fn is_meaningful(text: &str) -> bool {
    !text.is_empty()
        && !IGNORED_TOKENS.contains(&text)
        && text.chars().all(char::is_alphanumeric)
}

/// Drop punctuation and any entity whose trimmed text is not purely
/// alphanumeric.
///
/// Order is preserved and repeated mentions are kept. Surviving spans carry
/// the trimmed text.
#[must_use]
pub fn filter_entities(raw: Vec<RawEntity>) -> Vec<EntitySpan> {
    raw.into_iter()
        .filter_map(|entity| {
            let text = entity.word.trim();
            is_meaningful(text).then(|| EntitySpan {
                text: text.to_string(),
                entity_type: entity.entity_group,
            })
        })
        .collect()
}

/// Keep entities in `groups`, deduplicated by text, capped at `max_phrases`.
///
/// Duplicates keep their first occurrence so the output order is stable.
#[must_use]
pub fn select_key_phrases(
    raw: Vec<RawEntity>,
    groups: &[&str],
    max_phrases: usize,
) -> Vec<EntitySpan> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|entity| groups.contains(&entity.entity_group.as_str()))
        .filter(|entity| seen.insert(entity.word.clone()))
        .take(max_phrases)
        .map(|entity| EntitySpan {
            text: entity.word,
            entity_type: entity.entity_group,
        })
        .collect()
}

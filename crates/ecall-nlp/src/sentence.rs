//! Sentence boundary detection.

use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into an ordered sequence of sentences.
pub trait SentenceTokenizer: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Titles after which a UAX #29 boundary is not a sentence end.
const ABBREVIATIONS: [&str; 6] = ["Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "St."];

/// UAX #29 sentence segmentation.
///
/// A boundary right after a title such as "Mr." is merged into the next
/// sentence. Each sentence is trimmed; blank segments are dropped, so empty or
/// whitespace-only text yields no sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceTokenizer;

impl SentenceTokenizer for UnicodeSentenceTokenizer {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for bound in text.split_sentence_bounds() {
            pending.push_str(bound);
            if ends_with_abbreviation(bound) {
                continue;
            }
            push_trimmed(&mut sentences, &pending);
            pending.clear();
        }
        push_trimmed(&mut sentences, &pending);

        sentences
    }
}

fn ends_with_abbreviation(segment: &str) -> bool {
    segment
        .split_whitespace()
        .next_back()
        .map(|word| word.trim_start_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|word| ABBREVIATIONS.contains(&word))
}

fn push_trimmed(sentences: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_owned());
    }
}

//! Values flowing through the analysis pipeline and the final payload.

use serde::{Deserialize, Serialize, Serializer};

use crate::pipeline::Variant;

/// One sentiment classification: a label and its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub label: String,
}

impl SentimentResult {
    #[must_use]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            score,
            label: label.into(),
        }
    }

    /// Placeholder used when there is no text to classify.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new("neutral", 0.0)
    }
}

/// Entity record as returned by a grouped NER model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEntity {
    pub word: String,
    #[serde(alias = "entity")]
    pub entity_group: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

impl RawEntity {
    #[must_use]
    pub fn new(word: impl Into<String>, entity_group: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            entity_group: entity_group.into(),
            score: 0.0,
            start: None,
            end: None,
        }
    }
}

/// An entity that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySpan {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

/// Sentiment for one numbered segment (a chunk or a single sentence).
///
/// `text` is the full segment; `sentiment` reflects only the prefix that fit
/// the classifier's input window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkSentiment {
    pub chunk_number: usize,
    pub text: String,
    pub sentiment: SentimentResult,
}

/// Final analytics payload for one transcript.
///
/// Serializes to the basic or advanced wire shape depending on `variant`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResult {
    pub call_id: String,
    pub company: String,
    pub date: String,
    pub variant: Variant,
    pub intro_sentiment: SentimentResult,
    pub segments: Vec<ChunkSentiment>,
    pub key_phrases: Vec<EntitySpan>,
    pub word_count: usize,
    /// Time spent inside the analysis pipeline only. Fetching the transcript
    /// is not included.
    pub processing_time_ms: u64,
}

#[derive(Serialize)]
struct AdvancedWire<'a> {
    call_id: &'a str,
    company: &'a str,
    date: &'a str,
    advanced_analytics: AdvancedBody<'a>,
}

#[derive(Serialize)]
struct AdvancedBody<'a> {
    overall_sentiment_on_intro: &'a SentimentResult,
    sentiment_by_chunk: &'a [ChunkSentiment],
    filtered_key_phrases: &'a [EntitySpan],
    word_count: usize,
    processing_time_ms: u64,
}

#[derive(Serialize)]
struct BasicWire<'a> {
    call_id: &'a str,
    company: &'a str,
    date: &'a str,
    analytics: BasicBody<'a>,
}

#[derive(Serialize)]
struct BasicBody<'a> {
    overall_sentiment: &'a SentimentResult,
    sentiment_by_utterance: Vec<UtteranceWire<'a>>,
    key_phrases: Vec<&'a str>,
    word_count: usize,
    processing_time_ms: u64,
}

#[derive(Serialize)]
struct UtteranceWire<'a> {
    utterance: UtteranceText<'a>,
    label: &'a str,
    score: f64,
}

#[derive(Serialize)]
struct UtteranceText<'a> {
    text: &'a str,
}

impl Serialize for AnalyticsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.variant {
            Variant::Advanced => AdvancedWire {
                call_id: &self.call_id,
                company: &self.company,
                date: &self.date,
                advanced_analytics: AdvancedBody {
                    overall_sentiment_on_intro: &self.intro_sentiment,
                    sentiment_by_chunk: &self.segments,
                    filtered_key_phrases: &self.key_phrases,
                    word_count: self.word_count,
                    processing_time_ms: self.processing_time_ms,
                },
            }
            .serialize(serializer),
            Variant::Basic => BasicWire {
                call_id: &self.call_id,
                company: &self.company,
                date: &self.date,
                analytics: BasicBody {
                    overall_sentiment: &self.intro_sentiment,
                    sentiment_by_utterance: self
                        .segments
                        .iter()
                        .map(|s| UtteranceWire {
                            utterance: UtteranceText { text: &s.text },
                            label: &s.sentiment.label,
                            score: s.sentiment.score,
                        })
                        .collect(),
                    key_phrases: self.key_phrases.iter().map(|k| k.text.as_str()).collect(),
                    word_count: self.word_count,
                    processing_time_ms: self.processing_time_ms,
                },
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(variant: Variant) -> AnalyticsResult {
        AnalyticsResult {
            call_id: "abc123".to_string(),
            company: "AAPL".to_string(),
            date: "2024-08-01".to_string(),
            variant,
            intro_sentiment: SentimentResult::new("positive", 0.9123),
            segments: vec![ChunkSentiment {
                chunk_number: 1,
                text: "Revenue grew.".to_string(),
                sentiment: SentimentResult::new("positive", 0.8),
            }],
            key_phrases: vec![EntitySpan {
                text: "Apple".to_string(),
                entity_type: "ORG".to_string(),
            }],
            word_count: 2,
            processing_time_ms: 17,
        }
    }

    #[test]
    fn advanced_payload_uses_advanced_field_names() {
        let json = serde_json::to_value(result(Variant::Advanced)).expect("serialize");
        assert_eq!(json["call_id"], "abc123");
        assert_eq!(json["company"], "AAPL");
        assert_eq!(json["date"], "2024-08-01");
        let body = &json["advanced_analytics"];
        assert_eq!(body["overall_sentiment_on_intro"]["label"], "positive");
        assert_eq!(body["overall_sentiment_on_intro"]["score"], 0.9123);
        assert_eq!(body["sentiment_by_chunk"][0]["chunk_number"], 1);
        assert_eq!(body["sentiment_by_chunk"][0]["text"], "Revenue grew.");
        assert_eq!(body["sentiment_by_chunk"][0]["sentiment"]["score"], 0.8);
        assert_eq!(
            body["filtered_key_phrases"],
            serde_json::json!([{"text": "Apple", "type": "ORG"}])
        );
        assert_eq!(body["word_count"], 2);
        assert_eq!(body["processing_time_ms"], 17);
        assert!(json.get("analytics").is_none());
    }

    #[test]
    fn basic_payload_uses_utterance_shape() {
        let json = serde_json::to_value(result(Variant::Basic)).expect("serialize");
        let body = &json["analytics"];
        assert_eq!(body["overall_sentiment"]["label"], "positive");
        assert_eq!(
            body["sentiment_by_utterance"][0],
            serde_json::json!({
                "utterance": {"text": "Revenue grew."},
                "label": "positive",
                "score": 0.8
            })
        );
        assert_eq!(body["key_phrases"], serde_json::json!(["Apple"]));
        assert!(json.get("advanced_analytics").is_none());
    }

    #[test]
    fn raw_entity_accepts_ungrouped_entity_key() {
        let raw: RawEntity =
            serde_json::from_str(r#"{"word":"Apple","entity":"B-ORG","score":0.99}"#)
                .expect("deserialize");
        assert_eq!(raw.entity_group, "B-ORG");
        assert!(raw.start.is_none());
    }
}

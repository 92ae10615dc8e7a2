//! Word-level transcript models.
//!
//! Transcripts arrive from the upstream transcription service grouped by
//! utterance, each word carrying absolute start/end times and an optional
//! diarized speaker tag.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Speaker identity tag produced by upstream diarization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SpeakerId(pub String);

impl SpeakerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single transcribed word with absolute timing.
///
/// Invariant: `end_sec >= start_sec`. Words within one video are globally
/// time-ordered by `start_sec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptWord {
    /// The word text as transcribed (may carry trailing punctuation)
    pub word: String,
    /// Start time in seconds from video start
    pub start_sec: f64,
    /// End time in seconds from video start
    pub end_sec: f64,
    /// Diarized speaker tag, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<SpeakerId>,
}

impl TranscriptWord {
    /// Create a new word without a speaker tag.
    pub fn new(word: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            word: word.into(),
            start_sec,
            end_sec,
            speaker: None,
        }
    }

    /// Attach a speaker tag.
    pub fn with_speaker(mut self, speaker: SpeakerId) -> Self {
        self.speaker = Some(speaker);
        self
    }

    /// Spoken duration of this word in seconds.
    #[inline]
    pub fn duration_sec(&self) -> f64 {
        (self.end_sec - self.start_sec).max(0.0)
    }

    /// Word text with surrounding punctuation stripped, lowercased.
    pub fn normalized(&self) -> String {
        self.word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'')
            .collect::<String>()
            .to_lowercase()
    }
}

/// Flatten utterance-grouped words into a single time-ordered sequence.
///
/// Upstream delivers words grouped by utterance; the engines operate on one
/// flat, chronologically ordered word stream. Ordering uses a stable sort so
/// equal start times preserve utterance order.
pub fn flatten_utterances(utterances: &[Vec<TranscriptWord>]) -> Vec<TranscriptWord> {
    let mut words: Vec<TranscriptWord> = utterances.iter().flatten().cloned().collect();
    words.sort_by(|a, b| {
        a.start_sec
            .partial_cmp(&b.start_sec)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_duration() {
        let w = TranscriptWord::new("hello", 1.0, 1.4);
        assert!((w.duration_sec() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_strips_punctuation() {
        let w = TranscriptWord::new("Hello,", 0.0, 0.5);
        assert_eq!(w.normalized(), "hello");

        let w = TranscriptWord::new("don't!", 0.0, 0.5);
        assert_eq!(w.normalized(), "don't");
    }

    #[test]
    fn test_flatten_utterances_orders_by_start() {
        let utterances = vec![
            vec![
                TranscriptWord::new("later", 5.0, 5.5),
                TranscriptWord::new("words", 5.5, 6.0),
            ],
            vec![
                TranscriptWord::new("earlier", 0.0, 0.5),
                TranscriptWord::new("words", 0.5, 1.0),
            ],
        ];

        let flat = flatten_utterances(&utterances);
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[0].word, "earlier");
        assert_eq!(flat[3].word, "words");
        assert!(flat.windows(2).all(|w| w[0].start_sec <= w[1].start_sec));
    }

    #[test]
    fn test_speaker_id_ordering() {
        let a = SpeakerId::new("A");
        let b = SpeakerId::new("B");
        assert!(a < b);
    }
}

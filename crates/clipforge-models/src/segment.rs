//! Scored clip segment models.

use crate::transcript::TranscriptWord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Adaptive duration class chosen per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DurationTier {
    /// Tight clips up to ~32s
    Short,
    /// Mid-length clips around 45-55s
    Mid,
    /// Extended clips up to 80s
    Long,
}

impl std::fmt::Display for DurationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationTier::Short => write!(f, "short"),
            DurationTier::Mid => write!(f, "mid"),
            DurationTier::Long => write!(f, "long"),
        }
    }
}

/// Normalized feature bundle for one candidate segment.
///
/// All scored fields are in [0, 1]. Diagnostics (`speech_rate`,
/// `pause_density`, `word_count`) are raw values kept for inspection and
/// rationale building, not directly part of the weighted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureVector {
    /// Strength of the opening ~3 seconds (questions, claims, numbers)
    pub hook: f64,
    /// Early speech energy and pacing, a proxy for watch-through
    pub retention: f64,
    /// Inverse filler-word density
    pub clarity: f64,
    /// Sentence shape and content-word density
    pub coherence: f64,
    /// Whether the ending lands (terminal punctuation, payoff phrasing)
    pub closure: f64,
    /// Question-then-resolution shape across the span
    pub narrative_arc: f64,
    /// Content-word ratio across the span
    pub semantic_density: f64,
    /// Scene-cut pacing inside the span
    pub visual: f64,
    /// Lexical variety (content-word type/token ratio)
    pub novelty: f64,
    /// Proximity to audience engagement hotspots
    pub engagement: f64,
    /// Inverse profanity signal
    pub safety: f64,

    // Raw diagnostics
    /// Words per second over the whole span
    pub speech_rate: f64,
    /// Fraction of span time spent in inter-word pauses
    pub pause_density: f64,
    /// Number of words in the span
    pub word_count: usize,
}

impl FeatureVector {
    /// A neutral vector, used as the guard value for degenerate spans.
    pub fn neutral() -> Self {
        Self {
            hook: 0.0,
            retention: 0.0,
            clarity: 0.0,
            coherence: 0.0,
            closure: 0.0,
            narrative_arc: 0.0,
            semantic_density: 0.0,
            visual: 0.0,
            novelty: 0.0,
            engagement: 0.0,
            safety: 1.0,
            speech_rate: 0.0,
            pause_density: 0.0,
            word_count: 0,
        }
    }
}

/// A proposed clip with its derived score and features.
///
/// Created by candidate enumeration, shrunk only by boundary refinement,
/// immutable once it leaves the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Absolute start time in seconds
    pub start_sec: f64,
    /// Absolute end time in seconds
    pub end_sec: f64,
    /// Span duration in seconds
    pub duration_sec: f64,
    /// Words covered by the span, in order
    pub words: Vec<TranscriptWord>,
    /// Joined transcript text of the span
    pub text: String,
    /// Text of the opening ~3 seconds
    pub hook_text: String,
    /// Weighted score in [0, 1]
    pub score: f64,
    /// Feature vector the score was derived from
    pub features: FeatureVector,
    /// Chosen duration tier
    pub duration_tier: DurationTier,
    /// Human-readable summary of the top scoring factors
    pub rationale: String,
}

impl Segment {
    /// Whether two segments overlap in time by any positive amount.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start_sec < other.end_sec && other.start_sec < self.end_sec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64) -> Segment {
        Segment {
            start_sec: start,
            end_sec: end,
            duration_sec: end - start,
            words: Vec::new(),
            text: String::new(),
            hook_text: String::new(),
            score: 0.5,
            features: FeatureVector::neutral(),
            duration_tier: DurationTier::Short,
            rationale: String::new(),
        }
    }

    #[test]
    fn test_overlaps() {
        let a = segment(0.0, 30.0);
        let b = segment(20.0, 50.0);
        let c = segment(30.0, 60.0);

        assert!(a.overlaps(&b));
        // Touching endpoints do not overlap
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(DurationTier::Short.to_string(), "short");
        assert_eq!(DurationTier::Long.to_string(), "long");
    }

    #[test]
    fn test_segment_serializes() {
        let s = segment(10.0, 40.0);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"start_sec\":10.0"));
        assert!(json.contains("\"duration_tier\":\"short\""));
    }
}

//! Post-filters: quality gate, near-duplicate suppression, and overlap
//! elimination.
//!
//! The greedy selection state (already-kept candidates) is an explicit
//! accumulator threaded through one pass, so the filters stay pure and
//! deterministic.

use super::config::SegmenterConfig;
use super::features::hook_word_count;
use clipforge_models::Segment;
use std::collections::HashSet;
use tracing::debug;

/// Quality gate: reject segments whose opening is too thin or whose core
/// features fall below the floors.
pub fn passes_quality_gate(segment: &Segment, config: &SegmenterConfig) -> bool {
    if hook_word_count(&segment.words, config) < config.min_hook_words {
        return false;
    }
    let f = &segment.features;
    f.safety >= 0.5 && f.clarity >= 0.3 && f.coherence >= 0.45 && f.closure >= 0.4
}

/// Sort by score descending with start time as the deterministic tie-break.
fn sort_by_score(segments: &mut [Segment]) {
    segments.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.start_sec
                    .partial_cmp(&b.start_sec)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
}

/// Greedily keep the highest-scoring segments whose transcript text is not a
/// near-duplicate of anything already kept.
pub fn diversity_filter(mut segments: Vec<Segment>, config: &SegmenterConfig) -> Vec<Segment> {
    sort_by_score(&mut segments);

    let mut kept: Vec<Segment> = Vec::new();
    for candidate in segments {
        let duplicate = kept
            .iter()
            .any(|k| jaccard_similarity(&candidate, k) > config.diversity_ceiling);
        if duplicate {
            debug!(
                start_sec = candidate.start_sec,
                score = candidate.score,
                "Dropping near-duplicate candidate"
            );
        } else {
            kept.push(candidate);
        }
    }
    kept
}

/// Greedily keep the highest-scoring segments whose time spans do not
/// intersect anything already kept, then return the result in chronological
/// order, capped at the configured maximum.
pub fn remove_overlaps(mut segments: Vec<Segment>, config: &SegmenterConfig) -> Vec<Segment> {
    sort_by_score(&mut segments);

    let mut kept: Vec<Segment> = Vec::new();
    for candidate in segments {
        if kept.len() >= config.max_results {
            break;
        }
        if kept.iter().any(|k| k.overlaps(&candidate)) {
            continue;
        }
        kept.push(candidate);
    }

    kept.sort_by(|a, b| {
        a.start_sec
            .partial_cmp(&b.start_sec)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    kept
}

/// Word-set Jaccard similarity over normalized words.
fn jaccard_similarity(a: &Segment, b: &Segment) -> f64 {
    let set_a: HashSet<String> = a.words.iter().map(|w| w.normalized()).collect();
    let set_b: HashSet<String> = b.words.iter().map(|w| w.normalized()).collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;
    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipforge_models::{DurationTier, FeatureVector, TranscriptWord};

    fn segment_with_words(start: f64, texts: &[&str], score: f64) -> Segment {
        let words: Vec<TranscriptWord> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| TranscriptWord::new(*t, start + i as f64 * 0.4, start + i as f64 * 0.4 + 0.4))
            .collect();
        let end = words.last().map(|w| w.end_sec).unwrap_or(start);

        Segment {
            start_sec: start,
            end_sec: end,
            duration_sec: end - start,
            text: texts.join(" "),
            hook_text: String::new(),
            words,
            score,
            features: FeatureVector {
                safety: 1.0,
                clarity: 0.8,
                coherence: 0.7,
                closure: 0.6,
                ..FeatureVector::neutral()
            },
            duration_tier: DurationTier::Short,
            rationale: String::new(),
        }
    }

    #[test]
    fn test_quality_gate_requires_hook_words() {
        let config = SegmenterConfig::default();

        // Three words inside the opening 3s
        let good = segment_with_words(0.0, &["a", "b", "c", "d", "e", "f", "g", "h"], 0.6);
        assert!(passes_quality_gate(&good, &config));

        // Two words stretched over the opening 3s
        let mut thin = good.clone();
        thin.words = vec![
            TranscriptWord::new("a", 0.0, 1.4),
            TranscriptWord::new("b", 1.6, 3.0),
            TranscriptWord::new("c", 3.2, 4.4),
        ];
        assert!(!passes_quality_gate(&thin, &config));
    }

    #[test]
    fn test_quality_gate_feature_floors() {
        let config = SegmenterConfig::default();
        let mut seg = segment_with_words(0.0, &["a", "b", "c", "d", "e", "f", "g", "h"], 0.6);

        seg.features.safety = 0.3;
        assert!(!passes_quality_gate(&seg, &config));

        seg.features.safety = 1.0;
        seg.features.closure = 0.2;
        assert!(!passes_quality_gate(&seg, &config));
    }

    #[test]
    fn test_diversity_drops_near_duplicates() {
        let config = SegmenterConfig::default();
        let texts = ["the", "quick", "brown", "fox", "jumps", "over", "the", "dog"];
        let a = segment_with_words(0.0, &texts, 0.8);
        let b = segment_with_words(100.0, &texts, 0.7); // identical wording
        let c = segment_with_words(
            200.0,
            &["completely", "different", "topic", "about", "rust", "lifetimes", "and", "traits"],
            0.6,
        );

        let kept = diversity_filter(vec![a, b, c], &config);
        assert_eq!(kept.len(), 2);
        assert!((kept[0].score - 0.8).abs() < 1e-9);
        assert!((kept[1].score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_removal_keeps_highest_score() {
        let config = SegmenterConfig::default();
        let texts = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut low = segment_with_words(0.0, &texts, 0.6);
        low.end_sec = 30.0;
        let mut high = segment_with_words(20.0, &texts, 0.9);
        high.end_sec = 50.0;
        let mut clear = segment_with_words(60.0, &texts, 0.55);
        clear.end_sec = 90.0;

        let kept = remove_overlaps(vec![low, high, clear], &config);
        assert_eq!(kept.len(), 2);
        // Chronological order, overlap loser dropped
        assert!((kept[0].start_sec - 20.0).abs() < 1e-9);
        assert!((kept[1].start_sec - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_removal_caps_results() {
        let config = SegmenterConfig::default();
        let texts = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let segments: Vec<Segment> = (0..20)
            .map(|i| segment_with_words(i as f64 * 100.0, &texts, 0.5 + i as f64 * 0.01))
            .collect();

        let kept = remove_overlaps(segments, &config);
        assert_eq!(kept.len(), config.max_results);
    }

    #[test]
    fn test_equal_scores_break_ties_by_start() {
        let config = SegmenterConfig::default();
        let texts = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut first = segment_with_words(0.0, &texts, 0.7);
        first.end_sec = 40.0;
        let mut second = segment_with_words(30.0, &texts, 0.7);
        second.end_sec = 70.0;

        // Earlier start wins the tie, overlapping later segment is dropped
        let kept = remove_overlaps(vec![second.clone(), first.clone()], &config);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].start_sec - 0.0).abs() < 1e-9);
    }
}

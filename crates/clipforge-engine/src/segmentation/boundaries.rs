//! Pause-based boundary detection and candidate enumeration.

use super::config::SegmenterConfig;
use clipforge_models::{TimeRange, TranscriptWord};

/// A candidate span expressed as a half-open word-index range into the full
/// transcript word slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateSpan {
    /// Index of the first word in the span
    pub start_idx: usize,
    /// One past the index of the last word in the span
    pub end_idx: usize,
}

impl CandidateSpan {
    /// Absolute start time of the span.
    pub fn start_sec(&self, words: &[TranscriptWord]) -> f64 {
        words[self.start_idx].start_sec
    }

    /// Absolute end time of the span.
    pub fn end_sec(&self, words: &[TranscriptWord]) -> f64 {
        words[self.end_idx - 1].end_sec
    }

    /// Span duration in seconds.
    pub fn duration_sec(&self, words: &[TranscriptWord]) -> f64 {
        self.end_sec(words) - self.start_sec(words)
    }

    /// Number of words in the span.
    pub fn word_count(&self) -> usize {
        self.end_idx - self.start_idx
    }
}

/// Find the word-index range `[lo, hi)` of words starting inside `window`.
pub fn window_word_range(words: &[TranscriptWord], window: &TimeRange) -> (usize, usize) {
    let lo = words.partition_point(|w| w.start_sec < window.start_sec);
    let hi = words.partition_point(|w| w.start_sec < window.end_sec);
    (lo, hi)
}

/// Mark phrase boundaries inside `[lo, hi)`.
///
/// A boundary sits at index `i` when the gap between word `i-1` and word `i`
/// falls inside the configured pause band. The band targets natural
/// breath/phrase pauses: shorter gaps are transcription jitter, longer
/// silences usually mean a topic change.
pub fn pause_boundaries(
    words: &[TranscriptWord],
    lo: usize,
    hi: usize,
    config: &SegmenterConfig,
) -> Vec<usize> {
    let mut boundaries = Vec::new();
    for i in (lo.max(1))..hi {
        let gap = words[i].start_sec - words[i - 1].end_sec;
        if gap >= config.pause_min_sec && gap <= config.pause_max_sec {
            boundaries.push(i);
        }
    }
    boundaries
}

/// Enumerate all boundary pairs whose span satisfies the duration and word
/// count requirements.
pub fn enumerate_candidates(
    words: &[TranscriptWord],
    boundaries: &[usize],
    config: &SegmenterConfig,
) -> Vec<CandidateSpan> {
    let mut candidates = Vec::new();

    for (bi, &start_idx) in boundaries.iter().enumerate() {
        for &end_idx in &boundaries[bi + 1..] {
            let span = CandidateSpan { start_idx, end_idx };
            if span.word_count() < config.min_candidate_words {
                continue;
            }

            let duration = span.duration_sec(words);
            if duration < config.min_candidate_sec {
                continue;
            }
            if duration > config.max_candidate_sec {
                // Boundaries are time-ordered, so later ends only grow
                break;
            }

            candidates.push(span);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Words spoken continuously at `rate` words/sec with pauses inserted
    /// before the listed indices.
    fn words_with_pauses(count: usize, word_dur: f64, pauses: &[(usize, f64)]) -> Vec<TranscriptWord> {
        let mut words = Vec::with_capacity(count);
        let mut t = 0.0;
        for i in 0..count {
            if let Some((_, pause)) = pauses.iter().find(|(idx, _)| *idx == i) {
                t += pause;
            }
            words.push(TranscriptWord::new(format!("w{}", i), t, t + word_dur));
            t += word_dur;
        }
        words
    }

    #[test]
    fn test_window_word_range() {
        let words = words_with_pauses(100, 0.5, &[]);
        let window = TimeRange::new(10.0, 20.0);
        let (lo, hi) = window_word_range(&words, &window);

        assert!(words[lo].start_sec >= 10.0);
        assert!(words[hi - 1].start_sec < 20.0);
        assert!(lo > 0 && hi < 100);
    }

    #[test]
    fn test_pause_boundaries_respect_band() {
        let words = words_with_pauses(
            30,
            0.3,
            &[(10, 0.5), (15, 0.1), (20, 2.0)], // in-band, too short, too long
        );

        let config = SegmenterConfig::default();
        let boundaries = pause_boundaries(&words, 0, words.len(), &config);
        assert_eq!(boundaries, vec![10]);
    }

    #[test]
    fn test_enumerate_candidates_duration_band() {
        // 0.4s words back to back; pauses before 10 and 80 give a ~28s span
        let words = words_with_pauses(120, 0.4, &[(10, 0.5), (80, 0.5)]);
        let config = SegmenterConfig::default();

        let boundaries = pause_boundaries(&words, 0, words.len(), &config);
        assert_eq!(boundaries, vec![10, 80]);

        let candidates = enumerate_candidates(&words, &boundaries, &config);
        assert_eq!(candidates.len(), 1);

        let span = candidates[0];
        assert_eq!(span.start_idx, 10);
        assert_eq!(span.end_idx, 80);
        let dur = span.duration_sec(&words);
        assert!(dur >= config.min_candidate_sec && dur <= config.max_candidate_sec);
    }

    #[test]
    fn test_enumerate_rejects_short_word_counts() {
        // Two boundaries only 5 words apart but stretched over 22.5s
        let words = words_with_pauses(12, 4.5, &[(3, 0.5), (8, 0.5)]);
        let config = SegmenterConfig::default();

        let boundaries = pause_boundaries(&words, 0, words.len(), &config);
        let candidates = enumerate_candidates(&words, &boundaries, &config);
        assert!(candidates.is_empty());
    }
}

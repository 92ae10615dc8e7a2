//! Candidate segmentation and scoring engine.
//!
//! Converts a word-level transcript plus visual scene-cut timestamps plus
//! optional engagement signals into a ranked, non-overlapping set of clip
//! windows with an adaptive target duration.
//!
//! # Pipeline
//!
//! 1. Generate overlapping search windows from chapters (or full-video tiling)
//! 2. Mark pause-based boundaries inside each window and enumerate candidates
//! 3. Extract a fixed feature vector per candidate and score it
//! 4. Choose an adaptive duration tier and refine the cut boundary
//! 5. Quality-gate, de-duplicate, and eliminate overlaps
//!
//! The engine degrades instead of throwing: insufficient signal yields an
//! empty list, which callers treat as a valid outcome.

pub mod boundaries;
pub mod config;
pub mod features;
pub mod filters;
pub mod patterns;
pub mod refine;
pub mod scoring;
pub mod windows;

pub use config::SegmenterConfig;
pub use patterns::LexiconTables;

use boundaries::CandidateSpan;
use clipforge_models::{ChapterWindow, SceneChange, Segment, TranscriptWord};
use features::FeatureContext;
use std::collections::HashSet;
use tracing::{debug, info};

/// Segment detector with tunable configuration.
pub struct SegmentDetector {
    config: SegmenterConfig,
    lexicon: &'static LexiconTables,
}

impl SegmentDetector {
    /// Create a detector with the given configuration and English lexicon.
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            lexicon: LexiconTables::english(),
        }
    }

    /// Create a detector for a specific locale.
    pub fn for_locale(config: SegmenterConfig, locale: &str) -> Self {
        Self {
            config,
            lexicon: LexiconTables::for_locale(locale),
        }
    }

    /// Detect up to 12 clip-worthy segments.
    ///
    /// # Arguments
    /// * `utterances` - Transcript words grouped by utterance
    /// * `scene_changes` - Visual cut timestamps
    /// * `chapters` - Optional chapter partition (may be empty)
    /// * `video_duration_sec` - Total source duration
    /// * `comment_hotspots` - Pre-clustered engagement timestamps (may be empty)
    ///
    /// # Returns
    /// Chronologically ordered, non-overlapping segments. Empty when the
    /// inputs carry too little signal; never an error.
    pub fn detect(
        &self,
        utterances: &[Vec<TranscriptWord>],
        scene_changes: &[SceneChange],
        chapters: &[ChapterWindow],
        video_duration_sec: f64,
        comment_hotspots: &[f64],
    ) -> Vec<Segment> {
        let words = clipforge_models::flatten_utterances(utterances);
        if words.is_empty() || video_duration_sec <= 0.0 {
            info!("No transcript signal, returning zero segments");
            return Vec::new();
        }

        let ctx = FeatureContext {
            scene_changes,
            hotspots: comment_hotspots,
            lexicon: self.lexicon,
        };

        let search_windows = windows::generate_windows(chapters, video_duration_sec, &self.config);

        // The same span is reachable from overlapping windows; scoring it
        // once is enough
        let mut seen_spans: HashSet<(usize, usize)> = HashSet::new();
        let mut scored: Vec<Segment> = Vec::new();
        let mut candidate_count = 0usize;

        for window in &search_windows {
            let (lo, hi) = boundaries::window_word_range(&words, window);
            if hi - lo < self.config.min_window_words {
                continue;
            }

            let pause_marks = boundaries::pause_boundaries(&words, lo, hi, &self.config);
            let candidates = boundaries::enumerate_candidates(&words, &pause_marks, &self.config);
            candidate_count += candidates.len();

            for span in candidates {
                if !seen_spans.insert((span.start_idx, span.end_idx)) {
                    continue;
                }
                if let Some(segment) = self.score_candidate(&words, span, &ctx) {
                    scored.push(segment);
                }
            }
        }

        debug!(
            windows = search_windows.len(),
            candidates = candidate_count,
            scored = scored.len(),
            "Candidate enumeration complete"
        );

        let gated: Vec<Segment> = scored
            .into_iter()
            .filter(|s| filters::passes_quality_gate(s, &self.config))
            .collect();
        let diverse = filters::diversity_filter(gated, &self.config);
        let result = filters::remove_overlaps(diverse, &self.config);

        info!(
            segment_count = result.len(),
            video_duration_sec = video_duration_sec,
            "Segment detection complete"
        );
        result
    }

    /// Score one candidate span; `None` when it fails a score floor.
    fn score_candidate(
        &self,
        words: &[TranscriptWord],
        span: CandidateSpan,
        ctx: &FeatureContext<'_>,
    ) -> Option<Segment> {
        let span_words = &words[span.start_idx..span.end_idx];
        let feature_vec = features::extract_features(span_words, ctx, &self.config);
        let raw_score = scoring::score(&feature_vec);
        if raw_score < self.config.min_score {
            return None;
        }

        let duration = span.duration_sec(words);
        let plan = scoring::choose_duration(duration, &feature_vec);
        let refined = refine::refine_span(words, span, plan.target_sec, &self.config);

        // Re-derive features on the refined word set
        let refined_words = &words[refined.start_idx..refined.end_idx];
        let refined_features = features::extract_features(refined_words, ctx, &self.config);
        let refined_score = scoring::score(&refined_features);
        if refined_score < self.config.min_refined_score {
            return None;
        }

        let start_sec = refined.start_sec(words);
        let end_sec = refined.end_sec(words);

        Some(Segment {
            start_sec,
            end_sec,
            duration_sec: end_sec - start_sec,
            text: features::join_text(refined_words),
            hook_text: features::hook_text(refined_words, &self.config),
            words: refined_words.to_vec(),
            score: refined_score,
            rationale: scoring::build_rationale(&refined_features),
            features: refined_features,
            duration_tier: plan.tier,
        })
    }
}

impl Default for SegmentDetector {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

/// Detect segments with the default configuration.
///
/// Convenience wrapper over [`SegmentDetector::detect`].
pub fn detect_segments(
    utterances: &[Vec<TranscriptWord>],
    scene_changes: &[SceneChange],
    chapters: &[ChapterWindow],
    video_duration_sec: f64,
    comment_hotspots: &[f64],
) -> Vec<Segment> {
    SegmentDetector::default().detect(
        utterances,
        scene_changes,
        chapters,
        video_duration_sec,
        comment_hotspots,
    )
}

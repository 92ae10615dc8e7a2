//! Configuration for the candidate segmentation engine.

use serde::{Deserialize, Serialize};

/// Tunable parameters for segment detection.
///
/// Every threshold the detector consults lives here so behavior can be tuned
/// per deployment without touching control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    // === Window Generation ===
    /// Search window length inside a chapter (seconds)
    pub chapter_window_sec: f64,

    /// Minimum stride between chapter windows (seconds)
    pub chapter_stride_min_sec: f64,

    /// Stride as a fraction of chapter length
    pub chapter_stride_frac: f64,

    /// Close the chapter tail with an extra window when the last generated
    /// window falls short of the boundary by more than this (seconds)
    pub tail_gap_sec: f64,

    /// Window length when no chapters are available (seconds)
    pub flat_window_sec: f64,

    /// Window length for long videos without chapters (seconds)
    pub flat_window_long_sec: f64,

    /// Stride when no chapters are available (seconds)
    pub flat_stride_sec: f64,

    /// Stride for long videos without chapters (seconds)
    pub flat_stride_long_sec: f64,

    /// Videos longer than this use the long stride/window (seconds)
    pub long_video_threshold_sec: f64,

    /// Leading seconds to skip when no chapters identify an intro
    pub intro_skip_sec: f64,

    /// Skip the leading seconds only for videos longer than this
    pub intro_skip_min_video_sec: f64,

    // === Boundary Detection ===
    /// Minimum inter-word gap that marks a phrase boundary (seconds).
    /// Gaps below this are mid-word micro-gaps.
    pub pause_min_sec: f64,

    /// Maximum inter-word gap that marks a phrase boundary (seconds).
    /// Longer silences usually mean a topic change, not a clip seam.
    pub pause_max_sec: f64,

    /// Minimum candidate span (seconds)
    pub min_candidate_sec: f64,

    /// Maximum candidate span (seconds)
    pub max_candidate_sec: f64,

    /// Minimum words per candidate
    pub min_candidate_words: usize,

    /// Windows with fewer words than this are skipped outright
    pub min_window_words: usize,

    // === Scoring ===
    /// Reject candidates scoring below this before duration adjustment
    pub min_score: f64,

    /// Reject candidates scoring below this after boundary refinement
    pub min_refined_score: f64,

    /// Hook window measured from the candidate start (seconds)
    pub hook_window_sec: f64,

    /// Early-dynamics window for retention features (seconds)
    pub dynamics_window_sec: f64,

    /// Closure window measured back from the candidate end (seconds)
    pub closure_window_sec: f64,

    /// A candidate start within this distance of a comment hotspot gets the
    /// engagement boost (seconds)
    pub hotspot_radius_sec: f64,

    // === Boundary Refinement ===
    /// How far past the duration target to search for a clean cut (seconds)
    pub refine_search_sec: f64,

    /// Pause length that counts as a clean cut point (seconds)
    pub refine_pause_sec: f64,

    /// Never trim a candidate below this when more content exists (seconds)
    pub min_refined_span_sec: f64,

    // === Post-Filters ===
    /// Maximum segments returned
    pub max_results: usize,

    /// Keep a candidate only if its word-set Jaccard similarity to every
    /// already-kept candidate is at or below this
    pub diversity_ceiling: f64,

    /// Minimum words inside the opening hook window (quality gate)
    pub min_hook_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            // Window Generation
            chapter_window_sec: 80.0,
            chapter_stride_min_sec: 40.0,
            chapter_stride_frac: 0.12,
            tail_gap_sec: 8.0,
            flat_window_sec: 82.0,
            flat_window_long_sec: 95.0,
            flat_stride_sec: 55.0,
            flat_stride_long_sec: 75.0,
            long_video_threshold_sec: 1200.0,
            intro_skip_sec: 45.0,
            intro_skip_min_video_sec: 600.0,

            // Boundary Detection
            pause_min_sec: 0.35,
            pause_max_sec: 1.2,
            min_candidate_sec: 20.0,
            max_candidate_sec: 82.0,
            min_candidate_words: 8,
            min_window_words: 10,

            // Scoring
            min_score: 0.50,
            min_refined_score: 0.52,
            hook_window_sec: 3.0,
            dynamics_window_sec: 5.0,
            closure_window_sec: 4.0,
            hotspot_radius_sec: 30.0,

            // Boundary Refinement
            refine_search_sec: 6.0,
            refine_pause_sec: 0.8,
            min_refined_span_sec: 18.0,

            // Post-Filters
            max_results: 12,
            diversity_ceiling: 0.7,
            min_hook_words: 3,
        }
    }
}

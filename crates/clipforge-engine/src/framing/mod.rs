//! Speaker-aware framing engine.
//!
//! Converts per-frame face detections (or pre-built tracks plus a
//! speaker-diarized word timeline) into a smooth, bounded, auto-panning
//! 9:16 crop path for one clip, serialized per axis as a piecewise-linear
//! expression the external compositor consumes verbatim.
//!
//! Returns `None` whenever no usable face signal survives any stage; the
//! caller falls back to a static center-crop.

pub mod body;
pub mod config;
pub mod expr;
pub mod planner;
pub mod smoothing;
pub mod speakers;
pub mod tracks;

pub use config::FramingConfig;
pub use expr::build_piecewise_expr;
pub use planner::CropPlanner;

use body::{estimate_body, group_extent};
use clipforge_models::{
    BoundingBox, CropKeyframe, FaceDetection, FaceLandmarks, FaceTrack, TimeRange, TranscriptWord,
};
use speakers::ResolvedWindow;
use tracing::{debug, info};
use tracks::{track_box_at, track_landmarks_at};

/// Face signal input for one clip.
#[derive(Debug, Clone)]
pub enum FaceSignal {
    /// Raw per-frame multi-face detections at a fixed sampling rate
    Frames(Vec<Vec<FaceDetection>>),
    /// Pre-built face tracks plus a speaker-diarized word timeline
    Tracks {
        tracks: Vec<FaceTrack>,
        words: Vec<TranscriptWord>,
    },
}

/// Framing engine with tunable configuration.
pub struct FramingEngine {
    config: FramingConfig,
}

impl FramingEngine {
    pub fn new(config: FramingConfig) -> Self {
        Self { config }
    }

    /// Compute the crop keyframe path for one clip.
    ///
    /// # Arguments
    /// * `clip` - Absolute time range of the clip in the source
    /// * `source_width`/`source_height` - Raw source frame dimensions
    /// * `signal` - Face detections or tracks for the clip range
    ///
    /// # Returns
    /// Keyframes with clip-relative timestamps, or `None` when no usable
    /// face signal exists (caller uses a static center-crop).
    pub fn compute(
        &self,
        clip: &TimeRange,
        source_width: u32,
        source_height: u32,
        signal: &FaceSignal,
    ) -> Option<Vec<CropKeyframe>> {
        let planner = CropPlanner::new(self.config.clone(), source_width, source_height)?;

        let (tracks, words): (Vec<FaceTrack>, &[TranscriptWord]) = match signal {
            FaceSignal::Frames(frames) => (
                tracks::build_tracks(frames, source_width, &self.config),
                &[],
            ),
            FaceSignal::Tracks { tracks, words } => (
                tracks
                    .iter()
                    .filter(|t| !t.samples.is_empty())
                    .cloned()
                    .collect(),
                words.as_slice(),
            ),
        };

        if tracks.is_empty() {
            info!("No face tracks, falling back to static crop");
            return None;
        }

        let resolved = if words.is_empty() {
            Vec::new()
        } else {
            let windows = speakers::speaker_windows(words, &self.config);
            speakers::assign_tracks(&windows, &tracks)
        };

        debug!(
            tracks = tracks.len(),
            speaker_windows = resolved.len(),
            crop_width = planner.crop_width(),
            "Framing signal prepared"
        );

        let crop_width = planner.crop_width() as f64;
        let config = &self.config;
        let observe = |t: f64| -> Option<(f64, f64)> {
            subject_center_at(t, &tracks, &resolved, crop_width, config)
        };

        planner.plan(clip, observe)
    }
}

impl Default for FramingEngine {
    fn default() -> Self {
        Self::new(FramingConfig::default())
    }
}

/// Compute a crop map with the default configuration.
///
/// Convenience wrapper over [`FramingEngine::compute`].
pub fn compute_crop_map(
    clip: &TimeRange,
    source_width: u32,
    source_height: u32,
    signal: &FaceSignal,
) -> Option<Vec<CropKeyframe>> {
    FramingEngine::default().compute(clip, source_width, source_height, signal)
}

/// Resolve the subject center at one sampled instant.
///
/// The active speaker's track wins when diarization resolves one; otherwise
/// all visible subjects are considered as a group, and when the group does
/// not fit the crop width the dominant subject wins.
fn subject_center_at(
    t: f64,
    tracks: &[FaceTrack],
    resolved: &[ResolvedWindow],
    crop_width: f64,
    config: &FramingConfig,
) -> Option<(f64, f64)> {
    // Active speaker's track first
    if let Some(window) = resolved.iter().find(|rw| rw.window.range.contains(t)) {
        if let Some(track_id) = window.track {
            if let Some(track) = tracks.iter().find(|tr| tr.id == track_id) {
                if let Some(bbox) = track_box_at(track, t, config) {
                    let landmarks = track_landmarks_at(track, t, config);
                    let est = estimate_body(&bbox, landmarks, config);
                    return Some((est.center_x, est.center_y));
                }
            }
        }
    }

    // Everything visible at this instant
    let visible: Vec<(&FaceTrack, BoundingBox, Option<&FaceLandmarks>)> = tracks
        .iter()
        .filter_map(|track| {
            track_box_at(track, t, config)
                .map(|bbox| (track, bbox, track_landmarks_at(track, t, config)))
        })
        .collect();

    if visible.is_empty() {
        return None;
    }

    if visible.len() > 1 {
        let boxes: Vec<BoundingBox> = visible.iter().map(|(_, b, _)| *b).collect();
        if let Some((min_x, max_x)) = group_extent(&boxes) {
            if max_x - min_x <= crop_width {
                // Whole group fits: center on its horizontal extent
                let cy = smoothing::mean(
                    &visible
                        .iter()
                        .map(|(_, bbox, lm)| estimate_body(bbox, *lm, config).center_y)
                        .collect::<Vec<_>>(),
                );
                return Some(((min_x + max_x) / 2.0, cy));
            }
        }
    }

    // Dominant subject: largest area weighted by score, stable ID tie-break
    let (_, bbox, landmarks) = visible
        .iter()
        .max_by(|(ta, ba, _), (tb, bb, _)| {
            let wa = ba.area() * track_score_at(ta);
            let wb = bb.area() * track_score_at(tb);
            wa.partial_cmp(&wb)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(tb.id.cmp(&ta.id))
        })
        .expect("non-empty");

    let est = estimate_body(bbox, *landmarks, config);
    Some((est.center_x, est.center_y))
}

/// Mean detection confidence of a track.
fn track_score_at(track: &FaceTrack) -> f64 {
    if track.samples.is_empty() {
        return 0.0;
    }
    track.samples.iter().map(|s| s.score).sum::<f64>() / track.samples.len() as f64
}

//! Configuration for the speaker-aware framing engine.

use serde::{Deserialize, Serialize};

/// Tunable parameters for crop path planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramingConfig {
    // === Sampling ===
    /// Crop keyframe sample rate (keyframes per second)
    pub sample_fps: f64,

    // === Face Tracking ===
    /// Maximum time gap when associating a detection to a track (seconds)
    pub max_association_gap_sec: f64,

    /// Maximum center distance for association, as a fraction of frame width
    pub max_center_distance_frac: f64,

    /// IoU at or above this associates regardless of center distance
    pub min_association_iou: f64,

    /// Tracks with fewer samples are discarded as noise
    pub min_track_samples: usize,

    /// Interpolate between samples only when their gap is under this (seconds)
    pub interpolation_ceiling_sec: f64,

    /// Hold the last known box for this long past the final sample (seconds)
    pub hold_window_sec: f64,

    // === Speaker Mapping ===
    /// Merge same-speaker windows separated by less than this (seconds)
    pub speaker_hold_sec: f64,

    // === Body Estimation ===
    /// Shoulder width as a multiple of jaw width
    pub shoulder_from_jaw: f64,

    /// Torso height as a multiple of head height
    pub torso_from_head: f64,

    /// Crop center sits this fraction down the estimated body height
    pub body_center_height_frac: f64,

    // === Framing Constraints ===
    /// Minimum subject-center distance from either vertical crop edge, as a
    /// fraction of crop width
    pub edge_margin_frac: f64,

    /// Top safe zone (UI chrome) as a fraction of crop height
    pub top_safe_frac: f64,

    /// Bottom safe zone (UI chrome) as a fraction of crop height
    pub bottom_safe_frac: f64,

    /// Upward bias favoring headroom over chin-room, as a fraction of crop
    /// height subtracted from the vertical center
    pub headroom_bias_frac: f64,

    // === Smoothing ===
    /// Moving-average window in keyframes (forced odd, minimum 3)
    pub smoothing_window: usize,

    /// Maximum pan speed in source pixels per second
    pub max_pan_px_per_sec: f64,

    /// Ease pans to a stop within this distance of the clip boundaries (seconds)
    pub edge_ease_sec: f64,

    /// Drop keyframes closer together than this (seconds)
    pub min_keyframe_dt_sec: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            // Sampling - 8 Hz balances responsiveness and path size
            sample_fps: 8.0,

            // Face Tracking
            max_association_gap_sec: 0.75,
            max_center_distance_frac: 0.12,
            min_association_iou: 0.1,
            min_track_samples: 2,
            interpolation_ceiling_sec: 1.0,
            hold_window_sec: 0.5,

            // Speaker Mapping
            speaker_hold_sec: 0.8,

            // Body Estimation
            shoulder_from_jaw: 2.2,
            torso_from_head: 2.7,
            body_center_height_frac: 0.40,

            // Framing Constraints
            edge_margin_frac: 0.12,
            top_safe_frac: 0.08,
            bottom_safe_frac: 0.12,
            headroom_bias_frac: 0.10,

            // Smoothing
            smoothing_window: 5,
            max_pan_px_per_sec: 600.0,
            edge_ease_sec: 0.5,
            min_keyframe_dt_sec: 0.05,
        }
    }
}

impl FramingConfig {
    /// Responsive preset for fast speaker switching.
    pub fn responsive() -> Self {
        Self {
            sample_fps: 10.0,
            smoothing_window: 3,
            max_pan_px_per_sec: 900.0,
            ..Default::default()
        }
    }

    /// Stable preset for single-speaker talking heads.
    pub fn stable() -> Self {
        Self {
            sample_fps: 5.0,
            smoothing_window: 7,
            max_pan_px_per_sec: 300.0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = FramingConfig::default();
        assert!(config.sample_fps > 0.0);
        assert!(config.edge_margin_frac < 0.5);
        assert!(config.min_track_samples >= 2);
        assert!(config.torso_from_head > 1.0);
    }

    #[test]
    fn test_presets_differ() {
        assert!(FramingConfig::responsive().max_pan_px_per_sec > FramingConfig::stable().max_pan_px_per_sec);
    }
}

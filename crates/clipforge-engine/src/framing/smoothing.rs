//! Crop path smoothing: moving average, pan-rate limiting, edge easing,
//! and temporal de-duplication.

use super::config::FramingConfig;
use clipforge_models::TimeRange;

/// Arithmetic mean of a slice of values.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Symmetric moving average with edge handling.
///
/// The window shrinks at the boundaries to keep the output the same length
/// as the input.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if data.len() < window || window < 2 {
        return data.to_vec();
    }

    let pad = window / 2;
    let mut result = Vec::with_capacity(data.len());

    for i in 0..data.len() {
        let start = i.saturating_sub(pad);
        let end = (i + pad + 1).min(data.len());
        let slice = &data[start..end];
        result.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }

    result
}

/// Effective odd window size for a configured value.
pub fn odd_window(window: usize) -> usize {
    let w = window.max(3);
    if w % 2 == 0 {
        w + 1
    } else {
        w
    }
}

/// Limit the pan rate and ease motion to a stop at clip boundaries.
///
/// Each step moves toward the smoothed target without overshooting it,
/// capped at `max_pan_px_per_sec * dt`. Within the ease window of either
/// clip boundary the applied delta is damped linearly toward zero so the
/// crop holds still at the cut.
pub fn limit_and_ease(
    times: &[f64],
    targets: &[f64],
    clip: &TimeRange,
    config: &FramingConfig,
) -> Vec<f64> {
    debug_assert_eq!(times.len(), targets.len());
    if targets.len() < 2 {
        return targets.to_vec();
    }

    let mut applied = Vec::with_capacity(targets.len());
    applied.push(targets[0]);

    for i in 1..targets.len() {
        let prev = applied[i - 1];
        let dt = (times[i] - times[i - 1]).max(0.0);

        let mut delta = targets[i] - prev;
        let budget = config.max_pan_px_per_sec * dt;
        delta = delta.clamp(-budget, budget);

        delta *= ease_factor(times[i], clip, config.edge_ease_sec);

        applied.push(prev + delta);
    }

    applied
}

/// Linear damping factor approaching the clip boundaries: 1.0 in the clip
/// interior, 0.0 exactly at a boundary.
fn ease_factor(t: f64, clip: &TimeRange, ease_sec: f64) -> f64 {
    if ease_sec <= 0.0 {
        return 1.0;
    }
    let from_start = (t - clip.start_sec).max(0.0);
    let from_end = (clip.end_sec - t).max(0.0);
    (from_start.min(from_end) / ease_sec).clamp(0.0, 1.0)
}

/// Drop keyframe samples closer together than the configured minimum.
/// The first and last samples always survive.
pub fn dedup_times(times: &[f64], min_dt: f64) -> Vec<usize> {
    if times.is_empty() {
        return Vec::new();
    }

    let mut keep = vec![0usize];
    for (i, &t) in times.iter().enumerate().skip(1) {
        let last_kept = times[*keep.last().expect("non-empty")];
        if t - last_kept >= min_dt || i == times.len() - 1 {
            keep.push(i);
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_moving_average() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let smoothed = moving_average(&data, 3);

        assert_eq!(smoothed.len(), 5);
        assert!((smoothed[2] - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_odd_window() {
        assert_eq!(odd_window(0), 3);
        assert_eq!(odd_window(4), 5);
        assert_eq!(odd_window(5), 5);
    }

    #[test]
    fn test_rate_limit_caps_step() {
        let mut config = FramingConfig::default();
        config.max_pan_px_per_sec = 100.0;
        config.edge_ease_sec = 0.0;

        let clip = TimeRange::new(0.0, 10.0);
        let times = vec![0.0, 1.0, 2.0];
        let targets = vec![0.0, 500.0, 500.0];

        let applied = limit_and_ease(&times, &targets, &clip, &config);
        // 100 px/s budget per 1s step
        assert!((applied[1] - 100.0).abs() < 1e-9);
        assert!((applied[2] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_overshoot() {
        let mut config = FramingConfig::default();
        config.max_pan_px_per_sec = 10_000.0;
        config.edge_ease_sec = 0.0;

        let clip = TimeRange::new(0.0, 10.0);
        let times = vec![0.0, 1.0];
        let targets = vec![0.0, 50.0];

        let applied = limit_and_ease(&times, &targets, &clip, &config);
        // Generous budget still lands exactly on target
        assert!((applied[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_easing_freezes_boundaries() {
        let mut config = FramingConfig::default();
        config.max_pan_px_per_sec = 10_000.0;
        config.edge_ease_sec = 1.0;

        let clip = TimeRange::new(0.0, 2.0);
        let times = vec![0.0, 0.1, 1.9, 2.0];
        let targets = vec![0.0, 300.0, 300.0, 600.0];

        let applied = limit_and_ease(&times, &targets, &clip, &config);
        // Sample near the start moves barely
        assert!(applied[1] < 40.0);
        // Sample at the exact end does not move at all
        assert!((applied[3] - applied[2]).abs() < 1e-9);
    }

    #[test]
    fn test_dedup_times() {
        let times = vec![0.0, 0.01, 0.02, 0.2, 0.4, 0.41];
        let keep = dedup_times(&times, 0.1);

        assert_eq!(keep[0], 0);
        assert!(keep.contains(&3));
        // Last sample always survives
        assert_eq!(*keep.last().unwrap(), 5);
    }
}

//! Batch temporal association of raw face detections into tracks.
//!
//! Detections arrive as per-frame lists at a fixed sampling rate. Each
//! detection is matched to the track whose most recent sample is close in
//! time and space; unmatched detections start new tracks. The whole pass is
//! offline and deterministic.

use super::config::FramingConfig;
use clipforge_models::{BoundingBox, FaceDetection, FaceTrack, TrackId, TrackSample};
use tracing::debug;

/// Build face tracks from per-frame detections.
///
/// Frames must be in time order. Tracks with fewer than the configured
/// minimum number of samples are discarded as detector noise.
pub fn build_tracks(
    frames: &[Vec<FaceDetection>],
    frame_width: u32,
    config: &FramingConfig,
) -> Vec<FaceTrack> {
    let max_distance = frame_width as f64 * config.max_center_distance_frac;
    let mut tracks: Vec<FaceTrack> = Vec::new();
    let mut next_id = 0u32;

    for frame in frames {
        // One detection per track per frame
        let mut claimed: Vec<TrackId> = Vec::new();

        for detection in frame {
            let best = best_track(
                &tracks,
                &claimed,
                detection,
                max_distance,
                config,
            );

            let sample = TrackSample {
                time_sec: detection.time_sec,
                bbox: detection.bbox,
                score: detection.score,
                landmarks: detection.landmarks.clone(),
            };

            match best {
                Some(idx) => {
                    claimed.push(tracks[idx].id);
                    tracks[idx].samples.push(sample);
                }
                None => {
                    let id = TrackId(next_id);
                    next_id += 1;
                    let mut track = FaceTrack::new(id);
                    track.samples.push(sample);
                    claimed.push(id);
                    tracks.push(track);
                }
            }
        }
    }

    let before = tracks.len();
    tracks.retain(|t| t.samples.len() >= config.min_track_samples);
    debug!(
        tracks = tracks.len(),
        discarded = before - tracks.len(),
        "Face track association complete"
    );
    tracks
}

/// Index of the best matching unclaimed track for a detection, preferring
/// IoU overlap and falling back to center distance.
fn best_track(
    tracks: &[FaceTrack],
    claimed: &[TrackId],
    detection: &FaceDetection,
    max_distance: f64,
    config: &FramingConfig,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, track) in tracks.iter().enumerate() {
        if claimed.contains(&track.id) {
            continue;
        }
        let last = match track.samples.last() {
            Some(s) => s,
            None => continue,
        };
        if detection.time_sec - last.time_sec > config.max_association_gap_sec {
            continue;
        }

        let iou = detection.bbox.iou(&last.bbox);
        let distance = detection.bbox.center_distance(&last.bbox);
        if iou < config.min_association_iou && distance > max_distance {
            continue;
        }

        // Rank by IoU, then by proximity; distance is normalized into a
        // small fractional bonus so IoU dominates
        let affinity = iou + (1.0 - (distance / max_distance.max(1.0)).min(1.0)) * 0.01;
        match best {
            Some((_, best_affinity)) if best_affinity >= affinity => {}
            _ => best = Some((idx, affinity)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Reconstruct a track's box at query time `t`.
///
/// Exact sample match wins; otherwise straddling samples are linearly
/// interpolated when their gap is under the interpolation ceiling; otherwise
/// the nearest sample is held within the hold window; otherwise there is no
/// detection at `t`.
pub fn track_box_at(track: &FaceTrack, t: f64, config: &FramingConfig) -> Option<BoundingBox> {
    const EXACT_EPS: f64 = 1e-6;

    if track.samples.is_empty() {
        return None;
    }

    let first = track.samples.first().expect("non-empty");
    let last = track.samples.last().expect("non-empty");

    if t < first.time_sec {
        return (first.time_sec - t <= config.hold_window_sec).then_some(first.bbox);
    }
    if t > last.time_sec {
        return (t - last.time_sec <= config.hold_window_sec).then_some(last.bbox);
    }

    // First sample at or after t
    let idx = track.samples.partition_point(|s| s.time_sec < t);
    let after = &track.samples[idx.min(track.samples.len() - 1)];
    if (after.time_sec - t).abs() < EXACT_EPS {
        return Some(after.bbox);
    }

    let before = &track.samples[idx.saturating_sub(1)];
    if (before.time_sec - t).abs() < EXACT_EPS {
        return Some(before.bbox);
    }

    let gap = after.time_sec - before.time_sec;
    if gap > 0.0 && gap <= config.interpolation_ceiling_sec {
        let alpha = (t - before.time_sec) / gap;
        return Some(BoundingBox::lerp(&before.bbox, &after.bbox, alpha));
    }

    // Gap too wide to interpolate: hold the nearer sample if close enough
    let to_before = t - before.time_sec;
    let to_after = after.time_sec - t;
    if to_before <= to_after && to_before <= config.hold_window_sec {
        Some(before.bbox)
    } else if to_after <= config.hold_window_sec {
        Some(after.bbox)
    } else {
        None
    }
}

/// Landmarks at (or nearest to) query time `t`, within the hold window.
pub fn track_landmarks_at<'a>(
    track: &'a FaceTrack,
    t: f64,
    config: &FramingConfig,
) -> Option<&'a clipforge_models::FaceLandmarks> {
    let mut best: Option<(f64, &TrackSample)> = None;
    for sample in &track.samples {
        let dt = (sample.time_sec - t).abs();
        match best {
            Some((best_dt, _)) if best_dt <= dt => {}
            _ => best = Some((dt, sample)),
        }
    }
    best.and_then(|(dt, sample)| {
        (dt <= config.hold_window_sec.max(config.interpolation_ceiling_sec))
            .then_some(sample.landmarks.as_ref())
            .flatten()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(t: f64, x: f64) -> FaceDetection {
        FaceDetection::new(t, BoundingBox::new(x, 100.0, 80.0, 80.0), 0.9)
    }

    #[test]
    fn test_build_tracks_two_stable_faces() {
        let config = FramingConfig::default();
        let frames: Vec<Vec<FaceDetection>> = (0..10)
            .map(|i| {
                let t = i as f64 * 0.125;
                vec![detection(t, 200.0), detection(t, 1200.0)]
            })
            .collect();

        let tracks = build_tracks(&frames, 1920, &config);
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| t.samples.len() == 10));
    }

    #[test]
    fn test_moving_face_keeps_identity() {
        let config = FramingConfig::default();
        // Face drifting 10px per frame stays one track
        let frames: Vec<Vec<FaceDetection>> = (0..20)
            .map(|i| vec![detection(i as f64 * 0.125, 200.0 + i as f64 * 10.0)])
            .collect();

        let tracks = build_tracks(&frames, 1920, &config);
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn test_noise_tracks_discarded() {
        let config = FramingConfig::default();
        let mut frames: Vec<Vec<FaceDetection>> = (0..10)
            .map(|i| vec![detection(i as f64 * 0.125, 200.0)])
            .collect();
        // One-frame spurious detection far away
        frames[4].push(detection(0.5, 1700.0));

        let tracks = build_tracks(&frames, 1920, &config);
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn test_box_at_exact_and_interpolated() {
        let config = FramingConfig::default();
        let mut track = FaceTrack::new(TrackId(0));
        track.samples.push(TrackSample {
            time_sec: 0.0,
            bbox: BoundingBox::new(100.0, 100.0, 80.0, 80.0),
            score: 0.9,
            landmarks: None,
        });
        track.samples.push(TrackSample {
            time_sec: 0.5,
            bbox: BoundingBox::new(200.0, 100.0, 80.0, 80.0),
            score: 0.9,
            landmarks: None,
        });

        let exact = track_box_at(&track, 0.0, &config).unwrap();
        assert_eq!(exact.x, 100.0);

        let mid = track_box_at(&track, 0.25, &config).unwrap();
        assert!((mid.x - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_at_holds_then_expires() {
        let config = FramingConfig::default();
        let mut track = FaceTrack::new(TrackId(0));
        track.samples.push(TrackSample {
            time_sec: 0.0,
            bbox: BoundingBox::new(100.0, 100.0, 80.0, 80.0),
            score: 0.9,
            landmarks: None,
        });
        track.samples.push(TrackSample {
            time_sec: 0.2,
            bbox: BoundingBox::new(110.0, 100.0, 80.0, 80.0),
            score: 0.9,
            landmarks: None,
        });

        // Within hold window past the last sample
        assert!(track_box_at(&track, 0.6, &config).is_some());
        // Far past the last sample
        assert!(track_box_at(&track, 5.0, &config).is_none());
    }

    #[test]
    fn test_wide_gap_blocks_interpolation() {
        let mut config = FramingConfig::default();
        config.interpolation_ceiling_sec = 1.0;
        config.hold_window_sec = 0.5;

        let mut track = FaceTrack::new(TrackId(0));
        track.samples.push(TrackSample {
            time_sec: 0.0,
            bbox: BoundingBox::new(100.0, 100.0, 80.0, 80.0),
            score: 0.9,
            landmarks: None,
        });
        track.samples.push(TrackSample {
            time_sec: 4.0,
            bbox: BoundingBox::new(800.0, 100.0, 80.0, 80.0),
            score: 0.9,
            landmarks: None,
        });

        // Middle of a 4s gap: no interpolation, beyond hold
        assert!(track_box_at(&track, 2.0, &config).is_none());
        // Near an endpoint of the gap: held
        let near = track_box_at(&track, 0.3, &config).unwrap();
        assert_eq!(near.x, 100.0);
    }
}

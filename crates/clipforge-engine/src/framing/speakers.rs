//! Speaker-to-track mapping from diarized words.
//!
//! Builds per-speaker temporal windows from the word stream, measures how
//! much of each window every face track covers, and assigns tracks to
//! speakers greedily by total coverage. The coverage cache and the "used
//! tracks" set are explicit values local to one invocation, keeping the
//! whole pass pure and deterministic.

use super::config::FramingConfig;
use clipforge_models::{FaceTrack, SpeakerId, TimeRange, TrackId, TranscriptWord};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// One contiguous speaking window for a speaker.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerWindow {
    pub speaker: SpeakerId,
    pub range: TimeRange,
}

/// A speaker window with its resolved face track, when one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWindow {
    pub window: SpeakerWindow,
    pub track: Option<TrackId>,
}

/// Build per-speaker windows from diarized words, merging same-speaker
/// windows separated by less than the hold duration.
pub fn speaker_windows(words: &[TranscriptWord], config: &FramingConfig) -> Vec<SpeakerWindow> {
    let mut windows: Vec<SpeakerWindow> = Vec::new();

    for word in words {
        let speaker = match &word.speaker {
            Some(s) => s.clone(),
            None => continue,
        };

        match windows.last_mut() {
            Some(last)
                if last.speaker == speaker
                    && word.start_sec - last.range.end_sec < config.speaker_hold_sec =>
            {
                last.range.end_sec = last.range.end_sec.max(word.end_sec);
            }
            _ => windows.push(SpeakerWindow {
                speaker,
                range: TimeRange::new(word.start_sec, word.end_sec),
            }),
        }
    }

    windows
}

/// Read-through cache for per-(track, window) coverage, local to one
/// invocation so repeated queries stay pure.
pub struct CoverageCache {
    entries: HashMap<(TrackId, u64, u64), f64>,
}

impl CoverageCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Temporal coverage of `window` by `track`: summed sample spacing
    /// inside the window, with one derived average step of trailing
    /// extrapolation past the final in-window sample.
    pub fn coverage(&mut self, track: &FaceTrack, window: &TimeRange) -> f64 {
        let key = (
            track.id,
            window.start_sec.to_bits(),
            window.end_sec.to_bits(),
        );
        if let Some(cached) = self.entries.get(&key) {
            return *cached;
        }

        let value = compute_coverage(track, window);
        self.entries.insert(key, value);
        value
    }
}

impl Default for CoverageCache {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_coverage(track: &FaceTrack, window: &TimeRange) -> f64 {
    if track.samples.is_empty() || window.duration_sec() <= 0.0 {
        return 0.0;
    }

    let mut covered = 0.0;
    for pair in track.samples.windows(2) {
        let seg = TimeRange::new(pair[0].time_sec, pair[1].time_sec);
        covered += seg.overlap_sec(window);
    }

    // Trailing extrapolation: one average sampling step past the last sample
    if let (Some(last), Some(step)) = (track.samples.last(), track.mean_sample_step()) {
        let tail = TimeRange::new(last.time_sec, last.time_sec + step);
        covered += tail.overlap_sec(window);
    }

    covered
}

/// Assign face tracks to speakers.
///
/// Greedy highest-total-coverage-first, one track per speaker, ties broken
/// by ascending `(SpeakerId, TrackId)`. A window whose speaker got no
/// positive-coverage track falls back to the best track for that specific
/// window, even if that track is already assigned elsewhere.
pub fn assign_tracks(windows: &[SpeakerWindow], tracks: &[FaceTrack]) -> Vec<ResolvedWindow> {
    let mut cache = CoverageCache::new();

    // Total coverage per (speaker, track)
    let mut totals: BTreeMap<(SpeakerId, TrackId), f64> = BTreeMap::new();
    for window in windows {
        for track in tracks {
            let c = cache.coverage(track, &window.range);
            *totals
                .entry((window.speaker.clone(), track.id))
                .or_insert(0.0) += c;
        }
    }

    // Greedy assignment: best coverage first, stable ID order on ties
    let mut ranked: Vec<(&(SpeakerId, TrackId), f64)> =
        totals.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let mut by_speaker: BTreeMap<SpeakerId, TrackId> = BTreeMap::new();
    let mut used_tracks: Vec<TrackId> = Vec::new();
    for ((speaker, track_id), coverage) in ranked {
        if coverage <= 0.0 {
            continue;
        }
        if by_speaker.contains_key(speaker) || used_tracks.contains(track_id) {
            continue;
        }
        by_speaker.insert(speaker.clone(), *track_id);
        used_tracks.push(*track_id);
    }

    debug!(
        speakers = by_speaker.len(),
        tracks = tracks.len(),
        windows = windows.len(),
        "Speaker-to-track assignment complete"
    );

    // Resolve every window, with per-window fallback
    windows
        .iter()
        .map(|window| {
            let assigned = by_speaker.get(&window.speaker).copied();
            let track = assigned.or_else(|| best_window_track(window, tracks, &mut cache));
            ResolvedWindow {
                window: window.clone(),
                track,
            }
        })
        .collect()
}

/// Best positive-coverage track for a single window, stable ID tie-break.
fn best_window_track(
    window: &SpeakerWindow,
    tracks: &[FaceTrack],
    cache: &mut CoverageCache,
) -> Option<TrackId> {
    let mut best: Option<(TrackId, f64)> = None;
    for track in tracks {
        let c = cache.coverage(track, &window.range);
        if c <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_c)) if best_c >= c => {}
            _ => best = Some((track.id, c)),
        }
    }
    best.map(|(id, _)| id)
}

//! Search window generation over the source timeline.
//!
//! Candidates are searched inside overlapping windows rather than the whole
//! transcript at once, keeping enumeration bounded and biasing spans toward
//! chapter-local content.

use super::config::SegmenterConfig;
use super::patterns::is_intro_title;
use clipforge_models::{ChapterWindow, TimeRange};
use tracing::debug;

/// Generate overlapping search windows for the whole video.
///
/// With chapters, each non-intro chapter is tiled independently. Without
/// chapters, the full duration is tiled with a stride that widens for long
/// videos, after skipping the configured leading seconds.
pub fn generate_windows(
    chapters: &[ChapterWindow],
    video_duration_sec: f64,
    config: &SegmenterConfig,
) -> Vec<TimeRange> {
    if video_duration_sec <= 0.0 {
        return Vec::new();
    }

    let windows = if chapters.is_empty() {
        flat_windows(video_duration_sec, config)
    } else {
        chapters
            .iter()
            .filter(|c| !is_intro_title(&c.title))
            .flat_map(|c| chapter_windows(c, config))
            .collect()
    };

    debug!(
        window_count = windows.len(),
        chapter_count = chapters.len(),
        "Generated search windows"
    );
    windows
}

/// Tile one chapter with overlapping windows.
fn chapter_windows(chapter: &ChapterWindow, config: &SegmenterConfig) -> Vec<TimeRange> {
    let length = chapter.duration_sec();
    if length <= 0.0 {
        return Vec::new();
    }

    let window_len = config.chapter_window_sec;
    if length <= window_len {
        return vec![TimeRange::new(chapter.start_sec, chapter.end_sec)];
    }

    let stride = (length * config.chapter_stride_frac).max(config.chapter_stride_min_sec);
    let mut windows = tile(chapter.start_sec, chapter.end_sec, window_len, stride);
    close_tail(&mut windows, chapter.end_sec, window_len, config.tail_gap_sec);
    windows
}

/// Tile a chapterless video.
fn flat_windows(video_duration_sec: f64, config: &SegmenterConfig) -> Vec<TimeRange> {
    let (window_len, stride) = if video_duration_sec > config.long_video_threshold_sec {
        (config.flat_window_long_sec, config.flat_stride_long_sec)
    } else {
        (config.flat_window_sec, config.flat_stride_sec)
    };

    let start = if video_duration_sec > config.intro_skip_min_video_sec {
        config.intro_skip_sec
    } else {
        0.0
    };

    if video_duration_sec - start <= window_len {
        return vec![TimeRange::new(start, video_duration_sec)];
    }

    let mut windows = tile(start, video_duration_sec, window_len, stride);
    close_tail(&mut windows, video_duration_sec, window_len, config.tail_gap_sec);
    windows
}

/// Generate windows of `window_len` every `stride` seconds inside `[start, end]`.
fn tile(start: f64, end: f64, window_len: f64, stride: f64) -> Vec<TimeRange> {
    let stride = stride.max(1.0);
    let mut windows = Vec::new();
    let mut cursor = start;
    while cursor + window_len <= end {
        windows.push(TimeRange::new(cursor, cursor + window_len));
        cursor += stride;
    }
    if windows.is_empty() {
        windows.push(TimeRange::new(start, end.min(start + window_len)));
    }
    windows
}

/// Append a window ending exactly at `end` when the last generated window
/// falls short by more than `tail_gap_sec`.
fn close_tail(windows: &mut Vec<TimeRange>, end: f64, window_len: f64, tail_gap_sec: f64) {
    if let Some(last) = windows.last() {
        if end - last.end_sec > tail_gap_sec {
            let start = (end - window_len).max(0.0);
            windows.push(TimeRange::new(start, end));
        }
    }
}

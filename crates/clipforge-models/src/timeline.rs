//! Timeline signal models: scene changes, chapters, and time ranges.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A visual cut point detected by upstream scene analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneChange {
    /// Timestamp in seconds from video start
    pub time_sec: f64,
}

impl SceneChange {
    pub fn new(time_sec: f64) -> Self {
        Self { time_sec }
    }
}

/// A coarse chapter of the source timeline, usually author-provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChapterWindow {
    /// Chapter start in seconds
    pub start_sec: f64,
    /// Chapter end in seconds
    pub end_sec: f64,
    /// Chapter title as listed in the video description
    pub title: String,
}

impl ChapterWindow {
    pub fn new(start_sec: f64, end_sec: f64, title: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec,
            title: title.into(),
        }
    }

    /// Chapter length in seconds.
    #[inline]
    pub fn duration_sec(&self) -> f64 {
        (self.end_sec - self.start_sec).max(0.0)
    }
}

/// A half-open time interval `[start_sec, end_sec)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeRange {
    pub start_sec: f64,
    pub end_sec: f64,
}

impl TimeRange {
    pub fn new(start_sec: f64, end_sec: f64) -> Self {
        Self { start_sec, end_sec }
    }

    #[inline]
    pub fn duration_sec(&self) -> f64 {
        (self.end_sec - self.start_sec).max(0.0)
    }

    /// Whether `t` falls inside this range.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_sec && t < self.end_sec
    }

    /// Whether two ranges overlap by any positive amount.
    #[inline]
    pub fn intersects(&self, other: &TimeRange) -> bool {
        self.start_sec < other.end_sec && other.start_sec < self.end_sec
    }

    /// Length of the intersection with `other`, zero when disjoint.
    pub fn overlap_sec(&self, other: &TimeRange) -> f64 {
        let start = self.start_sec.max(other.start_sec);
        let end = self.end_sec.min(other.end_sec);
        (end - start).max(0.0)
    }
}

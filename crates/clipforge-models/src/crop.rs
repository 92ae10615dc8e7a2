//! Crop path models for the framing engine output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target aspect ratio for output video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AspectRatio {
    /// Width component
    pub width: u32,
    /// Height component
    pub height: u32,
}

impl AspectRatio {
    /// Create a new aspect ratio.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns width/height as float.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Portrait 9:16 (TikTok, Instagram Reels, YouTube Shorts)
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Square 1:1
    pub const SQUARE: AspectRatio = AspectRatio {
        width: 1,
        height: 1,
    };

    /// Landscape 16:9
    pub const LANDSCAPE: AspectRatio = AspectRatio {
        width: 16,
        height: 9,
    };
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Axis selector for per-axis crop path serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// One timestamped crop rectangle sample in source-pixel coordinates.
///
/// An ordered sequence of keyframes forms the crop path for one clip.
/// Invariants: `time_sec` is monotonically non-decreasing across a path;
/// `0 <= x <= source_width - width` and the analogous bound for `y`.
/// Dimensions are even (codec requirement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropKeyframe {
    /// Timestamp in seconds, relative to the clip start
    pub time_sec: f64,
    /// Left edge x-coordinate
    pub x: i32,
    /// Top edge y-coordinate
    pub y: i32,
    /// Crop width
    pub width: i32,
    /// Crop height
    pub height: i32,
}

impl CropKeyframe {
    /// Create a new crop keyframe.
    pub fn new(time_sec: f64, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            time_sec,
            x,
            y,
            width,
            height,
        }
    }

    /// Value along the given axis.
    #[inline]
    pub fn axis_value(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Horizontal center of the crop.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x as f64 + self.width as f64 / 2.0
    }

    /// Linear interpolation between two keyframes.
    pub fn lerp(a: &CropKeyframe, b: &CropKeyframe, t: f64) -> CropKeyframe {
        CropKeyframe {
            time_sec: a.time_sec + t * (b.time_sec - a.time_sec),
            x: (a.x as f64 + t * (b.x - a.x) as f64).round() as i32,
            y: (a.y as f64 + t * (b.y - a.y) as f64).round() as i32,
            width: (a.width as f64 + t * (b.width - a.width) as f64).round() as i32,
            height: (a.height as f64 + t * (b.height - a.height) as f64).round() as i32,
        }
    }
}

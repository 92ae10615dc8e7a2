//! Face detection and tracking models.
//!
//! # Landmarks Layout (68-point model)
//!
//! - 0-16: Jaw outline
//! - 17-21: Right eyebrow
//! - 22-26: Left eyebrow
//! - 27-35: Nose
//! - 36-41: Right eye
//! - 42-47: Left eye
//! - 48-59: Outer lip
//! - 60-67: Inner lip

use crate::geometry::BoundingBox;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Landmark index of the chin tip.
pub const LANDMARK_CHIN: usize = 8;
/// Landmark index between the eyebrows.
pub const LANDMARK_BROW: usize = 27;
/// First and last jaw outline indices.
pub const LANDMARK_JAW_LEFT: usize = 0;
pub const LANDMARK_JAW_RIGHT: usize = 16;

/// 68-point facial landmarks for one detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceLandmarks {
    /// 68 landmark coordinates in (x, y) pixel format
    pub points: Vec<(f64, f64)>,
}

impl FaceLandmarks {
    /// Create landmarks from a vector of points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Whether a full 68-point set is present.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.points.len() >= 68
    }

    /// Horizontal extent of the jaw outline (ear to ear).
    pub fn jaw_width(&self) -> Option<f64> {
        if !self.is_complete() {
            return None;
        }
        let left = self.points.get(LANDMARK_JAW_LEFT)?.0;
        let right = self.points.get(LANDMARK_JAW_RIGHT)?.0;
        let width = (right - left).abs();
        (width > 0.0).then_some(width)
    }

    /// Vertical distance from the eyebrow line to the chin tip.
    pub fn brow_to_chin_height(&self) -> Option<f64> {
        if !self.is_complete() {
            return None;
        }
        let chin_y = self.points.get(LANDMARK_CHIN)?.1;
        let brow_y = self.points.get(LANDMARK_BROW)?.1;
        let height = (chin_y - brow_y).abs();
        (height > 0.0).then_some(height)
    }

    /// Horizontal center of the jaw outline.
    pub fn jaw_center_x(&self) -> Option<f64> {
        if !self.is_complete() {
            return None;
        }
        let left = self.points.get(LANDMARK_JAW_LEFT)?.0;
        let right = self.points.get(LANDMARK_JAW_RIGHT)?.0;
        Some((left + right) / 2.0)
    }

    /// Bounding box of all landmark points.
    pub fn bounding_box(&self) -> BoundingBox {
        if self.points.is_empty() {
            return BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        }

        let min_x = self.points.iter().map(|(x, _)| *x).fold(f64::MAX, f64::min);
        let max_x = self.points.iter().map(|(x, _)| *x).fold(f64::MIN, f64::max);
        let min_y = self.points.iter().map(|(_, y)| *y).fold(f64::MAX, f64::min);
        let max_y = self.points.iter().map(|(_, y)| *y).fold(f64::MIN, f64::max);

        BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// A face detection at a specific time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceDetection {
    /// Timestamp in seconds
    pub time_sec: f64,
    /// Bounding box of the detection
    pub bbox: BoundingBox,
    /// Detection confidence score (0.0-1.0)
    pub score: f64,
    /// Optional 68-point landmarks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<FaceLandmarks>,
}

impl FaceDetection {
    /// Create a new detection without landmarks.
    pub fn new(time_sec: f64, bbox: BoundingBox, score: f64) -> Self {
        Self {
            time_sec,
            bbox,
            score,
            landmarks: None,
        }
    }

    /// Attach landmarks.
    pub fn with_landmarks(mut self, landmarks: FaceLandmarks) -> Self {
        self.landmarks = Some(landmarks);
        self
    }
}

/// Identity tag for a face track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "track-{}", self.0)
    }
}

/// One sampled observation belonging to a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackSample {
    /// Timestamp in seconds
    pub time_sec: f64,
    /// Observed bounding box
    pub bbox: BoundingBox,
    /// Detection confidence at this sample
    pub score: f64,
    /// Landmarks observed at this sample, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<FaceLandmarks>,
}

/// A temporally linked sequence of detections believed to be one person.
///
/// Samples are ordered by `time_sec` and owned exclusively by the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceTrack {
    /// Persistent track identity
    pub id: TrackId,
    /// Time-ordered samples
    pub samples: Vec<TrackSample>,
}

impl FaceTrack {
    /// Create an empty track.
    pub fn new(id: TrackId) -> Self {
        Self {
            id,
            samples: Vec::new(),
        }
    }

    /// First sample time, if any.
    pub fn start_sec(&self) -> Option<f64> {
        self.samples.first().map(|s| s.time_sec)
    }

    /// Last sample time, if any.
    pub fn end_sec(&self) -> Option<f64> {
        self.samples.last().map(|s| s.time_sec)
    }

    /// Average spacing between consecutive samples, or `None` with fewer
    /// than two samples.
    pub fn mean_sample_step(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }
        let span = self.samples.last()?.time_sec - self.samples.first()?.time_sec;
        let step = span / (self.samples.len() - 1) as f64;
        (step > 0.0).then_some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmarks_with(chin_y: f64, brow_y: f64, jaw_left_x: f64, jaw_right_x: f64) -> FaceLandmarks {
        let mut points = vec![(0.0, 0.0); 68];
        points[LANDMARK_CHIN] = (100.0, chin_y);
        points[LANDMARK_BROW] = (100.0, brow_y);
        points[LANDMARK_JAW_LEFT] = (jaw_left_x, 100.0);
        points[LANDMARK_JAW_RIGHT] = (jaw_right_x, 100.0);
        FaceLandmarks::new(points)
    }

    #[test]
    fn test_jaw_width() {
        let lm = landmarks_with(200.0, 50.0, 60.0, 140.0);
        assert_eq!(lm.jaw_width(), Some(80.0));
    }

    #[test]
    fn test_brow_to_chin_height() {
        let lm = landmarks_with(200.0, 50.0, 60.0, 140.0);
        assert_eq!(lm.brow_to_chin_height(), Some(150.0));
    }

    #[test]
    fn test_incomplete_landmarks_yield_none() {
        let lm = FaceLandmarks::new(vec![(0.0, 0.0); 10]);
        assert!(lm.jaw_width().is_none());
        assert!(lm.brow_to_chin_height().is_none());
    }

    #[test]
    fn test_landmark_bounding_box() {
        let lm = FaceLandmarks::new(vec![(10.0, 20.0), (50.0, 30.0), (30.0, 80.0)]);
        let bbox = lm.bounding_box();
        assert_eq!(bbox.x, 10.0);
        assert_eq!(bbox.y, 20.0);
        assert_eq!(bbox.width, 40.0);
        assert_eq!(bbox.height, 60.0);
    }

    #[test]
    fn test_track_mean_sample_step() {
        let mut track = FaceTrack::new(TrackId(0));
        for i in 0..5 {
            track.samples.push(TrackSample {
                time_sec: i as f64 * 0.2,
                bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
                score: 0.9,
                landmarks: None,
            });
        }
        let step = track.mean_sample_step().unwrap();
        assert!((step - 0.2).abs() < 1e-9);

        let short = FaceTrack::new(TrackId(1));
        assert!(short.mean_sample_step().is_none());
    }
}

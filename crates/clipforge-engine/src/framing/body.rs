//! Body-box estimation from facial landmarks.
//!
//! A crop centered on the face alone sits too high on a standing or seated
//! subject. When landmarks are available the framing engine estimates the
//! upper body instead: jaw width scales to shoulder width, brow-to-chin
//! height scales to head and torso height, and the crop center sits a
//! configured fraction down the estimated body.

use super::config::FramingConfig;
use clipforge_models::{BoundingBox, FaceLandmarks};

/// Estimated upper-body box for one subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyEstimate {
    /// Estimated body extent
    pub bbox: BoundingBox,
    /// Point the crop should center on
    pub center_x: f64,
    pub center_y: f64,
}

/// Estimate the upper body from landmarks, falling back to the raw face box
/// center when landmarks are missing or degenerate.
pub fn estimate_body(
    face_bbox: &BoundingBox,
    landmarks: Option<&FaceLandmarks>,
    config: &FramingConfig,
) -> BodyEstimate {
    if let Some(lm) = landmarks {
        if let Some(estimate) = body_from_landmarks(lm, config) {
            return estimate;
        }
    }
    fallback_estimate(face_bbox)
}

fn body_from_landmarks(lm: &FaceLandmarks, config: &FramingConfig) -> Option<BodyEstimate> {
    let jaw_width = lm.jaw_width()?;
    let head_height = lm.brow_to_chin_height()?;
    let center_x = lm.jaw_center_x()?;

    let shoulder_width = jaw_width * config.shoulder_from_jaw;
    let torso_height = head_height * config.torso_from_head;
    let body_height = head_height + torso_height;

    // Body top: a quarter head above the brow line covers forehead and hair
    let brow_y = lm.points.get(clipforge_models::face::LANDMARK_BROW)?.1;
    let top = brow_y - head_height * 0.25;

    let bbox = BoundingBox::new(center_x - shoulder_width / 2.0, top, shoulder_width, body_height);
    if !bbox.is_valid() {
        return None;
    }

    Some(BodyEstimate {
        bbox,
        center_x,
        center_y: top + body_height * config.body_center_height_frac,
    })
}

fn fallback_estimate(face_bbox: &BoundingBox) -> BodyEstimate {
    BodyEstimate {
        bbox: *face_bbox,
        center_x: face_bbox.cx(),
        center_y: face_bbox.cy(),
    }
}

/// Horizontal extent across all simultaneously visible subjects.
///
/// Returns `(min_x, max_x)` over the subject boxes, or `None` when empty.
pub fn group_extent(boxes: &[BoundingBox]) -> Option<(f64, f64)> {
    if boxes.is_empty() {
        return None;
    }
    let min_x = boxes.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
    let max_x = boxes.iter().map(|b| b.x2()).fold(f64::NEG_INFINITY, f64::max);
    Some((min_x, max_x))
}

//! Piecewise-linear crop path serialization.
//!
//! The compositor consumes one expression per axis as a time-varying crop
//! offset. Each expression holds the first value before the path begins,
//! interpolates linearly between consecutive keyframes, and holds the last
//! value afterward:
//!
//! ```text
//! lt(t,t0)*v0 + between(t,t0,t1)*(v0+slope*(t-t0)) + ... + gte(t,tN)*vN
//! ```
//!
//! The expression is handed over verbatim; it is never evaluated here.

use clipforge_models::{Axis, CropKeyframe};

/// Minimum slope denominator, guarding keyframes at identical timestamps.
const MIN_SEGMENT_SEC: f64 = 1e-4;

/// Serialize the keyframe path along one axis as a piecewise-linear
/// expression string.
///
/// An empty path yields `"0"`; a single keyframe yields its constant value.
pub fn build_piecewise_expr(keyframes: &[CropKeyframe], axis: Axis) -> String {
    match keyframes.len() {
        0 => return "0".to_string(),
        1 => return format!("{}", keyframes[0].axis_value(axis)),
        _ => {}
    }

    let mut terms: Vec<String> = Vec::with_capacity(keyframes.len() + 1);

    let first = &keyframes[0];
    terms.push(format!(
        "lt(t,{:.3})*{}",
        first.time_sec,
        first.axis_value(axis)
    ));

    for pair in keyframes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let v0 = a.axis_value(axis);
        let v1 = b.axis_value(axis);
        let dt = (b.time_sec - a.time_sec).max(MIN_SEGMENT_SEC);
        let slope = (v1 - v0) as f64 / dt;

        terms.push(format!(
            "between(t,{:.3},{:.3})*({}+{:.5}*(t-{:.3}))",
            a.time_sec, b.time_sec, v0, slope, a.time_sec
        ));
    }

    let last = &keyframes[keyframes.len() - 1];
    terms.push(format!(
        "gte(t,{:.3})*{}",
        last.time_sec,
        last.axis_value(axis)
    ));

    terms.join("+")
}

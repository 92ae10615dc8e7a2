//! Crop geometry and path planning.
//!
//! The planner owns the fixed 9:16 crop geometry for one render, converts
//! subject centers into constrained crop positions, and runs the smoothing
//! pipeline over the sampled path.

use super::config::FramingConfig;
use super::smoothing::{dedup_times, limit_and_ease, moving_average, odd_window};
use clipforge_models::{CropKeyframe, TimeRange};
use tracing::debug;

/// Plans one clip's crop path at fixed 9:16 geometry.
pub struct CropPlanner {
    config: FramingConfig,
    source_width: u32,
    source_height: u32,
    crop_width: i32,
    crop_height: i32,
}

impl CropPlanner {
    /// Create a planner; `None` on degenerate source dimensions.
    pub fn new(config: FramingConfig, source_width: u32, source_height: u32) -> Option<Self> {
        if source_width < 2 || source_height < 2 {
            return None;
        }

        let (crop_width, crop_height) = crop_geometry(source_width, source_height);
        if crop_width < 2 || crop_height < 2 {
            return None;
        }

        Some(Self {
            config,
            source_width,
            source_height,
            crop_width,
            crop_height,
        })
    }

    pub fn crop_width(&self) -> i32 {
        self.crop_width
    }

    pub fn crop_height(&self) -> i32 {
        self.crop_height
    }

    /// Horizontal crop position for a subject center.
    ///
    /// The subject keeps at least the configured margin from either vertical
    /// crop edge unless the source frame itself forces an edge pin.
    pub fn target_x(&self, cx: f64) -> f64 {
        let w = self.crop_width as f64;
        let margin = w * self.config.edge_margin_frac;

        let x = cx - w / 2.0;
        // Margin band around the centered position; a no-op for the plain
        // centered crop, binding when a biased center drifts the subject
        // toward an edge
        let x = x.max(cx + margin - w).min(cx - margin);
        x.clamp(0.0, self.source_width as f64 - w)
    }

    /// Vertical crop position for a subject center, honoring safe zones and
    /// the headroom bias.
    pub fn target_y(&self, cy: f64) -> f64 {
        let h = self.crop_height as f64;
        let source_h = self.source_height as f64;
        if h >= source_h {
            return 0.0;
        }

        let y = cy - h * (0.5 - self.config.headroom_bias_frac);

        // Keep the subject center out of the top/bottom UI chrome bands
        let top_limit = cy - h * self.config.top_safe_frac;
        let bottom_limit = cy - h + h * self.config.bottom_safe_frac;
        let y = y.min(top_limit).max(bottom_limit);

        y.clamp(0.0, source_h - h)
    }

    /// Sample the clip range, resolve subject centers through `observe`, and
    /// run the smoothing pipeline.
    ///
    /// `observe` returns the subject center at an absolute timestamp, or
    /// `None` when no subject resolves there; the planner holds the last
    /// known center across short gaps. Returns `None` when no sample ever
    /// resolves.
    pub fn plan(
        &self,
        clip: &TimeRange,
        mut observe: impl FnMut(f64) -> Option<(f64, f64)>,
    ) -> Option<Vec<CropKeyframe>> {
        if clip.duration_sec() <= 0.0 {
            return None;
        }

        let step = 1.0 / self.config.sample_fps.max(0.5);
        let mut times = Vec::new();
        let mut xs = Vec::new();
        let mut ys = Vec::new();

        let mut last_center: Option<(f64, f64)> = None;
        let mut t = clip.start_sec;
        while t <= clip.end_sec + 1e-9 {
            if let Some(center) = observe(t) {
                last_center = Some(center);
            }
            if let Some((cx, cy)) = last_center {
                times.push(t);
                xs.push(self.target_x(cx));
                ys.push(self.target_y(cy));
            }
            t += step;
        }

        if times.is_empty() {
            debug!("No subject resolved at any sample, yielding no crop path");
            return None;
        }

        let window = odd_window(self.config.smoothing_window);
        let xs = moving_average(&xs, window);
        let ys = moving_average(&ys, window);

        let xs = limit_and_ease(&times, &xs, clip, &self.config);
        let ys = limit_and_ease(&times, &ys, clip, &self.config);

        let keep = dedup_times(&times, self.config.min_keyframe_dt_sec);
        let max_x = (self.source_width as i32 - self.crop_width).max(0);
        let max_y = (self.source_height as i32 - self.crop_height).max(0);

        let keyframes: Vec<CropKeyframe> = keep
            .into_iter()
            .map(|i| {
                CropKeyframe::new(
                    times[i] - clip.start_sec,
                    (xs[i].round() as i32).clamp(0, max_x),
                    (ys[i].round() as i32).clamp(0, max_y),
                    self.crop_width,
                    self.crop_height,
                )
            })
            .collect();

        debug!(
            keyframes = keyframes.len(),
            crop_width = self.crop_width,
            crop_height = self.crop_height,
            "Crop path planned"
        );
        Some(keyframes)
    }
}

/// Fixed 9:16 crop geometry for a source frame: full height with
/// `floor(height * 9/16)` width when the source is wide enough, otherwise
/// full width with the height cut to 16:9-inverse. Dimensions are even.
fn crop_geometry(source_width: u32, source_height: u32) -> (i32, i32) {
    let ideal_width = make_even((source_height as f64 * 9.0 / 16.0).floor() as i32);

    if ideal_width <= source_width as i32 {
        (ideal_width, make_even(source_height as i32))
    } else {
        let width = make_even(source_width as i32);
        let height = make_even(
            ((source_width as f64 * 16.0 / 9.0).floor() as i32).min(source_height as i32),
        );
        (width, height)
    }
}

#[inline]
fn make_even(value: i32) -> i32 {
    (value / 2) * 2
}

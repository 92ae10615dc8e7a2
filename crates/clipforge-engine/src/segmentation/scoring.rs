//! Weighted scoring, adaptive duration selection, and rationale building.

use clipforge_models::{DurationTier, FeatureVector};

/// Fixed convex combination over the scored features. Weights sum to 1.
const WEIGHTS: &[(&str, f64)] = &[
    ("hook", 0.24),
    ("retention", 0.18),
    ("clarity", 0.12),
    ("coherence", 0.10),
    ("closure", 0.10),
    ("narrative_arc", 0.08),
    ("engagement", 0.08),
    ("novelty", 0.05),
    ("visual", 0.03),
    ("safety", 0.02),
];

fn feature_value(features: &FeatureVector, name: &str) -> f64 {
    match name {
        "hook" => features.hook,
        "retention" => features.retention,
        "clarity" => features.clarity,
        "coherence" => features.coherence,
        "closure" => features.closure,
        "narrative_arc" => features.narrative_arc,
        "engagement" => features.engagement,
        "novelty" => features.novelty,
        "visual" => features.visual,
        "safety" => features.safety,
        _ => 0.0,
    }
}

/// Reduce a feature vector to its weighted score in [0, 1].
pub fn score(features: &FeatureVector) -> f64 {
    WEIGHTS
        .iter()
        .map(|(name, weight)| weight * feature_value(features, name))
        .sum()
}

/// Human-readable label per scoring factor, used in rationales.
fn factor_label(name: &str) -> &'static str {
    match name {
        "hook" => "strong hook",
        "retention" => "high retention potential",
        "clarity" => "clear delivery",
        "coherence" => "coherent structure",
        "closure" => "satisfying ending",
        "narrative_arc" => "clear narrative arc",
        "engagement" => "audience engagement signal",
        "novelty" => "fresh vocabulary",
        "visual" => "good visual pacing",
        "safety" => "brand-safe language",
        _ => "strong content",
    }
}

/// Short human-readable summary of the top three weighted contributors.
pub fn build_rationale(features: &FeatureVector) -> String {
    let mut contributions: Vec<(&str, f64)> = WEIGHTS
        .iter()
        .map(|(name, weight)| (*name, weight * feature_value(features, name)))
        .collect();
    // Stable ordering: contribution descending, weight-table order for ties
    contributions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let top: Vec<&str> = contributions
        .iter()
        .take(3)
        .map(|(name, _)| factor_label(name))
        .collect();

    format!("Strong because: {}", top.join(", "))
}

/// The duration target chosen for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationPlan {
    pub tier: DurationTier,
    pub target_sec: f64,
}

/// Choose the adaptive duration tier and target for a candidate.
///
/// The default target is the candidate length rounded to 5s and clamped to
/// [24, 80]. Candidates that sustain quality earn the long tier, solid
/// mid-length material earns the mid tier, and weak coherence or closure
/// de-escalates to a tight short clip.
pub fn choose_duration(duration_sec: f64, features: &FeatureVector) -> DurationPlan {
    let mut target = ((duration_sec / 5.0).round() * 5.0).clamp(MIN_TARGET_SEC, LONG_CEILING_SEC);
    let tier;

    let sustain = (features.retention + features.closure + features.narrative_arc) / 3.0;

    if features.coherence < WEAK_COHERENCE || features.closure < WEAK_CLOSURE {
        tier = DurationTier::Short;
        target = target.min(SHORT_CEILING_SEC);
    } else if duration_sec >= LONG_MIN_DURATION_SEC
        && sustain > LONG_SUSTAIN_FLOOR
        && features.coherence > LONG_COHERENCE_FLOOR
        && features.semantic_density > LONG_DENSITY_FLOOR
    {
        tier = DurationTier::Long;
        target = target.max(LONG_FLOOR_SEC);
    } else if (duration_sec >= MID_MIN_DURATION_SEC
        && (features.retention > MID_RETENTION_FLOOR
            || features.narrative_arc > MID_ARC_FLOOR)
        && features.clarity > MID_CLARITY_FLOOR)
        || (features.engagement > MID_ENGAGEMENT_FLOOR
            && duration_sec > MID_ENGAGEMENT_MIN_DURATION_SEC)
    {
        tier = DurationTier::Mid;
        target = target.clamp(MID_FLOOR_SEC, MID_CEILING_SEC);
    } else {
        // No tier earned its escalation: follow the rounded duration but
        // never hold the long tier without the quality to sustain it
        target = target.min(MID_CEILING_SEC);
        tier = if target <= SHORT_CEILING_SEC {
            DurationTier::Short
        } else {
            DurationTier::Mid
        };
    }

    let floor = if features.clarity > STRONG_FEATURE_FLOOR
        && features.coherence > STRONG_FEATURE_FLOOR
    {
        STRONG_MIN_TARGET_SEC
    } else {
        WEAK_MIN_TARGET_SEC
    };
    target = target.max(floor);

    DurationPlan { tier, target_sec: target }
}

// Duration tier thresholds
const MIN_TARGET_SEC: f64 = 24.0;
const SHORT_CEILING_SEC: f64 = 32.0;
const MID_FLOOR_SEC: f64 = 45.0;
const MID_CEILING_SEC: f64 = 55.0;
const LONG_FLOOR_SEC: f64 = 65.0;
const LONG_CEILING_SEC: f64 = 80.0;
const LONG_MIN_DURATION_SEC: f64 = 65.0;
const MID_MIN_DURATION_SEC: f64 = 45.0;
const MID_ENGAGEMENT_MIN_DURATION_SEC: f64 = 40.0;
const WEAK_COHERENCE: f64 = 0.55;
const WEAK_CLOSURE: f64 = 0.5;
const LONG_SUSTAIN_FLOOR: f64 = 0.66;
const LONG_COHERENCE_FLOOR: f64 = 0.63;
const LONG_DENSITY_FLOOR: f64 = 0.55;
const MID_RETENTION_FLOOR: f64 = 0.62;
const MID_ARC_FLOOR: f64 = 0.6;
const MID_CLARITY_FLOOR: f64 = 0.55;
const MID_ENGAGEMENT_FLOOR: f64 = 0.7;
const STRONG_FEATURE_FLOOR: f64 = 0.6;
const STRONG_MIN_TARGET_SEC: f64 = 28.0;
const WEAK_MIN_TARGET_SEC: f64 = 20.0;

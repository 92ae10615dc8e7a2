//! End-to-end demo of both engines on synthetic input.
//!
//! Run with: cargo run --package clipforge-engine --example engine_demo

use clipforge_engine::framing::{build_piecewise_expr, compute_crop_map, FaceSignal};
use clipforge_engine::segmentation::detect_segments;
use clipforge_models::{
    Axis, BoundingBox, FaceDetection, SceneChange, TimeRange, TranscriptWord,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // === Segmentation ===
    let transcript = synthetic_transcript();
    let duration = transcript.last().map(|w| w.end_sec).unwrap_or(0.0) + 2.0;
    let scenes: Vec<SceneChange> = (1..8).map(|i| SceneChange::new(i as f64 * 11.0)).collect();

    let segments = detect_segments(&[transcript], &scenes, &[], duration, &[30.0]);

    println!("=== Detected segments ===");
    for (i, seg) in segments.iter().enumerate() {
        println!(
            "#{} [{:.1}s - {:.1}s] {:?} score={:.3}",
            i + 1,
            seg.start_sec,
            seg.end_sec,
            seg.duration_tier,
            seg.score
        );
        println!("    hook: {}", seg.hook_text);
        println!("    {}", seg.rationale);
    }

    // === Framing ===
    let clip = TimeRange::new(0.0, 8.0);
    let mut frames = Vec::new();
    let mut t = 0.0;
    while t <= 8.0 {
        // One face drifting slowly right
        let x = 500.0 + t * 40.0;
        frames.push(vec![FaceDetection::new(
            t,
            BoundingBox::new(x, 260.0, 120.0, 120.0),
            0.92,
        )]);
        t += 0.125;
    }

    match compute_crop_map(&clip, 1920, 1080, &FaceSignal::Frames(frames)) {
        Some(keyframes) => {
            println!("\n=== Crop path ({} keyframes) ===", keyframes.len());
            println!("x(t) = {}", build_piecewise_expr(&keyframes, Axis::X));
            println!("y(t) = {}", build_piecewise_expr(&keyframes, Axis::Y));
        }
        None => println!("\nNo face signal, caller would use a static center-crop"),
    }
}

/// A short scripted talk with phrase pauses around a strong middle passage.
fn synthetic_transcript() -> Vec<TranscriptWord> {
    let mut words = Vec::new();
    let mut t = 0.0;

    fn push(words: &mut Vec<TranscriptWord>, texts: &[&str], gap: f64, t: &mut f64) {
        *t += gap;
        for text in texts {
            words.push(TranscriptWord::new(*text, *t, *t + 0.55));
            *t += 0.55;
        }
    }

    push(&mut words, &["welcome"; 38], 0.0, &mut t);
    push(
        &mut words,
        &[
            "Why", "do", "9", "out", "of", "10", "side", "projects", "stall?", "We", "surveyed",
            "two", "hundred", "developers", "about", "abandoned", "repos.", "Scope", "creep",
            "killed", "more", "projects", "than", "burnout", "ever", "did.", "Shipping", "one",
            "small", "feature", "weekly", "kept", "motivation", "alive.", "It", "turns", "out",
            "momentum", "beats", "ambition,", "and", "that's", "why", "tiny", "releases",
            "win.",
        ],
        0.6,
        &mut t,
    );
    push(&mut words, &["closing"; 40], 0.6, &mut t);

    words
}

//! Property and scenario tests for the segmentation engine.

use clipforge_engine::segmentation::{detect_segments, SegmentDetector, SegmenterConfig};
use clipforge_models::{DurationTier, SceneChange, TranscriptWord};

/// Append `texts` as consecutive words of `word_dur` seconds starting at the
/// current stream end plus `gap`.
fn push_words(words: &mut Vec<TranscriptWord>, texts: &[&str], word_dur: f64, gap: f64) {
    let mut t = words.last().map(|w| w.end_sec).unwrap_or(0.0) + gap;
    for text in texts {
        words.push(TranscriptWord::new(*text, t, t + word_dur));
        t += word_dur;
    }
}

/// A strong 50-word paragraph: question hook with digits, clean sentences,
/// payoff ending.
fn strong_paragraph() -> Vec<&'static str> {
    vec![
        "What", "does", "a", "10x", "faster", "cache", "actually", "cost", "you?", "We",
        "measured", "every", "request", "path", "in", "production", "today.", "The", "hot",
        "path", "dropped", "from", "nine", "milliseconds", "down", "to", "two.", "Memory",
        "overhead", "stayed", "almost", "completely", "flat", "across", "the", "fleet.", "It",
        "turns", "out", "the", "cache", "pays", "for", "itself,", "and", "that's", "why", "the",
        "cache", "wins.",
    ]
}

/// Four lexically distinct strong paragraphs so the diversity filter keeps
/// more than one survivor.
fn paragraph_bank() -> Vec<Vec<&'static str>> {
    vec![
        strong_paragraph(),
        vec![
            "Why", "did", "3", "separate", "vendors", "ship", "broken", "firmware?", "Our",
            "teardown", "traced", "every", "board", "revision", "since", "January.", "One",
            "capacitor", "was", "rated", "for", "half", "the", "voltage", "it", "needed.",
            "Replacing", "it", "costs", "pennies", "at", "assembly", "time.", "It", "turns",
            "out", "certification", "never", "covered", "thermal", "stress,", "and", "that's",
            "why", "boards", "kept", "dying", "in", "summer", "heat.",
        ],
        vec![
            "How", "can", "2", "liters", "of", "sourdough", "starter", "survive", "neglect?",
            "Bakers", "tested", "refrigerated", "jars", "against", "counter", "storage",
            "regimes.", "Cold", "dormancy", "slowed", "fermentation", "without", "killing",
            "wild", "yeast", "cultures.", "Weekly", "feeding", "restored", "full", "rise",
            "strength", "overnight.", "It", "turns", "out", "starters", "forgive", "almost",
            "everything,", "and", "that's", "why", "grandma's", "jar", "outlived", "three",
            "generations", "of", "bakers.",
        ],
        vec![
            "Where", "do", "90", "percent", "of", "marathon", "injuries", "begin?", "Coaches",
            "logged", "training", "volume", "for", "four", "hundred", "athletes.", "Sudden",
            "mileage", "spikes", "predicted", "stress", "fractures", "within", "weeks.",
            "Gradual", "ten", "percent", "ramps", "kept", "runners", "healthy", "all",
            "season.", "It", "turns", "out", "patience", "beats", "intensity", "every",
            "time,", "and", "that's", "why", "veteran", "coaches", "preach", "slow",
            "steady", "building.",
        ],
    ]
}

/// A long synthetic talk: topics separated by in-band pauses.
fn synthetic_talk(topic_count: usize) -> (Vec<Vec<TranscriptWord>>, f64) {
    let bank = paragraph_bank();
    let mut words = Vec::new();
    for i in 0..topic_count {
        let paragraph = &bank[i % bank.len()];
        push_words(&mut words, paragraph, 0.56, if i == 0 { 0.0 } else { 0.5 });
    }
    let duration = words.last().map(|w: &TranscriptWord| w.end_sec).unwrap_or(0.0) + 5.0;
    (vec![words], duration)
}

fn scene_changes_every(duration: f64, step: f64) -> Vec<SceneChange> {
    let mut changes = Vec::new();
    let mut t = step;
    while t < duration {
        changes.push(SceneChange::new(t));
        t += step;
    }
    changes
}

#[test]
fn scenario_single_pause_pair_yields_one_exact_candidate() {
    // 40 context words, a pause, the 50-word strong paragraph, a pause,
    // 50 more context words
    let mut words = Vec::new();
    push_words(&mut words, &vec!["setup"; 40], 0.56, 0.0);
    push_words(&mut words, &strong_paragraph(), 0.56, 0.5);
    push_words(&mut words, &vec!["outro"; 50], 0.56, 0.5);

    let duration = words.last().unwrap().end_sec + 2.0;
    let scenes = scene_changes_every(duration, 11.0);
    let utterances = vec![words.clone()];

    let segments = detect_segments(&utterances, &scenes, &[], duration, &[]);

    assert_eq!(segments.len(), 1, "exactly one candidate expected");
    let seg = &segments[0];
    assert!((seg.start_sec - words[40].start_sec).abs() < 1e-9);
    assert!((seg.end_sec - words[89].end_sec).abs() < 1e-9);
    assert!((seg.duration_sec - 28.0).abs() < 0.1);
    assert_eq!(seg.duration_tier, DurationTier::Short);
    assert!(seg.score >= 0.52);
    assert!(seg.rationale.starts_with("Strong because: "));
}

#[test]
fn scenario_thin_opening_is_always_excluded() {
    // Candidate whose opening 3 seconds hold only 2 words
    let mut words = Vec::new();
    push_words(&mut words, &vec!["setup"; 40], 0.56, 0.0);

    // Two slow words, then the strong paragraph body
    let t0 = words.last().unwrap().end_sec + 0.5;
    words.push(TranscriptWord::new("Wellll...", t0, t0 + 1.9));
    words.push(TranscriptWord::new("so", t0 + 1.95, t0 + 3.4));
    let body: Vec<&str> = strong_paragraph().into_iter().skip(2).collect();
    push_words(&mut words, &body, 0.56, 0.1);
    push_words(&mut words, &vec!["outro"; 50], 0.56, 0.5);

    let duration = words.last().unwrap().end_sec + 2.0;
    let scenes = scene_changes_every(duration, 11.0);
    let segments = detect_segments(&[words], &scenes, &[], duration, &[]);

    assert!(
        segments.iter().all(|s| (s.start_sec - t0).abs() > 1e-6),
        "a candidate opening with fewer than 3 words in 3s must be gated out"
    );
}

#[test]
fn property_no_overlap_and_bounds() {
    let (utterances, duration) = synthetic_talk(12);
    let scenes = scene_changes_every(duration, 13.0);

    let segments = detect_segments(&utterances, &scenes, &[], duration, &[]);
    assert!(!segments.is_empty());
    assert!(segments.len() <= 12);

    for seg in &segments {
        assert!(
            seg.duration_sec >= 18.0 && seg.duration_sec <= 82.0,
            "duration out of bounds: {}",
            seg.duration_sec
        );
        assert!(seg.end_sec > seg.start_sec);
    }

    for pair in segments.windows(2) {
        // Chronological and disjoint
        assert!(pair[0].start_sec <= pair[1].start_sec);
        assert!(
            pair[0].end_sec <= pair[1].start_sec,
            "segments overlap: [{}, {}] vs [{}, {}]",
            pair[0].start_sec,
            pair[0].end_sec,
            pair[1].start_sec,
            pair[1].end_sec
        );
    }
}

#[test]
fn property_determinism() {
    let (utterances, duration) = synthetic_talk(8);
    let scenes = scene_changes_every(duration, 13.0);
    let hotspots = vec![30.0, 120.0];

    let a = detect_segments(&utterances, &scenes, &[], duration, &hotspots);
    let b = detect_segments(&utterances, &scenes, &[], duration, &hotspots);

    let ja = serde_json::to_string(&a).expect("serialize");
    let jb = serde_json::to_string(&b).expect("serialize");
    assert_eq!(ja, jb, "byte-identical inputs must yield byte-identical output");
}

#[test]
fn property_engagement_hotspot_lifts_scores() {
    let (utterances, duration) = synthetic_talk(4);
    let scenes = scene_changes_every(duration, 13.0);

    let without = detect_segments(&utterances, &scenes, &[], duration, &[]);
    // Hotspot near the start of the first topic
    let with = detect_segments(&utterances, &scenes, &[], duration, &[25.0]);

    let max_without = without.iter().map(|s| s.score).fold(0.0, f64::max);
    let max_with = with.iter().map(|s| s.score).fold(0.0, f64::max);
    assert!(max_with >= max_without);
}

#[test]
fn property_empty_inputs_degrade_to_empty_output() {
    assert!(detect_segments(&[], &[], &[], 0.0, &[]).is_empty());
    assert!(detect_segments(&[Vec::new()], &[], &[], 600.0, &[]).is_empty());
}

#[test]
fn custom_config_cap_is_honored() {
    let (utterances, duration) = synthetic_talk(12);
    let scenes = scene_changes_every(duration, 13.0);

    let config = SegmenterConfig {
        max_results: 2,
        ..SegmenterConfig::default()
    };
    let detector = SegmentDetector::new(config);
    let segments = detector.detect(&utterances, &scenes, &[], duration, &[]);
    assert!(segments.len() <= 2);
}

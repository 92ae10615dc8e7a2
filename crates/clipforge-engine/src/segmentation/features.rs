//! Feature extraction for candidate spans.
//!
//! Every feature is computed from the candidate's own word slice plus the
//! read-only scene/engagement inputs. All ratios are guarded with minimum
//! denominators so a degenerate span yields a neutral vector instead of
//! NaN propagation.

use super::config::SegmenterConfig;
use super::patterns::LexiconTables;
use clipforge_models::{FeatureVector, SceneChange, TranscriptWord};

/// Minimum span length used as a denominator guard (seconds).
const MIN_SPAN_SEC: f64 = 0.5;

/// Read-only signals shared by all candidates of one detection run.
#[derive(Clone, Copy)]
pub struct FeatureContext<'a> {
    pub scene_changes: &'a [SceneChange],
    pub hotspots: &'a [f64],
    pub lexicon: &'static LexiconTables,
}

/// Join raw word texts with single spaces.
pub fn join_text(words: &[TranscriptWord]) -> String {
    words
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the opening hook window.
pub fn hook_text(words: &[TranscriptWord], config: &SegmenterConfig) -> String {
    if words.is_empty() {
        return String::new();
    }
    let cutoff = words[0].start_sec + config.hook_window_sec;
    let hook: Vec<&str> = words
        .iter()
        .take_while(|w| w.start_sec < cutoff)
        .map(|w| w.word.as_str())
        .collect();
    hook.join(" ")
}

/// Number of words starting inside the opening hook window.
pub fn hook_word_count(words: &[TranscriptWord], config: &SegmenterConfig) -> usize {
    if words.is_empty() {
        return 0;
    }
    let cutoff = words[0].start_sec + config.hook_window_sec;
    words.iter().take_while(|w| w.start_sec < cutoff).count()
}

/// Extract the full feature vector for one candidate span.
pub fn extract_features(
    words: &[TranscriptWord],
    ctx: &FeatureContext<'_>,
    config: &SegmenterConfig,
) -> FeatureVector {
    if words.is_empty() {
        return FeatureVector::neutral();
    }

    let start_sec = words[0].start_sec;
    let end_sec = words[words.len() - 1].end_sec;
    let duration = (end_sec - start_sec).max(MIN_SPAN_SEC);

    let normalized: Vec<String> = words.iter().map(|w| w.normalized()).collect();

    // Lexical counts
    let filler_count = ctx.lexicon.count_fillers(&normalized);
    let filler_ratio = filler_count as f64 / words.len() as f64;

    let content_words: Vec<&String> = normalized
        .iter()
        .filter(|w| !w.is_empty() && !ctx.lexicon.stop_words.contains(w.as_str()))
        .collect();
    let content_ratio = content_words.len() as f64 / words.len() as f64;

    let clarity = (1.0 - filler_ratio * 4.0).clamp(0.0, 1.0);

    FeatureVector {
        hook: hook_strength(&hook_text(words, config), ctx.lexicon),
        retention: early_dynamics(words, start_sec, config.dynamics_window_sec),
        clarity,
        coherence: coherence(words, content_ratio, filler_ratio, clarity, config),
        closure: closure(words, &normalized, end_sec, ctx.lexicon, config),
        narrative_arc: narrative_arc(words, ctx.lexicon),
        semantic_density: (content_ratio / 0.75).clamp(0.0, 1.0),
        visual: visual_pacing(ctx.scene_changes, start_sec, end_sec),
        novelty: lexical_novelty(&content_words),
        engagement: engagement(ctx.hotspots, start_sec, config),
        safety: safety(&normalized, ctx.lexicon),
        speech_rate: words.len() as f64 / duration,
        pause_density: pause_density(words, duration),
        word_count: words.len(),
    }
}

/// Score 1.0 inside `[lo, hi]`, falling off linearly to 0 over `falloff`.
fn band_score(value: f64, lo: f64, hi: f64, falloff: f64) -> f64 {
    if value >= lo && value <= hi {
        1.0
    } else if value < lo {
        (1.0 - (lo - value) / falloff).max(0.0)
    } else {
        (1.0 - (value - hi) / falloff).max(0.0)
    }
}

/// Opening-seconds hook strength from regex-classified patterns.
fn hook_strength(hook_text: &str, lexicon: &LexiconTables) -> f64 {
    let trimmed = hook_text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let mut score: f64 = 0.2;
    if lexicon.question_openers.is_match(trimmed) {
        score += 0.35;
    }
    if lexicon.claim_openers.is_match(trimmed) {
        score += 0.25;
    }
    if lexicon.comparatives.is_match(trimmed) {
        score += 0.1;
    }
    if lexicon.digits.is_match(trimmed) {
        score += 0.15;
    }
    if trimmed.contains('?') {
        score += 0.05;
    }
    if trimmed.contains('!') {
        score += 0.05;
    }
    score.min(1.0)
}

/// Speech dynamics over the opening seconds: rate, pauses, energetic words.
/// Hooks live in the opening beats, so only the early window counts.
fn early_dynamics(words: &[TranscriptWord], start_sec: f64, window_sec: f64) -> f64 {
    let cutoff = start_sec + window_sec;
    let early: Vec<&TranscriptWord> =
        words.iter().take_while(|w| w.start_sec < cutoff).collect();
    if early.is_empty() {
        return 0.0;
    }

    let span = (early.last().map(|w| w.end_sec).unwrap_or(start_sec) - start_sec).max(MIN_SPAN_SEC);
    let rate_score = band_score(early.len() as f64 / span, 2.0, 4.0, 1.5);

    let mut pause_total = 0.0;
    for pair in early.windows(2) {
        pause_total += (pair[1].start_sec - pair[0].end_sec).max(0.0);
    }
    let pause_ratio = (pause_total / span).min(1.0);

    let energetic = early.iter().filter(|w| is_energetic(&w.word)).count();
    let energy = (energetic as f64 / early.len() as f64 * 3.0).min(1.0);

    0.5 * rate_score + 0.25 * (1.0 - pause_ratio) + 0.25 * energy
}

/// Capitalized runs, exclamations/questions, or long words.
fn is_energetic(raw: &str) -> bool {
    let alpha: Vec<char> = raw.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.len() >= 2 && alpha.iter().all(|c| c.is_uppercase()) {
        return true;
    }
    raw.contains('!') || raw.contains('?') || alpha.len() >= 7
}

/// Sentence shape and content density.
fn coherence(
    words: &[TranscriptWord],
    content_ratio: f64,
    filler_ratio: f64,
    clarity: f64,
    config: &SegmenterConfig,
) -> f64 {
    let sentence_count = sentence_count(words, config).max(1);
    let avg_words_per_sentence = words.len() as f64 / sentence_count as f64;
    let sentence_score = band_score(avg_words_per_sentence, 8.0, 28.0, 10.0);
    let content_score = (content_ratio / 0.6).clamp(0.0, 1.0);
    let filler_score = 1.0 - (filler_ratio * 4.0).min(1.0);

    0.35 * sentence_score + 0.35 * content_score + 0.15 * filler_score + 0.15 * clarity
}

/// Sentences end at terminal punctuation or at a long pause. Auto-captions
/// often carry no punctuation at all, so the pause fallback keeps the
/// sentence measure meaningful.
fn sentence_count(words: &[TranscriptWord], config: &SegmenterConfig) -> usize {
    let mut count = 0;
    for (i, w) in words.iter().enumerate() {
        if ends_sentence(&w.word) {
            count += 1;
            continue;
        }
        if let Some(next) = words.get(i + 1) {
            if next.start_sec - w.end_sec >= config.refine_pause_sec {
                count += 1;
            }
        }
    }
    count.max(1)
}

fn ends_sentence(raw: &str) -> bool {
    let trimmed = raw.trim_end();
    trimmed.ends_with('.') || trimmed.ends_with('!') || trimmed.ends_with('?') || trimmed.ends_with('…')
}

/// Whether the final seconds land the thought.
fn closure(
    words: &[TranscriptWord],
    normalized: &[String],
    end_sec: f64,
    lexicon: &LexiconTables,
    config: &SegmenterConfig,
) -> f64 {
    let tail_start = end_sec - config.closure_window_sec;
    let tail: Vec<&TranscriptWord> = words.iter().filter(|w| w.end_sec > tail_start).collect();
    if tail.is_empty() {
        return 0.3;
    }

    let tail_lowered = tail
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut score: f64 = 0.3;
    if ends_sentence(&words[words.len() - 1].word) {
        score += 0.4;
    }
    if lexicon.has_closing(&tail_lowered) || lexicon.has_payoff(&tail_lowered) {
        score += 0.3;
    }
    if let Some(last) = normalized.last() {
        if lexicon.is_filler_word(last) {
            score -= 0.3;
        }
    }
    score.clamp(0.0, 1.0)
}

/// Question early, resolution later.
fn narrative_arc(words: &[TranscriptWord], lexicon: &LexiconTables) -> f64 {
    if words.len() < 3 {
        return 0.25;
    }
    let third = (words.len() / 3).max(1);
    let early_text = join_text(&words[..third]);
    let late_text = join_text(&words[third..]).to_lowercase();

    let early_question =
        early_text.contains('?') || lexicon.question_openers.is_match(early_text.trim());
    let late_payoff = lexicon.has_payoff(&late_text);

    match (early_question, late_payoff) {
        (true, true) => 0.8,
        (true, false) => 0.45,
        (false, true) => 0.4,
        (false, false) => 0.25,
    }
}

/// Scene-cut pacing: a handful of cuts keeps a clip lively, none reads
/// static, too many reads chaotic.
fn visual_pacing(scene_changes: &[SceneChange], start_sec: f64, end_sec: f64) -> f64 {
    let cuts = scene_changes
        .iter()
        .filter(|s| s.time_sec > start_sec && s.time_sec < end_sec)
        .count();

    match cuts {
        0 => 0.25,
        1..=6 => 0.9,
        n => (0.9 - 0.1 * (n - 6) as f64).max(0.2),
    }
}

/// Audience-mined hotspot proximity.
fn engagement(hotspots: &[f64], start_sec: f64, config: &SegmenterConfig) -> f64 {
    let near = hotspots
        .iter()
        .any(|h| (h - start_sec).abs() <= config.hotspot_radius_sec);
    if near {
        0.85
    } else {
        0.3
    }
}

/// Inverse profanity signal.
fn safety(normalized: &[String], lexicon: &LexiconTables) -> f64 {
    let hits = lexicon.count_profanity(normalized);
    (1.0 - 0.35 * hits as f64).max(0.0)
}

/// Content-word type/token ratio.
fn lexical_novelty(content_words: &[&String]) -> f64 {
    if content_words.is_empty() {
        return 0.0;
    }
    let distinct: std::collections::HashSet<&str> =
        content_words.iter().map(|w| w.as_str()).collect();
    (distinct.len() as f64 / content_words.len() as f64).clamp(0.0, 1.0)
}

/// Fraction of span time spent in inter-word gaps.
fn pause_density(words: &[TranscriptWord], duration: f64) -> f64 {
    let mut total = 0.0;
    for pair in words.windows(2) {
        total += (pair[1].start_sec - pair[0].end_sec).max(0.0);
    }
    (total / duration).min(1.0)
}

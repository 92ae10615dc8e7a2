//! Boundary refinement: trim a candidate toward its duration target at a
//! linguistically sensible cut point instead of a hard time cutoff.

use super::boundaries::CandidateSpan;
use super::config::SegmenterConfig;
use clipforge_models::TranscriptWord;

/// Trim `span` toward `target_sec`, snapping the cut to the first of:
/// sentence-terminal punctuation, an em-dash, or a long pause, scanned
/// forward from the target point up to the configured search window. Falls
/// back to the nearest word index at/after the target when no clean cut
/// exists. Never trims below the minimum refined span while more content
/// exists.
pub fn refine_span(
    words: &[TranscriptWord],
    span: CandidateSpan,
    target_sec: f64,
    config: &SegmenterConfig,
) -> CandidateSpan {
    let start_sec = span.start_sec(words);
    let target_time = start_sec + target_sec;

    if span.end_sec(words) <= target_time {
        // Already at or under target
        return span;
    }

    // First word whose end reaches the target point
    let mut cut_after = span.start_idx;
    for i in span.start_idx..span.end_idx {
        if words[i].end_sec >= target_time {
            cut_after = i;
            break;
        }
        cut_after = i;
    }

    let search_limit = target_time + config.refine_search_sec;
    let mut chosen: Option<usize> = None;

    for i in cut_after..span.end_idx {
        if words[i].end_sec > search_limit {
            break;
        }
        if is_clean_cut(words, i, span.end_idx, config) {
            chosen = Some(i);
            break;
        }
    }

    let mut end_idx = match chosen {
        Some(i) => i + 1,
        None => cut_after + 1,
    };

    // Keep at least the minimum span when more content exists
    while end_idx < span.end_idx
        && words[end_idx - 1].end_sec - start_sec < config.min_refined_span_sec
    {
        end_idx += 1;
    }

    CandidateSpan {
        start_idx: span.start_idx,
        end_idx: end_idx.min(span.end_idx),
    }
}

/// A cut after word `i` is clean when the word carries sentence-terminal
/// punctuation or an em-dash, or the following gap is a long pause.
fn is_clean_cut(
    words: &[TranscriptWord],
    i: usize,
    end_idx: usize,
    config: &SegmenterConfig,
) -> bool {
    let trimmed = words[i].word.trim_end();
    if trimmed.ends_with('.')
        || trimmed.ends_with('!')
        || trimmed.ends_with('?')
        || trimmed.ends_with('…')
        || trimmed.ends_with('—')
    {
        return true;
    }

    if i + 1 < end_idx {
        let gap = words[i + 1].start_sec - words[i].end_sec;
        if gap >= config.refine_pause_sec {
            return true;
        }
    }

    false
}

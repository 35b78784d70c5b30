use std::collections::HashSet;
use std::sync::Arc;

use crate::types::{Segment, Word};

/// Fixed-step windows of at most `max_secs`, each trimmed back to its last
/// sentence end when the trimmed span still reaches `min_secs`.
///
/// Windows are contiguous runs: collection stops at the first word that does
/// not fit, so jittered timestamps never produce gaps. Identical word ranges
/// reached from different window starts are emitted once.
///
/// Stretches of time with no word starting in them are skipped in whole
/// steps: every iteration consumes at least one word, so the loop is bounded
/// by the word count however far apart the timestamps are.
pub fn sliding_window_candidates(
    words: &[Word],
    min_secs: f64,
    max_secs: f64,
    step_secs: f64,
) -> Vec<Segment> {
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return Vec::new();
    };
    let step_ok = step_secs.is_finite() && step_secs > 0.0;
    if !step_ok || !first.start.is_finite() || !last.end.is_finite() {
        return Vec::new();
    }

    let stream_end = last.end;
    let source: Arc<[Word]> = Arc::from(words);
    let mut candidates = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut cursor = 0usize;
    let mut window_start = first.start;

    while window_start + min_secs <= stream_end {
        while cursor < words.len() && words[cursor].start < window_start {
            cursor += 1;
        }
        if cursor == words.len() {
            break;
        }
        let idle_steps = ((words[cursor].start - window_start) / step_secs).floor();
        if idle_steps >= 1.0 {
            window_start = (window_start + idle_steps * step_secs).min(words[cursor].start);
        }

        let window_end = window_start + max_secs;
        let mut stop = cursor;
        while stop < words.len()
            && words[stop].start >= window_start
            && words[stop].end <= window_end
        {
            stop += 1;
        }

        let window = &words[cursor..stop];
        if !window.is_empty() && span_secs(window) >= min_secs {
            let kept = snap_to_sentence_end(window, min_secs);
            let duration = span_secs(kept);
            if duration >= min_secs
                && duration <= max_secs
                && seen.insert((cursor, cursor + kept.len()))
            {
                candidates.push(Segment::new(
                    Arc::clone(&source),
                    cursor..cursor + kept.len(),
                ));
            }
        }

        let next_start = window_start + step_secs;
        if next_start <= window_start {
            break;
        }
        window_start = next_start;
    }

    candidates
}

/// Trim to the last sentence-ending word, unless that would drop the span
/// below `min_secs`, in which case the raw window is kept.
fn snap_to_sentence_end(window: &[Word], min_secs: f64) -> &[Word] {
    match window.iter().rposition(Word::ends_sentence) {
        Some(idx) if span_secs(&window[..=idx]) >= min_secs => &window[..=idx],
        _ => window,
    }
}

fn span_secs(words: &[Word]) -> f64 {
    match (words.first(), words.last()) {
        (Some(first), Some(last)) => last.end - first.start,
        _ => 0.0,
    }
}

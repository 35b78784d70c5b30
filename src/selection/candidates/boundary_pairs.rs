use std::sync::Arc;

use crate::types::{Segment, Word};

/// Enumerate every `(b_i, b_j)` boundary pair whose span lies within
/// `[min_secs, max_secs]`.
///
/// For a fixed start the end boundary stops advancing once the span exceeds
/// `max_secs`. That early exit assumes end times grow with the index; with
/// jittered timestamps a later, shorter span can be missed, so this is a
/// best-effort search rather than an exhaustive one.
pub fn boundary_pair_candidates(
    words: &[Word],
    boundaries: &[usize],
    min_secs: f64,
    max_secs: f64,
) -> Vec<Segment> {
    let mut candidates = Vec::new();
    if words.is_empty() {
        return candidates;
    }
    let source: Arc<[Word]> = Arc::from(words);
    for (i, &start_idx) in boundaries.iter().enumerate() {
        if start_idx >= words.len() {
            break;
        }
        let start_t = words[start_idx].start;
        for &end_idx in &boundaries[i + 1..] {
            if end_idx > words.len() {
                break;
            }
            if end_idx <= start_idx {
                continue;
            }
            let duration = words[end_idx - 1].end - start_t;
            if !duration.is_finite() || duration < min_secs {
                continue;
            }
            if duration > max_secs {
                break;
            }
            candidates.push(Segment::new(Arc::clone(&source), start_idx..end_idx));
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::boundaries::find_boundaries;

    /// One word per second, sentence end every `sentence_len` words.
    fn paced_words(count: usize, sentence_len: usize) -> Vec<Word> {
        (0..count)
            .map(|i| {
                let text = if (i + 1) % sentence_len == 0 {
                    "end.".to_string()
                } else {
                    "word".to_string()
                };
                Word::new(text, i as f64, i as f64 + 0.8)
            })
            .collect()
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let boundaries = find_boundaries(&[]);
        assert!(boundary_pair_candidates(&[], &boundaries, 15.0, 60.0).is_empty());
    }

    #[test]
    fn all_candidates_respect_duration_window() {
        let words = paced_words(120, 7);
        let boundaries = find_boundaries(&words);
        let candidates = boundary_pair_candidates(&words, &boundaries, 15.0, 30.0);
        assert!(!candidates.is_empty());
        for seg in &candidates {
            let d = seg.duration();
            assert!((15.0..=30.0).contains(&d), "duration {d} out of range");
            assert!(boundaries.contains(&seg.first_index));
            assert!(boundaries.contains(&seg.end_index()));
            assert_eq!(seg.words(), &words[seg.first_index..seg.end_index()]);
        }
    }

    #[test]
    fn unpunctuated_long_utterance_yields_nothing() {
        let words: Vec<Word> = (0..100)
            .map(|i| Word::new("word", i as f64, i as f64 + 0.8))
            .collect();
        let boundaries = find_boundaries(&words);
        assert!(boundary_pair_candidates(&words, &boundaries, 15.0, 60.0).is_empty());
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        // Spans: [0, 10) -> 9.8s
        let words = paced_words(10, 10);
        let boundaries = find_boundaries(&words);
        let exact = 9.0 + 0.8;
        let found = boundary_pair_candidates(&words, &boundaries, exact, exact);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].words().len(), 10);
    }

    #[test]
    fn tolerates_out_of_range_boundaries() {
        let words = paced_words(20, 5);
        let found = boundary_pair_candidates(&words, &[0, 5, 40], 0.0, 100.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_index, 0);
        assert_eq!(found[0].end_index(), 5);
    }
}

use std::cmp::Ordering;

use crate::types::Segment;

/// Greedily keep the best-scoring segments that stay at least `min_gap_secs`
/// apart, then return them in timeline order labelled `clip_01`, `clip_02`, ...
///
/// Ties on score go to the earlier start, then the shorter span, so equal
/// scores (including the all-zero case) resolve chronologically.
pub fn select_non_overlapping(
    mut candidates: Vec<Segment>,
    count: usize,
    min_gap_secs: f64,
) -> Vec<Segment> {
    if count == 0 || candidates.is_empty() {
        return Vec::new();
    }
    let min_gap_secs = if min_gap_secs.is_finite() {
        min_gap_secs.max(0.0)
    } else {
        0.0
    };

    candidates.sort_by(rank_order);

    let mut selected: Vec<Segment> = Vec::with_capacity(count.min(candidates.len()));
    for candidate in candidates {
        if selected.len() >= count {
            break;
        }
        if selected
            .iter()
            .all(|kept| is_separated(&candidate, kept, min_gap_secs))
        {
            selected.push(candidate);
        }
    }

    selected.sort_by(chronological_order);
    for (idx, segment) in selected.iter_mut().enumerate() {
        segment.label = clip_label(idx);
    }
    selected
}

pub fn clip_label(chronological_idx: usize) -> String {
    format!("clip_{:02}", chronological_idx + 1)
}

fn rank_order(a: &Segment, b: &Segment) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| chronological_order(a, b))
}

fn chronological_order(a: &Segment, b: &Segment) -> Ordering {
    a.start()
        .total_cmp(&b.start())
        .then_with(|| a.end().total_cmp(&b.end()))
        .then_with(|| a.first_index.cmp(&b.first_index))
}

/// Touching is allowed when no gap is required.
fn is_separated(a: &Segment, b: &Segment, min_gap_secs: f64) -> bool {
    a.end() + min_gap_secs <= b.start() || b.end() + min_gap_secs <= a.start()
}

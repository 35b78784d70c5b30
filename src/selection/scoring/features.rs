//! Per-feature fitness values, each in [0, 1].

use std::collections::HashSet;

use super::DurationBand;
use crate::types::Segment;

const NATURAL_RATE_WPS: (f64, f64) = (2.0, 3.5);
const TOLERABLE_RATE_WPS: (f64, f64) = (1.5, 4.0);
const AUDIBLE_RATE_WPS: f64 = 0.5;
const TOLERABLE_RATE_CREDIT: f64 = 0.6;
const AUDIBLE_RATE_CREDIT: f64 = 0.25;

const MAX_COUNTED_QUESTIONS: usize = 2;
const MAX_COUNTED_EXCLAMATIONS: usize = 2;

const ALLOWED_DURATION_CREDIT: f64 = 0.67;
const OUT_OF_RANGE_DURATION_CREDIT: f64 = 0.2;

/// (max gap below, credit) tiers, checked in order.
const PAUSE_TIERS: [(f64, f64); 3] = [(1.0, 1.0), (2.0, 0.67), (3.0, 0.33)];
const SLOW_MEAN_GAP_SECS: f64 = 0.8;
const SLOW_MEAN_GAP_PENALTY: f64 = 0.2;

pub(super) fn boundary_completeness(segment: &Segment) -> f64 {
    let starts_capitalized = segment
        .words()
        .first()
        .and_then(|w| w.text.trim_start().chars().next())
        .is_some_and(char::is_uppercase);
    let ends_sentence = segment.words().last().is_some_and(|w| w.ends_sentence());

    let mut value = 0.0;
    if starts_capitalized {
        value += 0.5;
    }
    if ends_sentence {
        value += 0.5;
    }
    value
}

pub(super) fn words_per_second(segment: &Segment) -> Option<f64> {
    let duration = segment.duration();
    if !duration.is_finite() || duration <= 0.0 {
        return None;
    }
    Some(segment.words().len() as f64 / duration)
}

pub(super) fn speech_rate(segment: &Segment) -> f64 {
    let Some(wps) = words_per_second(segment) else {
        return 0.0;
    };
    if (NATURAL_RATE_WPS.0..=NATURAL_RATE_WPS.1).contains(&wps) {
        1.0
    } else if (TOLERABLE_RATE_WPS.0..=TOLERABLE_RATE_WPS.1).contains(&wps) {
        TOLERABLE_RATE_CREDIT
    } else if wps > AUDIBLE_RATE_WPS {
        AUDIBLE_RATE_CREDIT
    } else {
        0.0
    }
}

pub(super) fn questions(text: &str) -> f64 {
    capped_ratio(text.matches('?').count(), MAX_COUNTED_QUESTIONS)
}

pub(super) fn exclamations(text: &str) -> f64 {
    capped_ratio(text.matches('!').count(), MAX_COUNTED_EXCLAMATIONS)
}

fn capped_ratio(count: usize, cap: usize) -> f64 {
    count.min(cap) as f64 / cap as f64
}

pub(super) fn lexical_diversity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = tokens.iter().copied().collect();
    unique.len() as f64 / tokens.len() as f64
}

pub(super) fn duration_fitness(duration: f64, band: &DurationBand) -> f64 {
    if !duration.is_finite() {
        return OUT_OF_RANGE_DURATION_CREDIT;
    }
    if (band.preferred_min_secs..=band.preferred_max_secs).contains(&duration)
        && (band.min_secs..=band.max_secs).contains(&duration)
    {
        1.0
    } else if (band.min_secs..=band.max_secs).contains(&duration) {
        ALLOWED_DURATION_CREDIT
    } else {
        OUT_OF_RANGE_DURATION_CREDIT
    }
}

/// Silence between consecutive words; overlapping words count as no gap.
pub(super) fn gaps(segment: &Segment) -> impl Iterator<Item = f64> + '_ {
    segment
        .words()
        .windows(2)
        .map(|pair| (pair[1].start - pair[0].end).max(0.0))
}

pub(super) fn max_gap(segment: &Segment) -> f64 {
    gaps(segment).fold(0.0, f64::max)
}

pub(super) fn pause_fitness(segment: &Segment) -> f64 {
    let gap_count = segment.words().len().saturating_sub(1);
    if gap_count == 0 {
        return 1.0;
    }
    let max = max_gap(segment);
    let mean = gaps(segment).sum::<f64>() / gap_count as f64;

    let mut value = PAUSE_TIERS
        .iter()
        .find(|(below, _)| max < *below)
        .map(|(_, credit)| *credit)
        .unwrap_or(0.0);
    if mean > SLOW_MEAN_GAP_SECS {
        value -= SLOW_MEAN_GAP_PENALTY;
    }
    value.clamp(0.0, 1.0)
}

/// Fraction of non-empty keywords found as case-insensitive substrings.
pub(super) fn keyword_coverage(text: &str, keywords: &[String]) -> f64 {
    let lowered = text.to_lowercase();
    let mut total = 0usize;
    let mut hits = 0usize;
    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        total += 1;
        if lowered.contains(&keyword.to_lowercase()) {
            hits += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    (hits as f64 / total as f64).min(1.0)
}

use crate::config::{Feature, SelectionWeights, SelectorConfig};
use crate::types::Segment;

mod features;

/// A single pause this long caps how well a clip can score, regardless of
/// every other feature.
pub const LONG_PAUSE_SECS: f64 = 3.0;
const LONG_PAUSE_FACTOR: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationBand {
    pub min_secs: f64,
    pub max_secs: f64,
    pub preferred_min_secs: f64,
    pub preferred_max_secs: f64,
}

impl DurationBand {
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            min_secs: config.min_duration_secs,
            max_secs: config.max_duration_secs,
            preferred_min_secs: config.preferred_min_secs,
            preferred_max_secs: config.preferred_max_secs,
        }
    }
}

impl Default for DurationBand {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::default())
    }
}

/// Feature values in [0, 1] and the combined score, also in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub boundary: f64,
    pub speech_rate: f64,
    pub questions: f64,
    pub exclamations: f64,
    pub lexical_diversity: f64,
    pub duration: f64,
    pub pauses: f64,
    pub keywords: f64,
    pub max_gap_secs: f64,
    pub long_pause: bool,
    pub total_score: f64,
}

impl ScoreBreakdown {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Boundary => self.boundary,
            Feature::SpeechRate => self.speech_rate,
            Feature::Questions => self.questions,
            Feature::Exclamations => self.exclamations,
            Feature::LexicalDiversity => self.lexical_diversity,
            Feature::Duration => self.duration,
            Feature::Pauses => self.pauses,
            Feature::Keywords => self.keywords,
        }
    }
}

pub fn score_segment(
    segment: &Segment,
    keywords: &[String],
    weights: &SelectionWeights,
    band: &DurationBand,
) -> ScoreBreakdown {
    let text = segment.text();
    let max_gap_secs = features::max_gap(segment);
    let long_pause = max_gap_secs >= LONG_PAUSE_SECS;

    let mut breakdown = ScoreBreakdown {
        boundary: features::boundary_completeness(segment),
        speech_rate: features::speech_rate(segment),
        questions: features::questions(&text),
        exclamations: features::exclamations(&text),
        lexical_diversity: features::lexical_diversity(&text),
        duration: features::duration_fitness(segment.duration(), band),
        pauses: features::pause_fitness(segment),
        keywords: features::keyword_coverage(&text, keywords),
        max_gap_secs,
        long_pause,
        total_score: 0.0,
    };
    breakdown.total_score = combine(&breakdown, weights);
    breakdown
}

/// Weighted mean of the feature values, damped by a long pause.
///
/// Weights are divided by the largest one first, so their sum stays finite
/// for any finite weights and only their ratios matter.
fn combine(breakdown: &ScoreBreakdown, weights: &SelectionWeights) -> f64 {
    let largest = Feature::ALL
        .iter()
        .map(|&f| weights.get(f))
        .fold(0.0, f64::max);
    if !largest.is_finite() || largest <= 0.0 {
        return 0.0;
    }
    let (weighted_sum, weight_total) = Feature::ALL.iter().fold((0.0, 0.0), |(sum, total), &f| {
        let w = weights.get(f) / largest;
        (sum + w * breakdown.value(f), total + w)
    });
    let weighted = weighted_sum / weight_total;
    let damped = if breakdown.long_pause {
        weighted * LONG_PAUSE_FACTOR
    } else {
        weighted
    };
    if damped.is_finite() {
        damped.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

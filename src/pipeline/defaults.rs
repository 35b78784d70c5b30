use crate::config::{SelectionWeights, SelectorConfig, WindowStrategy};
use crate::pipeline::traits::{BoundaryDetector, CandidateGenerator, ClipScorer, SegmentSelector};
use crate::selection::boundaries::find_boundaries;
use crate::selection::candidates::{generate_candidates, WindowParams};
use crate::selection::scoring::{score_segment, DurationBand, ScoreBreakdown};
use crate::selection::selector::select_non_overlapping;
use crate::types::{Segment, Word};

pub struct PunctuationBoundaryDetector;

impl BoundaryDetector for PunctuationBoundaryDetector {
    fn find_boundaries(&self, words: &[Word]) -> Vec<usize> {
        find_boundaries(words)
    }
}

pub struct WindowCandidateGenerator {
    pub params: WindowParams,
    pub strategy: WindowStrategy,
}

impl WindowCandidateGenerator {
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            params: WindowParams::from_config(config),
            strategy: config.strategy,
        }
    }
}

impl CandidateGenerator for WindowCandidateGenerator {
    fn generate(&self, words: &[Word], boundaries: &[usize]) -> Vec<Segment> {
        generate_candidates(words, boundaries, &self.params, self.strategy)
    }
}

pub struct WeightedScorer {
    pub band: DurationBand,
}

impl WeightedScorer {
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            band: DurationBand::from_config(config),
        }
    }
}

impl ClipScorer for WeightedScorer {
    fn score(
        &self,
        segment: &Segment,
        keywords: &[String],
        weights: &SelectionWeights,
    ) -> ScoreBreakdown {
        score_segment(segment, keywords, weights, &self.band)
    }
}

pub struct GreedySelector {
    pub min_gap_secs: f64,
}

impl SegmentSelector for GreedySelector {
    fn select(&self, candidates: Vec<Segment>, count: usize) -> Vec<Segment> {
        select_non_overlapping(candidates, count, self.min_gap_secs)
    }
}

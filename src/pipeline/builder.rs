use crate::config::{SelectionWeights, SelectorConfig, WeightPreset};
use crate::error::SelectionError;
use crate::pipeline::defaults::{
    GreedySelector, PunctuationBoundaryDetector, WeightedScorer, WindowCandidateGenerator,
};
use crate::pipeline::runtime::{ClipSelector, ClipSelectorParts};
use crate::pipeline::traits::{BoundaryDetector, CandidateGenerator, ClipScorer, SegmentSelector};

pub struct ClipSelectorBuilder {
    config: SelectorConfig,
    boundary_detector: Option<Box<dyn BoundaryDetector>>,
    candidate_generator: Option<Box<dyn CandidateGenerator>>,
    scorer: Option<Box<dyn ClipScorer>>,
    selector: Option<Box<dyn SegmentSelector>>,
}

impl ClipSelectorBuilder {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            boundary_detector: None,
            candidate_generator: None,
            scorer: None,
            selector: None,
        }
    }

    pub fn with_weights(mut self, weights: SelectionWeights) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn with_preset(self, preset: WeightPreset) -> Self {
        self.with_weights(preset.weights())
    }

    pub fn with_boundary_detector(mut self, boundary_detector: Box<dyn BoundaryDetector>) -> Self {
        self.boundary_detector = Some(boundary_detector);
        self
    }

    pub fn with_candidate_generator(
        mut self,
        candidate_generator: Box<dyn CandidateGenerator>,
    ) -> Self {
        self.candidate_generator = Some(candidate_generator);
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn ClipScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn SegmentSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn build(self) -> Result<ClipSelector, SelectionError> {
        self.config.validate()?;
        if self.config.min_duration_secs > 0.0
            && (self.config.preferred_max_secs < self.config.min_duration_secs
                || self.config.preferred_min_secs > self.config.max_duration_secs)
        {
            tracing::warn!(
                preferred_min_secs = self.config.preferred_min_secs,
                preferred_max_secs = self.config.preferred_max_secs,
                min_duration_secs = self.config.min_duration_secs,
                max_duration_secs = self.config.max_duration_secs,
                "preferred duration band lies outside the allowed window"
            );
        }

        let config = self.config;
        Ok(ClipSelector::from_parts(ClipSelectorParts {
            boundary_detector: self
                .boundary_detector
                .unwrap_or_else(|| Box::new(PunctuationBoundaryDetector)),
            candidate_generator: self
                .candidate_generator
                .unwrap_or_else(|| Box::new(WindowCandidateGenerator::from_config(&config))),
            scorer: self
                .scorer
                .unwrap_or_else(|| Box::new(WeightedScorer::from_config(&config))),
            selector: self.selector.unwrap_or_else(|| {
                Box::new(GreedySelector {
                    min_gap_secs: config.min_gap_secs,
                })
            }),
            config,
        }))
    }
}

use crate::config::SelectionWeights;
use crate::error::SelectionError;
use crate::selection::scoring::ScoreBreakdown;
use crate::types::{Segment, Word};

pub trait BoundaryDetector: Send + Sync {
    fn find_boundaries(&self, words: &[Word]) -> Vec<usize>;
}

pub trait CandidateGenerator: Send + Sync {
    fn generate(&self, words: &[Word], boundaries: &[usize]) -> Vec<Segment>;
}

pub trait ClipScorer: Send + Sync {
    fn score(
        &self,
        segment: &Segment,
        keywords: &[String],
        weights: &SelectionWeights,
    ) -> ScoreBreakdown;
}

pub trait SegmentSelector: Send + Sync {
    fn select(&self, candidates: Vec<Segment>, count: usize) -> Vec<Segment>;
}

/// Supplies the word stream for one recording, e.g. from a speech-to-text run.
pub trait TranscriptProvider {
    fn words(&self) -> Result<Vec<Word>, SelectionError>;
}

/// Consumes the selected clips, e.g. to cut and encode media.
pub trait RenderSink {
    fn render(&mut self, clips: &[Segment]) -> Result<(), SelectionError>;
}

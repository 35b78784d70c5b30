use crate::config::{SelectionWeights, SelectorConfig};
use crate::pipeline::traits::{BoundaryDetector, CandidateGenerator, ClipScorer, SegmentSelector};
use crate::selection::speakers::{assign_speakers, DEFAULT_SPEAKER};
use crate::types::{Segment, SelectionInput, SelectionOutput};

const LOG_PREVIEW_CHARS: usize = 60;

/// Stateless clip selection engine. One instance can serve any number of
/// inputs, concurrently if shared behind a reference.
pub struct ClipSelector {
    config: SelectorConfig,
    boundary_detector: Box<dyn BoundaryDetector>,
    candidate_generator: Box<dyn CandidateGenerator>,
    scorer: Box<dyn ClipScorer>,
    selector: Box<dyn SegmentSelector>,
}

pub(crate) struct ClipSelectorParts {
    pub config: SelectorConfig,
    pub boundary_detector: Box<dyn BoundaryDetector>,
    pub candidate_generator: Box<dyn CandidateGenerator>,
    pub scorer: Box<dyn ClipScorer>,
    pub selector: Box<dyn SegmentSelector>,
}

impl ClipSelector {
    pub(crate) fn from_parts(parts: ClipSelectorParts) -> Self {
        Self {
            config: parts.config,
            boundary_detector: parts.boundary_detector,
            candidate_generator: parts.candidate_generator,
            scorer: parts.scorer,
            selector: parts.selector,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn weights(&self) -> &SelectionWeights {
        &self.config.weights
    }

    pub fn select(&self, input: &SelectionInput) -> SelectionOutput {
        let labelled;
        let words = match input.speaker_turns.as_deref() {
            Some(turns) => {
                labelled = assign_speakers(&input.words, turns, DEFAULT_SPEAKER);
                labelled.as_slice()
            }
            None => input.words.as_slice(),
        };

        let boundaries = self.boundary_detector.find_boundaries(words);
        let mut candidates = self.candidate_generator.generate(words, &boundaries);
        let candidate_count = candidates.len();

        for candidate in &mut candidates {
            let breakdown = self
                .scorer
                .score(candidate, &input.keywords, &self.config.weights);
            candidate.score = breakdown.total_score;
            tracing::debug!(
                start = format!("{:.2}", candidate.start()),
                end = format!("{:.2}", candidate.end()),
                score_total = format!("{:.3}", breakdown.total_score),
                score_boundary = format!("{:.3}", breakdown.boundary),
                score_speech_rate = format!("{:.3}", breakdown.speech_rate),
                score_questions = format!("{:.3}", breakdown.questions),
                score_exclamations = format!("{:.3}", breakdown.exclamations),
                score_lexical_diversity = format!("{:.3}", breakdown.lexical_diversity),
                score_duration = format!("{:.3}", breakdown.duration),
                score_pauses = format!("{:.3}", breakdown.pauses),
                score_keywords = format!("{:.3}", breakdown.keywords),
                max_gap_secs = format!("{:.2}", breakdown.max_gap_secs),
                long_pause = breakdown.long_pause,
                "scoring: candidate"
            );
        }

        let clips: Vec<Segment> = self
            .selector
            .select(candidates, self.config.count)
            .into_iter()
            .map(Segment::detach)
            .collect();

        tracing::info!(
            word_count = words.len(),
            boundary_count = boundaries.len(),
            candidate_count,
            selected_count = clips.len(),
            requested_count = self.config.count,
            "selection: finished"
        );
        for clip in &clips {
            let preview: String = clip.text().chars().take(LOG_PREVIEW_CHARS).collect();
            tracing::info!(
                label = clip.label.as_str(),
                start = format!("{:.1}", clip.start()),
                end = format!("{:.1}", clip.end()),
                score = format!("{:.3}", clip.score),
                preview = preview.as_str(),
                "selection: clip"
            );
        }

        SelectionOutput {
            clips,
            boundary_count: boundaries.len(),
            candidate_count,
        }
    }
}

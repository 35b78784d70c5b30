use crate::config::{SelectorConfig, WindowStrategy};
use crate::types::{Segment, Word};

mod boundary_pairs;
mod sliding_window;

pub use boundary_pairs::boundary_pair_candidates;
pub use sliding_window::sliding_window_candidates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub step_secs: f64,
    pub max_boundaries: usize,
}

impl WindowParams {
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            min_duration_secs: config.min_duration_secs,
            max_duration_secs: config.max_duration_secs,
            step_secs: config.window_step_secs,
            max_boundaries: config.max_boundaries,
        }
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::default())
    }
}

pub fn generate_candidates(
    words: &[Word],
    boundaries: &[usize],
    params: &WindowParams,
    strategy: WindowStrategy,
) -> Vec<Segment> {
    let pairs = || {
        boundary_pair_candidates(
            words,
            boundaries,
            params.min_duration_secs,
            params.max_duration_secs,
        )
    };
    let windows = || {
        sliding_window_candidates(
            words,
            params.min_duration_secs,
            params.max_duration_secs,
            params.step_secs,
        )
    };

    match strategy {
        WindowStrategy::BoundaryPairs => pairs(),
        WindowStrategy::SlidingWindow => windows(),
        WindowStrategy::Adaptive => {
            if boundaries.len() > params.max_boundaries {
                tracing::info!(
                    boundary_count = boundaries.len(),
                    max_boundaries = params.max_boundaries,
                    "candidates: too many boundaries to enumerate, using sliding window"
                );
                return windows();
            }
            let found = pairs();
            if found.is_empty() && !words.is_empty() {
                tracing::debug!(
                    boundary_count = boundaries.len(),
                    "candidates: no sentence-bounded window fits, using sliding window"
                );
                return windows();
            }
            found
        }
    }
}

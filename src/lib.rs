pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod selection;
pub mod transcript;
pub mod types;

pub use config::{Feature, SelectionWeights, SelectorConfig, WeightPreset, WindowStrategy};
pub use error::SelectionError;
pub use manifest::{ClipManifest, ClipRecord, JsonManifestSink, ManifestMeta};
pub use pipeline::builder::ClipSelectorBuilder;
pub use pipeline::runtime::ClipSelector;
pub use pipeline::traits::{
    BoundaryDetector, CandidateGenerator, ClipScorer, RenderSink, SegmentSelector,
    TranscriptProvider,
};
pub use selection::boundaries::find_boundaries;
pub use selection::candidates::{generate_candidates, WindowParams};
pub use selection::scoring::{score_segment, DurationBand, ScoreBreakdown};
pub use selection::selector::select_non_overlapping;
pub use selection::speakers::{assign_speakers, DEFAULT_SPEAKER};
pub use transcript::{parse_transcript, JsonTranscriptProvider, TranscriptDiagnostics};
pub use types::{Segment, SelectionInput, SelectionOutput, SpeakerTurn, Word};

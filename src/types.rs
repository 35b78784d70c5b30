use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One transcribed word. Times are seconds from the start of the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    /// Never earlier than `start`; [`Word::new`] clamps inverted intervals.
    pub end: f64,
    /// Diarization label passed through to rendering. Not used for scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end: end.max(start),
            speaker: None,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn ends_sentence(&self) -> bool {
        self.text.trim_end().ends_with(['.', '!', '?'])
    }
}

/// A contiguous range of the word stream considered as a clip.
///
/// Candidates cut from one stream share a single copy of it; a segment only
/// owns its index range, so cloning one never copies words.
#[derive(Clone)]
pub struct Segment {
    source: Arc<[Word]>,
    range: Range<usize>,
    /// Index of the first word in the source word stream.
    pub first_index: usize,
    pub score: f64,
    /// Empty until the selector assigns `clip_NN`.
    pub label: String,
}

impl Segment {
    /// `range` indexes `source`; it is clamped to the stream length.
    pub fn new(source: Arc<[Word]>, range: Range<usize>) -> Self {
        let end = range.end.min(source.len());
        let start = range.start.min(end);
        Self {
            source,
            range: start..end,
            first_index: start,
            score: 0.0,
            label: String::new(),
        }
    }

    /// Copies `words`, which begin at `first_index` in their stream.
    pub fn from_slice(words: &[Word], first_index: usize) -> Self {
        Self {
            source: Arc::from(words),
            range: 0..words.len(),
            first_index,
            score: 0.0,
            label: String::new(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.source[self.range.clone()]
    }

    /// Re-home the segment onto a copy of just its own words, releasing the
    /// shared stream.
    pub fn detach(self) -> Self {
        let mut owned = Self::from_slice(self.words(), self.first_index);
        owned.score = self.score;
        owned.label = self.label;
        owned
    }

    pub fn start(&self) -> f64 {
        self.words().first().map(|w| w.start).unwrap_or(0.0)
    }

    pub fn end(&self) -> f64 {
        self.words().last().map(|w| w.end).unwrap_or(0.0)
    }

    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Exclusive end index in the source word stream.
    pub fn end_index(&self) -> usize {
        self.first_index + self.range.len()
    }

    pub fn text(&self) -> String {
        self.words()
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Distinct speaker labels in order of first appearance.
    pub fn speakers(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for speaker in self.words().iter().filter_map(|w| w.speaker.as_ref()) {
            if !out.iter().any(|s| s == speaker) {
                out.push(speaker.clone());
            }
        }
        out
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.first_index == other.first_index
            && self.score == other.score
            && self.label == other.label
            && self.words() == other.words()
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("first_index", &self.first_index)
            .field("score", &self.score)
            .field("label", &self.label)
            .field("words", &self.words())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionInput {
    pub words: Vec<Word>,
    pub keywords: Vec<String>,
    pub speaker_turns: Option<Vec<SpeakerTurn>>,
}

impl SelectionInput {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_speaker_turns(mut self, turns: Vec<SpeakerTurn>) -> Self {
        self.speaker_turns = Some(turns);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutput {
    /// Chronological, labelled `clip_01`, `clip_02`, ...
    pub clips: Vec<Segment>,
    pub boundary_count: usize,
    pub candidate_count: usize,
}

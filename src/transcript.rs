//! Conversion from loosely-shaped transcript JSON to canonical [`Word`]s.
//!
//! Accepted documents:
//! - a flat array of word records,
//! - `{ "words": [...] }`,
//! - Whisper-style `{ "segments": [{ "text", "start", "end", "words": [...] }] }`.
//!
//! Word records use `text` (or `word`), `start` and `end` in seconds. Every
//! record is validated here once; the selection core never re-checks words.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SelectionError;
use crate::pipeline::traits::TranscriptProvider;
use crate::types::{SpeakerTurn, Word};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWord {
    #[serde(alias = "word")]
    pub text: String,
    pub start: Option<f64>,
    pub end: Option<f64>,
    #[serde(default)]
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSegment {
    #[serde(default)]
    text: String,
    start: Option<f64>,
    end: Option<f64>,
    #[serde(default)]
    words: Option<Vec<RawWord>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDocument {
    #[serde(default)]
    words: Option<Vec<RawWord>>,
    #[serde(default)]
    segments: Option<Vec<RawSegment>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawTranscript {
    Words(Vec<RawWord>),
    Document(RawDocument),
}

/// Counts of repairs made while converting a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptDiagnostics {
    pub kept: usize,
    pub dropped_empty_text: usize,
    pub dropped_invalid_time: usize,
    pub clamped_inverted: usize,
    /// Words whose timings were interpolated from a segment interval.
    pub synthesized: usize,
}

impl TranscriptDiagnostics {
    pub fn repaired(&self) -> usize {
        self.dropped_empty_text + self.dropped_invalid_time + self.clamped_inverted
    }
}

/// Convert raw records into canonical words: text is trimmed, records with
/// empty text or missing/non-finite/negative times are dropped, and
/// `end < start` is clamped to `end = start`. Input order is kept.
pub fn normalize_words(raw: Vec<RawWord>) -> (Vec<Word>, TranscriptDiagnostics) {
    let mut diagnostics = TranscriptDiagnostics::default();
    let words = raw
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| normalize_one(idx, record, &mut diagnostics))
        .collect();
    (words, diagnostics)
}

fn normalize_one(
    idx: usize,
    record: RawWord,
    diagnostics: &mut TranscriptDiagnostics,
) -> Option<Word> {
    let text = record.text.trim();
    if text.is_empty() {
        diagnostics.dropped_empty_text += 1;
        return None;
    }
    let (start, end) = match (record.start, record.end) {
        (Some(s), Some(e)) if s.is_finite() && e.is_finite() && s >= 0.0 && e >= 0.0 => (s, e),
        (start, end) => {
            tracing::warn!(
                index = idx,
                word = text,
                ?start,
                ?end,
                "transcript: dropping word with invalid timestamps"
            );
            diagnostics.dropped_invalid_time += 1;
            return None;
        }
    };
    if end < start {
        tracing::warn!(
            index = idx,
            word = text,
            start,
            end,
            "transcript: word ends before it starts, clamping end to start"
        );
        diagnostics.clamped_inverted += 1;
    }
    diagnostics.kept += 1;
    let mut word = Word::new(text, start, end);
    word.speaker = record.speaker;
    Some(word)
}

/// Spread a segment's interval evenly across its whitespace tokens.
fn synthesize_words(segment: &RawSegment) -> Vec<RawWord> {
    let tokens: Vec<&str> = segment.text.split_whitespace().collect();
    let (Some(start), Some(end)) = (segment.start, segment.end) else {
        return Vec::new();
    };
    if tokens.is_empty() {
        return Vec::new();
    }
    let per_token = (end - start).max(0.0) / tokens.len() as f64;
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| RawWord {
            text: (*token).to_string(),
            start: Some(start + i as f64 * per_token),
            end: Some(start + (i + 1) as f64 * per_token),
            speaker: None,
        })
        .collect()
}

pub fn parse_transcript(
    json: &str,
) -> Result<(Vec<Word>, TranscriptDiagnostics), SelectionError> {
    let parsed: RawTranscript =
        serde_json::from_str(json).map_err(|e| SelectionError::json("parse transcript", e))?;

    let mut synthesized = 0usize;
    let raw = match parsed {
        RawTranscript::Words(words) => words,
        RawTranscript::Document(RawDocument {
            words: Some(words), ..
        }) => words,
        RawTranscript::Document(RawDocument {
            segments: Some(segments),
            ..
        }) => {
            let mut raw = Vec::new();
            for mut segment in segments {
                match segment.words.take() {
                    Some(words) if !words.is_empty() => raw.extend(words),
                    _ => {
                        let made = synthesize_words(&segment);
                        if !made.is_empty() {
                            tracing::warn!(
                                start = ?segment.start,
                                end = ?segment.end,
                                word_count = made.len(),
                                "transcript: segment has no word timings, interpolating"
                            );
                        }
                        synthesized += made.len();
                        raw.extend(made);
                    }
                }
            }
            raw
        }
        RawTranscript::Document(_) => {
            return Err(SelectionError::invalid_input(
                "transcript has neither a `words` nor a `segments` array",
            ))
        }
    };

    let (words, mut diagnostics) = normalize_words(raw);
    diagnostics.synthesized = synthesized;
    Ok((words, diagnostics))
}

pub fn parse_speaker_turns(json: &str) -> Result<Vec<SpeakerTurn>, SelectionError> {
    let turns: Vec<SpeakerTurn> =
        serde_json::from_str(json).map_err(|e| SelectionError::json("parse speaker turns", e))?;
    Ok(turns
        .into_iter()
        .filter(|t| t.start.is_finite() && t.end.is_finite() && t.start <= t.end)
        .collect())
}

pub fn load_speaker_turns(path: &Path) -> Result<Vec<SpeakerTurn>, SelectionError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| SelectionError::io("read speaker turns", e))?;
    parse_speaker_turns(&data)
}

/// Reads a transcript JSON file on every call.
pub struct JsonTranscriptProvider {
    path: PathBuf,
}

impl JsonTranscriptProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptProvider for JsonTranscriptProvider {
    fn words(&self) -> Result<Vec<Word>, SelectionError> {
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| SelectionError::io("read transcript", e))?;
        let (words, diagnostics) = parse_transcript(&data)?;
        tracing::info!(
            path = %self.path.display(),
            kept = diagnostics.kept,
            repaired = diagnostics.repaired(),
            synthesized = diagnostics.synthesized,
            "transcript: loaded"
        );
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_word_array() {
        let json = r#"[
            {"text": " Hello", "start": 0.0, "end": 0.4},
            {"word": "there.", "start": 0.5, "end": 0.9}
        ]"#;
        let (words, diagnostics) = parse_transcript(json).expect("valid transcript");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Hello");
        assert_eq!(words[1].text, "there.");
        assert_eq!(diagnostics.kept, 2);
        assert_eq!(diagnostics.repaired(), 0);
    }

    #[test]
    fn parses_words_document() {
        let json = r#"{"words": [{"text": "Hi", "start": 1.0, "end": 1.2, "speaker": "A"}]}"#;
        let (words, _) = parse_transcript(json).expect("valid transcript");
        assert_eq!(words[0].speaker.as_deref(), Some("A"));
    }

    #[test]
    fn flattens_whisper_segments() {
        let json = r#"{"segments": [
            {"text": "One two.", "start": 0.0, "end": 1.0, "words": [
                {"word": " One", "start": 0.0, "end": 0.4},
                {"word": " two.", "start": 0.5, "end": 1.0}
            ]},
            {"text": "Three", "start": 1.2, "end": 1.6, "words": [
                {"word": " Three", "start": 1.2, "end": 1.6}
            ]}
        ]}"#;
        let (words, diagnostics) = parse_transcript(json).expect("valid transcript");
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "two.", "Three"]);
        assert_eq!(diagnostics.synthesized, 0);
    }

    #[test]
    fn interpolates_segments_without_words() {
        let json = r#"{"segments": [{"text": "a b c d", "start": 10.0, "end": 12.0}]}"#;
        let (words, diagnostics) = parse_transcript(json).expect("valid transcript");
        assert_eq!(words.len(), 4);
        assert_eq!(diagnostics.synthesized, 4);
        assert_eq!(words[0].start, 10.0);
        assert_eq!(words[1].start, 10.5);
        assert_eq!(words[3].end, 12.0);
    }

    #[test]
    fn repairs_malformed_words_without_aborting() {
        let json = r#"[
            {"text": "ok", "start": 0.0, "end": 0.5},
            {"text": "   ", "start": 0.6, "end": 0.8},
            {"text": "nulltime", "start": null, "end": 1.0},
            {"text": "negative", "start": -1.0, "end": 1.0},
            {"text": "inverted", "start": 2.0, "end": 1.5},
            {"text": "fine", "start": 2.1, "end": 2.4}
        ]"#;
        let (words, diagnostics) = parse_transcript(json).expect("valid transcript");
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["ok", "inverted", "fine"]);
        assert_eq!(words[1].start, 2.0);
        assert_eq!(words[1].end, 2.0);
        assert_eq!(diagnostics.dropped_empty_text, 1);
        assert_eq!(diagnostics.dropped_invalid_time, 2);
        assert_eq!(diagnostics.clamped_inverted, 1);
        assert_eq!(diagnostics.kept, 3);
    }

    #[test]
    fn rejects_unrecognised_document() {
        let err = parse_transcript(r#"{"title": "nothing here"}"#).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidInput { .. }));
        assert!(matches!(
            parse_transcript("not json").unwrap_err(),
            SelectionError::Json { .. }
        ));
    }

    #[test]
    fn empty_array_is_an_empty_stream() {
        let (words, _) = parse_transcript("[]").expect("valid transcript");
        assert!(words.is_empty());
    }

    #[test]
    fn speaker_turns_drop_inverted_intervals() {
        let json = r#"[
            {"speaker": "A", "start": 0.0, "end": 2.0},
            {"speaker": "B", "start": 5.0, "end": 3.0}
        ]"#;
        let turns = parse_speaker_turns(json).expect("valid turns");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].speaker, "A");
    }

    #[test]
    fn provider_reads_file() {
        let path = std::env::temp_dir().join("clipforge_rs_transcript_provider.json");
        std::fs::write(&path, r#"[{"text": "Hi.", "start": 0.0, "end": 0.3}]"#)
            .expect("write transcript");
        let provider = JsonTranscriptProvider::new(&path);
        let words = provider.words().expect("readable transcript");
        assert_eq!(words, vec![Word::new("Hi.", 0.0, 0.3)]);
        let _ = std::fs::remove_file(&path);

        let missing = JsonTranscriptProvider::new("/nonexistent/transcript.json");
        assert!(matches!(missing.words(), Err(SelectionError::Io { .. })));
    }
}

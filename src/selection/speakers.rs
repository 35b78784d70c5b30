use crate::types::{SpeakerTurn, Word};

pub const DEFAULT_SPEAKER: &str = "SPEAKER_00";

/// Label each word with the first turn containing its midpoint (bounds
/// inclusive). Words outside every turn get `default_speaker`.
pub fn assign_speakers(words: &[Word], turns: &[SpeakerTurn], default_speaker: &str) -> Vec<Word> {
    words
        .iter()
        .map(|word| {
            let mid = word.midpoint();
            let speaker = turns
                .iter()
                .find(|turn| turn.start <= mid && mid <= turn.end)
                .map(|turn| turn.speaker.as_str())
                .unwrap_or(default_speaker);
            Word {
                speaker: Some(speaker.to_string()),
                ..word.clone()
            }
        })
        .collect()
}

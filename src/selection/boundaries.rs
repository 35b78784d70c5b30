use crate::types::Word;

/// Word indices where a clip may start or end.
///
/// Always contains `0` and `words.len()`; a word ending in `.`, `!` or `?`
/// adds a boundary right after it. The result is strictly increasing, so an
/// empty stream yields `[0]`.
pub fn find_boundaries(words: &[Word]) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(words.len() / 8 + 2);
    boundaries.push(0);
    for (idx, word) in words.iter().enumerate() {
        if word.ends_sentence() {
            boundaries.push(idx + 1);
        }
    }
    if boundaries.last() != Some(&words.len()) {
        boundaries.push(words.len());
    }
    boundaries.dedup();
    boundaries
}

//! Candidate windows over the flattened word sequence.

use crate::tokenizer::Word;
use serde::Serialize;

/// A window of the query's word count anchored on a plausible first word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Window words joined by single spaces.
    pub text: String,
    pub start_segment: usize,
    pub end_segment: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Index of the first window word in the flattened sequence.
    pub position: usize,
}

/// Exact, contained-in or containing match on lowercased, trimmed words.
fn anchors(word: &str, first: &str) -> bool {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return false;
    }
    word == first || first.contains(&word) || word.contains(first)
}

/// Lazily yield every window of `len` words whose first word anchors on
/// `first_word`, in ascending start order.
pub fn generate<'a>(
    words: &'a [Word],
    first_word: &str,
    len: usize,
) -> impl Iterator<Item = Candidate> + 'a {
    let first = first_word.trim().to_lowercase();
    let last_start = if len == 0 || first.is_empty() {
        None
    } else {
        words.len().checked_sub(len)
    };
    last_start
        .into_iter()
        .flat_map(|last| 0..=last)
        .filter(move |&i| anchors(&words[i].text, &first))
        .map(move |i| {
            let window = &words[i..i + len];
            let head = &window[0];
            let tail = &window[len - 1];
            Candidate {
                text: window
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                start_segment: head.segment,
                end_segment: tail.segment,
                start_offset: head.offset,
                end_offset: tail.offset,
                position: i,
            }
        })
}

//! Flattens a page's segments into one ordered word sequence.

use crate::segment::RenderedSegment;

/// A word tagged with where it was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Index of the owning segment within the page.
    pub segment: usize,
    /// Position of the word within its segment, counted from zero.
    pub offset: usize,
}

/// Split every segment on single spaces, skipping empty tokens. The word
/// offset restarts at zero for each segment.
pub fn tokenize(segments: &[RenderedSegment]) -> Vec<Word> {
    let mut words = Vec::new();
    for (segment, seg) in segments.iter().enumerate() {
        let text = seg.text();
        let tokens = text.split(' ').filter(|t| !t.is_empty());
        words.extend(tokens.enumerate().map(|(offset, t)| Word {
            text: t.to_string(),
            segment,
            offset,
        }));
    }
    words
}

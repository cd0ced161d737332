//! Rewrites the segments covered by a match so the matched words are
//! wrapped in highlight markers, splitting boundary segments at word level.

use crate::candidates::Candidate;
use crate::segment::{RenderedSegment, TextRun};
use serde::Serialize;
use tracing::debug;

/// What the applicator did to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Applied {
    /// False when the end boundary had a zero word offset.
    pub completed: bool,
    /// Segments whose content was rewritten.
    pub touched: Vec<usize>,
    /// Segments past the end of the page, or already highlighted.
    pub skipped: Vec<usize>,
}

fn words_of(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

fn whole(seg: &RenderedSegment, color: &str) -> Vec<TextRun> {
    vec![TextRun::marked(seg.text(), color)]
}

/// Plain words before `from`, marked words `from..=to`, plain words after.
fn split(words: &[&str], from: usize, to: usize, color: &str) -> Vec<TextRun> {
    let from = from.min(words.len());
    let to = to.saturating_add(1).clamp(from, words.len());
    let mut runs = Vec::with_capacity(3);
    if from > 0 {
        runs.push(TextRun::plain(format!("{} ", words[..from].join(" "))));
    }
    runs.push(TextRun::marked(words[from..to].join(" "), color));
    if to < words.len() {
        runs.push(TextRun::plain(format!(" {}", words[to..].join(" "))));
    }
    runs
}

/// Highlight the window described by `candidate` on `segments`.
///
/// Segments past the end of the slice are skipped and the rest still get
/// marked. A zero word offset on the end segment aborts the application;
/// segments rewritten before that point stay rewritten.
pub fn apply(segments: &mut [RenderedSegment], candidate: &Candidate, color: &str) -> Applied {
    let (start, end) = (candidate.start_segment, candidate.end_segment);
    let (start_offset, end_offset) = (candidate.start_offset, candidate.end_offset);
    let mut applied = Applied::default();

    for k in start..=end {
        let Some(seg) = segments.get_mut(k) else {
            debug!(segment = k, "segment no longer rendered, skipping");
            applied.skipped.push(k);
            continue;
        };
        if k == end && end_offset == 0 {
            debug!(segment = k, "zero end offset, aborting highlight");
            return applied;
        }

        let text = seg.text();
        let words = words_of(&text);
        let runs = if start == end {
            split(&words, start_offset, end_offset, color)
        } else if k > start && k < end {
            if seg.is_highlighted() {
                applied.skipped.push(k);
                continue;
            }
            whole(seg, color)
        } else if k == start && start_offset == 0 {
            whole(seg, color)
        } else if k == start {
            split(&words, start_offset, words.len(), color)
        } else {
            split(&words, 0, end_offset, color)
        };
        seg.replace_runs(runs);
        applied.touched.push(k);
    }

    applied.completed = true;
    applied
}

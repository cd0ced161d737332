//! End-to-end checks of locating a passage on a rendered page and marking it.

use passage_locator::highlight::Applied;
use passage_locator::{Miss, PageStore, PassageLocator, RenderedSegment, TextLayer, TextRun};

fn page(texts: &[&str]) -> PageStore {
    let mut store = PageStore::new();
    store.render_page(0, texts.iter().copied());
    store
}

fn runs(store: &PageStore, idx: usize) -> Vec<TextRun> {
    store.segments(0).unwrap()[idx].runs().to_vec()
}

fn marker_counts(store: &PageStore) -> Vec<usize> {
    store.segments(0).unwrap().iter().map(RenderedSegment::marker_count).collect()
}

#[test]
fn passage_inside_one_segment_marks_only_that_range() {
    let mut store = page(&["Lorem ipsum dolor sit amet consectetur", "adipiscing elit sed"]);
    let locator = PassageLocator::default();
    assert!(locator.locate_and_highlight(&mut store, 0, "dolor sit amet", "yellow"));
    assert_eq!(
        runs(&store, 0),
        vec![
            TextRun::plain("Lorem ipsum "),
            TextRun::marked("dolor sit amet", "yellow"),
            TextRun::plain(" consectetur"),
        ]
    );
    assert!(!store.segments(0).unwrap()[1].is_highlighted());
}

#[test]
fn line_broken_query_splits_two_segments() {
    let mut store = page(&["The quick brown", "fox jumps over", "the lazy dog"]);
    let passage = "quick brown\nfox jumps";
    let out = PassageLocator::default().highlight(&mut store, 0, passage, "yellow");
    assert!(out.found);
    let matched = out.matched.unwrap();
    assert_eq!(matched.candidate.text, "quick brown fox jumps");
    assert_eq!((matched.candidate.start_segment, matched.candidate.start_offset), (0, 1));
    assert_eq!((matched.candidate.end_segment, matched.candidate.end_offset), (1, 1));
    assert_eq!(
        runs(&store, 0),
        vec![TextRun::plain("The "), TextRun::marked("quick brown", "yellow")]
    );
    assert_eq!(
        runs(&store, 1),
        vec![TextRun::marked("fox jumps", "yellow"), TextRun::plain(" over")]
    );
    assert_eq!(marker_counts(&store), vec![1, 1, 0]);
}

#[test]
fn window_across_three_segments_marks_each() {
    let mut store = page(&["intro words here", "middle part", "tail end of text"]);
    let found = PassageLocator::default().locate_and_highlight(
        &mut store,
        0,
        "here   middle\tpart\r\ntail end",
        "blue",
    );
    assert!(found);
    assert_eq!(
        runs(&store, 0),
        vec![TextRun::plain("intro words "), TextRun::marked("here", "blue")]
    );
    assert_eq!(runs(&store, 1), vec![TextRun::marked("middle part", "blue")]);
    assert_eq!(
        runs(&store, 2),
        vec![TextRun::marked("tail end", "blue"), TextRun::plain(" of text")]
    );
}

#[test]
fn minor_extraction_differences_still_match() {
    let mut store = page(&["Revenue grew by 12 percent in fiscal 2023"]);
    let out = PassageLocator::default().highlight(
        &mut store,
        0,
        "Revenue grew by l2 percent in fiscal 2023",
        "yellow",
    );
    assert!(out.found);
    assert!(out.matched.unwrap().score < 1.0);
}

#[test]
fn repeated_text_prefers_earliest_window() {
    let mut store = page(&["the lazy dog sleeps", "the lazy dog barks"]);
    let locator = PassageLocator::default();
    assert!(locator.locate_and_highlight(&mut store, 0, "the lazy dog", "yellow"));
    assert_eq!(
        runs(&store, 0),
        vec![TextRun::marked("the lazy dog", "yellow"), TextRun::plain(" sleeps")]
    );
    assert!(!store.segments(0).unwrap()[1].is_highlighted());
}

#[test]
fn unrelated_passage_is_below_threshold() {
    let mut store = page(&["The quick brown fox jumps over"]);
    let passage = "quick silver mercury rising";
    let out = PassageLocator::default().highlight(&mut store, 0, passage, "yellow");
    assert!(!out.found);
    assert!(matches!(out.miss, Some(Miss::BelowThreshold { .. })));
    assert_eq!(marker_counts(&store), vec![0]);
}

#[test]
fn zero_end_offset_reports_failure() {
    let mut store = page(&["alpha beta", "gamma delta"]);
    let out = PassageLocator::default().highlight(&mut store, 0, "beta gamma", "yellow");
    assert!(!out.found);
    assert_eq!(out.miss, Some(Miss::DegenerateEndBoundary));
    assert!(out.matched.is_some());
}

#[test]
fn empty_page_and_empty_query_return_false() {
    let locator = PassageLocator::default();
    let mut empty = page(&[]);
    assert!(!locator.locate_and_highlight(&mut empty, 0, "quick brown fox", "yellow"));
    let mut store = page(&["The quick brown"]);
    assert!(!locator.locate_and_highlight(&mut store, 0, "\r\n\t  ", "yellow"));
}

#[test]
fn reinvoking_keeps_marker_counts() {
    let mut store = page(&["The quick brown", "fox jumps over", "the lazy dog"]);
    let locator = PassageLocator::default();
    let passage = "brown fox jumps over the lazy";
    assert!(locator.locate_and_highlight(&mut store, 0, passage, "yellow"));
    let first = marker_counts(&store);
    assert!(locator.locate_and_highlight(&mut store, 0, passage, "yellow"));
    assert_eq!(first, vec![1, 1, 1]);
    assert_eq!(marker_counts(&store), first);
}

/// Text layer whose page shrinks between reading and rewriting.
struct ShrinkingLayer {
    read: Vec<RenderedSegment>,
    write: Vec<RenderedSegment>,
}

impl TextLayer for ShrinkingLayer {
    fn segments(&self, _page: usize) -> Option<&[RenderedSegment]> {
        Some(self.read.as_slice())
    }

    fn segments_mut(&mut self, _page: usize) -> Option<&mut [RenderedSegment]> {
        Some(self.write.as_mut_slice())
    }
}

#[test]
fn segments_gone_after_rerender_are_skipped() {
    let texts = ["The quick brown", "fox jumps over", "the lazy dog"];
    let all: Vec<_> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| RenderedSegment::new(i, *t))
        .collect();
    let mut layer = ShrinkingLayer {
        write: all[..2].to_vec(),
        read: all,
    };
    let passage = "brown fox jumps over the lazy";
    let out = PassageLocator::default().highlight(&mut layer, 0, passage, "pink");
    assert!(out.found);
    assert_eq!(
        out.applied,
        Some(Applied {
            completed: true,
            touched: vec![0, 1],
            skipped: vec![2],
        })
    );
    assert_eq!(
        layer.write[0].runs(),
        &[TextRun::plain("The quick "), TextRun::marked("brown", "pink")]
    );
}

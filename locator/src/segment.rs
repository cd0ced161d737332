//! Render model shared with the viewer: segments made of plain and
//! highlighted runs, and the [`TextLayer`] seam through which the locator
//! reads and rewrites a page's segments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One run of rendered text. A run with a color is a highlight marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn marked(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Some(color.into()),
        }
    }

    pub fn is_marker(&self) -> bool {
        self.color.is_some()
    }
}

/// A unit of rendered text owned by the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSegment {
    pub index: usize,
    runs: Vec<TextRun>,
}

impl RenderedSegment {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Text content across all runs, markers included.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn is_highlighted(&self) -> bool {
        self.runs.iter().any(TextRun::is_marker)
    }

    pub fn marker_count(&self) -> usize {
        self.runs.iter().filter(|r| r.is_marker()).count()
    }

    /// Swap the rendered content in one step. Empty runs are dropped.
    pub fn replace_runs(&mut self, runs: Vec<TextRun>) {
        self.runs = runs.into_iter().filter(|r| !r.text.is_empty()).collect();
    }

    /// Drop every marker, keeping the text.
    pub fn clear_highlights(&mut self) {
        let text = self.text();
        self.runs = vec![TextRun::plain(text)];
    }
}

/// Access to a viewer's current render tree, page by page.
///
/// `None` and an empty slice both mean the page has not been rendered yet.
pub trait TextLayer {
    fn segments(&self, page: usize) -> Option<&[RenderedSegment]>;
    fn segments_mut(&mut self, page: usize) -> Option<&mut [RenderedSegment]>;
}

/// In-memory text layer keyed by zero-based page number.
#[derive(Debug, Default, Clone)]
pub struct PageStore {
    pages: HashMap<usize, Vec<RenderedSegment>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a page's segments; indices follow the given order.
    pub fn render_page<I, S>(&mut self, page: usize, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| RenderedSegment::new(i, t))
            .collect();
        self.pages.insert(page, segments);
    }

    /// Returns false when the page is unknown.
    pub fn clear_highlights(&mut self, page: usize) -> bool {
        match self.pages.get_mut(&page) {
            Some(segments) => {
                segments.iter_mut().for_each(RenderedSegment::clear_highlights);
                true
            }
            None => false,
        }
    }

    /// Number of pages rendered so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl TextLayer for PageStore {
    fn segments(&self, page: usize) -> Option<&[RenderedSegment]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    fn segments_mut(&mut self, page: usize) -> Option<&mut [RenderedSegment]> {
        self.pages.get_mut(&page).map(Vec::as_mut_slice)
    }
}

use crate::segment::{RenderedSegment, TextRun};
use serde::{Deserialize, Serialize};

/// A source reference emitted by the retrieval step alongside an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub document_id: String,
    /// Page label as printed in the source, starting at 1.
    pub page_number: u32,
    /// Source text, truncated upstream to its first 200 characters.
    pub text: String,
}

impl Citation {
    /// Zero-based page index for the viewer; `None` for a zero label.
    pub fn page_index(&self) -> Option<usize> {
        self.page_number.checked_sub(1).map(|p| p as usize)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderPageRequest {
    pub segments: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HighlightRequest {
    pub citation: Citation,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub index: usize,
    pub runs: Vec<TextRun>,
}

impl From<&RenderedSegment> for SegmentView {
    fn from(seg: &RenderedSegment) -> Self {
        Self {
            index: seg.index,
            runs: seg.runs().to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResponse {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub segments: Vec<SegmentView>,
}

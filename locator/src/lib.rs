//! Locates a cited passage inside a page's rendered text layer and marks
//! exactly the matched word range, even when the match spans several
//! independently rendered segments and starts or ends mid-segment.

pub mod candidates;
pub mod config;
pub mod dto;
pub mod error;
pub mod highlight;
pub mod locator;
pub mod matcher;
pub mod normalizer;
pub mod palette;
pub mod segment;
pub mod tokenizer;

pub use locator::{Miss, Outcome, PassageLocator, Stats};
pub use matcher::{MatchResult, MatcherConfig, Scorer};
pub use segment::{PageStore, RenderedSegment, TextLayer, TextRun};

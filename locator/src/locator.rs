//! Ties the stages together: normalize, tokenize, generate candidates,
//! match, and finally highlight on the viewer's text layer.

use crate::candidates;
use crate::highlight::{self, Applied};
use crate::matcher::{self, LevenshteinScorer, MatchResult, MatcherConfig, Rejection, Scorer};
use crate::normalizer;
use crate::segment::{RenderedSegment, TextLayer};
use crate::tokenizer;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use tracing::{debug, info};

/// Why an invocation ended without a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case", tag = "reason")]
#[strum(serialize_all = "snake_case")]
pub enum Miss {
    /// The passage contained no words.
    EmptyQuery,
    /// The page has no rendered segments yet.
    PageNotRendered,
    /// No window started with a plausible first word.
    NoCandidates,
    /// The best window did not reach the similarity threshold.
    BelowThreshold { best_score: Option<f64> },
    /// The winning window ended at word offset zero of its last segment.
    DegenerateEndBoundary,
}

impl Miss {
    /// Only an unrendered page is worth retrying once rendering completes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Miss::PageNotRendered)
    }
}

impl From<Rejection> for Miss {
    fn from(r: Rejection) -> Self {
        match r {
            Rejection::NoCandidates => Miss::NoCandidates,
            Rejection::BelowThreshold { best_score, .. } => Miss::BelowThreshold { best_score },
        }
    }
}

/// Counters gathered while locating, reported with every invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Words left in the passage after normalization.
    pub query_words: usize,
    /// Windows produced by the candidate generator.
    pub candidates: usize,
}

/// Result of one locate-and-highlight invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss: Option<Miss>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<Applied>,
    #[serde(flatten)]
    pub stats: Stats,
}

impl Outcome {
    fn miss(miss: Miss, stats: Stats) -> Self {
        Self {
            found: false,
            miss: Some(miss),
            matched: None,
            applied: None,
            stats,
        }
    }

    /// Similarity of the chosen window, or of the best rejected one.
    pub fn score(&self) -> Option<f64> {
        match (&self.matched, &self.miss) {
            (Some(m), _) => Some(m.score),
            (None, Some(Miss::BelowThreshold { best_score })) => *best_score,
            _ => None,
        }
    }
}

/// Finds a passage on a rendered page and highlights it.
pub struct PassageLocator {
    config: MatcherConfig,
    scorer: Box<dyn Scorer + Send + Sync>,
}

impl Default for PassageLocator {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl std::fmt::Debug for PassageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassageLocator")
            .field("config", &self.config)
            .finish()
    }
}

impl PassageLocator {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            scorer: Box::new(LevenshteinScorer::new(&config)),
        }
    }

    /// Replace the default Levenshtein scorer.
    pub fn with_scorer<S>(mut self, scorer: S) -> Self
    where
        S: Scorer + Send + Sync + 'static,
    {
        self.scorer = Box::new(scorer);
        self
    }

    /// Find the best window for `passage` without touching the segments.
    pub fn locate(&self, segments: &[RenderedSegment], passage: &str) -> Result<MatchResult, Miss> {
        let query = normalizer::normalize_words(passage);
        self.search(segments, &query).0
    }

    /// Locate `passage` on `page` and mark the matched words with `color`.
    pub fn highlight<L>(&self, layer: &mut L, page: usize, passage: &str, color: &str) -> Outcome
    where
        L: TextLayer + ?Sized,
    {
        let outcome = self.run(layer, page, passage, color);
        let Stats {
            query_words,
            candidates,
        } = outcome.stats;
        let score = outcome.score();
        match &outcome.miss {
            None => info!(
                page,
                query_words,
                candidates,
                score,
                segments = outcome.applied.as_ref().map(|a| a.touched.len()),
                "passage highlighted"
            ),
            Some(miss) => info!(
                page,
                query_words,
                candidates,
                score,
                reason = %miss,
                "passage not highlighted"
            ),
        }
        outcome
    }

    /// Boolean form of [`PassageLocator::highlight`].
    pub fn locate_and_highlight<L>(
        &self,
        layer: &mut L,
        page: usize,
        passage: &str,
        color: &str,
    ) -> bool
    where
        L: TextLayer + ?Sized,
    {
        self.highlight(layer, page, passage, color).found
    }

    fn search(
        &self,
        segments: &[RenderedSegment],
        query: &[String],
    ) -> (Result<MatchResult, Miss>, Stats) {
        let mut stats = Stats {
            query_words: query.len(),
            candidates: 0,
        };
        let Some(first) = query.first() else {
            debug!("passage normalized to nothing");
            return (Err(Miss::EmptyQuery), stats);
        };
        if segments.is_empty() {
            debug!("page has no rendered segments");
            return (Err(Miss::PageNotRendered), stats);
        }

        let words = tokenizer::tokenize(segments);
        let joined = query.join(" ");
        let cands = candidates::generate(&words, first, query.len());
        let min_score = self.config.min_score();
        let located = match matcher::best_match(self.scorer.as_ref(), &joined, cands, min_score) {
            Ok((best, seen)) => {
                stats.candidates = seen;
                Ok(best)
            }
            Err(rejection) => {
                stats.candidates = rejection.candidates();
                Err(Miss::from(rejection))
            }
        };
        (located, stats)
    }

    fn run<L>(&self, layer: &mut L, page: usize, passage: &str, color: &str) -> Outcome
    where
        L: TextLayer + ?Sized,
    {
        let query = normalizer::normalize_words(passage);
        let (located, stats) = match layer.segments(page) {
            Some(segments) => self.search(segments, &query),
            None => {
                let miss = if query.is_empty() {
                    Miss::EmptyQuery
                } else {
                    Miss::PageNotRendered
                };
                let stats = Stats {
                    query_words: query.len(),
                    candidates: 0,
                };
                (Err(miss), stats)
            }
        };
        let best = match located {
            Ok(best) => best,
            Err(miss) => return Outcome::miss(miss, stats),
        };

        let Some(segments) = layer.segments_mut(page) else {
            return Outcome::miss(Miss::PageNotRendered, stats);
        };
        let applied = highlight::apply(segments, &best.candidate, color);
        let found = applied.completed;
        Outcome {
            found,
            miss: (!found).then_some(Miss::DegenerateEndBoundary),
            matched: Some(best),
            applied: Some(applied),
            stats,
        }
    }
}

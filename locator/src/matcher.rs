//! Scores candidate windows against the normalized query and picks the best
//! one above the similarity threshold.

use crate::candidates::Candidate;
use serde::Serialize;
use strsim::levenshtein;
use tracing::debug;

/// Tolerances for the default fuzzy scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Maximum edit distance as a fraction of the query length.
    pub tolerance: f64,
    /// Characters that must line up before a window counts as a match.
    pub min_overlap_chars: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.3,
            min_overlap_chars: 5,
        }
    }
}

impl MatcherConfig {
    /// Lowest similarity a winner may have.
    pub fn min_score(&self) -> f64 {
        1.0 - self.tolerance.clamp(0.0, 1.0)
    }
}

/// Approximate string similarity used to rank candidates.
pub trait Scorer {
    /// Similarity in `[0, 1]`, or `None` when the pair shares too little to
    /// be considered a match at all.
    fn score(&self, query: &str, candidate: &str) -> Option<f64>;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> Option<f64>,
{
    fn score(&self, query: &str, candidate: &str) -> Option<f64> {
        self(query, candidate)
    }
}

/// Case-insensitive Levenshtein similarity normalized by query length.
#[derive(Debug, Clone, Copy)]
pub struct LevenshteinScorer {
    pub min_overlap_chars: usize,
}

impl LevenshteinScorer {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            min_overlap_chars: config.min_overlap_chars,
        }
    }
}

impl Scorer for LevenshteinScorer {
    fn score(&self, query: &str, candidate: &str) -> Option<f64> {
        let q = query.to_lowercase();
        let c = candidate.to_lowercase();
        let q_len = q.chars().count();
        if q_len == 0 {
            return None;
        }
        let dist = levenshtein(&q, &c);
        let overlap = q_len.saturating_sub(dist);
        if overlap < self.min_overlap_chars {
            return None;
        }
        Some((1.0 - dist as f64 / q_len as f64).max(0.0))
    }
}

/// The winning candidate and its similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate: Candidate,
    pub score: f64,
}

/// Score every candidate, best first. Ties keep generation order, so the
/// earliest window wins.
pub fn rank<S, I>(scorer: &S, query: &str, candidates: I) -> Vec<MatchResult>
where
    S: Scorer + ?Sized,
    I: IntoIterator<Item = Candidate>,
{
    let mut scored: Vec<MatchResult> = candidates
        .into_iter()
        .filter_map(|candidate| {
            scorer
                .score(query, &candidate.text)
                .map(|score| MatchResult { candidate, score })
        })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Outcome of ranking when nothing passes the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    NoCandidates,
    BelowThreshold {
        best_score: Option<f64>,
        candidates: usize,
    },
}

impl Rejection {
    /// Number of windows that were generated before the rejection.
    pub fn candidates(&self) -> usize {
        match self {
            Rejection::NoCandidates => 0,
            Rejection::BelowThreshold { candidates, .. } => *candidates,
        }
    }
}

/// Pick the top candidate if it reaches `min_score`.
pub fn best_match<S, I>(
    scorer: &S,
    query: &str,
    candidates: I,
    min_score: f64,
) -> Result<(MatchResult, usize), Rejection>
where
    S: Scorer + ?Sized,
    I: IntoIterator<Item = Candidate>,
{
    let mut seen = 0usize;
    let counted = candidates.into_iter().inspect(|_| seen += 1);
    let ranked = rank(scorer, query, counted);
    debug!(
        candidates = seen,
        scored = ranked.len(),
        best_score = ranked.first().map(|m| m.score),
        min_score,
        "candidates ranked"
    );
    if seen == 0 {
        return Err(Rejection::NoCandidates);
    }
    match ranked.into_iter().next() {
        Some(best) if best.score >= min_score => Ok((best, seen)),
        best => Err(Rejection::BelowThreshold {
            best_score: best.map(|m| m.score),
            candidates: seen,
        }),
    }
}

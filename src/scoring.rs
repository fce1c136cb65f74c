use std::fmt::Debug;

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

/// A single ranked result: document index and cosine similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    pub index: usize,
    pub score: f64,
}

/// Structure to store search results.
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Create a new Hits instance
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// Equal scores are ordered by ascending document index so the ranking
    /// is total and deterministic.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.index.cmp(&b.index))
        });
        self
    }

    /// Keep only the first `top_n` results.
    pub fn truncate(&mut self, top_n: usize) -> &mut Self {
        self.list.truncate(top_n);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {}: {:.6}", hit.index, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(self.list.iter()).finish()
        }
    }
}

/// Cosine similarity between two dense vectors given their squared norms.
/// A zero norm on either side yields 0.0 rather than NaN.
#[inline]
fn cosine(dot: f64, norm2_a: f64, norm2_b: f64) -> f64 {
    let denom = (norm2_a * norm2_b).sqrt();
    if denom > 0.0 {
        dot / denom
    } else {
        0.0
    }
}

/// Rank every row of `docs` against `query` by cosine similarity and return
/// the best `min(top_n, n_docs)` hits, scores descending, ties by ascending
/// row index.
///
/// # Arguments
/// * `query` - dense latent query vector, dimension k
/// * `docs` - dense document matrix, `n_docs` rows x k columns
/// * `top_n` - maximum number of hits to return
pub fn rank(query: &DVector<f64>, docs: &DMatrix<f64>, top_n: usize) -> Hits {
    let k = docs.ncols();
    debug_assert_eq!(query.len(), k);
    let query_norm2: f64 = query.iter().map(|v| v * v).sum();

    let scored: Vec<HitEntry> = (0..docs.nrows())
        .into_par_iter()
        .map(|i| {
            let row = docs.row(i);
            let mut dot = 0.0;
            let mut row_norm2 = 0.0;
            for j in 0..k {
                let d = row[j];
                dot += d * query[j];
                row_norm2 += d * d;
            }
            HitEntry {
                index: i,
                score: cosine(dot, query_norm2, row_norm2),
            }
        })
        .collect();

    let mut hits = Hits::new(scored);
    hits.sort_by_score().truncate(top_n);
    hits
}

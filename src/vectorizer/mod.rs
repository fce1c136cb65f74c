use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::utils::sparse::SparseVec;

/// TF-IDF vectorizer over a fixed vocabulary.
///
/// The vocabulary is selected once from a normalized corpus: the
/// `max_features` terms with the highest document frequency, ties broken by
/// ascending term so the fit is deterministic. Each retained term gets a
/// stable column index (selection order) and a smoothed IDF weight
/// `ln((1 + n_docs) / (1 + df)) + 1`.
///
/// [`TfidfVectorizer::fit`] is the only constructor, so a vectorizer that
/// has not been fitted cannot exist; `transform` is always safe to call.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> column index, in selection order
    vocab: IndexMap<Box<str>, u32>,
    /// IDF weight per column, aligned with `vocab`
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit a vocabulary and IDF weights from a normalized corpus.
    ///
    /// # Arguments
    /// * `docs` - normalized document texts (whitespace-separated tokens)
    /// * `max_features` - vocabulary size cap
    pub fn fit(docs: &[String], max_features: usize) -> Self {
        let n_docs = docs.len() as f64;

        // Document frequency per term
        let mut df: HashMap<Box<str>, u32> = HashMap::new();
        for doc in docs {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in doc.split_whitespace() {
                if seen.insert(token) {
                    *df.entry(Box::from(token)).or_insert(0) += 1;
                }
            }
        }

        // Keep the top `max_features` terms by document frequency.
        // Ties go to the lexicographically smaller term.
        let mut terms: Vec<(Box<str>, u32)> = df.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(max_features);

        let mut vocab = IndexMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (col, (term, doc_freq)) in terms.into_iter().enumerate() {
            vocab.insert(term, col as u32);
            idf.push(((1.0 + n_docs) / (1.0 + doc_freq as f64)).ln() + 1.0);
        }

        Self { vocab, idf }
    }

    /// Number of terms in the fitted vocabulary.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Column index of a term, if it survived vocabulary selection.
    pub fn column_of(&self, term: &str) -> Option<u32> {
        self.vocab.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.column_of(term).map(|col| self.idf[col as usize])
    }

    /// Convert a normalized text into an L2-normalized sparse TF-IDF vector.
    ///
    /// Out-of-vocabulary terms contribute nothing. A text with no
    /// in-vocabulary terms yields the zero vector (which stays zero rather
    /// than being normalized). The output dimension always equals the
    /// vocabulary size.
    pub fn transform(&self, normalized_text: &str) -> SparseVec<f64> {
        // BTreeMap keeps columns sorted, which SparseVec::push requires.
        let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
        for token in normalized_text.split_whitespace() {
            if let Some(&col) = self.vocab.get(token) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let mut vec = SparseVec::with_capacity(self.vocab_size(), counts.len());
        for (col, count) in counts {
            vec.push(col, count as f64 * self.idf[col as usize]);
        }
        vec.l2_normalize();
        vec
    }

    /// Transform every document of a normalized corpus, in parallel.
    /// Row order matches input order.
    pub fn transform_corpus(&self, docs: &[String]) -> Vec<SparseVec<f64>> {
        docs.par_iter().map(|doc| self.transform(doc)).collect()
    }
}

use std::time::Instant;

use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::BuildError;
use crate::lsa::{dense_from_rows, LsaReducer};
use crate::normalize::Normalizer;
use crate::scoring::rank;
use crate::vectorizer::TfidfVectorizer;

/// Number of results a plain [`SearchIndex::search`] returns.
pub const DEFAULT_TOP_N: usize = 5;

/// Build-time knobs for [`SearchIndex::build`].
#[derive(Debug, Clone, Copy)]
pub struct IndexConfig {
    /// Vocabulary size cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// Latent dimensionality k. Clamped to `min(n_docs, vocab_size)` at
    /// build time so small corpora still build.
    pub n_components: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            n_components: 100,
        }
    }
}

/// Ranked search results as parallel sequences, ordered by descending
/// similarity. Serializes to the wire shape
/// `{"documents": [...], "similarities": [...], "indices": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub similarities: Vec<f64>,
    pub indices: Vec<usize>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// In-memory latent semantic search index.
///
/// Built once from a corpus, then immutable: searches never mutate any
/// field, so a built index can be shared across threads (behind an `Arc`)
/// and queried concurrently without locking.
#[derive(Debug)]
pub struct SearchIndex {
    corpus: Vec<String>,
    normalizer: Normalizer,
    vectorizer: TfidfVectorizer,
    reducer: LsaReducer,
    /// n_docs x k latent document matrix, row i belongs to corpus\[i\].
    doc_matrix: DMatrix<f64>,
}

impl SearchIndex {
    /// Build an index over `corpus`. One-time, synchronous and blocking;
    /// the returned index is immediately ready for queries.
    ///
    /// Pipeline: normalize every document, fit the TF-IDF vectorizer, turn
    /// the corpus into a sparse term matrix, fit the SVD reducer and project
    /// the corpus into the latent space.
    pub fn build(
        corpus: Vec<String>,
        normalizer: Normalizer,
        config: IndexConfig,
    ) -> Result<Self, BuildError> {
        if corpus.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }

        let started = Instant::now();
        let normalized: Vec<String> = corpus
            .par_iter()
            .map(|doc| normalizer.normalize(doc))
            .collect();
        debug!(elapsed = ?started.elapsed(), "normalized corpus");

        let stage = Instant::now();
        let vectorizer = TfidfVectorizer::fit(&normalized, config.max_features);
        if vectorizer.vocab_size() == 0 {
            return Err(BuildError::EmptyVocabulary);
        }
        debug!(
            vocab_size = vectorizer.vocab_size(),
            elapsed = ?stage.elapsed(),
            "fitted vectorizer"
        );

        let stage = Instant::now();
        let rows = vectorizer.transform_corpus(&normalized);
        let term_matrix = dense_from_rows(&rows, vectorizer.vocab_size());
        debug!(elapsed = ?stage.elapsed(), "built term matrix");

        // Clamp k so a corpus smaller than the configured dimensionality
        // still builds; the reducer itself rejects anything out of range.
        let k = config
            .n_components
            .min(corpus.len())
            .min(vectorizer.vocab_size());
        let stage = Instant::now();
        let reducer = LsaReducer::fit(&term_matrix, k)?;
        let doc_matrix = reducer.transform_matrix(&term_matrix);
        debug!(k, elapsed = ?stage.elapsed(), "fitted reducer");

        info!(
            docs = corpus.len(),
            vocab_size = vectorizer.vocab_size(),
            components = k,
            elapsed = ?started.elapsed(),
            "search index built"
        );

        Ok(Self {
            corpus,
            normalizer,
            vectorizer,
            reducer,
            doc_matrix,
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Vocabulary size of the fitted vectorizer.
    pub fn vocab_size(&self) -> usize {
        self.vectorizer.vocab_size()
    }

    /// Latent dimensionality of the fitted reducer.
    pub fn n_components(&self) -> usize {
        self.reducer.n_components()
    }

    /// Search for the [`DEFAULT_TOP_N`] documents most similar to `query`.
    pub fn search(&self, query: &str) -> SearchResults {
        self.search_top(query, DEFAULT_TOP_N)
    }

    /// Search for the `top_n` documents most similar to `query`.
    ///
    /// Degenerate queries (empty after normalization, or entirely
    /// out-of-vocabulary) are not errors: they project to the zero vector
    /// and every document scores 0, ranked by index.
    pub fn search_top(&self, query: &str, top_n: usize) -> SearchResults {
        let normalized = self.normalizer.normalize(query);
        let sparse = self.vectorizer.transform(&normalized);
        let latent = self.reducer.transform(&sparse);
        let hits = rank(&latent, &self.doc_matrix, top_n);

        let mut results = SearchResults {
            documents: Vec::with_capacity(hits.len()),
            similarities: Vec::with_capacity(hits.len()),
            indices: Vec::with_capacity(hits.len()),
        };
        for hit in &hits.list {
            results.documents.push(self.corpus[hit.index].clone());
            results.similarities.push(hit.score);
            results.indices.push(hit.index);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn build(texts: &[&str]) -> SearchIndex {
        SearchIndex::build(corpus(texts), Normalizer::english(), IndexConfig::default())
            .expect("index should build")
    }

    #[test]
    fn empty_corpus_fails_to_build() {
        let err = SearchIndex::build(Vec::new(), Normalizer::english(), IndexConfig::default());
        assert!(matches!(err, Err(BuildError::EmptyCorpus)));
    }

    #[test]
    fn all_stopword_corpus_fails_with_empty_vocabulary() {
        let err = SearchIndex::build(
            corpus(&["the a an", "of and or", "..."]),
            Normalizer::english(),
            IndexConfig::default(),
        );
        assert!(matches!(err, Err(BuildError::EmptyVocabulary)));
    }

    #[test]
    fn single_document_corpus_answers_a_matching_query() {
        let index = build(&["the cat sat on the mat"]);
        assert_eq!(index.len(), 1);

        let results = index.search("cat");
        assert_eq!(results.len(), 1);
        assert_eq!(results.indices, vec![0]);
        assert_eq!(results.documents[0], "the cat sat on the mat");
        assert!(results.similarities[0] > 0.0);
    }

    #[test]
    fn empty_query_returns_finite_scores_for_min_of_five_and_corpus_len() {
        let small = build(&["cat sat mat", "dog ate bone", "bird flew away"]);
        let results = small.search("");
        assert_eq!(results.len(), 3);
        assert!(results.similarities.iter().all(|s| s.is_finite()));

        let larger = build(&[
            "cats purr loudly",
            "dogs bark loudly",
            "birds sing sweetly",
            "fish swim quietly",
            "horses gallop fast",
            "snakes slither silently",
            "rabbits hop quickly",
        ]);
        let results = larger.search("");
        assert_eq!(results.len(), 5);
        assert!(results.similarities.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn corpus_smaller_than_top_n_returns_all_documents() {
        let index = build(&["cat sat mat", "dog ate bone"]);
        let results = index.search("animal stories");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn search_ranks_the_topically_closest_document_first() {
        let index = build(&[
            "rust is a systems programming language focused on safety",
            "the stock market closed higher after strong earnings",
            "rust programs compile to fast native machine code",
            "gardening tips for growing tomatoes in small spaces",
        ]);
        let results = index.search("rust programming language");
        assert!(results.indices[0] == 0 || results.indices[0] == 2);
        // Both rust documents should outrank the unrelated ones.
        let rust_rank: Vec<usize> = results
            .indices
            .iter()
            .copied()
            .filter(|&i| i == 0 || i == 2)
            .collect();
        assert_eq!(rust_rank.len(), 2);
        assert_eq!(&results.indices[..2], rust_rank.as_slice());
    }

    #[test]
    fn results_are_ordered_by_non_increasing_similarity() {
        let index = build(&[
            "cats and kittens",
            "dogs and puppies",
            "cats chase mice",
            "weather forecast tomorrow",
            "kittens chase string",
            "puppies chew shoes",
        ]);
        let results = index.search("cats kittens mice");
        for pair in results.similarities.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        for &idx in &results.indices {
            assert!(idx < index.len());
        }
        for &sim in &results.similarities {
            assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&sim));
        }
    }

    #[test]
    fn identical_queries_return_identical_results() {
        let index = build(&[
            "alpha beta gamma",
            "beta gamma delta",
            "gamma delta epsilon",
            "delta epsilon zeta",
        ]);
        let first = index.search("gamma delta");
        for _ in 0..10 {
            let again = index.search("gamma delta");
            assert_eq!(first.indices, again.indices);
            assert_eq!(first.similarities, again.similarities);
            assert_eq!(first.documents, again.documents);
        }
    }

    #[test]
    fn components_are_clamped_for_small_corpora() {
        let index = build(&["cat sat mat", "dog ate bone", "bird flew away"]);
        // default n_components is 100, but only 3 documents exist
        assert!(index.n_components() <= 3);
        assert!(index.n_components() >= 1);
    }

    #[test]
    fn out_of_vocabulary_query_degenerates_gracefully() {
        let index = build(&["cat sat mat", "dog ate bone"]);
        let results = index.search("xylophone zeppelin");
        assert_eq!(results.len(), 2);
        assert!(results.similarities.iter().all(|s| s.is_finite()));
        // Zero query vector scores 0 against everything; ties resolve by index.
        assert_eq!(results.indices, vec![0, 1]);
    }

    #[test]
    fn results_serialize_to_the_wire_shape() {
        let index = build(&["cat sat mat"]);
        let json = serde_json::to_value(index.search("cat")).unwrap();
        assert!(json.get("documents").unwrap().is_array());
        assert!(json.get("similarities").unwrap().is_array());
        assert!(json.get("indices").unwrap().is_array());
    }
}

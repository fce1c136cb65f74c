use thiserror::Error;

/// Errors raised while building a [`crate::SearchIndex`].
///
/// All of these are fatal configuration problems: a process that hits one at
/// startup must not accept queries. Searching an already-built index never
/// fails.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The corpus contained no documents at all.
    #[error("corpus is empty, nothing to index")]
    EmptyCorpus,

    /// Every document normalized to the empty string, so no vocabulary
    /// could be selected.
    #[error("vocabulary is empty after normalization; the corpus may consist entirely of stopwords and punctuation")]
    EmptyVocabulary,

    /// The requested latent dimensionality cannot be learned from this
    /// term matrix.
    #[error("cannot reduce to {requested} components: expected 1..=min(document count {n_docs}, vocabulary size {vocab_size})")]
    InvalidComponents {
        requested: usize,
        n_docs: usize,
        vocab_size: usize,
    },
}

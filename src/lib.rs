/// This crate is a latent semantic search engine over a fixed document corpus.
pub mod error;
pub mod index;
pub mod lsa;
pub mod normalize;
pub mod scoring;
pub mod utils;
pub mod vectorizer;

/// Search Index
/// The top-level struct of this crate: it owns the corpus, the fitted
/// TF-IDF vectorizer, the fitted SVD reducer and the latent document
/// matrix, and answers free-text queries with the top-k most similar
/// documents.
///
/// Built exactly once with [`SearchIndex::build`]; afterwards every field
/// is immutable, so the index can be shared behind an `Arc` and queried
/// concurrently without locking.
pub use index::SearchIndex;

/// Build-time configuration for the index: vocabulary cap and latent
/// dimensionality. `Default` matches the demo setup (5000 features,
/// 100 components).
pub use index::{IndexConfig, SearchResults, DEFAULT_TOP_N};

/// Text Normalizer
/// Strips punctuation, lowercases and removes stopwords against a fixed
/// set. Ships with a built-in English list via [`Normalizer::english`].
pub use normalize::Normalizer;

/// TF-IDF Vectorizer
/// Fits a capped vocabulary with smoothed IDF weights from a normalized
/// corpus and converts any normalized text into an L2-normalized sparse
/// term vector. The only constructor is `fit`, so an unfitted vectorizer
/// cannot exist.
pub use vectorizer::TfidfVectorizer;

/// Latent Semantic Reducer
/// A truncated-SVD projection from term space into a k-dimensional latent
/// space, learned once from the corpus term matrix and applied identically
/// to documents and queries.
pub use lsa::LsaReducer;

/// Similarity ranking primitives
/// - `rank`: cosine similarity of a query against every document row,
///   top-n by descending score, ties by ascending index
/// - `Hits`: holds the ranked list
/// - `HitEntry`: a single result entry with document index and score
pub use scoring::{rank, HitEntry, Hits};

/// Build-time error taxonomy. Search itself is infallible.
pub use error::BuildError;

use std::collections::HashSet;

/// Built-in English stopword list, one word per line.
static ENGLISH_STOPWORDS: &str = include_str!("stopwords_en.txt");

/// Text normalizer: punctuation stripping, lowercasing, stopword removal.
///
/// The stopword set is fixed at construction. Normalization is idempotent:
/// applying it twice yields the same string as applying it once.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<Box<str>>,
}

impl Normalizer {
    /// Create a normalizer from an arbitrary stopword collection.
    /// Entries are lowercased so matching is case-insensitive.
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = stopwords
            .into_iter()
            .map(|w| w.as_ref().to_lowercase().into_boxed_str())
            .collect();
        Self { stopwords }
    }

    /// Normalizer with the built-in English stopword list.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOPWORDS.lines().filter(|l| !l.trim().is_empty()))
    }

    /// Number of stopwords in the set.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Normalize a text:
    /// 1. drop ASCII punctuation characters
    /// 2. split on whitespace
    /// 3. lowercase each token
    /// 4. drop stopwords
    /// 5. rejoin with single spaces
    ///
    /// Empty or all-stopword input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let stripped: String = text
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        let mut out = String::with_capacity(stripped.len());
        for token in stripped.split_whitespace() {
            let token = token.to_lowercase();
            if self.stopwords.contains(token.as_str()) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&token);
        }
        out
    }
}

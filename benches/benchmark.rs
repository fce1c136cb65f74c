use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lsa_search::{IndexConfig, Normalizer, SearchIndex};

/// Deterministic word-salad corpus (xorshift32), no external data needed.
fn synthetic_corpus(n_docs: usize, words_per_doc: usize) -> Vec<String> {
    const VOCAB: &[&str] = &[
        "engine", "vector", "matrix", "query", "document", "latent", "topic", "search", "model",
        "index", "corpus", "token", "weight", "space", "basis", "rank", "score", "term", "text",
        "cluster", "signal", "noise", "filter", "graph", "node", "edge", "cache", "batch",
        "stream", "shard", "merge", "probe", "table", "field", "record", "value",
    ];

    let mut state: u32 = 0x1234_5678;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    (0..n_docs)
        .map(|_| {
            let mut doc = String::new();
            for _ in 0..words_per_doc {
                if !doc.is_empty() {
                    doc.push(' ');
                }
                doc.push_str(VOCAB[next() as usize % VOCAB.len()]);
            }
            doc
        })
        .collect()
}

fn build_and_search_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(200, 40);
    let config = IndexConfig {
        max_features: 5000,
        n_components: 100,
    };

    c.bench_function("build_index_200_docs", |b| {
        b.iter(|| {
            SearchIndex::build(
                black_box(corpus.clone()),
                Normalizer::english(),
                config,
            )
            .expect("build")
        })
    });

    let index =
        SearchIndex::build(corpus, Normalizer::english(), config).expect("build");

    c.bench_function("search_top_5", |b| {
        b.iter(|| index.search(black_box("latent topic model for document search")))
    });
}

criterion_group!(benches, build_and_search_benchmark);
criterion_main!(benches);

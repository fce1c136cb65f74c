use lsa_search::{IndexConfig, Normalizer, SearchIndex};

fn main() {
    // build a tiny corpus
    let corpus = vec![
        "Rust is a systems programming language focused on memory safety".to_string(),
        "The borrow checker enforces ownership rules at compile time".to_string(),
        "Cats are small carnivorous mammals often kept as pets".to_string(),
        "Dogs were the first animal domesticated by humans".to_string(),
        "Parallel iterators make data parallel programming in Rust easy".to_string(),
    ];

    let index = SearchIndex::build(corpus, Normalizer::english(), IndexConfig::default())
        .expect("failed to build index");

    let results = index.search("safe parallel programming");

    // print result
    println!("Search Results:");
    for i in 0..results.len() {
        println!(
            "  #{} (doc {}, similarity {:.4}): {}",
            i + 1,
            results.indices[i],
            results.similarities[i],
            results.documents[i]
        );
    }
}

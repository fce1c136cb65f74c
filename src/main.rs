use std::fs;
use std::path::{Path, PathBuf};

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lsa_search::{IndexConfig, Normalizer, SearchIndex};

static INDEX_HTML: &str = include_str!("index.html");

/// Latent semantic document search demo server.
#[derive(Parser, Debug)]
#[command(name = "lsa-search", version, about)]
struct Args {
    /// Directory containing the corpus, one document per file
    corpus_dir: PathBuf,

    /// Stopword file, one word per line (built-in English list when omitted)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Vocabulary size cap for the TF-IDF vectorizer
    #[arg(long, default_value_t = 5000)]
    max_features: usize,

    /// Latent dimensionality of the SVD reduction
    #[arg(long, default_value_t = 100)]
    components: usize,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

#[actix_web::get("/")]
async fn index_page() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[actix_web::post("/search")]
async fn search(
    form: web::Form<SearchRequest>,
    index: web::Data<SearchIndex>,
) -> impl Responder {
    HttpResponse::Ok().json(index.search(&form.query))
}

/// Read every regular file in `dir` as one document, in lexicographic
/// filename order so document indices are stable across restarts.
fn load_corpus(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read corpus directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in &paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read document {}", path.display()))?;
        docs.push(text);
    }
    Ok(docs)
}

fn load_normalizer(path: Option<&Path>) -> anyhow::Result<Normalizer> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read stopword file {}", path.display()))?;
            Ok(Normalizer::new(
                text.lines().map(str::trim).filter(|l| !l.is_empty()),
            ))
        }
        None => Ok(Normalizer::english()),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let normalizer = load_normalizer(args.stopwords.as_deref())?;
    let corpus = load_corpus(&args.corpus_dir)?;
    info!(docs = corpus.len(), "corpus loaded");

    // Fatal on failure: the process must not accept queries without an index.
    let index = SearchIndex::build(
        corpus,
        normalizer,
        IndexConfig {
            max_features: args.max_features,
            n_components: args.components,
        },
    )?;
    let index = web::Data::new(index);

    info!(bind = %args.bind, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(index.clone())
            .service(index_page)
            .service(search)
    })
    .bind(&args.bind)?
    .run()
    .await?;

    Ok(())
}

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use movie_recommender::{Corpus, Index};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Content-based movie recommendations over a small corpus.
///
/// Loads the embedded sample dataset (or a CSV with title, genres and
/// description columns), builds a TF-IDF similarity index once, then
/// answers title queries either one-shot via --title or interactively.
#[derive(Debug, Parser)]
#[command(name = "movie-recommender", version)]
struct Args {
    /// CSV dataset to load instead of the embedded sample
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Run a single query for this title and exit
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Number of recommendations per query
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Print all corpus titles in alphabetical order and exit
    #[arg(long)]
    list: bool,

    /// Print genre frequency counts and exit
    #[arg(long)]
    genres: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // corpus problems at startup are fatal, nothing to serve without one
    let corpus = match &args.data {
        Some(path) => Corpus::from_csv_path(path)
            .with_context(|| format!("cannot load dataset {}", path.display()))?,
        None => Corpus::sample(),
    };
    info!(docs = corpus.len(), "corpus loaded");

    if args.list {
        for title in corpus.sorted_titles() {
            println!("{title}");
        }
        return Ok(());
    }
    if args.genres {
        for (tag, count) in corpus.tag_frequencies() {
            println!("{count}\t{tag}");
        }
        return Ok(());
    }

    let build_start = Instant::now();
    let index = Index::build(corpus);
    debug!(elapsed_ms = build_start.elapsed().as_millis() as u64, "index built");

    match args.title {
        Some(title) => run_single_query(&index, &title, args.top),
        None => run_interactive(&index, args.top)?,
    }
    Ok(())
}

fn run_single_query(index: &Index, title: &str, k: usize) {
    let hits = index.recommend(title, k);
    if hits.is_empty() {
        println!("No recommendations found for '{title}'.");
        return;
    }
    println!("Because you liked '{title}', you may also like:");
    print!("{hits}");
}

fn run_interactive(index: &Index, k: usize) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Title> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let title = line.trim();
        if title.is_empty()
            || title.eq_ignore_ascii_case("exit")
            || title.eq_ignore_ascii_case("quit")
        {
            break;
        }
        let query_start = Instant::now();
        let hits = index.recommend(title, k);
        debug!(elapsed_us = query_start.elapsed().as_micros() as u64, "query served");
        if hits.is_empty() {
            println!("No recommendations found for '{title}'.");
        } else {
            print!("{hits}");
        }
    }
    Ok(())
}

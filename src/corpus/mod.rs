use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LoadError;

/// The embedded sample dataset: ten well-known movies with pipe-delimited
/// genre tags and a one-line description each.
const SAMPLE_RECORDS: &[(&str, &str, &str)] = &[
    (
        "Inception",
        "Action|Sci-Fi",
        "A thief steals secrets through dream-sharing technology.",
    ),
    (
        "Interstellar",
        "Adventure|Drama|Sci-Fi",
        "Explorers travel through a wormhole in space.",
    ),
    (
        "The Matrix",
        "Action|Sci-Fi",
        "A hacker discovers the nature of his reality.",
    ),
    (
        "The Dark Knight",
        "Action|Crime|Drama",
        "Batman faces the Joker who causes chaos in Gotham.",
    ),
    (
        "Pulp Fiction",
        "Crime|Drama",
        "Mobsters, a boxer, and a gangster's wife in crime tales.",
    ),
    (
        "Forrest Gump",
        "Drama|Romance",
        "Life journey of a kind-hearted man with low IQ.",
    ),
    (
        "Fight Club",
        "Drama",
        "An office worker joins an underground fight club.",
    ),
    (
        "The Shawshank Redemption",
        "Drama",
        "Two imprisoned men bond and find redemption.",
    ),
    (
        "The Godfather",
        "Crime|Drama",
        "An aging crime boss transfers control to his son.",
    ),
    (
        "Parasite",
        "Thriller|Drama",
        "A poor family infiltrates a rich household.",
    ),
];

/// One raw input row, before validation.
///
/// Field names match the required CSV header columns: `title`, `genres`
/// (pipe-delimited tags) and `description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: String,
    pub genres: String,
    pub description: String,
}

/// A validated corpus entry.
///
/// `id` is the stable row index assigned at corpus build time; every derived
/// structure (term vectors, the similarity matrix) is indexed by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: usize,
    pub title: String,
    /// Genre tags in input order.
    pub tags: Vec<String>,
    pub description: String,
}

impl Document {
    /// The text the vectorizer sees: tags joined with spaces, then the
    /// description. Computed once per document since the corpus never
    /// changes after load.
    pub fn composite_text(&self) -> String {
        let mut text = self.tags.join(" ");
        text.push(' ');
        text.push_str(&self.description);
        text
    }
}

/// An ordered, immutable collection of validated documents.
///
/// Build it once at startup via [`Corpus::sample`], [`Corpus::from_csv_path`]
/// or [`Corpus::from_records`], then hand it to
/// [`Index::build`](crate::engine::Index::build). Document ids are positions
/// in this collection, so input order is preserved.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    by_title: IndexMap<String, usize>,
}

impl Corpus {
    /// Validate raw records into a corpus.
    ///
    /// Rows with an empty title, no usable tags or an empty description are
    /// dropped, as are rows whose title was already seen (first occurrence
    /// wins, keeping titles unique). The number of dropped rows is logged at
    /// `warn` when non-zero; dropping is not an error.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut corpus = Corpus::default();
        let mut dropped = 0usize;
        for record in records {
            let title = record.title.trim();
            let description = record.description.trim();
            let tags: Vec<String> = record
                .genres
                .split('|')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            if title.is_empty() || description.is_empty() || tags.is_empty() {
                dropped += 1;
                continue;
            }
            if corpus.by_title.contains_key(title) {
                dropped += 1;
                continue;
            }
            let id = corpus.docs.len();
            corpus.by_title.insert(title.to_string(), id);
            corpus.docs.push(Document {
                id,
                title: title.to_string(),
                tags,
                description: description.to_string(),
            });
        }
        if dropped > 0 {
            warn!(dropped, kept = corpus.docs.len(), "dropped invalid records during corpus build");
        }
        corpus
    }

    /// The embedded ten-movie sample dataset.
    pub fn sample() -> Self {
        Self::from_records(SAMPLE_RECORDS.iter().map(|&(title, genres, description)| RawRecord {
            title: title.to_string(),
            genres: genres.to_string(),
            description: description.to_string(),
        }))
    }

    /// Load a corpus from a CSV file with `title`, `genres` and
    /// `description` columns.
    ///
    /// An unreadable file, a malformed row or a missing column is fatal; so
    /// is a dataset with no valid rows left after validation. The engine
    /// must not run against an empty index.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut records = Vec::new();
        for row in reader.deserialize::<RawRecord>() {
            let record = row.map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            records.push(record);
        }
        let corpus = Self::from_records(records);
        if corpus.is_empty() {
            return Err(LoadError::EmptyCorpus {
                path: path.to_path_buf(),
            });
        }
        Ok(corpus)
    }

    /// Look up a document by exact title.
    pub fn get(&self, title: &str) -> Option<&Document> {
        self.by_title.get(title).map(|&id| &self.docs[id])
    }

    /// Document at row index `id`.
    pub fn doc(&self, id: usize) -> &Document {
        &self.docs[id]
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Iterate documents in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    /// All titles in alphabetical order, for selection controls.
    pub fn sorted_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.docs.iter().map(|doc| doc.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }

    /// Tag occurrence counts across the corpus, in order of first
    /// appearance. A reporting view over `Document::tags` only; the
    /// similarity engine does not consume it.
    pub fn tag_frequencies(&self) -> IndexMap<&str, usize> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for doc in &self.docs {
            for tag in &doc.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

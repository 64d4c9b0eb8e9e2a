/// This crate is a content-based movie recommendation engine.
///
/// It builds a TF-IDF similarity index over a small, immutable corpus of
/// movie records and answers nearest-neighbor queries by title: given a
/// movie the user liked, it returns the `k` most similar other movies by
/// cosine similarity over genre tags plus description text.
pub mod corpus;
pub mod engine;
pub mod error;
pub mod vectorizer;

/// Corpus of movie documents
/// An ordered, immutable collection of validated records, built once at
/// startup from the embedded sample dataset or a CSV file.
///
/// Document identity is positional: ids are stable row indices assigned at
/// build time, and every derived structure is indexed by them. Also provides
/// the reporting views the presentation layer needs (sorted titles, genre
/// frequency counts).
pub use corpus::{Corpus, Document, RawRecord};

/// Recommendation Index
/// The top-level struct of this crate. `Index::build` consumes a `Corpus`,
/// derives one TF-IDF vector per document and the full pairwise cosine
/// similarity matrix, then serves any number of `recommend` queries.
///
/// The index is read-only after `build` and safe to share across concurrent
/// readers without locking.
pub use engine::Index;

/// Search Hits and Hit structures
/// - `Hits`: the ordered recommendation list, best match first
/// - `Hit`: a single entry, a title and its similarity score
pub use engine::{Hit, Hits};

/// Fatal dataset errors
/// Raised only when no corpus can be produced at all; per-row validation
/// failures and unknown query titles are handled locally and never surface
/// as errors.
pub use error::LoadError;

/// Term Frequency structure
/// Per-document term occurrence counts, the base data for TF calculation.
pub use vectorizer::token::TermFrequency;

/// TF-IDF vector and vocabulary
/// `Vocabulary` maps terms to vector dimensions; `TermVector` is one
/// document's sparse non-negative TF-IDF weights with a cached norm.
pub use vectorizer::{TermVector, Vocabulary};

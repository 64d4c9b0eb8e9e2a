use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use crate::corpus::Corpus;
use crate::vectorizer::{build_vectors, TermVector, Vocabulary};

/// Dense, symmetric pairwise cosine similarity, stored row-major.
///
/// Entry `(i, j)` is the cosine similarity between document vectors `i` and
/// `j`, in [0, 1]. The diagonal is 1.0 for non-degenerate vectors and 0.0
/// for degenerate ones. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    fn build(vectors: &[TermVector]) -> Self {
        let n = vectors.len();
        let cells: Vec<f64> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                let row: Vec<f64> = (0..n)
                    .map(|j| {
                        if i == j {
                            // exact diagonal, no float round-trip
                            if vectors[i].is_degenerate() { 0.0 } else { 1.0 }
                        } else {
                            vectors[i].cosine(&vectors[j])
                        }
                    })
                    .collect();
                row
            })
            .collect();
        SimilarityMatrix { n, cells }
    }

    /// Number of documents (the matrix is `n` by `n`).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between documents `i` and `j`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    /// Row `i`: similarity of document `i` against every document.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
}

/// One recommendation: a title and its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub title: String,
    pub score: f64,
}

/// Ordered recommendation list, best match first.
#[derive(Debug, Clone, Default)]
pub struct Hits {
    pub list: Vec<Hit>,
}

impl Hits {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Titles in ranked order.
    pub fn titles(&self) -> Vec<&str> {
        self.list.iter().map(|hit| hit.title.as_str()).collect()
    }
}

impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{}. {} ({:.4})", rank + 1, hit.title, hit.score)?;
        }
        Ok(())
    }
}

/// The built recommendation index.
///
/// Owns the corpus, the vocabulary, one TF-IDF vector per document and the
/// full similarity matrix. Everything is computed once in [`Index::build`]
/// and read-only afterwards, so a single `Index` can be shared across any
/// number of concurrent readers without locking. A query before `build` is
/// unrepresentable: no `Index` value exists until `build` has run.
#[derive(Debug, Clone)]
pub struct Index {
    corpus: Corpus,
    vocabulary: Vocabulary,
    vectors: Vec<TermVector>,
    matrix: SimilarityMatrix,
}

impl Index {
    /// Vectorize every document and compute the pairwise similarity matrix.
    ///
    /// O(N·V) for vectorization and O(N²·V) for the matrix; matrix rows are
    /// computed in parallel.
    pub fn build(corpus: Corpus) -> Self {
        let (vocabulary, vectors) = build_vectors(&corpus);
        let matrix = SimilarityMatrix::build(&vectors);
        debug!(
            docs = corpus.len(),
            vocab = vocabulary.len(),
            "built similarity index"
        );
        Index {
            corpus,
            vocabulary,
            vectors,
            matrix,
        }
    }

    /// Top `k` most similar titles to `title`, excluding `title` itself.
    ///
    /// An unknown title yields an empty result; the caller is expected to
    /// check for it and show a "not found" message. Otherwise scores come
    /// from the query document's matrix row: the query document is skipped
    /// by row index (not by score, so duplicate maximal scores among other
    /// documents survive), the rest sort descending by score with ties kept
    /// in corpus order, and the first `k` remain. The result holds
    /// `min(k, N - 1)` entries.
    pub fn recommend(&self, title: &str, k: usize) -> Hits {
        let Some(doc) = self.corpus.get(title) else {
            debug!(title, "query title not in corpus");
            return Hits::default();
        };
        let row = self.matrix.row(doc.id);
        let mut list: Vec<Hit> = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != doc.id)
            .map(|(j, &score)| Hit {
                title: self.corpus.doc(j).title.clone(),
                score,
            })
            .collect();
        // stable sort: equal scores keep corpus order
        list.sort_by(|a, b| b.score.total_cmp(&a.score));
        list.truncate(k);
        Hits { list }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// TF-IDF vector of document `id`.
    pub fn vector(&self, id: usize) -> &TermVector {
        &self.vectors[id]
    }

    /// Pairwise similarity of documents `i` and `j`.
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        self.matrix.at(i, j)
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawRecord;

    fn corpus_of(rows: &[(&str, &str, &str)]) -> Corpus {
        Corpus::from_records(rows.iter().map(|&(title, genres, description)| RawRecord {
            title: title.to_string(),
            genres: genres.to_string(),
            description: description.to_string(),
        }))
    }

    fn sample_index() -> Index {
        Index::build(Corpus::sample())
    }

    #[test]
    fn recommend_never_returns_the_query_title() {
        let index = sample_index();
        for doc in index.corpus().iter() {
            let hits = index.recommend(&doc.title, 5);
            assert!(
                hits.titles().iter().all(|&t| t != doc.title),
                "{} recommended itself",
                doc.title
            );
        }
    }

    #[test]
    fn recommend_returns_min_of_k_and_corpus_size_minus_one() {
        let index = sample_index();
        let n = index.corpus().len();
        for doc in index.corpus().iter() {
            assert_eq!(index.recommend(&doc.title, 5).len(), 5.min(n - 1));
            assert_eq!(index.recommend(&doc.title, 100).len(), n - 1);
            assert_eq!(index.recommend(&doc.title, 0).len(), 0);
        }
    }

    #[test]
    fn recommend_is_deterministic() {
        let index = sample_index();
        let first = index.recommend("Inception", 5);
        for _ in 0..10 {
            let again = index.recommend("Inception", 5);
            assert_eq!(again.list, first.list);
        }
    }

    #[test]
    fn unknown_title_yields_empty_hits() {
        let index = sample_index();
        let hits = index.recommend("Nonexistent Title", 5);
        assert!(hits.is_empty());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let index = sample_index();
        let n = index.corpus().len();
        assert_eq!(index.matrix().len(), n);
        assert!(!index.matrix().is_empty());
        for i in 0..n {
            assert_eq!(index.similarity(i, i), 1.0);
            for j in 0..n {
                assert_eq!(index.similarity(i, j), index.similarity(j, i));
                assert!(index.similarity(i, j) >= 0.0);
                assert!(index.similarity(i, j) <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn degenerate_document_has_zero_diagonal() {
        let index = Index::build(corpus_of(&[
            ("Stop Words Only", "Or|And", "The of a an to."),
            ("Real", "Drama", "Two imprisoned men bond."),
            ("Also Real", "Drama", "An office worker joins a club."),
        ]));
        assert!(index.vector(0).is_degenerate());
        assert_eq!(index.similarity(0, 0), 0.0);
        assert_eq!(index.similarity(0, 1), 0.0);
        // a degenerate document still shows up in results, scored 0.0
        let hits = index.recommend("Real", 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn ties_preserve_corpus_order() {
        // B and C are identical, so both score the same against A; the
        // stable sort must keep B before C
        let index = Index::build(corpus_of(&[
            ("A", "Action", "thief steals secrets"),
            ("B", "Action", "hacker discovers reality"),
            ("C", "Action", "hacker discovers reality"),
        ]));
        let hits = index.recommend("A", 2);
        assert_eq!(hits.titles(), vec!["B", "C"]);
    }

    #[test]
    fn duplicate_maximal_scores_survive_self_exclusion() {
        // B duplicates A exactly, so similarity(A, B) == 1.0, tied with the
        // self score; excluding by index must keep B in first place
        let index = Index::build(corpus_of(&[
            ("A", "Action|Sci-Fi", "A hacker discovers reality."),
            ("B", "Action|Sci-Fi", "A hacker discovers reality."),
            ("C", "Drama", "Two imprisoned men bond."),
        ]));
        let hits = index.recommend("A", 2);
        assert_eq!(hits.titles()[0], "B");
        assert!((hits.list[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inception_scenario_ranks_shared_tags_above_disjoint_documents() {
        let index = sample_index();
        let hits = index.recommend("Inception", 5);
        assert_eq!(hits.len(), 5);
        let titles = hits.titles();
        assert!(!titles.contains(&"Inception"));
        // scores are in descending order
        assert!(hits
            .list
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        // "The Matrix" and "Interstellar" share the Sci-Fi tag with
        // "Inception"; documents with no vocabulary overlap score 0 and
        // must rank below both
        let pos = |title: &str| {
            index
                .recommend("Inception", 9)
                .titles()
                .iter()
                .position(|&t| t == title)
                .unwrap()
        };
        let matrix = pos("The Matrix");
        let interstellar = pos("Interstellar");
        for disjoint in ["Forrest Gump", "The Shawshank Redemption", "Parasite"] {
            assert!(matrix < pos(disjoint));
            assert!(interstellar < pos(disjoint));
        }
    }
}

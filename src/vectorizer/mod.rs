pub mod stopwords;
pub mod token;

use indexmap::IndexSet;

use crate::corpus::Corpus;
use crate::vectorizer::token::TermFrequency;

/// The corpus vocabulary: every term that survived tokenization, mapped to
/// its vector dimension.
///
/// Dimensions are assigned in first-seen order across the corpus scan, so
/// the mapping is deterministic for a fixed corpus. Stop-words never enter
/// the vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: IndexSet<String>,
}

impl Vocabulary {
    /// Dimension index of `term`, if it is in the vocabulary.
    pub fn dim_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at dimension `dim`.
    pub fn term_at(&self, dim: usize) -> Option<&str> {
        self.terms.get_index(dim).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Sparse TF-IDF weighted vector for one document.
///
/// Entries are `(dimension, weight)` pairs sorted by dimension, weights are
/// non-negative. The Euclidean norm is cached at build time; a zero norm
/// marks a degenerate vector (composite text produced no vocabulary terms).
#[derive(Debug, Clone)]
pub struct TermVector {
    weights: Vec<(usize, f64)>,
    norm: f64,
}

impl TermVector {
    fn from_weights(mut weights: Vec<(usize, f64)>) -> Self {
        weights.sort_unstable_by_key(|&(dim, _)| dim);
        let norm = weights.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        TermVector { weights, norm }
    }

    /// Number of non-zero dimensions.
    pub fn nnz(&self) -> usize {
        self.weights.len()
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// True when no vocabulary term survived for this document.
    pub fn is_degenerate(&self) -> bool {
        self.norm == 0.0
    }

    /// Iterate `(dimension, weight)` pairs in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights.iter().copied()
    }

    /// Weight at `dim`, 0.0 if absent.
    pub fn weight(&self, dim: usize) -> f64 {
        self.weights
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|pos| self.weights[pos].1)
            .unwrap_or(0.0)
    }

    /// Sparse dot product over the sorted entries.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let mut a = self.weights.iter().peekable();
        let mut b = other.weights.iter().peekable();
        let mut dot = 0.0;
        while let (Some(&&(ia, va)), Some(&&(ib, vb))) = (a.peek(), b.peek()) {
            match ia.cmp(&ib) {
                std::cmp::Ordering::Equal => {
                    dot += va * vb;
                    a.next();
                    b.next();
                }
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
            }
        }
        dot
    }

    /// Cosine similarity, bounded to [0, 1] for non-negative weights.
    ///
    /// Defined as 0.0 when either vector is degenerate; the division is
    /// guarded explicitly so no NaN can propagate into the matrix.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}

/// Build the vocabulary and one TF-IDF vector per document.
///
/// TF is the term count scaled by the document's total term count. IDF is
/// the smoothed form `ln((1 + n) / (1 + df)) + 1`, which never reaches zero
/// and never divides by zero. Pure function of the corpus: fixed stop-word
/// list plus fixed tokenization make the output deterministic.
pub fn build_vectors(corpus: &Corpus) -> (Vocabulary, Vec<TermVector>) {
    let freqs: Vec<TermFrequency> = corpus
        .iter()
        .map(|doc| TermFrequency::from_text(&doc.composite_text()))
        .collect();

    // vocabulary and per-term document frequency in one scan
    let mut terms: IndexSet<String> = IndexSet::new();
    let mut doc_freq: Vec<u64> = Vec::new();
    for freq in &freqs {
        for (term, _) in freq.iter() {
            let (dim, inserted) = terms.insert_full(term.to_string());
            if inserted {
                doc_freq.push(0);
            }
            doc_freq[dim] += 1;
        }
    }

    let doc_num = corpus.len() as f64;
    let idf: Vec<f64> = doc_freq
        .iter()
        .map(|&df| ((1.0 + doc_num) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let vocabulary = Vocabulary { terms };
    let vectors: Vec<TermVector> = freqs
        .iter()
        .map(|freq| {
            let total = freq.term_sum() as f64;
            let weights: Vec<(usize, f64)> = freq
                .iter()
                .filter_map(|(term, count)| {
                    // every term is in the vocabulary built over the same scan
                    let dim = vocabulary.dim_of(term)?;
                    let tf = count as f64 / total;
                    Some((dim, tf * idf[dim]))
                })
                .collect();
            TermVector::from_weights(weights)
        })
        .collect();

    (vocabulary, vectors)
}

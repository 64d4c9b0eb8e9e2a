use std::path::PathBuf;

use thiserror::Error;

/// Fatal dataset problems.
///
/// Only conditions that leave the engine without a corpus are errors.
/// Invalid individual rows are filtered during validation, an unknown query
/// title yields an empty hit list and a degenerate document vector scores
/// 0.0; none of those surface here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("dataset {path} contains no usable records")]
    EmptyCorpus { path: PathBuf },
}

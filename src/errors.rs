//src/errors.rs

/// Everything that can go wrong while assigning consensus taxonomy.
///
/// None of these are transient: inputs are fully materialized before any
/// processing starts and the computation is deterministic, so an error is
/// always reproducible and never worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum UcTaxError {
    /// The consensus threshold must lie in (0.5, 1.0]. A threshold above
    /// one half is what guarantees at most one label can win a level, so
    /// this is checked before any candidate is touched.
    #[error("min consensus fraction {0} out of range: must be in (0.5, 1.0]")]
    InvalidConsensusFraction(f64),

    /// A data line in the .uc input had too few columns to carry a record
    /// kind, query id and target id. Never skipped silently: a dropped
    /// record would corrupt per-query hit counts.
    #[error("malformed uc record at line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },

    /// A taxonomy map line without the `id<TAB>lineage` shape.
    #[error("malformed taxonomy entry at line {line}: {content:?}")]
    MalformedTaxonomy { line: usize, content: String },

    /// A hit record names a target the reference map does not know. This
    /// is distinct from a no-hit and must never be conflated with one;
    /// it aborts the batch so reported hit counts stay trustworthy.
    #[error("query {query}: target {target} not found in the reference taxonomy")]
    UnresolvedTarget { query: String, target: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

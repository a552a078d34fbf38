//src/types.rs

use ahash::AHashMap;

/// A taxonomic lineage, ordered root-to-leaf (e.g. domain .. species).
/// An empty lineage is the "no hit" placeholder.
pub type Lineage = Vec<String>;

/// Reference map: target sequence id -> known lineage.
/// Built once before resolution and treated as read-only afterwards.
pub type TaxonomyMap = AHashMap<String, Lineage>;

/// One parsed line of uclust/usearch `.uc` output.
///
/// Only hit (`H`) and no-hit (`N`) records carry a classification decision
/// for a query sequence. Seed and cluster-summary records (`S`, `C`, ...)
/// are recognized but deliberately ignored; the catch-all variant keeps
/// that an explicit branch rather than a forgotten default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UcRecord {
    /// Query matched a reference sequence.
    Hit { query: String, target: String },
    /// Query matched nothing (target column is the `*` placeholder).
    NoHit { query: String },
    /// Any other record kind.
    Ignored,
}

/// Consensus assignment for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusAssignment {
    /// The agreed lineage prefix, or `[unassigned_label]` when no level
    /// reached the required support.
    pub lineage: Lineage,
    /// Fraction of all candidates matching `lineage` through its full
    /// length. Always > 0.5, except 1.0 by convention for the unassigned
    /// sentinel.
    pub fraction: f64,
    /// Number of candidate lineages observed for the query, counting
    /// no-hit placeholders.
    pub hit_count: usize,
}

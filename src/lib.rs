// src/lib.rs
pub mod aggregate;
pub mod consensus;
pub mod errors;
pub mod resolver;
pub mod taxmap;
pub mod types;
pub mod uc_parser;

use std::fmt::Write as FmtWrite;
use std::path::Path;

pub use crate::aggregate::{assign_consensus, assign_consensus_parallel};
pub use crate::consensus::compute_consensus;
pub use crate::errors::UcTaxError;
pub use crate::resolver::{collect_candidates, CandidateMap};
pub use crate::taxmap::read_taxonomy_map;
pub use crate::types::{ConsensusAssignment, Lineage, TaxonomyMap, UcRecord};
pub use crate::uc_parser::{parse_uc_records, read_uc_records};

/// Default consensus threshold; slightly above the tie-free minimum.
pub const DEFAULT_MIN_CONSENSUS_FRACTION: f64 = 0.51;
/// Default label reported when no consensus can be established.
pub const DEFAULT_UNASSIGNED_LABEL: &str = "Unassigned";

/// Consensus assignments for a whole run, in first-seen query order.
/// Only structured data is stored; text is generated on demand.
pub struct AssignmentResults {
    pub assignments: Vec<(String, ConsensusAssignment)>,
}

impl AssignmentResults {
    /// Render the assignment table on demand:
    /// query, lineage (`"; "`-joined), support fraction, hit count.
    pub fn render_tsv(&self) -> String {
        let mut output = String::new();
        for (query, assignment) in &self.assignments {
            writeln!(
                output,
                "{}\t{}\t{:.4}\t{}",
                query,
                assignment.lineage.join("; "),
                assignment.fraction,
                assignment.hit_count
            )
            .unwrap();
        }
        output
    }
}

/// End-to-end consensus taxonomy assignment from files on disk.
pub fn assign_taxonomy(
    uc_path: impl AsRef<Path>,
    taxonomy_path: impl AsRef<Path>,
    min_fraction: f64,
    unassigned_label: &str,
) -> Result<AssignmentResults, UcTaxError> {
    // 1. Load the reference taxonomy map
    let taxonomy = read_taxonomy_map(taxonomy_path)?;
    log::info!("Loaded {} reference lineages", taxonomy.len());

    // 2. Parse the cluster-search records
    let records = read_uc_records(uc_path)?;
    log::info!("Parsed {} uc records", records.len());

    // 3. Resolve records into per-query candidate lists
    let candidates = collect_candidates(&records, &taxonomy)?;
    log::info!("Resolved candidates for {} queries", candidates.len());

    // 4. Per-query consensus, parallel over queries
    let assignments = assign_consensus_parallel(&candidates, min_fraction, unassigned_label)?;

    Ok(AssignmentResults { assignments })
}

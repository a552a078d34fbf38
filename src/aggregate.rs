//src/aggregate.rs

use rayon::prelude::*;

use crate::consensus::{compute_consensus, validate_min_fraction};
use crate::errors::UcTaxError;
use crate::resolver::CandidateMap;
use crate::types::ConsensusAssignment;

/// Run the consensus engine over every query, in first-seen query order.
///
/// `hit_count` is the full candidate list length for the query, counting
/// no-hit placeholders as one observation each.
pub fn assign_consensus(
    candidates: &CandidateMap,
    min_fraction: f64,
    unassigned_label: &str,
) -> Result<Vec<(String, ConsensusAssignment)>, UcTaxError> {
    // Fail on a bad threshold before any per-query work.
    validate_min_fraction(min_fraction)?;

    let mut assignments = Vec::with_capacity(candidates.len());
    for (query, list) in candidates.iter() {
        let (lineage, fraction) = compute_consensus(list, min_fraction, unassigned_label)?;
        assignments.push((
            query.to_string(),
            ConsensusAssignment {
                lineage,
                fraction,
                hit_count: list.len(),
            },
        ));
    }
    Ok(assignments)
}

/// Parallel variant of [`assign_consensus`].
///
/// Each query's computation is independent and reads only immutable
/// state, so queries are mapped on the rayon pool with one result slot
/// per query; the collected output keeps the same first-seen order as
/// the sequential form and is bit-identical to it.
pub fn assign_consensus_parallel(
    candidates: &CandidateMap,
    min_fraction: f64,
    unassigned_label: &str,
) -> Result<Vec<(String, ConsensusAssignment)>, UcTaxError> {
    validate_min_fraction(min_fraction)?;

    candidates
        .entries()
        .par_iter()
        .map(|(query, list)| -> Result<(String, ConsensusAssignment), UcTaxError> {
            let (lineage, fraction) = compute_consensus(list, min_fraction, unassigned_label)?;
            Ok((
                query.clone(),
                ConsensusAssignment {
                    lineage,
                    fraction,
                    hit_count: list.len(),
                },
            ))
        })
        .collect()
}

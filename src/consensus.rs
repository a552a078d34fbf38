//src/consensus.rs

use ahash::AHashMap;

use crate::errors::UcTaxError;
use crate::types::Lineage;

/// Check a consensus threshold up front, before any candidate is touched.
///
/// The open-closed interval (0.5, 1.0] is a correctness requirement, not a
/// style choice: with the threshold strictly above one half, at most one
/// label can ever reach it at a given level, so no tie-breaking rule can
/// influence the result.
pub fn validate_min_fraction(min_fraction: f64) -> Result<(), UcTaxError> {
    if min_fraction > 0.5 && min_fraction <= 1.0 {
        Ok(())
    } else {
        Err(UcTaxError::InvalidConsensusFraction(min_fraction))
    }
}

/// Compute the consensus lineage for one query's candidates.
///
/// Walks the lineages level by level from the root. At each level the
/// most common label among the candidates still matching the accumulated
/// prefix is tested: the fraction of *all* candidates whose lineage starts
/// with prefix + that label must reach `min_fraction` (inclusive; the
/// fraction is an integer count over the total, so `>=` lets exact
/// boundary ratios succeed). The walk stops at the first failing level
/// and returns the last accepted prefix with its fraction.
///
/// The fraction is monotonically non-increasing across levels because a
/// longer exact-prefix requirement can only be met by fewer candidates.
///
/// Returns `([unassigned_label], 1.0)` when nothing can be established:
/// any empty candidate (a no-hit placeholder) caps the walk depth at zero,
/// and a root-level disagreement leaves no prefix at all. The 1.0 there is
/// a sentinel convention, not a measured support.
pub fn compute_consensus(
    candidates: &[Lineage],
    min_fraction: f64,
    unassigned_label: &str,
) -> Result<(Lineage, f64), UcTaxError> {
    validate_min_fraction(min_fraction)?;

    let total = candidates.len();
    // The shallowest candidate caps how deep any consensus can go.
    let max_depth = candidates.iter().map(|l| l.len()).min().unwrap_or(0);
    if max_depth == 0 {
        return Ok((vec![unassigned_label.to_string()], 1.0));
    }

    let mut consensus: Lineage = Vec::with_capacity(max_depth);
    let mut consensus_fraction = 1.0;

    for level in 0..max_depth {
        // Tally labels at this level among candidates that still match
        // the accumulated prefix exactly.
        let mut tally: AHashMap<&str, usize> = AHashMap::new();
        for candidate in candidates {
            if candidate.starts_with(&consensus) {
                *tally.entry(candidate[level].as_str()).or_insert(0) += 1;
            }
        }

        // A tie for the max cannot clear a >0.5 threshold, but break it
        // by label anyway so the scan never depends on map order.
        let Some((winner, count)) = tally
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        else {
            break;
        };

        // Count of candidates matching prefix + winner, over the
        // *original* total, never the filtered subset size.
        let fraction = count as f64 / total as f64;
        if fraction >= min_fraction {
            consensus.push(winner.to_string());
            consensus_fraction = fraction;
        } else if level == 0 {
            // No level was ever established.
            return Ok((vec![unassigned_label.to_string()], 1.0));
        } else {
            // Stop here; deeper levels cannot rescue a failed one.
            break;
        }
    }

    Ok((consensus, consensus_fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNASSIGNED: &str = "Unassigned";

    fn lineages(input: &[&[&str]]) -> Vec<Lineage> {
        input
            .iter()
            .map(|labels| labels.iter().map(|l| l.to_string()).collect())
            .collect()
    }

    #[test]
    fn agreement_down_to_a_branch_point() {
        let candidates = lineages(&[
            &["Ab", "Bc", "De"],
            &["Ab", "Bc", "Fg", "Hi"],
            &["Ab", "Bc", "Fg", "Jk"],
        ]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.51, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec!["Ab", "Bc", "Fg"]);
        assert_eq!(fraction, 2.0 / 3.0);
    }

    #[test]
    fn stricter_threshold_keeps_a_shorter_prefix() {
        let candidates = lineages(&[
            &["Ab", "Bc", "De"],
            &["Ab", "Bc", "Fg", "Hi"],
            &["Ab", "Bc", "Fg", "Jk"],
        ]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.99, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec!["Ab", "Bc"]);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn root_level_disagreement_is_unassigned() {
        let candidates = lineages(&[
            &["Ab", "Bc", "De"],
            &["Cd", "Bc", "Fg", "Hi"],
            &["Ef", "Bc", "Fg", "Jk"],
        ]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.51, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec![UNASSIGNED]);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn minority_branches_are_filtered_out_along_the_walk() {
        let candidates = lineages(&[
            &["a", "b", "c"],
            &["a", "d", "e"],
            &["a", "b", "c"],
            &["a", "b", "c"],
            &["z", "y", "c"],
        ]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.51, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec!["a", "b", "c"]);
        assert_eq!(fraction, 0.6);
    }

    #[test]
    fn single_candidate_is_its_own_consensus() {
        let candidates = lineages(&[&["A", "B", "C", "D"]]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.51, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec!["A", "B", "C", "D"]);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn any_empty_candidate_forces_the_sentinel() {
        let candidates = lineages(&[&["A", "B", "C"], &[], &["A", "B", "C"]]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.51, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec![UNASSIGNED]);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn consensus_never_exceeds_the_shallowest_candidate() {
        let candidates = lineages(&[
            &["A", "B"],
            &["A", "B", "C", "D"],
            &["A", "B", "C", "E"],
        ]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.51, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec!["A", "B"]);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn exact_boundary_fraction_succeeds() {
        // 3 of 4 candidates agree on the full prefix: 0.75 == threshold.
        let candidates = lineages(&[
            &["A", "B"],
            &["A", "B"],
            &["A", "B"],
            &["A", "X"],
        ]);
        let (consensus, fraction) = compute_consensus(&candidates, 0.75, UNASSIGNED).unwrap();
        assert_eq!(consensus, vec!["A", "B"]);
        assert_eq!(fraction, 0.75);
    }

    #[test]
    fn out_of_range_thresholds_are_rejected() {
        let candidates = lineages(&[&["A", "B"]]);
        for bad in [0.5, 0.4, 0.0, -1.0, 1.01, 2.0] {
            let err = compute_consensus(&candidates, bad, UNASSIGNED).unwrap_err();
            assert!(
                matches!(err, UcTaxError::InvalidConsensusFraction(f) if f == bad),
                "expected InvalidConsensusFraction for {bad}"
            );
        }
        // 1.0 is the inclusive upper bound.
        assert!(compute_consensus(&candidates, 1.0, UNASSIGNED).is_ok());
    }

    #[test]
    fn threshold_is_checked_before_the_candidates() {
        // Even an empty candidate list must not mask a bad threshold.
        let err = compute_consensus(&[], 0.3, UNASSIGNED).unwrap_err();
        assert!(matches!(err, UcTaxError::InvalidConsensusFraction(_)));
    }
}

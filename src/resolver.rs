//src/resolver.rs

use ahash::AHashMap;

use crate::errors::UcTaxError;
use crate::types::{Lineage, TaxonomyMap, UcRecord};

/// Insertion-ordered mapping from query id to its candidate lineages.
///
/// Queries keep first-seen order and each query's candidates keep stream
/// order, so a run over the same input always iterates identically. A
/// plain hash map would not give reproducible iteration.
#[derive(Debug, Default)]
pub struct CandidateMap {
    entries: Vec<(String, Vec<Lineage>)>,
    index: AHashMap<String, usize>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one candidate lineage for `query`, creating its list on
    /// first sight.
    pub fn push(&mut self, query: &str, lineage: Lineage) {
        match self.index.get(query) {
            Some(&slot) => self.entries[slot].1.push(lineage),
            None => {
                self.index.insert(query.to_string(), self.entries.len());
                self.entries.push((query.to_string(), vec![lineage]));
            }
        }
    }

    pub fn get(&self, query: &str) -> Option<&[Lineage]> {
        self.index
            .get(query)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// Number of distinct queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate queries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Lineage])> {
        self.entries
            .iter()
            .map(|(query, candidates)| (query.as_str(), candidates.as_slice()))
    }

    /// Ordered backing slice, for parallel iteration.
    pub fn entries(&self) -> &[(String, Vec<Lineage>)] {
        &self.entries
    }
}

/// Build per-query candidate lists from a parsed record stream.
///
/// No-hit records contribute one empty lineage; hit records contribute a
/// copy of the target's reference lineage (copied so candidate lists never
/// alias the reference map's storage). A hit whose target the reference
/// map does not know aborts resolution: it is a disagreement between the
/// reference set and the search results, not a no-hit.
pub fn collect_candidates(
    records: &[UcRecord],
    taxonomy: &TaxonomyMap,
) -> Result<CandidateMap, UcTaxError> {
    let mut candidates = CandidateMap::new();

    for record in records {
        match record {
            UcRecord::NoHit { query } => candidates.push(query, Lineage::new()),
            UcRecord::Hit { query, target } => match taxonomy.get(target) {
                Some(lineage) => candidates.push(query, lineage.clone()),
                None => {
                    return Err(UcTaxError::UnresolvedTarget {
                        query: query.clone(),
                        target: target.clone(),
                    })
                }
            },
            UcRecord::Ignored => {}
        }
    }
    Ok(candidates)
}

//src/taxmap.rs

use std::io::BufRead;
use std::path::Path;

use crate::errors::UcTaxError;
use crate::types::{Lineage, TaxonomyMap};
use crate::uc_parser::open_maybe_gz;

/// Parses a reference taxonomy file in the conventional format:
/// ```text
/// <seq_id>\t<label>; <label>; <label>; ...
/// ```
/// e.g. `r2\tk__Bacteria; p__Firmicutes; c__Bacilli`
///
/// Labels are trimmed of surrounding whitespace and kept in file order
/// (root first). Blank lines are allowed; a line without a tab is an
/// error rather than a silent skip.
pub fn parse_taxonomy_map<R: BufRead>(reader: R) -> Result<TaxonomyMap, UcTaxError> {
    let mut map = TaxonomyMap::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let Some((id, lineage_str)) = line.split_once('\t') else {
            return Err(UcTaxError::MalformedTaxonomy {
                line: idx + 1,
                content: line.to_string(),
            });
        };

        let lineage: Lineage = lineage_str
            .split(';')
            .map(|label| label.trim().to_string())
            .collect();
        map.insert(id.trim().to_string(), lineage);
    }
    Ok(map)
}

/// Read a taxonomy map from a file, transparently handling .gz input.
pub fn read_taxonomy_map<P: AsRef<Path>>(path: P) -> Result<TaxonomyMap, UcTaxError> {
    let reader = open_maybe_gz(path.as_ref())?;
    parse_taxonomy_map(reader)
}

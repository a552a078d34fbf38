//src/uc_parser.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::UcTaxError;
use crate::types::UcRecord;

/// Lines starting with this are uclust metadata headers.
const COMMENT_MARKER: char = '#';
/// Target column value on no-hit records.
const NO_TARGET: &str = "*";
/// A record needs at least kind, query and target columns. Real .uc files
/// carry 10 columns; query and target are always the last two.
const MIN_UC_COLUMNS: usize = 3;

/// Parse one line of .uc output.
///
/// Returns `Ok(None)` for comment lines. Data lines with fewer than
/// [`MIN_UC_COLUMNS`] tab-separated columns are an error, not skipped:
/// losing a record would corrupt downstream hit counts.
pub fn parse_uc_line(line: &str, line_number: usize) -> Result<Option<UcRecord>, UcTaxError> {
    if line.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_UC_COLUMNS {
        return Err(UcTaxError::MalformedRecord {
            line: line_number,
            content: line.to_string(),
        });
    }

    // Fields are positional: kind in column 0, query and target in the
    // last two columns.
    let query = fields[fields.len() - 2];
    let target = fields[fields.len() - 1];

    let record = match fields[0] {
        "N" if target == NO_TARGET => UcRecord::NoHit {
            query: query.to_string(),
        },
        "H" => UcRecord::Hit {
            query: query.to_string(),
            target: target.to_string(),
        },
        // Seed (S), cluster summary (C) and friends carry no
        // classification decision for a query.
        _ => UcRecord::Ignored,
    };
    Ok(Some(record))
}

/// Parse an in-memory sequence of .uc lines. Line numbers in errors are
/// 1-based positions within the iterator.
pub fn parse_uc_records<'a, I>(lines: I) -> Result<Vec<UcRecord>, UcTaxError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(record) = parse_uc_line(line, idx + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Read and parse a .uc file, transparently handling .gz input.
pub fn read_uc_records<P: AsRef<Path>>(path: P) -> Result<Vec<UcRecord>, UcTaxError> {
    let reader = open_maybe_gz(path.as_ref())?;
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_uc_line(line.trim_end_matches('\r'), idx + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// If the file ends with ".gz", wrap it in a MultiGzDecoder.
pub(crate) fn open_maybe_gz(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let f = File::open(path)?;

    let is_gz = path.extension().map(|ext| ext == "gz").unwrap_or(false);

    Ok(if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_produce_no_record() {
        let parsed = parse_uc_line("# uclust --input query.fna --lib ref.fna", 1).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn hit_record_extracts_query_and_target() {
        let line = "H\t0\t141\t100.0\t+\t0\t0\t141M\tq1\tr2";
        let parsed = parse_uc_line(line, 3).unwrap();
        assert_eq!(
            parsed,
            Some(UcRecord::Hit {
                query: "q1".to_string(),
                target: "r2".to_string(),
            })
        );
    }

    #[test]
    fn no_hit_record_extracts_query() {
        let line = "N\t*\t141\t*\t*\t*\t*\t*\tq3\t*";
        let parsed = parse_uc_line(line, 5).unwrap();
        assert_eq!(
            parsed,
            Some(UcRecord::NoHit {
                query: "q3".to_string(),
            })
        );
    }

    #[test]
    fn seed_and_summary_records_are_ignored() {
        let seed = "S\t0\t141\t*\t*\t*\t*\t*\tr2\t*";
        let summary = "C\t0\t2\t98.5\t*\t*\t*\t*\tr2\t*";
        assert_eq!(parse_uc_line(seed, 1).unwrap(), Some(UcRecord::Ignored));
        assert_eq!(parse_uc_line(summary, 2).unwrap(), Some(UcRecord::Ignored));
    }

    #[test]
    fn short_line_is_a_parse_error_with_line_number() {
        let err = parse_uc_line("H\tq1", 17).unwrap_err();
        match err {
            UcTaxError::MalformedRecord { line, content } => {
                assert_eq!(line, 17);
                assert_eq!(content, "H\tq1");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn record_stream_preserves_input_order() {
        let lines = vec![
            "# header",
            "S\t0\t141\t*\t*\t*\t*\t*\tr2\t*",
            "H\t0\t141\t100.0\t+\t0\t0\t141M\tq1\tr2",
            "N\t*\t141\t*\t*\t*\t*\t*\tq3\t*",
            "H\t0\t139\t99.3\t+\t0\t0\t139M\tq1\tr4",
        ];
        let records = parse_uc_records(lines).unwrap();
        assert_eq!(
            records,
            vec![
                UcRecord::Ignored,
                UcRecord::Hit {
                    query: "q1".to_string(),
                    target: "r2".to_string(),
                },
                UcRecord::NoHit {
                    query: "q3".to_string(),
                },
                UcRecord::Hit {
                    query: "q1".to_string(),
                    target: "r4".to_string(),
                },
            ]
        );
    }
}

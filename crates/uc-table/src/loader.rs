//! Text table loading.
//!
//! Format:
//!
//! ```text
//! # comment lines start with '#', anywhere in the file
//! 3            <- declared row count (first non-comment, non-blank line)
//! 0.0  0.5     <- engineering  physical
//! 1.0  2.5
//! 3.0  3.5
//! ```
//!
//! The header's leading digits are the row count, so `2.0` declares two rows.
//! Data lines that do not start with two finite reals are skipped and do not count
//! toward the declared row count. Reading stops once the declared number of rows
//! has been collected or the input ends.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{TableError, TableResult};
use crate::numeric::{Real, parse_finite};
use crate::table::ConversionTable;

const COMMENT_BYTE: u8 = b'#';

/// Upper bound on up-front allocation; the declared count comes from the file.
const MAX_PREALLOC_ROWS: usize = 4096;

/// Resolves resource names against a fixed base directory and parses the tables found there.
#[derive(Debug, Clone)]
pub struct TableLoader {
    base_dir: PathBuf,
}

impl TableLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path of a resource. Names must be a single plain path component.
    pub fn resolve(&self, name: &str) -> TableResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_dir.join(name)),
            _ => Err(TableError::InvalidResourceName {
                name: name.to_string(),
            }),
        }
    }

    pub fn load(&self, name: &str) -> TableResult<ConversionTable> {
        let path = self.resolve(name)?;
        debug!(resource = name, path = %path.display(), "reading conversion table");

        let file = File::open(&path).map_err(|source| TableError::NotFound {
            path: path.clone(),
            source,
        })?;
        let table = parse_table(BufReader::new(file))?;

        info!(
            resource = name,
            rows = table.row_count(),
            skipped = table.skipped_rows(),
            "loaded conversion table"
        );
        Ok(table)
    }
}

/// Parse a conversion table from any buffered reader.
///
/// Lines are read as raw bytes. Comment lines are dropped before decoding, so they may
/// hold any encoding; a data line that is not valid UTF-8 counts as a malformed row.
pub fn parse_table<R: BufRead>(reader: R) -> TableResult<ConversionTable> {
    let mut lines = reader
        .split(b'\n')
        .filter(|line| !matches!(line, Ok(l) if l.first() == Some(&COMMENT_BYTE)));

    let declared = loop {
        match lines.next() {
            None => return Err(TableError::MissingRowCount),
            Some(line) => {
                let line = line?;
                if is_blank(&line) {
                    continue;
                }
                break parse_row_count(&line)?;
            }
        }
    };
    debug!(declared, "table header");

    if declared < 2 {
        return Err(TableError::TooSmall { rows: declared });
    }

    let capacity = declared.min(MAX_PREALLOC_ROWS);
    let mut engineering = Vec::with_capacity(capacity);
    let mut physical = Vec::with_capacity(capacity);
    let mut skipped = 0;

    while engineering.len() < declared {
        let Some(line) = lines.next() else { break };
        let line = line?;
        if is_blank(&line) {
            continue;
        }
        match std::str::from_utf8(&line).ok().and_then(parse_row) {
            Some((e, p)) => {
                engineering.push(e);
                physical.push(p);
            }
            None => {
                debug!(line = %String::from_utf8_lossy(&line), "skipping malformed table row");
                skipped += 1;
            }
        }
    }

    if engineering.len() < declared {
        warn!(
            declared,
            read = engineering.len(),
            "truncating row count to rows actually read"
        );
    }

    ConversionTable::from_columns(engineering, physical, declared, skipped)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Leading decimal digits of the first token; `"12.0"` declares 12 rows.
fn parse_row_count(line: &[u8]) -> TableResult<usize> {
    let invalid = || TableError::InvalidRowCount {
        line: String::from_utf8_lossy(line).trim_end().to_string(),
    };
    let token = line.trim_ascii_start();
    let digits = token
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());
    std::str::from_utf8(&token[..digits])
        .ok()
        .and_then(|d| d.parse::<usize>().ok())
        .ok_or_else(invalid)
}

/// `(engineering, physical)` from the first two fields; extra fields are ignored.
fn parse_row(line: &str) -> Option<(Real, Real)> {
    let mut fields = line.split_whitespace();
    let engineering = parse_finite(fields.next()?, "engineering value")?;
    let physical = parse_finite(fields.next()?, "physical value")?;
    Some((engineering, physical))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TableResult<ConversionTable> {
        parse_table(text.as_bytes())
    }

    #[test]
    fn comments_anywhere_are_ignored() {
        let table = parse("# header\n\n2\n# mid\n0.0 0.5\n# between\n1.0 2.5\n").unwrap();
        assert_eq!(table.engineering(), &[0.0, 1.0]);
        assert_eq!(table.physical(), &[0.5, 2.5]);
        assert_eq!(table.skipped_rows(), 0);
    }

    #[test]
    fn malformed_row_does_not_consume_target() {
        let table = parse("3\n0.0 0.5\nabc xyz\n1.0 2.5\n2.0 3.0\n").unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.skipped_rows(), 1);
        assert_eq!(table.engineering(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn single_number_row_is_malformed() {
        let table = parse("2\n0.0\n0.0 1.0\n1.0 2.0\n").unwrap();
        assert_eq!(table.physical(), &[1.0, 2.0]);
        assert_eq!(table.skipped_rows(), 1);
    }

    #[test]
    fn reading_stops_at_declared_count() {
        let table = parse("2\n0 0\n1 1\n2 2\n").unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn short_table_is_truncated() {
        let table = parse("5\n0 0\n1 10\n2 20\n").unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.declared_rows(), 5);
    }

    #[test]
    fn truncation_below_two_rows_fails() {
        let err = parse("4\n0 0\nfoo bar\n").unwrap_err();
        assert!(matches!(err, TableError::TooSmall { rows: 1 }));
    }

    #[test]
    fn declared_count_below_two_fails() {
        assert!(matches!(
            parse("1\n0 0\n").unwrap_err(),
            TableError::TooSmall { rows: 1 }
        ));
        assert!(matches!(
            parse("0\n").unwrap_err(),
            TableError::TooSmall { rows: 0 }
        ));
    }

    #[test]
    fn missing_header() {
        assert!(matches!(
            parse("# only comments\n\n").unwrap_err(),
            TableError::MissingRowCount
        ));
    }

    #[test]
    fn non_integer_header() {
        assert!(matches!(
            parse("two\n0 0\n1 1\n").unwrap_err(),
            TableError::InvalidRowCount { .. }
        ));
    }

    #[test]
    fn fractional_header_uses_leading_digits() {
        let table = parse("2.0\n0 0\n1 1\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.declared_rows(), 2);
        assert!(matches!(
            parse("-2\n0 0\n1 1\n").unwrap_err(),
            TableError::InvalidRowCount { .. }
        ));
    }

    #[test]
    fn latin1_comment_is_ignored() {
        let text = b"# temperature in \xb0C, latin-1 encoded\n2\n0.0 0.5\n1.0 2.5\n";
        let table = parse_table(&text[..]).unwrap();
        assert_eq!(table.engineering(), &[0.0, 1.0]);
        assert_eq!(table.skipped_rows(), 0);
    }

    #[test]
    fn non_utf8_row_is_skipped() {
        let text = b"3\n0.0 0.5\n\xff\xfe garbage\n1.0 2.5\n2.0 3.0\n";
        let table = parse_table(&text[..]).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.skipped_rows(), 1);
        assert_eq!(table.physical(), &[0.5, 2.5, 3.0]);
    }

    #[test]
    fn crlf_line_endings() {
        let table = parse("# dos\r\n2\r\n0 1\r\n\r\n1 3\r\n").unwrap();
        assert_eq!(table.physical(), &[1.0, 3.0]);
        assert_eq!(table.skipped_rows(), 0);
    }

    #[test]
    fn resolve_rejects_paths() {
        let loader = TableLoader::new("/tables");
        assert_eq!(
            loader.resolve("SI-QFA").unwrap(),
            PathBuf::from("/tables/SI-QFA")
        );
        for bad in ["", "..", "a/b", "/etc/passwd", "."] {
            assert!(
                matches!(
                    loader.resolve(bad),
                    Err(TableError::InvalidResourceName { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}

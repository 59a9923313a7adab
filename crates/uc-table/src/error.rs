use std::path::PathBuf;

use thiserror::Error;

use crate::table::Axis;

pub type TableResult<T> = Result<T, TableError>;

/// Reasons a conversion table could not be produced.
///
/// None of these are fatal to a converter: every variant degrades it to identity mode.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Table resource not found: {path}")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error while reading table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid resource name: {name:?}")]
    InvalidResourceName { name: String },

    #[error("Table has no row count line")]
    MissingRowCount,

    #[error("Invalid row count line: {line:?}")]
    InvalidRowCount { line: String },

    #[error("Table too small: {rows} usable rows (at least 2 required)")]
    TooSmall { rows: usize },

    #[error("Degenerate segment on {axis} axis after row {index}")]
    DegenerateSegment { axis: Axis, index: usize },

    #[error("{axis} axis changes direction after row {index}")]
    NotMonotonic { axis: Axis, index: usize },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

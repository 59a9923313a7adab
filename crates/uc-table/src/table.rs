//! Validated breakpoint table.
//!
//! A [`ConversionTable`] holds two index-aligned sequences, one per unit space.
//! Either sequence can act as the independent axis of a lookup, which is how
//! conversion direction is realized. Each column is strictly increasing or strictly
//! decreasing; lookups always run over an ascending copy of the independent column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};
use crate::lookup::{self, Region};
use crate::numeric::{Real, ensure_finite};

/// Unit space of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Engineering,
    Physical,
}

impl Axis {
    /// The column paired with this one.
    pub fn other(self) -> Self {
        match self {
            Self::Engineering => Self::Physical,
            Self::Physical => Self::Engineering,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engineering => f.write_str("engineering"),
            Self::Physical => f.write_str("physical"),
        }
    }
}

/// One breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub engineering: Real,
    pub physical: Real,
}

impl Row {
    pub fn new(engineering: Real, physical: Real) -> Self {
        Self {
            engineering,
            physical,
        }
    }
}

/// Direction of a strictly monotonic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Ascending,
    Descending,
}

/// Breakpoint pairs ordered so that `xt` ascends.
#[derive(Debug, Clone, PartialEq)]
struct LookupView {
    xt: Vec<Real>,
    yt: Vec<Real>,
}

impl LookupView {
    fn new(xt: &[Real], yt: &[Real], order: Order) -> Self {
        match order {
            Order::Ascending => Self {
                xt: xt.to_vec(),
                yt: yt.to_vec(),
            },
            Order::Descending => Self {
                xt: xt.iter().rev().copied().collect(),
                yt: yt.iter().rev().copied().collect(),
            },
        }
    }
}

/// Immutable, validated conversion table.
///
/// Invariants (checked by [`ConversionTable::new`]):
/// - at least two rows
/// - both columns finite and strictly monotonic (each may ascend or descend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct ConversionTable {
    engineering: Vec<Real>,
    physical: Vec<Real>,
    from_engineering: LookupView,
    from_physical: LookupView,
    declared_rows: usize,
    skipped_rows: usize,
}

impl ConversionTable {
    /// Build a table from rows, validating every invariant.
    pub fn new(rows: impl IntoIterator<Item = Row>) -> TableResult<Self> {
        let (engineering, physical): (Vec<Real>, Vec<Real>) = rows
            .into_iter()
            .map(|r| (r.engineering, r.physical))
            .unzip();
        let declared_rows = engineering.len();
        Self::from_columns(engineering, physical, declared_rows, 0)
    }

    pub(crate) fn from_columns(
        engineering: Vec<Real>,
        physical: Vec<Real>,
        declared_rows: usize,
        skipped_rows: usize,
    ) -> TableResult<Self> {
        debug_assert_eq!(engineering.len(), physical.len());
        if engineering.len() < 2 {
            return Err(TableError::TooSmall {
                rows: engineering.len(),
            });
        }
        let eng_order = validate_column(&engineering, Axis::Engineering)?;
        let phys_order = validate_column(&physical, Axis::Physical)?;
        Ok(Self {
            from_engineering: LookupView::new(&engineering, &physical, eng_order),
            from_physical: LookupView::new(&physical, &engineering, phys_order),
            engineering,
            physical,
            declared_rows,
            skipped_rows,
        })
    }

    /// Number of usable rows (always >= 2).
    pub fn row_count(&self) -> usize {
        self.engineering.len()
    }

    /// Row count announced by the table header.
    pub fn declared_rows(&self) -> usize {
        self.declared_rows
    }

    /// Data lines that were skipped because they did not parse.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn column(&self, axis: Axis) -> &[Real] {
        match axis {
            Axis::Engineering => &self.engineering,
            Axis::Physical => &self.physical,
        }
    }

    pub fn engineering(&self) -> &[Real] {
        &self.engineering
    }

    pub fn physical(&self) -> &[Real] {
        &self.physical
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.engineering
            .iter()
            .zip(&self.physical)
            .map(|(&e, &p)| Row::new(e, p))
    }

    fn view(&self, from: Axis) -> &LookupView {
        match from {
            Axis::Engineering => &self.from_engineering,
            Axis::Physical => &self.from_physical,
        }
    }

    /// Lowest and highest breakpoint of `axis`, whichever way the column runs.
    pub fn domain(&self, axis: Axis) -> (Real, Real) {
        let xt = &self.view(axis).xt;
        (xt[0], xt[xt.len() - 1])
    }

    /// Map `x`, expressed in `from` units, into the paired unit space.
    pub fn evaluate(&self, x: Real, from: Axis) -> Real {
        let view = self.view(from);
        lookup::calculate(x, &view.xt, &view.yt)
    }

    /// Whether `evaluate(x, from)` interpolates or extrapolates.
    ///
    /// The interpolation domain is `[low, high)` of [`ConversionTable::domain`].
    pub fn region(&self, x: Real, from: Axis) -> Region {
        lookup::classify(x, &self.view(from).xt)
    }
}

fn validate_column(col: &[Real], axis: Axis) -> TableResult<Order> {
    for &v in col {
        ensure_finite(
            v,
            match axis {
                Axis::Engineering => "engineering breakpoint",
                Axis::Physical => "physical breakpoint",
            },
        )?;
    }
    let order = if col[1] < col[0] {
        Order::Descending
    } else {
        Order::Ascending
    };
    for (index, pair) in col.windows(2).enumerate() {
        if pair[1] == pair[0] {
            return Err(TableError::DegenerateSegment { axis, index });
        }
        let step = if pair[1] < pair[0] {
            Order::Descending
        } else {
            Order::Ascending
        };
        if step != order {
            return Err(TableError::NotMonotonic { axis, index });
        }
    }
    Ok(order)
}

#[derive(Serialize, Deserialize)]
struct TableRepr {
    rows: Vec<Row>,
    #[serde(default)]
    declared_rows: Option<usize>,
    #[serde(default)]
    skipped_rows: usize,
}

impl TryFrom<TableRepr> for ConversionTable {
    type Error = TableError;

    fn try_from(repr: TableRepr) -> TableResult<Self> {
        let declared = repr.declared_rows.unwrap_or(repr.rows.len());
        let (engineering, physical) = repr
            .rows
            .into_iter()
            .map(|r| (r.engineering, r.physical))
            .unzip();
        Self::from_columns(engineering, physical, declared, repr.skipped_rows)
    }
}

impl From<ConversionTable> for TableRepr {
    fn from(table: ConversionTable) -> Self {
        Self {
            rows: table.rows().collect(),
            declared_rows: Some(table.declared_rows),
            skipped_rows: table.skipped_rows,
        }
    }
}

//! Row building for ACL entities.
//!
//! One entity becomes a primary row plus continuation rows. The expandable
//! column (bindings for tables, match conditions for rules) contributes one
//! value per row; every other column appears on the primary row only and is
//! blank on continuation rows.

use crate::render::Alignment;
use crate::status::ReconciledStatus;

/// One rendered row: one string per column.
pub type Row = Vec<String>;

/// Where a column's cell value comes from.
pub enum CellSource<R> {
    /// A scalar field of the entity.
    Field(fn(&R) -> String),
    /// The multi-valued field spread over continuation rows.
    Expand(fn(&R) -> Vec<String>),
    /// The reconciled status.
    Status,
}

/// A column of a schema: header, alignment and value accessor.
pub struct Column<R> {
    pub header: &'static str,
    pub align: Alignment,
    pub source: CellSource<R>,
}

impl<R> Column<R> {
    /// Left-aligned scalar column.
    pub fn field(header: &'static str, accessor: fn(&R) -> String) -> Self {
        Self {
            header,
            align: Alignment::Left,
            source: CellSource::Field(accessor),
        }
    }

    /// Left-aligned expandable column.
    pub fn expand(header: &'static str, accessor: fn(&R) -> Vec<String>) -> Self {
        Self {
            header,
            align: Alignment::Left,
            source: CellSource::Expand(accessor),
        }
    }

    /// Left-aligned status column.
    pub fn status(header: &'static str) -> Self {
        Self {
            header,
            align: Alignment::Left,
            source: CellSource::Status,
        }
    }

    /// Overrides the alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// Builds the primary and continuation rows of one entity.
///
/// Produces `max(1, len)` rows where `len` is the length of the expandable
/// sequence. An empty sequence leaves that cell blank on the single row.
pub fn build_rows<R>(entity: &R, status: &ReconciledStatus, columns: &[Column<R>]) -> Vec<Row> {
    let expanded: Vec<Option<Vec<String>>> = columns
        .iter()
        .map(|column| match &column.source {
            CellSource::Expand(accessor) => Some(accessor(entity)),
            _ => None,
        })
        .collect();

    let row_count = expanded
        .iter()
        .flatten()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut rows = Vec::with_capacity(row_count);

    let primary = columns
        .iter()
        .zip(&expanded)
        .map(|(column, values)| match (&column.source, values) {
            (CellSource::Field(accessor), _) => accessor(entity),
            (CellSource::Status, _) => status.to_string(),
            (CellSource::Expand(_), Some(values)) => values.first().cloned().unwrap_or_default(),
            (CellSource::Expand(_), None) => String::new(),
        })
        .collect();
    rows.push(primary);

    for idx in 1..row_count {
        let continuation = expanded
            .iter()
            .map(|values| {
                values
                    .as_ref()
                    .and_then(|values| values.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        rows.push(continuation);
    }

    rows
}

// core/src/injuries.rs
use log::{debug, warn};

use crate::error::{ChartError, TableKind};
use crate::normalize::parse_date;
use crate::table::{RawTable, INJURY_END_COLUMNS, INJURY_REASON_COLUMNS, INJURY_START_COLUMNS};
use crate::types::InjuryInterval;

/// Valid intervals plus how many rows were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub intervals: Vec<InjuryInterval>,
    pub skipped: usize,
}

/// Read break periods from the injury table.
///
/// Rows with an unreadable start or end date are skipped. Everything else is
/// passed through as written: no clipping to the plotted range, no merging
/// of overlaps, no reordering, and an end before the start is kept as is.
/// A missing reason column gives empty labels; missing date columns are a
/// structural error.
pub fn annotate_intervals(raw: &RawTable) -> Result<Annotation, ChartError> {
    let start_col = raw
        .find_column(INJURY_START_COLUMNS)
        .ok_or(ChartError::MissingColumn {
            table: TableKind::Injuries,
            column: "start_date",
        })?;
    let end_col = raw
        .find_column(INJURY_END_COLUMNS)
        .ok_or(ChartError::MissingColumn {
            table: TableKind::Injuries,
            column: "end_date",
        })?;
    let reason_col = raw.find_column(INJURY_REASON_COLUMNS);

    let mut ann = Annotation::default();
    for row in 0..raw.len() {
        let start = parse_date(raw.cell(row, start_col));
        let end = parse_date(raw.cell(row, end_col));
        match (start, end) {
            (Some(start_date), Some(end_date)) => ann.intervals.push(InjuryInterval {
                start_date,
                end_date,
                reason: reason_col
                    .map(|c| raw.cell(row, c).trim().to_string())
                    .unwrap_or_default(),
            }),
            _ => ann.skipped += 1,
        }
    }

    if ann.skipped > 0 {
        warn!("injuries: skipped {} row(s) with unreadable dates", ann.skipped);
    }
    debug!("injuries: {} interval(s)", ann.intervals.len());
    Ok(ann)
}

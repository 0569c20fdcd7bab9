// core/src/normalize.rs
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};

use crate::error::{ChartError, TableKind};
use crate::table::{RawTable, DATE_COLUMNS, LOAD_COLUMNS};
use crate::types::{DropStats, PerformanceRecord, PerformanceSeries};

// Non-ISO forms are day-first only; month-first dates are not accepted.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
// Spreadsheet exports write dates as full timestamps.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Lenient calendar-date parser. `None` means "drop the row".
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

/// Lenient number parser: trims, accepts a decimal comma, rejects NaN/inf.
pub fn parse_number(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    let v = if s.contains(',') && !s.contains('.') {
        s.replacen(',', ".", 1).parse::<f64>().ok()?
    } else {
        s.parse::<f64>().ok()?
    };
    v.is_finite().then_some(v)
}

/// Turn a raw exercise log into a date-sorted series.
///
/// Rows with an unreadable date or load are dropped and counted in
/// `PerformanceSeries::dropped`. Repetition sets are every column after the
/// second one (minus the date/load columns); blank set cells are skipped.
pub fn normalize_series(raw: &RawTable) -> Result<PerformanceSeries, ChartError> {
    let date_col = raw
        .find_column(DATE_COLUMNS)
        .ok_or(ChartError::MissingColumn {
            table: TableKind::Performances,
            column: "date",
        })?;
    let load_col = raw
        .find_column(LOAD_COLUMNS)
        .ok_or(ChartError::MissingColumn {
            table: TableKind::Performances,
            column: "load",
        })?;

    let set_cols: Vec<usize> = (2..raw.headers.len())
        .filter(|&c| c != date_col && c != load_col)
        .collect();

    let mut dropped = DropStats::default();
    let mut records = Vec::with_capacity(raw.len());

    for row in 0..raw.len() {
        let Some(date) = parse_date(raw.cell(row, date_col)) else {
            dropped.bad_date += 1;
            continue;
        };
        let Some(load) = parse_number(raw.cell(row, load_col)) else {
            dropped.bad_load += 1;
            continue;
        };
        let repetition_sets = set_cols
            .iter()
            .filter_map(|&c| parse_number(raw.cell(row, c)))
            .collect();
        records.push(PerformanceRecord {
            date,
            load,
            repetition_sets,
        });
    }

    // sort_by_key is stable: same-day rows keep file order
    records.sort_by_key(|r| r.date);

    if dropped.total() > 0 {
        warn!(
            "normalize: dropped {} row(s) (bad date={}, bad load={})",
            dropped.total(),
            dropped.bad_date,
            dropped.bad_load
        );
    }
    debug!("normalize: {} record(s) kept", records.len());

    Ok(PerformanceSeries { records, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_formats() {
        assert_eq!(parse_date("2024-01-08"), Some(d(2024, 1, 8)));
        assert_eq!(parse_date(" 2024/01/08 "), Some(d(2024, 1, 8)));
        assert_eq!(parse_date("08/01/2024"), Some(d(2024, 1, 8)));
        assert_eq!(parse_date("08-01-2024"), Some(d(2024, 1, 8)));
        assert_eq!(parse_date("2024-01-08 00:00:00"), Some(d(2024, 1, 8)));
        assert_eq!(parse_date("2024-01-08T10:30:00.250"), Some(d(2024, 1, 8)));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn number_formats() {
        assert_eq!(parse_number("100"), Some(100.0));
        assert_eq!(parse_number(" 72.5 "), Some(72.5));
        assert_eq!(parse_number("72,5"), Some(72.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1,234.5"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }
}

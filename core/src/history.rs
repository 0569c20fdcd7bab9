// core/src/history.rs
use serde::Serialize;

use crate::normalize::{parse_date, parse_number};
use crate::table::{RawTable, DATE_COLUMNS, LOAD_COLUMNS};

const NOT_AVAILABLE: &str = "N/A";

/// One line of the performance history shown under the entry form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    /// Position in the stored table, used by row deletion.
    pub index: usize,
    pub date: String,
    pub load: String,
    pub sets: Vec<String>,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Rows newest first. Unlike the chart, nothing is dropped here: cells that
/// do not parse are shown as "N/A" so the operator can find and delete them.
pub fn history_rows(raw: &RawTable) -> Vec<HistoryRow> {
    let date_col = raw.find_column(DATE_COLUMNS);
    let load_col = raw.find_column(LOAD_COLUMNS);
    let set_cols: Vec<usize> = (2..raw.headers.len())
        .filter(|&c| Some(c) != date_col && Some(c) != load_col)
        .collect();

    let mut rows: Vec<_> = (0..raw.len())
        .map(|i| {
            let date = date_col.and_then(|c| parse_date(raw.cell(i, c)));
            let load = load_col.and_then(|c| parse_number(raw.cell(i, c)));
            let sets = set_cols
                .iter()
                .map(|&c| match parse_number(raw.cell(i, c)) {
                    Some(v) => format!("{}", round1(v)),
                    None => NOT_AVAILABLE.to_string(),
                })
                .collect();
            (date, i, load, sets)
        })
        .collect();

    // newest first; unreadable dates sink to the bottom
    rows.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    rows.into_iter()
        .map(|(date, index, load, sets)| HistoryRow {
            index,
            date: date
                .map(|d| d.format("%d-%m-%Y").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            load: load
                .map(|l| format!("{:.1} Kg", l))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sets,
        })
        .collect()
}

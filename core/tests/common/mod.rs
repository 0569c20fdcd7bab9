#![allow(dead_code)]
use chrono::NaiveDate;
use liftgraph_core::RawTable;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// The four-week example log: 100, 105, 105, 95 kg.
pub fn weekly_log() -> RawTable {
    RawTable::new(["Date", "Kg", "S1", "S2", "S3", "S4"])
        .with_row(["2024-01-01", "100", "8", "8", "6", ""])
        .with_row(["2024-01-08", "105", "8", "7", "6", ""])
        .with_row(["2024-01-15", "105", "8", "8", "8", ""])
        .with_row(["2024-01-22", "95", "10", "10", "8", ""])
}

pub fn strain_injury() -> RawTable {
    RawTable::new(["Date_debut", "Date_fin", "Motif"]).with_row(["2024-01-05", "2024-01-10", "strain"])
}

// core/src/table.rs
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

// Accepted header names, compared case-insensitively. The French names come
// from the spreadsheets the app was first used with.
pub const DATE_COLUMNS: &[&str] = &["date"];
pub const LOAD_COLUMNS: &[&str] = &["load", "kg", "weight"];
pub const INJURY_START_COLUMNS: &[&str] = &["start_date", "date_debut"];
pub const INJURY_END_COLUMNS: &[&str] = &["end_date", "date_fin"];
pub const INJURY_REASON_COLUMNS: &[&str] = &["reason", "motif"];

/// Header of a freshly created exercise log.
pub const DEFAULT_LOG_HEADERS: [&str; 6] = ["Date", "Kg", "S1", "S2", "S3", "S4"];

/// One sheet as the store hands it over: a header row and untyped cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder-style helper, mostly for fixtures.
    pub fn with_row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Index of the first header matching one of `names`.
    pub fn find_column(&self, names: &[&str]) -> Option<usize> {
        self.headers.iter().position(|h| {
            let h = h.trim();
            names.iter().any(|n| h.eq_ignore_ascii_case(n))
        })
    }

    /// Cell text, empty when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn from_csv_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, StoreError> {
        let csv_err = |source| StoreError::Csv {
            path: origin.to_path_buf(),
            source,
        };
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_err)?.iter().map(str::to_owned).collect();
        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(csv_err)?;
            rows.push(rec.iter().map(str::to_owned).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn read_csv(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file, path)
    }

    pub fn to_csv_writer<W: Write>(&self, writer: W, origin: &Path) -> Result<(), StoreError> {
        let csv_err = |source| StoreError::Csv {
            path: origin.to_path_buf(),
            source,
        };
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        wtr.write_record(&self.headers).map_err(csv_err)?;
        for row in &self.rows {
            wtr.write_record(row).map_err(csv_err)?;
        }
        wtr.flush().map_err(|source| StoreError::Io {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), StoreError> {
        let file = std::fs::File::create(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.to_csv_writer(file, path)
    }
}

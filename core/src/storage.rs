// core/src/storage.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};

use crate::error::StoreError;
use crate::session::Session;
use crate::table::{RawTable, DATE_COLUMNS, DEFAULT_LOG_HEADERS, LOAD_COLUMNS};

pub const INJURY_SHEET: &str = "injuries";
const SHEET_EXT: &str = "csv";

/// Where exercise logs live. The chart pipeline only reads; writes come from
/// the entry form and the delete button.
pub trait RecordStore {
    /// Exercise names, sorted.
    fn exercises(&self) -> Result<Vec<String>, StoreError>;
    fn load_series(&self, exercise: &str) -> Result<RawTable, StoreError>;
    /// `None` when no break periods were recorded.
    fn load_injury_table(&self) -> Result<Option<RawTable>, StoreError>;
    fn append_record(&mut self, exercise: &str, record: &NewRecord) -> Result<(), StoreError>;
    /// Remove raw row `index` (file order) and return it.
    fn delete_row(&mut self, exercise: &str, index: usize) -> Result<Vec<String>, StoreError>;
}

/// One session entered through the form: date, load and up to four sets.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub load: f64,
    pub sets: [f64; 4],
}

impl NewRecord {
    pub fn validate(&self) -> Result<(), StoreError> {
        if !self.load.is_finite() || self.load < 0.0 {
            return Err(StoreError::InvalidRecord(format!(
                "load must be >= 0, got {}",
                self.load
            )));
        }
        if let Some(bad) = self.sets.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(StoreError::InvalidRecord(format!(
                "repetitions must be >= 0, got {bad}"
            )));
        }
        Ok(())
    }

    /// Append as a row laid out after `table`'s header. Set values go to
    /// the set columns in order; missing set columns are added as `S<n>`.
    pub fn append_to(&self, table: &mut RawTable) {
        if table.headers.is_empty() {
            table.headers = DEFAULT_LOG_HEADERS.iter().map(|h| h.to_string()).collect();
        }
        let date_col = table.find_column(DATE_COLUMNS).unwrap_or_else(|| {
            table.headers.push("Date".into());
            table.headers.len() - 1
        });
        let load_col = table.find_column(LOAD_COLUMNS).unwrap_or_else(|| {
            table.headers.push("Kg".into());
            table.headers.len() - 1
        });

        let mut set_cols: Vec<usize> = (2..table.headers.len())
            .filter(|&c| c != date_col && c != load_col)
            .collect();
        while set_cols.len() < self.sets.len() {
            table.headers.push(format!("S{}", set_cols.len() + 1));
            set_cols.push(table.headers.len() - 1);
        }

        let mut row = vec![String::new(); table.headers.len()];
        row[date_col] = self.date.format("%Y-%m-%d").to_string();
        row[load_col] = self.load.to_string();
        for (&col, reps) in set_cols.iter().zip(self.sets.iter()) {
            row[col] = reps.to_string();
        }
        table.rows.push(row);
    }
}

fn check_exercise_name(name: &str) -> Result<(), StoreError> {
    let bad = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name.starts_with('.')
        || name == INJURY_SHEET;
    if bad {
        return Err(StoreError::UnknownExercise(name.to_string()));
    }
    Ok(())
}

fn remove_row(exercise: &str, table: &mut RawTable, index: usize) -> Result<Vec<String>, StoreError> {
    if index >= table.rows.len() {
        return Err(StoreError::RowOutOfRange {
            exercise: exercise.to_string(),
            index,
            len: table.rows.len(),
        });
    }
    Ok(table.rows.remove(index))
}

// ──────────────────────────────────────────────────────────────────────────────
// CSV directory: one file per exercise inside perfs_<user>/
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Store for `session`'s user below `root`; the directory is created.
    pub fn open(root: &Path, session: &Session) -> Result<Self, StoreError> {
        Self::at(root.join(session.save_name()))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{sheet}.{SHEET_EXT}"))
    }

    /// Copy every `.csv` in `src` into the store, overwriting same-named
    /// sheets. Returns how many files were copied.
    pub fn import_from(&self, src: &Path) -> Result<usize, StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };
        let mut copied = 0;
        for entry in std::fs::read_dir(src).map_err(io_err(src))? {
            let path = entry.map_err(io_err(src))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SHEET_EXT) {
                continue;
            }
            let Some(name) = path.file_name() else { continue };
            let target = self.dir.join(name);
            std::fs::copy(&path, &target).map_err(io_err(&target))?;
            debug!("import: {} -> {}", path.display(), target.display());
            copied += 1;
        }
        info!("import: {} sheet(s) saved to {}", copied, self.dir.display());
        Ok(copied)
    }

    /// Import an upload once per session; later calls are no-ops until
    /// `Session::reset_import`. Only meaningful for a session that outlives a
    /// single command; the CLI calls `import_from` directly.
    pub fn import_upload(&self, session: &mut Session, src: &Path) -> Result<bool, StoreError> {
        if !session.needs_import() {
            debug!("import: upload already saved this session, skipping");
            return Ok(false);
        }
        self.import_from(src)?;
        session.mark_imported();
        Ok(true)
    }
}

impl RecordStore for CsvStore {
    fn exercises(&self) -> Result<Vec<String>, StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SHEET_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem != INJURY_SHEET {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn load_series(&self, exercise: &str) -> Result<RawTable, StoreError> {
        check_exercise_name(exercise)?;
        let path = self.sheet_path(exercise);
        if !path.exists() {
            return Err(StoreError::UnknownExercise(exercise.to_string()));
        }
        RawTable::read_csv(&path)
    }

    fn load_injury_table(&self) -> Result<Option<RawTable>, StoreError> {
        let path = self.sheet_path(INJURY_SHEET);
        if !path.exists() {
            return Ok(None);
        }
        RawTable::read_csv(&path).map(Some)
    }

    fn append_record(&mut self, exercise: &str, record: &NewRecord) -> Result<(), StoreError> {
        check_exercise_name(exercise)?;
        record.validate()?;
        let path = self.sheet_path(exercise);
        let mut table = if path.exists() {
            RawTable::read_csv(&path)?
        } else {
            RawTable::new(DEFAULT_LOG_HEADERS)
        };
        record.append_to(&mut table);
        table.write_csv(&path)?;
        info!("✅ record {} saved to {}", record.date, path.display());
        Ok(())
    }

    fn delete_row(&mut self, exercise: &str, index: usize) -> Result<Vec<String>, StoreError> {
        let path = self.sheet_path(exercise);
        let mut table = self.load_series(exercise)?;
        let removed = remove_row(exercise, &mut table, index)?;
        table.write_csv(&path)?;
        info!("row {} removed from {}", index, path.display());
        Ok(removed)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// In-memory store (tests, Python payloads)
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: BTreeMap<String, RawTable>,
    injuries: Option<RawTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, exercise: &str, table: RawTable) -> Self {
        self.sheets.insert(exercise.to_string(), table);
        self
    }

    pub fn with_injuries(mut self, table: RawTable) -> Self {
        self.injuries = Some(table);
        self
    }
}

impl RecordStore for MemoryStore {
    fn exercises(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.sheets.keys().cloned().collect())
    }

    fn load_series(&self, exercise: &str) -> Result<RawTable, StoreError> {
        self.sheets
            .get(exercise)
            .cloned()
            .ok_or_else(|| StoreError::UnknownExercise(exercise.to_string()))
    }

    fn load_injury_table(&self) -> Result<Option<RawTable>, StoreError> {
        Ok(self.injuries.clone())
    }

    fn append_record(&mut self, exercise: &str, record: &NewRecord) -> Result<(), StoreError> {
        check_exercise_name(exercise)?;
        record.validate()?;
        let table = self
            .sheets
            .entry(exercise.to_string())
            .or_insert_with(|| RawTable::new(DEFAULT_LOG_HEADERS));
        record.append_to(table);
        Ok(())
    }

    fn delete_row(&mut self, exercise: &str, index: usize) -> Result<Vec<String>, StoreError> {
        let table = self
            .sheets
            .get_mut(exercise)
            .ok_or_else(|| StoreError::UnknownExercise(exercise.to_string()))?;
        remove_row(exercise, table, index)
    }
}

//! liftgraph core: turns strength-training logs into color-coded
//! performance curves with injury/break overlays.
//!
//! Pipeline: [`normalize`] → [`derivation`] → [`trend`] → [`chart`], with
//! [`injuries`] feeding the overlays. [`pipeline::render_chart`] runs it
//! against a [`storage::RecordStore`].

pub mod chart;
pub mod cli;
pub mod config;
pub mod derivation;
pub mod error;
pub mod history;
pub mod injuries;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod session;
pub mod storage;
pub mod table;
pub mod trend;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use chart::{assemble, Figure, IntervalOverlay, LegendEntry, Marker, Segment};
pub use config::{ChartConfig, ChartOptions};
pub use derivation::{derive, Coefficient, DerivationMode, Formula, SetsFactor};
pub use error::{ChartError, ConfigError, SessionError, StoreError, TableKind};
pub use history::{history_rows, HistoryRow};
pub use injuries::{annotate_intervals, Annotation};
pub use normalize::normalize_series;
pub use pipeline::{build_figure, build_figure_json, render_chart, NO_DATA_NOTICE};
pub use session::Session;
pub use storage::{CsvStore, MemoryStore, NewRecord, RecordStore};
pub use table::RawTable;
pub use trend::classify;
pub use types::{
    ClassifiedPoint, DerivedPoint, InjuryInterval, PerformanceRecord, PerformanceSeries,
    PointClass, TrendCategory,
};

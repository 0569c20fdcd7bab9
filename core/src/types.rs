use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cleaned row of an exercise log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub date: NaiveDate,
    pub load: f64,                 // kg, before any repetition adjustment
    pub repetition_sets: Vec<f64>, // reps per set, file column order
}

impl PerformanceRecord {
    pub fn rep_sum(&self) -> f64 {
        self.repetition_sets.iter().sum()
    }

    /// Mean reps per set. An empty set list counts as 0 so that a record
    /// without set columns still derives to a finite value.
    pub fn rep_mean(&self) -> f64 {
        if self.repetition_sets.is_empty() {
            return 0.0;
        }
        self.rep_sum() / self.repetition_sets.len() as f64
    }
}

/// Rows the normalizer threw away, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStats {
    pub bad_date: usize,
    pub bad_load: usize,
}

impl DropStats {
    pub fn total(&self) -> usize {
        self.bad_date + self.bad_load
    }
}

/// Date-sorted records of one exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSeries {
    pub records: Vec<PerformanceRecord>,
    pub dropped: DropStats,
}

impl PerformanceSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A record after the derivation engine ran. `load` is kept next to the
/// derived value so a new mode can always be derived from the source data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub date: NaiveDate,
    pub load: f64,
    pub performance_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendCategory {
    Increase,
    Decrease,
    Stagnation,
}

impl TrendCategory {
    pub const ALL: [TrendCategory; 3] = [
        TrendCategory::Increase,
        TrendCategory::Decrease,
        TrendCategory::Stagnation,
    ];

    pub fn color(self) -> &'static str {
        match self {
            TrendCategory::Increase => "green",
            TrendCategory::Decrease => "red",
            TrendCategory::Stagnation => "orange",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrendCategory::Increase => "Increase",
            TrendCategory::Decrease => "Decrease",
            TrendCategory::Stagnation => "Stagnation",
        }
    }
}

/// Render class of a point. The first point of a series has nothing to
/// compare against and gets its own class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "trend")]
pub enum PointClass {
    Baseline,
    Trend(TrendCategory),
}

pub const BASELINE_COLOR: &str = "grey";

impl PointClass {
    pub fn color(self) -> &'static str {
        match self {
            PointClass::Baseline => BASELINE_COLOR,
            PointClass::Trend(t) => t.color(),
        }
    }

    pub fn trend(self) -> Option<TrendCategory> {
        match self {
            PointClass::Baseline => None,
            PointClass::Trend(t) => Some(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub delta: Option<f64>,
    pub class: PointClass,
}

/// A break period read from the injury table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryInterval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

// core/src/derivation.rs
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DerivedPoint, PerformanceRecord, PerformanceSeries};

pub const MIN_COEFFICIENT: f64 = 0.1;
/// Sets assumed per session by the tonnage formula.
pub const DEFAULT_SETS_FACTOR: f64 = 4.0;

/// How repetitions are folded into the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// load + coeff * sum(sets)
    #[default]
    Additive,
    /// load + coeff * mean(sets)
    AveragedAdditive,
    /// load * mean(sets) * sets_factor
    Tonnage,
}

impl Formula {
    pub fn label(self) -> &'static str {
        match self {
            Formula::Additive => "additive",
            Formula::AveragedAdditive => "averaged additive",
            Formula::Tonnage => "tonnage",
        }
    }
}

/// Repetition weight. Only constructible through `new`, so anything that
/// reaches the engine is >= MIN_COEFFICIENT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Coefficient(f64);

impl Coefficient {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value < MIN_COEFFICIENT {
            return Err(ConfigError::CoefficientTooSmall {
                min: MIN_COEFFICIENT,
                got: value,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Validated sets factor for the tonnage formula (> 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SetsFactor(f64);

impl SetsFactor {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidSetsFactor(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for SetsFactor {
    fn default() -> Self {
        Self(DEFAULT_SETS_FACTOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DerivationMode {
    /// Plot the raw load.
    #[default]
    LoadOnly,
    Repetitions {
        formula: Formula,
        coefficient: Coefficient,
        sets_factor: SetsFactor,
    },
}

impl DerivationMode {
    pub fn repetitions_enabled(&self) -> bool {
        matches!(self, DerivationMode::Repetitions { .. })
    }

    /// Performance value of a single record under this mode.
    pub fn value_of(&self, rec: &PerformanceRecord) -> f64 {
        match *self {
            DerivationMode::LoadOnly => rec.load,
            DerivationMode::Repetitions {
                formula,
                coefficient,
                sets_factor,
            } => match formula {
                Formula::Additive => rec.load + coefficient.get() * rec.rep_sum(),
                Formula::AveragedAdditive => rec.load + coefficient.get() * rec.rep_mean(),
                Formula::Tonnage => rec.load * rec.rep_mean() * sets_factor.get(),
            },
        }
    }
}

/// Derive the plotted value of every record.
///
/// Builds a new vector from the untouched series; calling it again with the
/// same mode gives the same values, and switching modes never sees values
/// from a previous run. Records whose value overflows to infinity are left
/// out, so every returned `performance_value` is finite.
pub fn derive(series: &PerformanceSeries, mode: &DerivationMode) -> Vec<DerivedPoint> {
    let mut overflowed = 0usize;
    let out: Vec<DerivedPoint> = series
        .records
        .iter()
        .filter_map(|rec| {
            let value = mode.value_of(rec);
            if !value.is_finite() {
                overflowed += 1;
                return None;
            }
            Some(DerivedPoint {
                date: rec.date,
                load: rec.load,
                performance_value: value,
            })
        })
        .collect();
    if overflowed > 0 {
        warn!("derive: left out {} record(s) with a non-finite value", overflowed);
    }
    debug!("derive: {} point(s), mode={:?}", out.len(), mode);
    out
}

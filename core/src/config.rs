// core/src/config.rs
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::derivation::{Coefficient, DerivationMode, Formula, SetsFactor};
use crate::error::ConfigError;

/// User-facing chart settings. Every field is optional so a config file, CLI
/// flags and the Python payload can each set only what they care about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default, alias = "repetitions_enabled")]
    pub repetitions: Option<bool>,
    #[serde(default)]
    pub formula: Option<Formula>,
    #[serde(default, alias = "coeff")]
    pub coefficient: Option<f64>,
    #[serde(default)]
    pub sets_factor: Option<f64>,
    #[serde(default)]
    pub show_breaks: Option<bool>,
}

/// Validated settings handed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartOptions {
    pub mode: DerivationMode,
    pub show_breaks: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            mode: DerivationMode::LoadOnly,
            show_breaks: true,
        }
    }
}

impl ChartConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let mut de = serde_json::Deserializer::from_str(s);
        spte::deserialize(&mut de).map_err(|e| ConfigError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Fields set in `over` win.
    pub fn merged(self, over: ChartConfig) -> ChartConfig {
        ChartConfig {
            repetitions: over.repetitions.or(self.repetitions),
            formula: over.formula.or(self.formula),
            coefficient: over.coefficient.or(self.coefficient),
            sets_factor: over.sets_factor.or(self.sets_factor),
            show_breaks: over.show_breaks.or(self.show_breaks),
        }
    }

    /// Check the values and build `ChartOptions`. Coefficient and sets factor
    /// are only looked at when repetitions are on.
    pub fn validate(&self) -> Result<ChartOptions, ConfigError> {
        let mode = if self.repetitions.unwrap_or(false) {
            DerivationMode::Repetitions {
                formula: self.formula.unwrap_or_default(),
                coefficient: match self.coefficient {
                    Some(c) => Coefficient::new(c)?,
                    None => Coefficient::default(),
                },
                sets_factor: match self.sets_factor {
                    Some(f) => SetsFactor::new(f)?,
                    None => SetsFactor::default(),
                },
            }
        } else {
            DerivationMode::LoadOnly
        };
        Ok(ChartOptions {
            mode,
            show_breaks: self.show_breaks.unwrap_or(true),
        })
    }
}

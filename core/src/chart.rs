// core/src/chart.rs
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::derivation::{DerivationMode, Formula};
use crate::types::{ClassifiedPoint, InjuryInterval, PointClass, TrendCategory};

pub const SEGMENT_LINE_WIDTH: u32 = 2;
pub const MARKER_SIZE: u32 = 8;
pub const LEGEND_LINE_WIDTH: u32 = 4;

pub const OVERLAY_FILL: &str = "blue";
pub const OVERLAY_OPACITY: f64 = 0.3;
pub const OVERLAY_LINE_WIDTH: u32 = 1;
pub const OVERLAY_ANNOTATION_POSITION: &str = "top left";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Line between two consecutive records. Colored by the change it shows,
/// i.e. by the class of `to`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: ChartPoint,
    pub to: ChartPoint,
    pub category: TrendCategory,
    pub color: &'static str,
    pub line_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub point: ChartPoint,
    pub class: PointClass,
    pub color: &'static str,
    pub size: u32,
}

/// Shaded vertical band for one break period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalOverlay {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    pub fill_color: &'static str,
    pub opacity: f64,
    pub line_width: u32,
    pub annotation_position: &'static str,
}

impl From<&InjuryInterval> for IntervalOverlay {
    fn from(iv: &InjuryInterval) -> Self {
        Self {
            start: iv.start_date,
            end: iv.end_date,
            label: iv.reason.clone(),
            fill_color: OVERLAY_FILL,
            opacity: OVERLAY_OPACITY,
            line_width: OVERLAY_LINE_WIDTH,
            annotation_position: OVERLAY_ANNOTATION_POSITION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: TrendCategory,
    pub label: &'static str,
    pub color: &'static str,
    pub line_width: u32,
}

/// The fixed category legend, one entry per trend category.
pub fn legend() -> Vec<LegendEntry> {
    TrendCategory::ALL
        .iter()
        .map(|&c| LegendEntry {
            category: c,
            label: c.label(),
            color: c.color(),
            line_width: LEGEND_LINE_WIDTH,
        })
        .collect()
}

/// Renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub y_axis_title: &'static str,
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    pub overlays: Vec<IntervalOverlay>,
    pub legend: Vec<LegendEntry>,
    /// (min, max) of the plotted values, `None` for an empty series.
    pub y_range: Option<(f64, f64)>,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn title_for(exercise: &str, mode: &DerivationMode) -> String {
    match mode {
        DerivationMode::LoadOnly => format!("Performance trend (load only): {exercise}"),
        DerivationMode::Repetitions {
            formula,
            coefficient,
            ..
        } => match formula {
            Formula::Tonnage => {
                format!("Performance trend (with repetitions, tonnage): {exercise}")
            }
            _ => format!(
                "Performance trend (with repetitions, {} x{:.2}): {exercise}",
                formula.label(),
                coefficient.get()
            ),
        },
    }
}

fn value_range(points: &[ClassifiedPoint]) -> Option<(f64, f64)> {
    let min = points.iter().map(|p| OrderedFloat(p.value)).min()?;
    let max = points.iter().map(|p| OrderedFloat(p.value)).max()?;
    Some((min.into_inner(), max.into_inner()))
}

/// Compose the figure. Never fails: with fewer than two points there are
/// simply no segments.
pub fn assemble(
    exercise: &str,
    points: &[ClassifiedPoint],
    intervals: &[InjuryInterval],
    mode: &DerivationMode,
) -> Figure {
    let cp = |p: &ClassifiedPoint| ChartPoint {
        date: p.date,
        value: p.value,
    };

    let segments = points
        .windows(2)
        .filter_map(|w| {
            let category = w[1].class.trend()?;
            Some(Segment {
                from: cp(&w[0]),
                to: cp(&w[1]),
                category,
                color: category.color(),
                line_width: SEGMENT_LINE_WIDTH,
            })
        })
        .collect();

    let markers = points
        .iter()
        .map(|p| Marker {
            point: cp(p),
            class: p.class,
            color: p.class.color(),
            size: MARKER_SIZE,
        })
        .collect();

    Figure {
        title: title_for(exercise, mode),
        y_axis_title: if mode.repetitions_enabled() {
            "Performance"
        } else {
            "Load (kg)"
        },
        segments,
        markers,
        overlays: intervals.iter().map(IntervalOverlay::from).collect(),
        legend: legend(),
        y_range: value_range(points),
    }
}

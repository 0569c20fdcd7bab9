// core/src/trend.rs
use std::cmp::Ordering;

use log::warn;

use crate::types::{ClassifiedPoint, DerivedPoint, PointClass, TrendCategory};

/// Category of a point-to-point change. Exact comparison: only a delta of
/// exactly zero is a stagnation. NaN has no category.
pub fn categorize(delta: f64) -> Option<TrendCategory> {
    match delta.partial_cmp(&0.0)? {
        Ordering::Greater => Some(TrendCategory::Increase),
        Ordering::Less => Some(TrendCategory::Decrease),
        Ordering::Equal => Some(TrendCategory::Stagnation),
    }
}

/// Attach delta and render class to every derived point.
/// The first point is `PointClass::Baseline` with no delta. Non-finite values
/// are skipped: they have no place on the value axis and no defined change.
pub fn classify(points: &[DerivedPoint]) -> Vec<ClassifiedPoint> {
    let mut out = Vec::with_capacity(points.len());
    let mut prev: Option<f64> = None;
    for p in points {
        let value = p.performance_value;
        if !value.is_finite() {
            warn!("classify: skipping non-finite value on {}", p.date);
            continue;
        }
        let delta = prev.map(|pv| value - pv);
        let class = match delta.map(categorize) {
            None => PointClass::Baseline,
            Some(Some(c)) => PointClass::Trend(c),
            Some(None) => {
                warn!("classify: undefined change on {}", p.date);
                continue;
            }
        };
        out.push(ClassifiedPoint {
            date: p.date,
            value,
            delta,
            class,
        });
        prev = Some(value);
    }
    out
}

// core/tests/test_derivation.rs
mod common;

use common::{d, weekly_log};
use liftgraph_core::{
    derive, normalize_series, Coefficient, DerivationMode, Formula, PerformanceRecord,
    PerformanceSeries, SetsFactor,
};

fn reps(formula: Formula, coeff: f64) -> DerivationMode {
    DerivationMode::Repetitions {
        formula,
        coefficient: Coefficient::new(coeff).unwrap(),
        sets_factor: SetsFactor::default(),
    }
}

fn one(load: f64, sets: &[f64]) -> PerformanceSeries {
    PerformanceSeries {
        records: vec![PerformanceRecord {
            date: d(2024, 1, 1),
            load,
            repetition_sets: sets.to_vec(),
        }],
        ..Default::default()
    }
}

#[test]
fn load_only_plots_the_load() {
    let series = normalize_series(&weekly_log()).unwrap();
    let values: Vec<f64> = derive(&series, &DerivationMode::LoadOnly)
        .iter()
        .map(|p| p.performance_value)
        .collect();
    assert_eq!(values, vec![100.0, 105.0, 105.0, 95.0]);
}

#[test]
fn additive_example() {
    // 100 + 0.5 * (8 + 8 + 6) = 111
    let out = derive(&one(100.0, &[8.0, 8.0, 6.0]), &reps(Formula::Additive, 0.5));
    assert_eq!(out[0].performance_value, 111.0);
    assert_eq!(out[0].load, 100.0, "source load stays available");
}

#[test]
fn averaged_additive_uses_the_mean() {
    // 100 + 2 * mean(8, 8, 5) = 114
    let out = derive(&one(100.0, &[8.0, 8.0, 5.0]), &reps(Formula::AveragedAdditive, 2.0));
    assert_eq!(out[0].performance_value, 114.0);
}

#[test]
fn tonnage_multiplies_by_mean_and_sets_factor() {
    // 60 * mean(10, 8) * 4 = 2160
    let out = derive(&one(60.0, &[10.0, 8.0]), &reps(Formula::Tonnage, 1.0));
    assert_eq!(out[0].performance_value, 2160.0);

    let three_sets = DerivationMode::Repetitions {
        formula: Formula::Tonnage,
        coefficient: Coefficient::default(),
        sets_factor: SetsFactor::new(3.0).unwrap(),
    };
    assert_eq!(derive(&one(60.0, &[10.0, 8.0]), &three_sets)[0].performance_value, 1620.0);
}

#[test]
fn empty_sets_count_as_zero() {
    let s = one(80.0, &[]);
    assert_eq!(derive(&s, &reps(Formula::Additive, 0.5))[0].performance_value, 80.0);
    assert_eq!(derive(&s, &reps(Formula::AveragedAdditive, 0.5))[0].performance_value, 80.0);
    let t = derive(&s, &reps(Formula::Tonnage, 0.5))[0].performance_value;
    assert_eq!(t, 0.0);
    assert!(t.is_finite());
}

#[test]
fn toggling_modes_never_compounds() {
    let series = normalize_series(&weekly_log()).unwrap();
    let mode = reps(Formula::AveragedAdditive, 1.5);

    let first = derive(&series, &mode);
    let plain = derive(&series, &DerivationMode::LoadOnly);
    let again = derive(&series, &mode);

    assert_eq!(first, again);
    let loads: Vec<f64> = plain.iter().map(|p| p.performance_value).collect();
    assert_eq!(loads, vec![100.0, 105.0, 105.0, 95.0]);
    // every row derived from its own load, not from a previously adjusted one
    for (p, rec) in first.iter().zip(series.records.iter()) {
        assert_eq!(p.performance_value, rec.load + 1.5 * rec.rep_mean());
    }
}

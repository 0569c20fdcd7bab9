// core/tests/prop_series.rs
use chrono::{Duration, NaiveDate};
use liftgraph_core::{
    assemble, classify, derive, normalize_series, Coefficient, DerivationMode, Formula,
    PointClass, RawTable, SetsFactor, TrendCategory,
};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

/// A cell that is either a good date, garbage or empty.
fn date_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (0i64..400).prop_map(|d| (base() + Duration::days(d)).format("%Y-%m-%d").to_string()),
        1 => "[a-z]{0,6}".prop_map(|s| s),
    ]
}

fn load_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (0u32..4000).prop_map(|v| format!("{}", v as f64 / 10.0)),
        1 => Just(String::new()),
        1 => Just("n/a".to_string()),
    ]
}

fn rep_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (0u32..30).prop_map(|v| v.to_string()),
        1 => Just(String::new()),
    ]
}

fn raw_log() -> impl Strategy<Value = RawTable> {
    prop::collection::vec(
        (date_cell(), load_cell(), prop::collection::vec(rep_cell(), 0..5)),
        0..40,
    )
    .prop_map(|rows| {
        let mut t = RawTable::new(["Date", "Kg", "S1", "S2", "S3", "S4"]);
        for (date, load, reps) in rows {
            let mut row = vec![date, load];
            row.extend(reps);
            t.rows.push(row);
        }
        t
    })
}

fn mode() -> impl Strategy<Value = DerivationMode> {
    prop_oneof![
        Just(DerivationMode::LoadOnly),
        (
            prop_oneof![
                Just(Formula::Additive),
                Just(Formula::AveragedAdditive),
                Just(Formula::Tonnage)
            ],
            1u32..50
        )
            .prop_map(|(formula, c)| DerivationMode::Repetitions {
                formula,
                coefficient: Coefficient::new(c as f64 / 10.0).unwrap(),
                sets_factor: SetsFactor::default(),
            }),
    ]
}

proptest! {
    #[test]
    fn normalized_series_is_sorted_and_parseable(raw in raw_log()) {
        let series = normalize_series(&raw).unwrap();
        prop_assert!(series.records.windows(2).all(|w| w[0].date <= w[1].date));
        prop_assert_eq!(series.len() + series.dropped.total(), raw.len());
        for rec in &series.records {
            prop_assert!(rec.load.is_finite());
            let from_input = raw.rows.iter().any(|r| {
                r[0] == rec.date.format("%Y-%m-%d").to_string()
                    && r[1].parse::<f64>().ok() == Some(rec.load)
            });
            prop_assert!(from_input);
        }
    }

    #[test]
    fn derivation_is_idempotent(raw in raw_log(), m in mode()) {
        let series = normalize_series(&raw).unwrap();
        let a = derive(&series, &m);
        let _ = derive(&series, &DerivationMode::LoadOnly);
        let b = derive(&series, &m);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.iter().all(|p| p.performance_value.is_finite()));
    }

    #[test]
    fn categories_partition_non_first_points(raw in raw_log(), m in mode()) {
        let series = normalize_series(&raw).unwrap();
        let points = classify(&derive(&series, &m));
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                prop_assert_eq!(p.class, PointClass::Baseline);
                prop_assert!(p.delta.is_none());
                continue;
            }
            let delta = p.delta.unwrap();
            let expected = if delta > 0.0 {
                TrendCategory::Increase
            } else if delta < 0.0 {
                TrendCategory::Decrease
            } else {
                TrendCategory::Stagnation
            };
            prop_assert_eq!(p.class, PointClass::Trend(expected));
        }

        let fig = assemble("X", &points, &[], &m);
        prop_assert_eq!(fig.segments.len(), points.len().saturating_sub(1));
        prop_assert_eq!(fig.legend.len(), 3);
    }
}

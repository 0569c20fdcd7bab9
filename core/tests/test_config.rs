// core/tests/test_config.rs
use liftgraph_core::{ChartConfig, ConfigError, DerivationMode, Formula};

#[test]
fn defaults_are_load_only_with_breaks() {
    let opts = ChartConfig::default().validate().unwrap();
    assert_eq!(opts.mode, DerivationMode::LoadOnly);
    assert!(opts.show_breaks);
}

#[test]
fn repetitions_config_from_json() {
    let cfg = ChartConfig::from_json(
        r#"{"repetitions": true, "formula": "averaged_additive", "coeff": 0.25}"#,
    )
    .unwrap();
    match cfg.validate().unwrap().mode {
        DerivationMode::Repetitions {
            formula,
            coefficient,
            sets_factor,
        } => {
            assert_eq!(formula, Formula::AveragedAdditive);
            assert_eq!(coefficient.get(), 0.25);
            assert_eq!(sets_factor.get(), 4.0);
        }
        other => panic!("expected repetitions mode, got {other:?}"),
    }
}

#[test]
fn small_coefficient_is_rejected_only_when_used() {
    let cfg = ChartConfig {
        repetitions: Some(true),
        coefficient: Some(0.05),
        ..Default::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::CoefficientTooSmall { .. })
    ));

    let ignored = ChartConfig {
        repetitions: Some(false),
        coefficient: Some(0.05),
        ..Default::default()
    };
    assert_eq!(ignored.validate().unwrap().mode, DerivationMode::LoadOnly);
}

#[test]
fn bad_sets_factor_is_rejected() {
    let cfg = ChartConfig {
        repetitions: Some(true),
        formula: Some(Formula::Tonnage),
        sets_factor: Some(0.0),
        ..Default::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSetsFactor(_))));
}

#[test]
fn parse_errors_carry_the_field_path() {
    match ChartConfig::from_json(r#"{"formula": "geometric"}"#) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, "formula"),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(ChartConfig::from_json(r#"{"colour": "red"}"#).is_err());
}

#[test]
fn flags_override_file_values() {
    let file = ChartConfig {
        repetitions: Some(true),
        coefficient: Some(2.0),
        show_breaks: Some(false),
        ..Default::default()
    };
    let flags = ChartConfig {
        coefficient: Some(0.5),
        ..Default::default()
    };
    let merged = file.merged(flags);
    assert_eq!(merged.coefficient, Some(0.5));
    assert_eq!(merged.repetitions, Some(true));
    assert_eq!(merged.show_breaks, Some(false));
}

#[test]
fn load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");
    std::fs::write(&path, r#"{"repetitions": true, "formula": "tonnage", "sets_factor": 5}"#).unwrap();
    let cfg = ChartConfig::load(&path).unwrap();
    assert_eq!(cfg.formula, Some(Formula::Tonnage));
    assert_eq!(cfg.sets_factor, Some(5.0));

    assert!(matches!(
        ChartConfig::load(&dir.path().join("missing.json")),
        Err(ConfigError::Io { .. })
    ));
}

// core/src/pipeline.rs
use log::{debug, warn};

use crate::chart::{assemble, Figure};
use crate::config::ChartOptions;
use crate::derivation::derive;
use crate::error::ChartError;
use crate::injuries::annotate_intervals;
use crate::metrics;
use crate::normalize::normalize_series;
use crate::session::Session;
use crate::storage::RecordStore;
use crate::table::RawTable;
use crate::trend::classify;
use crate::types::InjuryInterval;

/// Shown instead of a chart when the log lacks its date or load column.
pub const NO_DATA_NOTICE: &str = "No chart: the selected log needs a date and a load column.";

/// Raw log (+ optional injury table) to figure. Pure apart from counters:
/// same inputs, same figure, nothing kept between calls.
pub fn build_figure(
    exercise: &str,
    raw: &RawTable,
    injuries: Option<&RawTable>,
    options: &ChartOptions,
) -> Result<Figure, ChartError> {
    let m = metrics::global();

    // 1️⃣ clean + sort
    let series = normalize_series(raw)?;
    m.record_dropped(&series.dropped);

    // 2️⃣ break periods; an unusable injury table only costs the overlays
    let intervals: Vec<InjuryInterval> = match injuries {
        Some(table) if options.show_breaks => match annotate_intervals(table) {
            Ok(ann) => {
                m.record_skipped_intervals(ann.skipped);
                ann.intervals
            }
            Err(e) => {
                warn!("pipeline[{}]: no break overlays: {}", exercise, e);
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    // 3️⃣ performance value, fresh from the loads every time
    let derived = derive(&series, &options.mode);
    m.record_overflow(series.len() - derived.len());

    // 4️⃣ deltas + categories
    let points = classify(&derived);

    // 5️⃣ figure
    let figure = assemble(exercise, &points, &intervals, &options.mode);
    m.record_render(&options.mode);
    debug!(
        "pipeline[{}]: {} point(s), {} segment(s), {} overlay(s)",
        exercise,
        points.len(),
        figure.segments.len(),
        figure.overlays.len()
    );
    Ok(figure)
}

/// Entry point used by the front ends: reads the selected log and the injury
/// table from the store on every call and charts them with the session's
/// settings.
pub fn render_chart(
    store: &dyn RecordStore,
    session: &Session,
    exercise: &str,
) -> Result<Figure, ChartError> {
    let raw = store.load_series(exercise)?;
    let injuries = if session.options.show_breaks {
        store.load_injury_table()?
    } else {
        None
    };
    build_figure(exercise, &raw, injuries.as_ref(), &session.options)
}

#[derive(serde::Deserialize)]
struct ChartPayload {
    exercise: String,
    table: RawTable,
    #[serde(default)]
    injuries: Option<RawTable>,
    #[serde(default)]
    config: crate::config::ChartConfig,
}

/// JSON in, JSON out, for the Python front end.
///
/// Payload: `{exercise, table: {headers, rows}, injuries?, config?}`.
/// Result: `{"ok": true, "figure": {...}}`, or `{"ok": false, "reason":
/// "missing_column", ...}` when the caller should show the neutral notice.
/// Malformed payloads and invalid settings are errors.
pub fn build_figure_json(payload: &str) -> Result<String, String> {
    let mut de = serde_json::Deserializer::from_str(payload);
    let input: ChartPayload = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| format!("parse error (ChartPayload) at {}: {}", e.path(), e.inner()))?;

    let options = input.config.validate().map_err(|e| e.to_string())?;

    let out = match build_figure(&input.exercise, &input.table, input.injuries.as_ref(), &options) {
        Ok(figure) => serde_json::json!({ "ok": true, "figure": figure }),
        Err(e) if e.is_missing_column() => serde_json::json!({
            "ok": false,
            "reason": "missing_column",
            "notice": NO_DATA_NOTICE,
            "detail": e.to_string(),
        }),
        Err(e) => return Err(e.to_string()),
    };
    Ok(out.to_string())
}

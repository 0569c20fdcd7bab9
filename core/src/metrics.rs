// core/src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::derivation::DerivationMode;
use crate::types::DropStats;

/// Pipeline counters. Each instance owns its registry so tests can use a
/// private one; the pipeline reports into `global()`.
pub struct Metrics {
    registry: Registry,
    rows_dropped: IntCounterVec,
    intervals_skipped: IntCounter,
    charts_rendered: IntCounterVec,
}

static GLOBAL: Lazy<Metrics> =
    Lazy::new(|| Metrics::new().expect("static metric definitions are valid"));

pub fn global() -> &'static Metrics {
    &GLOBAL
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let rows_dropped = IntCounterVec::new(
            Opts::new(
                "liftgraph_rows_dropped_total",
                "Log rows dropped by the normalizer",
            ),
            &["reason"],
        )?;
        let intervals_skipped = IntCounter::with_opts(Opts::new(
            "liftgraph_intervals_skipped_total",
            "Injury rows skipped for unreadable dates",
        ))?;
        let charts_rendered = IntCounterVec::new(
            Opts::new("liftgraph_charts_rendered_total", "Figures assembled"),
            &["mode"],
        )?;

        registry.register(Box::new(rows_dropped.clone()))?;
        registry.register(Box::new(intervals_skipped.clone()))?;
        registry.register(Box::new(charts_rendered.clone()))?;

        Ok(Self {
            registry,
            rows_dropped,
            intervals_skipped,
            charts_rendered,
        })
    }

    pub fn record_dropped(&self, stats: &DropStats) {
        self.rows_dropped
            .with_label_values(&["date"])
            .inc_by(stats.bad_date as u64);
        self.rows_dropped
            .with_label_values(&["load"])
            .inc_by(stats.bad_load as u64);
    }

    /// Records whose derived value overflowed.
    pub fn record_overflow(&self, n: usize) {
        self.rows_dropped
            .with_label_values(&["overflow"])
            .inc_by(n as u64);
    }

    pub fn record_skipped_intervals(&self, n: usize) {
        self.intervals_skipped.inc_by(n as u64);
    }

    pub fn record_render(&self, mode: &DerivationMode) {
        let label = if mode.repetitions_enabled() {
            "repetitions"
        } else {
            "load"
        };
        self.charts_rendered.with_label_values(&[label]).inc();
    }

    pub fn rows_dropped(&self, reason: &str) -> u64 {
        self.rows_dropped.with_label_values(&[reason]).get()
    }

    pub fn intervals_skipped(&self) -> u64 {
        self.intervals_skipped.get()
    }

    pub fn charts_rendered(&self, mode: &str) -> u64 {
        self.charts_rendered.with_label_values(&[mode]).get()
    }

    /// Prometheus text exposition of all counters.
    pub fn render_text(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let m = Metrics::new().unwrap();
        m.record_dropped(&DropStats {
            bad_date: 2,
            bad_load: 1,
        });
        m.record_dropped(&DropStats {
            bad_date: 1,
            bad_load: 0,
        });
        m.record_skipped_intervals(3);
        m.record_render(&DerivationMode::LoadOnly);

        assert_eq!(m.rows_dropped("date"), 3);
        assert_eq!(m.rows_dropped("load"), 1);
        assert_eq!(m.intervals_skipped(), 3);
        assert_eq!(m.charts_rendered("load"), 1);
        assert_eq!(m.charts_rendered("repetitions"), 0);

        let text = m.render_text().unwrap();
        assert!(text.contains("liftgraph_rows_dropped_total"));
        assert!(text.contains("liftgraph_charts_rendered_total"));
    }
}

use crate::chart::Figure;
use crate::history::HistoryRow;

/// Short human-readable summary of a figure (stderr-friendly).
pub fn chart_report(figure: &Figure) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- {} ---\n", figure.title));
    out.push_str(&format!("Points: {}\n", figure.markers.len()));
    for cat in crate::types::TrendCategory::ALL {
        let n = figure.segments.iter().filter(|s| s.category == cat).count();
        out.push_str(&format!("{}: {}\n", cat.label(), n));
    }
    if let Some((lo, hi)) = figure.y_range {
        out.push_str(&format!("{}: {:.1} .. {:.1}\n", figure.y_axis_title, lo, hi));
    }
    for o in &figure.overlays {
        out.push_str(&format!("Break {} -> {}: {}\n", o.start, o.end, o.label));
    }
    out
}

pub fn print_chart_report(figure: &Figure) {
    print!("{}", chart_report(figure));
}

/// History as fixed-width text lines, newest first.
pub fn history_lines(rows: &[HistoryRow]) -> Vec<String> {
    rows.iter()
        .map(|r| {
            let sets = r
                .sets
                .iter()
                .enumerate()
                .map(|(i, s)| format!("S{}={}", i + 1, s))
                .collect::<Vec<_>>()
                .join("  ");
            format!("[{:>3}] {:<10}  {:>10}  {}", r.index, r.date, r.load, sets)
        })
        .collect()
}

pub fn print_history(rows: &[HistoryRow]) {
    for line in history_lines(rows) {
        println!("{line}");
    }
}

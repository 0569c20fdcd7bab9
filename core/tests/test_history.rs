// core/tests/test_history.rs
use liftgraph_core::cli::history_lines;
use liftgraph_core::{history_rows, RawTable};

#[test]
fn newest_first_with_display_formats() {
    let raw = RawTable::new(["Date", "Kg", "S1", "S2"])
        .with_row(["2024-01-01", "100", "8", "7.25"])
        .with_row(["2024-01-15", "102.5", "8", ""])
        .with_row(["oops", "abc", "6", "6"]);

    let rows = history_rows(&raw);
    assert_eq!(rows.len(), 3, "history keeps unreadable rows so they can be deleted");

    assert_eq!(rows[0].index, 1);
    assert_eq!(rows[0].date, "15-01-2024");
    assert_eq!(rows[0].load, "102.5 Kg");
    assert_eq!(rows[0].sets, vec!["8", "N/A"]);

    assert_eq!(rows[1].date, "01-01-2024");
    assert_eq!(rows[1].load, "100.0 Kg");
    assert_eq!(rows[1].sets, vec!["8", "7.3"]);

    assert_eq!(rows[2].index, 2);
    assert_eq!(rows[2].date, "N/A");
    assert_eq!(rows[2].load, "N/A");
}

#[test]
fn text_lines_carry_row_index() {
    let raw = RawTable::new(["Date", "Kg", "S1"]).with_row(["2024-01-01", "60", "5"]);
    let lines = history_lines(&history_rows(&raw));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[  0] 01-01-2024"), "{}", lines[0]);
    assert!(lines[0].contains("60.0 Kg"));
    assert!(lines[0].contains("S1=5"));
}

//! Text rendering of analysis reports.

use std::fmt::Write;

use chess_analysis::{GameAnalysisReport, MoveClassification, SideSummary};
use chess_core::Side;

/// Renders `report` as a plain-text table followed by per-side summaries.
pub fn render_text(report: &GameAnalysisReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Start:  {}", report.start_fen);
    let _ = writeln!(out, "Depth:  {}", report.depth);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>4}  {:<5}  {:<9} {:<9} {:>8} {:>8} {:>7}  {}",
        "#", "side", "played", "engine", "before", "after", "delta", "class"
    );

    for record in &report.moves {
        let number = match record.side {
            Side::White => format!("{}.", record.move_number),
            Side::Black => format!("{}...", record.move_number),
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<5}  {:<9} {:<9} {:>8} {:>8} {:>+7.2}  {}",
            number,
            record.side,
            record.played_san,
            record.recommended_san,
            record.eval_before,
            record.eval_after,
            record.delta,
            record.classification
        );
    }

    let _ = writeln!(out);
    write_summary(&mut out, "White", &report.white);
    write_summary(&mut out, "Black", &report.black);
    out
}

fn write_summary(out: &mut String, label: &str, summary: &SideSummary) {
    let _ = writeln!(
        out,
        "{}: {} moves, accuracy {:.1}%, average delta {:+.2}",
        label, summary.moves, summary.accuracy, summary.average_delta
    );
    let counts: Vec<String> = MoveClassification::ALL
        .iter()
        .filter(|&&tier| summary.tiers.get(tier) > 0)
        .map(|&tier| format!("{} {}", tier, summary.tiers.get(tier)))
        .collect();
    if !counts.is_empty() {
        let _ = writeln!(out, "  {}", counts.join(", "));
    }
}

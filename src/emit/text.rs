use crate::report::{CheckEntry, CheckReport, OrderReport};

/// Format an order report for terminal output.
pub fn format_order(report: &OrderReport) -> String {
    let mut out = format!("{} ({} tests)\n", report.suite, report.total);

    for entry in &report.order {
        let mut line = format!("  {}. {}", entry.position, entry.name);
        if !entry.depends_on.is_empty() {
            line.push_str(&format!(" (depends on: {})", entry.depends_on.join(", ")));
        }
        line.push('\n');
        out.push_str(&line);
    }

    out
}

fn decision_label(entry: &CheckEntry) -> &'static str {
    if entry.decision == "skip" { "SKIP" } else { "RUN" }
}

/// Format a check report for terminal output.
pub fn format_check(report: &CheckReport) -> String {
    let mut out = format!("{} ({} tests)\n", report.suite, report.summary.total);

    for entry in &report.results {
        let mut line = format!("  [{}] {}", decision_label(entry), entry.name);
        if let Some(reason) = &entry.reason {
            line.push_str(&format!("\n        → {reason}"));
        }
        line.push('\n');
        out.push_str(&line);
    }

    out.push_str(&format!(
        "\nDecisions: {} run, {} skipped\n",
        report.summary.run, report.summary.skipped
    ));
    out
}

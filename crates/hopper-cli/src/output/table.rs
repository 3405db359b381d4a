//! End-of-run summary table.
//!
//! Fixed-width box layout with one row per mod, in the order the mods were
//! first seen. Long titles and version numbers are truncated to keep the
//! columns aligned.

use std::fmt::Write;

use hopper_core::types::UpdateReport;

const RULE: &str = "+------------------------------------+-----------------+-------------+";

/// Render the full summary box for a finished report
pub fn render(report: &UpdateReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "+==================================================================+");
    let _ = writeln!(out, "|                          UPDATE SUMMARY                          |");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "| {} | {} | {} |", cell("Mod Name", 34), cell("Status", 15), cell("Version", 11));
    let _ = writeln!(out, "{}", RULE);
    for (_, record) in report.iter() {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            cell(&record.title, 34),
            cell(record.status.as_str(), 15),
            cell(record.version_display(), 11),
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Truncate to `width` characters, then left-pad to `width`
fn cell(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopper_core::types::OutcomeStatus;

    #[test]
    fn test_cell_pads_and_truncates() {
        assert_eq!(cell("abc", 5), "abc  ");
        assert_eq!(cell("abcdefgh", 5), "abcde");
    }

    #[test]
    fn test_render_rows_in_report_order() {
        let mut report = UpdateReport::new();
        report.insert_queued("sodium", "Sodium");
        report.resolve("sodium", OutcomeStatus::Updated, Some("0.5.3".to_string()));
        report.insert_not_found("mystery-mod.jar");

        let rendered = render(&report);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[1].contains("UPDATE SUMMARY"));
        assert_eq!(
            lines[5],
            "| Sodium                             | Updated         | 0.5.3       |"
        );
        assert_eq!(
            lines[6],
            "| mystery-mod.jar                    | Not Found       | N/A         |"
        );
    }

    #[test]
    fn test_long_title_truncated_to_column() {
        let mut report = UpdateReport::new();
        report.insert_queued(
            "long",
            "An Extraordinarily Long Mod Title That Overflows The Column",
        );
        report.resolve("long", OutcomeStatus::NoUpdate, None);

        let rendered = render(&report);
        for line in rendered.lines().skip(2) {
            assert_eq!(line.chars().count(), RULE.len());
        }
    }
}

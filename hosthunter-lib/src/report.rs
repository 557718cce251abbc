//! Result aggregation and report rendering.
//!
//! `BatchReport` collects one row per delivered outcome; the render
//! functions turn the finished row set into a bordered table or a CSV
//! export. Rendering is a pure function of the rows and produces identical
//! bytes on every call.

use serde::{Deserialize, Serialize};

use crate::types::{LookupItem, LookupOutcome};

/// Column headers, prepended to the table and CSV at render time only.
pub const REPORT_HEADER: [&str; 3] = ["IP Address", "Status", "Hostname"];

/// Rendering-ready projection of one lookup outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// The token as supplied by the caller
    pub address: String,

    /// "Success", "Failed" or "Not Applicable"
    pub status: String,

    /// Hostnames joined with `", "`, or the failure reason verbatim
    pub hostname: String,
}

impl ResultRow {
    /// Whether this row records a successful resolution.
    pub fn is_success(&self) -> bool {
        self.status == "Success"
    }
}

/// Accumulated state of one resolution batch.
///
/// Created empty when dispatch begins and mutated only by outcome delivery.
/// `total` is fixed at dispatch time; `completed` increments exactly once
/// per recorded outcome. Rows are stored in completion order, which is not
/// the dispatch order. The report is consumed once after `is_complete()`.
#[derive(Debug, Clone)]
pub struct BatchReport {
    total: usize,
    completed: usize,
    rows: Vec<ResultRow>,
}

impl BatchReport {
    /// Start an empty report for a batch of `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            rows: Vec::with_capacity(total),
        }
    }

    /// Record exactly one outcome for one item.
    ///
    /// Append-only; makes no assumption about arrival order.
    pub fn record(&mut self, item: LookupItem, outcome: LookupOutcome) {
        self.rows.push(ResultRow {
            address: item.token,
            status: outcome.status_label().to_string(),
            hostname: outcome.detail_text(),
        });
        self.completed += 1;
    }

    /// Number of items dispatched for this batch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of outcomes delivered so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Whether every dispatched item has delivered its outcome.
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    /// Read-only snapshot of the accumulated rows, in completion order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }
}

/// Per-column maximum display width across all rows, headers included.
pub fn column_widths(rows: &[ResultRow]) -> [usize; 3] {
    let mut widths = [
        REPORT_HEADER[0].len(),
        REPORT_HEADER[1].len(),
        REPORT_HEADER[2].len(),
    ];

    for row in rows {
        widths[0] = widths[0].max(row.address.len());
        widths[1] = widths[1].max(row.status.len());
        widths[2] = widths[2].max(row.hostname.len());
    }

    widths
}

/// Render rows as a bordered grid with a separator after every row.
///
/// Returns a "no results" notice instead of an empty grid when there are
/// no rows.
pub fn render_table(rows: &[ResultRow]) -> String {
    if rows.is_empty() {
        return "No results to display.".to_string();
    }

    let widths = column_widths(rows);
    let separator = format!(
        "+{}+{}+{}+",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2),
        "-".repeat(widths[2] + 2)
    );

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format_row(
        REPORT_HEADER[0],
        REPORT_HEADER[1],
        REPORT_HEADER[2],
        &widths,
    ));
    out.push_str(&separator);
    out.push('\n');

    for row in rows {
        out.push_str(&format_row(&row.address, &row.status, &row.hostname, &widths));
        out.push_str(&separator);
        out.push('\n');
    }

    out
}

fn format_row(address: &str, status: &str, hostname: &str, widths: &[usize; 3]) -> String {
    format!(
        "| {:<aw$} | {:<sw$} | {:<hw$} |\n",
        address,
        status,
        hostname,
        aw = widths[0],
        sw = widths[1],
        hw = widths[2]
    )
}

/// Serialize header and rows as comma-joined lines.
///
/// Fields are joined with bare commas: embedded commas or newlines in
/// hostnames and error messages are not escaped and will corrupt the
/// output. Known limitation, kept for compatibility with existing
/// consumers of the export.
pub fn to_csv(rows: &[ResultRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(REPORT_HEADER.join(","));

    for row in rows {
        lines.push(format!("{},{},{}", row.address, row.status, row.hostname));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LookupItem, LookupOutcome};

    fn sample_rows() -> Vec<ResultRow> {
        let mut report = BatchReport::new(2);
        report.record(
            LookupItem::new("1.1.1.1"),
            LookupOutcome::Success {
                hostnames: vec!["one.one.one.one".to_string()],
            },
        );
        report.record(
            LookupItem::new("10.255.255.1"),
            LookupOutcome::Failure {
                reason: "Error: NXDOMAIN: no PTR record exists".to_string(),
            },
        );
        report.rows().to_vec()
    }

    #[test]
    fn test_record_appends_one_row_per_call() {
        let mut report = BatchReport::new(3);
        assert_eq!(report.completed(), 0);
        assert!(!report.is_complete());

        report.record(
            LookupItem::new("10.0.0.0/24"),
            LookupOutcome::NotApplicable {
                reason: "CIDR range - Not handled".to_string(),
            },
        );
        assert_eq!(report.completed(), 1);
        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.rows()[0].status, "Not Applicable");
        assert!(!report.is_complete());
    }

    #[test]
    fn test_column_widths_include_header() {
        // Short rows: header text dominates every column.
        let rows = vec![ResultRow {
            address: "1.1.1.1".to_string(),
            status: "Failed".to_string(),
            hostname: "x".to_string(),
        }];
        assert_eq!(column_widths(&rows), [10, 6, 8]);
    }

    #[test]
    fn test_column_widths_grow_with_rows() {
        let rows = vec![ResultRow {
            address: "192.168.100.200".to_string(),
            status: "Not Applicable".to_string(),
            hostname: "a-rather-long-hostname.example.net".to_string(),
        }];
        assert_eq!(column_widths(&rows), [15, 14, 34]);
    }

    #[test]
    fn test_render_table_layout() {
        let rows = vec![ResultRow {
            address: "1.1.1.1".to_string(),
            status: "Success".to_string(),
            hostname: "one.one.one.one".to_string(),
        }];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();

        // separator, header, separator, row, separator
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[2], lines[4]);
        assert!(lines[0].starts_with("+-"));
        assert!(lines[1].contains("| IP Address |"));
        assert!(lines[3].contains("| 1.1.1.1"));
        assert!(lines[3].contains("| one.one.one.one |"));
    }

    #[test]
    fn test_render_table_empty_notice() {
        assert_eq!(render_table(&[]), "No results to display.");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let rows = sample_rows();
        assert_eq!(render_table(&rows), render_table(&rows));
        assert_eq!(to_csv(&rows), to_csv(&rows));
    }

    #[test]
    fn test_to_csv_header_and_rows() {
        let rows = sample_rows();
        let csv = to_csv(&rows);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines[0], "IP Address,Status,Hostname");
        assert_eq!(lines[1], "1.1.1.1,Success,one.one.one.one");
        assert_eq!(
            lines[2],
            "10.255.255.1,Failed,Error: NXDOMAIN: no PTR record exists"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_to_csv_empty_is_header_only() {
        assert_eq!(to_csv(&[]), "IP Address,Status,Hostname");
    }
}

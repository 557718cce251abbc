//! Display logic for the hosthunter CLI.
//!
//! This module handles all human-facing output: the startup banner, the
//! colorized result table, spinner animation, and summaries. Uses only the
//! `console` crate (already a dependency).

use console::{pad_str, style, Alignment, Term};
use hosthunter_lib::{column_widths, ResultRow, REPORT_HEADER};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Banner ───────────────────────────────────────────────────────────────────

/// Print the startup banner.
pub fn print_banner() {
    let border = "H".repeat(39);
    println!();
    println!("{}", style(&border).cyan().bold());
    println!(
        "{}{}{}",
        style("H").cyan().bold(),
        style("              HostHunter              ").cyan(),
        style("H").cyan().bold(),
    );
    println!(
        "{}{}{}",
        style("H").cyan().bold(),
        style("      A Reverse DNS Lookup Tool       ").cyan(),
        style("H").cyan().bold(),
    );
    println!("{}", style(&border).cyan().bold());
    println!();
}

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message (e.g. "Resolving 8 addresses...").
    ///
    /// Returns `None` if stderr isn't a terminal.
    pub fn start(message: String) -> Option<Self> {
        if !Term::stderr().is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Result table ─────────────────────────────────────────────────────────────

/// Print the result table with a color-coded status column.
///
/// Layout mirrors `hosthunter_lib::render_table`; only the status cell is
/// styled, padded before coloring so ANSI codes don't skew the alignment.
pub fn print_table(rows: &[ResultRow]) {
    if rows.is_empty() {
        println!("{}", style("No results to display.").yellow());
        return;
    }

    let widths = column_widths(rows);
    let separator = format!(
        "+{}+{}+{}+",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2),
        "-".repeat(widths[2] + 2)
    );

    println!("{}", separator);
    println!(
        "| {} | {} | {} |",
        pad_str(REPORT_HEADER[0], widths[0], Alignment::Left, None),
        pad_str(REPORT_HEADER[1], widths[1], Alignment::Left, None),
        pad_str(REPORT_HEADER[2], widths[2], Alignment::Left, None),
    );
    println!("{}", separator);

    for row in rows {
        let padded_status = pad_str(&row.status, widths[1], Alignment::Left, None).to_string();
        let colored_status = if row.is_success() {
            style(padded_status).green()
        } else {
            style(padded_status).red()
        };

        println!(
            "| {} | {} | {} |",
            pad_str(&row.address, widths[0], Alignment::Left, None),
            colored_status,
            pad_str(&row.hostname, widths[2], Alignment::Left, None),
        );
        println!("{}", separator);
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(rows: &[ResultRow], duration: Duration) {
    let resolved = rows.iter().filter(|r| r.status == "Success").count();
    let failed = rows.iter().filter(|r| r.status == "Failed").count();
    let skipped = rows.iter().filter(|r| r.status == "Not Applicable").count();

    println!();
    println!(
        "{} address{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(rows.len()).bold(),
        if rows.len() == 1 { "" } else { "es" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} resolved", resolved)).green(),
        style("|").dim(),
        style(format!("{} failed", failed)).red(),
        style("|").dim(),
        style(format!("{} skipped", skipped)).yellow(),
    );
}

/// Confirm a CSV export landed on disk.
pub fn print_saved(path: &str) {
    println!("{}", style(format!("Results saved to {}", path)).green());
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use hosthunter_lib::{column_widths, ResultRow};

    fn make_row(address: &str, status: &str, hostname: &str) -> ResultRow {
        ResultRow {
            address: address.to_string(),
            status: status.to_string(),
            hostname: hostname.to_string(),
        }
    }

    #[test]
    fn test_widths_match_library_renderer() {
        // The colored table must line up with the plain renderer's grid.
        let rows = vec![
            make_row("1.1.1.1", "Success", "one.one.one.one"),
            make_row("10.255.255.1", "Failed", "Error: NXDOMAIN: no PTR record exists"),
        ];

        let widths = column_widths(&rows);
        let plain = hosthunter_lib::render_table(&rows);
        let first_line = plain.lines().next().unwrap();

        // +2 padding per column, 4 corner/junction characters
        assert_eq!(first_line.len(), widths.iter().sum::<usize>() + 3 * 2 + 4);
    }
}

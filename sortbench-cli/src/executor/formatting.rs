//! Output Formatting
//!
//! Human-readable output formatting for benchmark reports.
//!
//! Generates terminal-friendly output with:
//! - One table per chart panel, sizes as columns
//! - Sentinel cells labelled by status instead of a number
//! - A failure list carrying every sentinel's message
//! - Run summary

use sortbench_core::MeasurementStatus;
use sortbench_report::{CurveKind, Report};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Sortbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let sizes: Vec<String> = report
        .series
        .sizes()
        .iter()
        .map(|n| n.to_string())
        .collect();

    let cells = |value: fn(&sortbench_core::MeasurementResult) -> String| {
        report
            .series
            .series()
            .iter()
            .map(|s| {
                let row = s
                    .results
                    .iter()
                    .map(|r| match r.status {
                        MeasurementStatus::Measured => value(r),
                        status => status.as_str().to_string(),
                    })
                    .collect();
                (s.algorithm.clone(), row)
            })
            .collect::<Vec<_>>()
    };

    push_table(
        &mut output,
        "Execution time (s)",
        &sizes,
        &cells(|r| format_number(r.elapsed_seconds)),
    );
    push_table(
        &mut output,
        "Peak memory (bytes)",
        &sizes,
        &cells(|r| r.peak_memory_bytes.to_string()),
    );

    for (title, kind) in [
        ("Theoretical time complexity", CurveKind::Time),
        ("Theoretical space complexity", CurveKind::Space),
    ] {
        let rows: Vec<(String, Vec<String>)> = report
            .curves
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| {
                (
                    c.label.clone(),
                    c.values.iter().map(|v| format_number(*v)).collect(),
                )
            })
            .collect();
        push_table(&mut output, title, &sizes, &rows);
    }

    // Failures
    let sentinels: Vec<_> = report.series.sentinels().collect();
    if !sentinels.is_empty() {
        output.push_str("\nFailures\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for r in sentinels {
            let icon = match r.status {
                MeasurementStatus::Failed => "✗",
                MeasurementStatus::TimedOut => "⏱",
                _ => "⊘",
            };
            output.push_str(&format!(
                "  {} {} n={}: {}\n",
                icon,
                r.algorithm,
                r.size,
                r.failure.as_deref().unwrap_or(r.status.as_str())
            ));
        }
    }

    // Summary
    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Algorithms: {}  Sizes: {}  Measured: {}  Failed: {}  Timed out: {}  Skipped: {}\n",
        report.summary.algorithms,
        report.summary.sizes,
        report.summary.measured,
        report.summary.failed,
        report.summary.timed_out,
        report.summary.skipped
    ));
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

fn push_table(output: &mut String, title: &str, sizes: &[String], rows: &[(String, Vec<String>)]) {
    output.push_str(&format!("\n{}\n", title));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    if rows.is_empty() {
        output.push_str("  (no data)\n");
        return;
    }

    let max_name_len = rows.iter().map(|(n, _)| n.len()).max().unwrap_or(12);
    let col_width = sizes
        .iter()
        .chain(rows.iter().flat_map(|(_, cells)| cells.iter()))
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(8)
        .max(10);

    // Header row with sizes
    output.push_str(&format!("  {:<width$}", "n", width = max_name_len));
    for size in sizes {
        output.push_str(&format!(" | {:>w$}", size, w = col_width));
    }
    output.push('\n');

    // Separator
    output.push_str(&format!("  {}", "-".repeat(max_name_len)));
    for _ in sizes {
        output.push_str(&format!("-+-{}", "-".repeat(col_width)));
    }
    output.push('\n');

    for (name, cells) in rows {
        output.push_str(&format!("  {:<width$}", name, width = max_name_len));
        for cell in cells {
            output.push_str(&format!(" | {:>w$}", cell, w = col_width));
        }
        output.push('\n');
    }
}

/// Scientific notation for very large or small numbers
fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1_000_000.0 || value.abs() < 0.001 {
        format!("{:.2e}", value)
    } else if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.3}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::report::build_report;
    use sortbench_core::{BenchError, MeasurementResult, SeriesTable};
    use sortbench_report::ReportConfig;
    use std::time::Duration;

    fn config() -> ReportConfig {
        ReportConfig {
            sizes: vec![10, 100],
            range: (-1000, 1000),
            seed: None,
            timeout_ms: None,
            track_allocations: true,
            verify_output: true,
        }
    }

    #[test]
    fn test_four_tables_and_sentinels() {
        let mut table = SeriesTable::new(vec![10, 100]);
        table.record(MeasurementResult::measured(
            "merge",
            10,
            Duration::from_micros(3),
            160,
        ));
        table.record(MeasurementResult::from_error(
            "merge",
            100,
            &BenchError::Timeout {
                algorithm: "merge".into(),
                size: 100,
                budget: Duration::from_millis(5),
            },
        ));

        let text = format_human_output(&build_report(&table, config(), 2.0));
        assert!(text.contains("Execution time (s)"));
        assert!(text.contains("Peak memory (bytes)"));
        assert!(text.contains("Theoretical time complexity"));
        assert!(text.contains("Theoretical space complexity"));
        assert!(text.contains("timed_out"));
        assert!(text.contains("merge n=100"));
        assert!(text.contains("O(n log n)"));
        assert!(text.contains("Timed out: 1"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(0.25), "0.250");
        assert_eq!(format_number(2048.0), "2048");
        assert_eq!(format_number(1e-6), "1.00e-6");
    }
}

//! Report Building
//!
//! Wraps a finished series table with metadata, theoretical curves and a
//! summary.
//!
//! ## Pipeline
//!
//! ```text
//!   SeriesTable (read-only)
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │  Theoretical curves │  evaluated at the table's sizes
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │      Report         │  Ready for SVG/HTML/JSON/CSV/human output
//!   └─────────────────────┘
//! ```

use super::metadata::build_report_meta;
use sortbench_core::SeriesTable;
use sortbench_report::{Report, ReportConfig, default_curves};

/// Build a complete Report from a series table
///
/// # Arguments
/// * `series` - Measured table; copied, never modified
/// * `config` - Run configuration recorded in the metadata
/// * `total_duration_ms` - Total execution time in milliseconds
pub fn build_report(series: &SeriesTable, config: ReportConfig, total_duration_ms: f64) -> Report {
    Report::new(
        build_report_meta(config),
        series,
        &default_curves(),
        total_duration_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortbench_core::MeasurementResult;
    use std::time::Duration;

    #[test]
    fn test_report_samples_curves_at_sizes() {
        let mut table = SeriesTable::new(vec![2, 4]);
        table.record(MeasurementResult::measured("quick", 2, Duration::ZERO, 0));
        table.record(MeasurementResult::measured("quick", 4, Duration::ZERO, 0));
        let before = table.clone();

        let report = build_report(
            &table,
            ReportConfig {
                sizes: vec![2, 4],
                range: (0, 1),
                seed: Some(1),
                timeout_ms: None,
                track_allocations: false,
                verify_output: true,
            },
            0.5,
        );

        assert_eq!(table, before);
        assert_eq!(report.series, table);
        assert_eq!(report.curves.len(), 5);
        let quadratic = report.curves.iter().find(|c| c.label == "O(n^2)").unwrap();
        assert_eq!(quadratic.values, vec![4.0, 16.0]);
        assert_eq!(report.summary.measured, 2);
    }
}

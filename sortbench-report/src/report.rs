//! Report Data Structures

use crate::curves::{CurveSamples, TheoreticalCurve};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sortbench_core::{MeasurementStatus, SeriesTable};

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub series: SeriesTable,
    pub curves: Vec<CurveSamples>,
    pub summary: ReportSummary,
}

impl Report {
    /// Assemble a report. `series` is cloned; the caller's table is untouched.
    pub fn new(
        meta: ReportMeta,
        series: &SeriesTable,
        curves: &[TheoreticalCurve],
        total_duration_ms: f64,
    ) -> Self {
        Self {
            meta,
            series: series.clone(),
            curves: curves.iter().map(|c| c.sample(series.sizes())).collect(),
            summary: ReportSummary::from_series(series, total_duration_ms),
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Run configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub sizes: Vec<usize>,
    pub range: (i64, i64),
    pub seed: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub track_allocations: bool,
    pub verify_output: bool,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub algorithms: usize,
    pub sizes: usize,
    pub measured: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub skipped: usize,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Count statuses across the whole table
    pub fn from_series(series: &SeriesTable, total_duration_ms: f64) -> Self {
        let mut summary = ReportSummary {
            algorithms: series.series().len(),
            sizes: series.sizes().len(),
            total_duration_ms,
            ..Default::default()
        };
        for result in series.results() {
            match result.status {
                MeasurementStatus::Measured => summary.measured += 1,
                MeasurementStatus::Failed => summary.failed += 1,
                MeasurementStatus::TimedOut => summary.timed_out += 1,
                MeasurementStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    /// Any algorithm or measurement failure (timeouts excluded)
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

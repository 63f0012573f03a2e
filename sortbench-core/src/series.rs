//! Measurement Results
//!
//! `MeasurementResult` is one (algorithm, size) data point; `SeriesTable`
//! collects them per algorithm in ascending size order. A result whose
//! status is anything other than `Measured` is a sentinel: it records that
//! the pair could not be measured and why, and carries zeroed metrics.

use crate::error::BenchError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementStatus {
    /// Metrics are valid
    Measured,
    /// The algorithm or the measurement failed
    Failed,
    /// Exceeded the per-measurement budget
    TimedOut,
    /// Not attempted because a smaller size already timed out
    Skipped,
}

impl MeasurementStatus {
    /// Short label used in tables and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementStatus::Measured => "measured",
            MeasurementStatus::Failed => "failed",
            MeasurementStatus::TimedOut => "timed_out",
            MeasurementStatus::Skipped => "skipped",
        }
    }
}

/// One (algorithm, size) data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub algorithm: String,
    pub size: usize,
    pub status: MeasurementStatus,
    /// Wall-clock duration of the call, seconds
    pub elapsed_seconds: f64,
    /// Peak net heap usage during the call, bytes
    pub peak_memory_bytes: u64,
    /// Why the pair could not be measured
    pub failure: Option<String>,
}

impl MeasurementResult {
    /// A successful measurement
    pub fn measured(
        algorithm: impl Into<String>,
        size: usize,
        elapsed: Duration,
        peak_memory_bytes: u64,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            size,
            status: MeasurementStatus::Measured,
            elapsed_seconds: elapsed.as_secs_f64(),
            peak_memory_bytes,
            failure: None,
        }
    }

    /// Sentinel for a pair that raised `error`
    pub fn from_error(algorithm: impl Into<String>, size: usize, error: &BenchError) -> Self {
        let status = match error {
            BenchError::Timeout { .. } => MeasurementStatus::TimedOut,
            _ => MeasurementStatus::Failed,
        };
        Self::sentinel(algorithm, size, status, error.to_string())
    }

    /// Sentinel for a pair that was never attempted
    pub fn skipped(algorithm: impl Into<String>, size: usize, reason: impl Into<String>) -> Self {
        Self::sentinel(algorithm, size, MeasurementStatus::Skipped, reason.into())
    }

    fn sentinel(
        algorithm: impl Into<String>,
        size: usize,
        status: MeasurementStatus,
        message: String,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            size,
            status,
            elapsed_seconds: 0.0,
            peak_memory_bytes: 0,
            failure: Some(message),
        }
    }

    /// Whether the metrics are real
    pub fn is_measured(&self) -> bool {
        self.status == MeasurementStatus::Measured
    }

    /// Elapsed time, if measured
    pub fn elapsed(&self) -> Option<f64> {
        self.is_measured().then_some(self.elapsed_seconds)
    }

    /// Peak memory, if measured
    pub fn peak_memory(&self) -> Option<u64> {
        self.is_measured().then_some(self.peak_memory_bytes)
    }
}

/// Results of one algorithm across all sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub algorithm: String,
    pub results: Vec<MeasurementResult>,
}

/// Per-algorithm ordered results, in registry order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    sizes: Vec<usize>,
    series: Vec<Series>,
}

impl SeriesTable {
    /// Empty table for the given sizes
    pub fn new(sizes: Vec<usize>) -> Self {
        Self {
            sizes,
            series: Vec::new(),
        }
    }

    /// Declare an algorithm up front so it keeps its position even if every
    /// one of its measurements ends up a sentinel.
    pub fn register(&mut self, algorithm: &str) {
        if !self.series.iter().any(|s| s.algorithm == algorithm) {
            self.series.push(Series {
                algorithm: algorithm.to_string(),
                results: Vec::with_capacity(self.sizes.len()),
            });
        }
    }

    /// Append a result to its algorithm's series
    pub fn record(&mut self, result: MeasurementResult) {
        self.register(&result.algorithm);
        if let Some(series) = self
            .series
            .iter_mut()
            .find(|s| s.algorithm == result.algorithm)
        {
            debug_assert!(
                series.results.last().map_or(true, |last| last.size < result.size),
                "results must arrive in ascending size order"
            );
            series.results.push(result);
        }
    }

    /// Configured sizes (shared x domain)
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// All series in registry order
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Results for one algorithm
    pub fn get(&self, algorithm: &str) -> Option<&[MeasurementResult]> {
        self.series
            .iter()
            .find(|s| s.algorithm == algorithm)
            .map(|s| s.results.as_slice())
    }

    /// Algorithm names in registry order
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.algorithm.as_str())
    }

    /// Every result, series by series
    pub fn results(&self) -> impl Iterator<Item = &MeasurementResult> {
        self.series.iter().flat_map(|s| s.results.iter())
    }

    /// Every sentinel entry
    pub fn sentinels(&self) -> impl Iterator<Item = &MeasurementResult> {
        self.results().filter(|r| !r.is_measured())
    }

    /// Whether every algorithm has exactly one result per configured size
    pub fn is_complete(&self) -> bool {
        self.series.iter().all(|s| {
            s.results.len() == self.sizes.len()
                && s.results.iter().zip(&self.sizes).all(|(r, &n)| r.size == n)
        })
    }
}

//! Metric Collector
//!
//! Runs one algorithm once on a private copy of one input and reports its
//! wall-clock time and peak heap usage.
//!
//! ```text
//! clone input ─► open allocation session ─► start timer
//!      ─► sort (catch_unwind) ─► close session ─► stop timer
//!      ─► verify output (untimed, untracked)
//! ```

use crate::algorithms::AlgorithmEntry;
use crate::allocator::AllocationSession;
use crate::error::{BenchError, Result};
use crate::input::InputSample;
use crate::measure::Timer;
use crate::series::MeasurementResult;
use crate::stop::{StopHandle, Stopped};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Measures single (algorithm, input) pairs
#[derive(Debug, Clone, Copy)]
pub struct MetricCollector {
    /// Record peak heap usage (requires `TrackingAllocator`)
    pub track_allocations: bool,
    /// Check each output is a sorted permutation of its input
    pub verify_output: bool,
}

impl Default for MetricCollector {
    fn default() -> Self {
        Self {
            track_allocations: true,
            verify_output: true,
        }
    }
}

impl MetricCollector {
    /// Collector with output verification enabled
    pub fn new(track_allocations: bool) -> Self {
        Self {
            track_allocations,
            ..Self::default()
        }
    }

    /// Toggle output verification
    pub fn with_verification(mut self, verify_output: bool) -> Self {
        self.verify_output = verify_output;
        self
    }

    /// Measure `entry` on a copy of `input` on the current thread.
    ///
    /// `input` is never modified. A panicking algorithm yields
    /// `AlgorithmFailure`; an unusable tracking facility yields
    /// `MeasurementFailure`. Neither leaves a session open.
    pub fn measure(&self, entry: &AlgorithmEntry, input: &InputSample) -> Result<MeasurementResult> {
        let values = input.values.clone();

        let session = if self.track_allocations {
            Some(
                AllocationSession::begin().map_err(|e| BenchError::MeasurementFailure {
                    algorithm: entry.name.to_string(),
                    size: input.size,
                    reason: e.to_string(),
                })?,
            )
        } else {
            None
        };

        let timer = Timer::start();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            std::hint::black_box(entry.run(std::hint::black_box(values)))
        }));
        let peak_bytes = session.map(|s| s.finish().peak_bytes).unwrap_or(0);
        let elapsed = timer.elapsed();

        let output = outcome.map_err(|payload| BenchError::AlgorithmFailure {
            algorithm: entry.name.to_string(),
            size: input.size,
            message: panic_message(payload.as_ref()),
        })?;

        if self.verify_output {
            verify_sorted(entry, input, &output)?;
        }

        tracing::trace!(
            algorithm = entry.name,
            size = input.size,
            elapsed_ns = elapsed.as_nanos() as u64,
            peak_bytes,
            "measured"
        );

        Ok(MeasurementResult::measured(
            entry.name,
            input.size,
            elapsed,
            peak_bytes,
        ))
    }

    /// Measure on a dedicated worker thread, giving up after `budget`.
    ///
    /// On timeout the worker's stop flag is raised and the worker is joined
    /// before this returns, so no measurement ever outlives its call. The
    /// built-in sorts unwind at their next checkpoint; a sort that never
    /// reaches one is waited out.
    pub fn measure_with_timeout(
        &self,
        entry: &'static AlgorithmEntry,
        input: Arc<InputSample>,
        budget: Duration,
    ) -> Result<MeasurementResult> {
        let size = input.size;
        let collector = *self;
        let (tx, rx) = mpsc::channel();
        let stop = StopHandle::new();
        let worker_stop = stop.clone();

        let handle = std::thread::Builder::new()
            .name(format!("sortbench-{}-{}", entry.name, size))
            .spawn(move || {
                let _binding = worker_stop.bind();
                let _ = tx.send(collector.measure(entry, &input));
            })
            .map_err(|e| BenchError::MeasurementFailure {
                algorithm: entry.name.to_string(),
                size,
                reason: format!("failed to spawn measurement thread: {}", e),
            })?;

        match rx.recv_timeout(budget) {
            Ok(result) => {
                let _ = handle.join();
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                stop.request_stop();
                tracing::warn!(
                    algorithm = entry.name,
                    size,
                    budget_ms = budget.as_millis() as u64,
                    "measurement exceeded its budget, stopping worker"
                );
                let waiting = Instant::now();
                let _ = handle.join();
                tracing::debug!(
                    algorithm = entry.name,
                    size,
                    waited_ms = waiting.elapsed().as_millis() as u64,
                    "worker stopped"
                );
                Err(BenchError::Timeout {
                    algorithm: entry.name.to_string(),
                    size,
                    budget,
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.join();
                Err(BenchError::AlgorithmFailure {
                    algorithm: entry.name.to_string(),
                    size,
                    message: "measurement thread exited without a result".to_string(),
                })
            }
        }
    }
}

/// Output must be exactly the input's values in non-decreasing order.
fn verify_sorted(entry: &AlgorithmEntry, input: &InputSample, output: &[i64]) -> Result<()> {
    let failure = |message: String| BenchError::AlgorithmFailure {
        algorithm: entry.name.to_string(),
        size: input.size,
        message,
    };

    if output.len() != input.values.len() {
        return Err(failure(format!(
            "returned {} values for an input of {}",
            output.len(),
            input.values.len()
        )));
    }
    if let Some(i) = output.windows(2).position(|w| w[0] > w[1]) {
        return Err(failure(format!(
            "output not in non-decreasing order at index {} ({} > {})",
            i,
            output[i],
            output[i + 1]
        )));
    }

    let mut expected = input.values.clone();
    expected.sort_unstable();
    if expected != output {
        return Err(failure(
            "output is not a permutation of the input".to_string(),
        ));
    }
    Ok(())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if payload.is::<Stopped>() {
        "stopped after exceeding its budget".to_string()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{find, registry};
    use crate::allocator::session_active;
    use crate::input::{InputGenerator, ValueRange};
    use crate::series::MeasurementStatus;
    use crate::stop::checkpoint;

    fn panicking(_: Vec<i64>) -> Vec<i64> {
        panic!("deliberate failure")
    }

    fn truncating(mut values: Vec<i64>) -> Vec<i64> {
        values.sort();
        values.pop();
        values
    }

    fn duplicating(values: Vec<i64>) -> Vec<i64> {
        vec![values.first().copied().unwrap_or_default(); values.len()]
    }

    fn sleepy(values: Vec<i64>) -> Vec<i64> {
        std::thread::sleep(Duration::from_millis(300));
        values
    }

    fn spin_until_stopped(values: Vec<i64>) -> Vec<i64> {
        let started = Instant::now();
        while started.elapsed() < Duration::from_secs(20) {
            checkpoint();
            std::hint::spin_loop();
        }
        values
    }

    fn entry(name: &'static str, sort: fn(Vec<i64>) -> Vec<i64>) -> AlgorithmEntry {
        AlgorithmEntry {
            name,
            description: "test",
            average_time: "-",
            worst_time: "-",
            extra_space: "-",
            stable: false,
            sort,
        }
    }

    static SLEEPY: AlgorithmEntry = AlgorithmEntry {
        name: "sleepy",
        description: "sleeps",
        average_time: "-",
        worst_time: "-",
        extra_space: "-",
        stable: false,
        sort: sleepy,
    };

    static SPINNER: AlgorithmEntry = AlgorithmEntry {
        name: "spinner",
        description: "spins until stopped",
        average_time: "-",
        worst_time: "-",
        extra_space: "-",
        stable: false,
        sort: spin_until_stopped,
    };

    fn sample(size: usize) -> InputSample {
        InputGenerator::new(Some(1)).generate(size, ValueRange::DEFAULT)
    }

    #[test]
    fn test_measure_does_not_mutate_input() {
        let input = InputSample::new(vec![5, -3, 5, 0, -3]);
        let before = input.clone();
        for algorithm in registry() {
            let result = MetricCollector::default().measure(algorithm, &input).unwrap();
            assert_eq!(result.size, 5);
            assert!(result.is_measured());
        }
        assert_eq!(input, before);
    }

    #[test]
    fn test_merge_peak_covers_a_copy() {
        let input = sample(1000);
        let merge = find("merge").unwrap();
        let result = MetricCollector::default().measure(merge, &input).unwrap();
        assert!(result.peak_memory_bytes >= 1000 * std::mem::size_of::<i64>() as u64);
        assert!(result.elapsed_seconds >= 0.0);
    }

    #[test]
    fn test_in_place_sort_allocates_little() {
        let input = sample(1000);
        let selection = find("selection").unwrap();
        let result = MetricCollector::default().measure(selection, &input).unwrap();
        assert!(result.peak_memory_bytes < 1000 * std::mem::size_of::<i64>() as u64);
    }

    #[test]
    fn test_panic_becomes_algorithm_failure_and_closes_session() {
        let broken = entry("broken", panicking);
        let err = MetricCollector::default()
            .measure(&broken, &sample(10))
            .unwrap_err();
        match err {
            BenchError::AlgorithmFailure { algorithm, size, message } => {
                assert_eq!(algorithm, "broken");
                assert_eq!(size, 10);
                assert!(message.contains("deliberate failure"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!session_active());
    }

    #[test]
    fn test_verification_catches_bad_output() {
        let collector = MetricCollector::default();
        let input = InputSample::new(vec![3, 1, 2]);
        assert!(collector.measure(&entry("short", truncating), &input).is_err());
        assert!(collector.measure(&entry("dup", duplicating), &input).is_err());
        let lenient = collector.with_verification(false);
        assert!(lenient.measure(&entry("dup", duplicating), &input).is_ok());
    }

    #[test]
    fn test_nested_session_is_measurement_failure() {
        let _outer = AllocationSession::begin().unwrap();
        let err = MetricCollector::default()
            .measure(find("bubble").unwrap(), &sample(3))
            .unwrap_err();
        assert!(matches!(err, BenchError::MeasurementFailure { .. }));
    }

    #[test]
    fn test_timeout() {
        let err = MetricCollector::default()
            .measure_with_timeout(&SLEEPY, Arc::new(sample(4)), Duration::from_millis(20))
            .unwrap_err();
        let result = MeasurementResult::from_error("sleepy", 4, &err);
        assert_eq!(result.status, MeasurementStatus::TimedOut);
    }

    #[test]
    fn test_within_budget_on_worker_thread() {
        let result = MetricCollector::default()
            .measure_with_timeout(
                find("quick").unwrap(),
                Arc::new(sample(500)),
                Duration::from_secs(30),
            )
            .unwrap();
        assert!(result.is_measured());
        assert!(result.peak_memory_bytes > 0);
    }

    #[test]
    fn test_timeout_stops_worker_at_checkpoint() {
        let started = Instant::now();
        let err = MetricCollector::default()
            .measure_with_timeout(&SPINNER, Arc::new(sample(4)), Duration::from_millis(20))
            .unwrap_err();
        assert!(matches!(err, BenchError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_stops_builtin_sort() {
        let started = Instant::now();
        let err = MetricCollector::default()
            .measure_with_timeout(
                find("bubble").unwrap(),
                Arc::new(sample(200_000)),
                Duration::from_millis(20),
            )
            .unwrap_err();
        assert!(matches!(err, BenchError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_stopped_sort_reports_failure_inline() {
        let stop = StopHandle::new();
        let _binding = stop.bind();
        stop.request_stop();
        let err = MetricCollector::default()
            .measure(find("merge").unwrap(), &sample(100))
            .unwrap_err();
        match err {
            BenchError::AlgorithmFailure { message, .. } => {
                assert!(message.contains("exceeding its budget"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!session_active());
    }
}

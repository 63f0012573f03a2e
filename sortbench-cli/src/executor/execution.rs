//! Benchmark Execution
//!
//! Drives the Metric Collector over every (size, algorithm) pair, strictly
//! one measurement at a time.
//!
//! ## Data Flow
//!
//! ```text
//! sizes (ascending) ──► InputGenerator ──► one InputSample per size
//!                                               │
//!            for each algorithm, registry order ▼
//!                                  ┌──────────────────┐
//!                                  │  MetricCollector │  copy → time → peak bytes
//!                                  └────────┬─────────┘
//!                                           │
//!                                           ▼
//!                  SeriesTable (one result per algorithm × size, sentinels included)
//! ```
//!
//! ## Failure policy
//!
//! A failing measurement never aborts the run. Algorithm panics, bad output,
//! unusable tracking and timeouts are recorded as sentinel entries for that
//! (algorithm, size) pair. Once an algorithm times out, every larger size for
//! it is recorded as skipped.
//!
//! A timed-out measurement is stopped and its worker joined before the next
//! measurement starts, so at most one measurement is ever in flight.

use indicatif::{ProgressBar, ProgressStyle};
use sortbench_core::{
    AlgorithmEntry, BenchError, InputGenerator, InputSample, MeasurementResult, MetricCollector,
    SeriesTable, ValueRange, validate_sizes,
};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for benchmark execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Track peak heap usage
    pub track_allocations: bool,
    /// Verify each output is a sorted permutation of its input
    pub verify_output: bool,
    /// Per-measurement budget; `None` measures inline without a worker thread
    pub timeout: Option<Duration>,
    /// Input generator seed
    pub seed: Option<u64>,
    /// Hide the progress bar
    pub quiet: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            track_allocations: true,
            verify_output: true,
            timeout: Some(Duration::from_secs(30)),
            seed: None,
            quiet: false,
        }
    }
}

/// Execute benchmarks and produce a series table
pub struct Executor {
    config: ExecutionConfig,
    collector: MetricCollector,
    generator: InputGenerator,
}

impl Executor {
    pub fn new(config: ExecutionConfig) -> Self {
        let collector =
            MetricCollector::new(config.track_allocations).with_verification(config.verify_output);
        let generator = InputGenerator::new(config.seed);
        Self {
            config,
            collector,
            generator,
        }
    }

    /// Seed of the input generator, if one was given
    pub fn seed(&self) -> Option<u64> {
        self.generator.seed()
    }

    /// Measure every algorithm at every size.
    ///
    /// Inputs are validated before anything runs: invalid sizes or an empty
    /// algorithm list abort with `InvalidInput`. Everything after that is
    /// recorded in the table rather than returned as an error.
    pub fn execute(
        &mut self,
        algorithms: &[&'static AlgorithmEntry],
        sizes: &[usize],
        range: ValueRange,
    ) -> Result<SeriesTable, BenchError> {
        if algorithms.is_empty() {
            return Err(BenchError::InvalidInput(
                "no algorithms selected".to_string(),
            ));
        }
        validate_sizes(sizes)?;

        let mut table = SeriesTable::new(sizes.to_vec());
        for entry in algorithms {
            table.register(entry.name);
        }

        let pb = self.progress_bar((algorithms.len() * sizes.len()) as u64);
        let mut timed_out: Vec<Option<usize>> = vec![None; algorithms.len()];

        for &size in sizes {
            let sample = Arc::new(self.generator.generate(size, range));
            tracing::debug!(size, "generated input");

            for (idx, entry) in algorithms.iter().enumerate() {
                pb.set_message(format!("{} n={}", entry.name, size));

                let result = match timed_out[idx] {
                    Some(at) => MeasurementResult::skipped(
                        entry.name,
                        size,
                        format!("skipped after timing out at size {}", at),
                    ),
                    None => match self.measure_one(entry, Arc::clone(&sample)) {
                        Ok(result) => {
                            tracing::debug!(
                                algorithm = entry.name,
                                size,
                                elapsed_s = result.elapsed_seconds,
                                peak_bytes = result.peak_memory_bytes,
                                "measured"
                            );
                            result
                        }
                        Err(e) => {
                            tracing::warn!(algorithm = entry.name, size, "{}", e);
                            if matches!(e, BenchError::Timeout { .. }) {
                                timed_out[idx] = Some(size);
                            }
                            MeasurementResult::from_error(entry.name, size, &e)
                        }
                    },
                };

                table.record(result);
                pb.inc(1);
            }
        }

        pb.finish_with_message("Complete");
        debug_assert!(table.is_complete());
        Ok(table)
    }

    fn measure_one(
        &self,
        entry: &'static AlgorithmEntry,
        sample: Arc<InputSample>,
    ) -> Result<MeasurementResult, BenchError> {
        match self.config.timeout {
            Some(budget) => self.collector.measure_with_timeout(entry, sample, budget),
            None => self.collector.measure(entry, &sample),
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.config.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortbench_core::{MeasurementStatus, find, registry};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Instant;

    fn explode(_: Vec<i64>) -> Vec<i64> {
        panic!("deliberate failure")
    }

    fn sleepy(values: Vec<i64>) -> Vec<i64> {
        std::thread::sleep(Duration::from_millis(300));
        values
    }

    static BUSY_RUNNING: AtomicBool = AtomicBool::new(false);
    static OVERLAPPING_CALLS: AtomicUsize = AtomicUsize::new(0);

    /// Burns CPU without ever reaching a checkpoint
    fn busy(values: Vec<i64>) -> Vec<i64> {
        BUSY_RUNNING.store(true, Ordering::SeqCst);
        let started = Instant::now();
        while started.elapsed() < Duration::from_millis(400) {
            std::hint::spin_loop();
        }
        BUSY_RUNNING.store(false, Ordering::SeqCst);
        values
    }

    fn watchful(values: Vec<i64>) -> Vec<i64> {
        if BUSY_RUNNING.load(Ordering::SeqCst) {
            OVERLAPPING_CALLS.fetch_add(1, Ordering::SeqCst);
        }
        sortbench_core::algorithms::merge_sort(values)
    }

    static BUSY: AlgorithmEntry = AlgorithmEntry {
        name: "busy",
        description: "spins past its budget",
        average_time: "-",
        worst_time: "-",
        extra_space: "-",
        stable: true,
        sort: busy,
    };

    static WATCHFUL: AlgorithmEntry = AlgorithmEntry {
        name: "watchful",
        description: "merge sort that notes whether busy is still running",
        average_time: "-",
        worst_time: "-",
        extra_space: "-",
        stable: true,
        sort: watchful,
    };

    static EXPLODING: AlgorithmEntry = AlgorithmEntry {
        name: "exploding",
        description: "always panics",
        average_time: "-",
        worst_time: "-",
        extra_space: "-",
        stable: true,
        sort: explode,
    };

    static SLEEPY: AlgorithmEntry = AlgorithmEntry {
        name: "sleepy",
        description: "sleeps then returns its input",
        average_time: "-",
        worst_time: "-",
        extra_space: "-",
        stable: true,
        sort: sleepy,
    };

    fn config() -> ExecutionConfig {
        ExecutionConfig {
            track_allocations: false,
            verify_output: true,
            timeout: None,
            seed: Some(42),
            quiet: true,
        }
    }

    fn all() -> Vec<&'static AlgorithmEntry> {
        registry().iter().collect()
    }

    #[test]
    fn test_every_pair_measured() {
        let mut executor = Executor::new(config());
        let table = executor
            .execute(&all(), &[10, 50, 100], ValueRange::DEFAULT)
            .unwrap();

        assert!(table.is_complete());
        assert_eq!(
            table.algorithms().collect::<Vec<_>>(),
            vec!["bubble", "quick", "selection", "insertion", "merge"]
        );
        for series in table.series() {
            let sizes: Vec<usize> = series.results.iter().map(|r| r.size).collect();
            assert_eq!(sizes, vec![10, 50, 100]);
            assert!(series.results.iter().all(|r| r.is_measured()));
            assert!(series.results.iter().all(|r| r.elapsed_seconds >= 0.0));
        }
    }

    #[test]
    fn test_tiny_sizes_and_degenerate_range() {
        let mut executor = Executor::new(config());
        let range = ValueRange::new(0, 0).unwrap();
        let table = executor.execute(&all(), &[0, 1, 5], range).unwrap();
        assert!(table.is_complete());
        assert_eq!(table.sentinels().count(), 0);
    }

    #[test]
    fn test_invalid_sizes_abort() {
        let mut executor = Executor::new(config());
        let err = executor
            .execute(&all(), &[100, 50], ValueRange::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidInput(_)));

        let err = executor
            .execute(&all(), &[], ValueRange::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidInput(_)));

        let err = executor
            .execute(&[], &[10], ValueRange::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidInput(_)));
    }

    #[test]
    fn test_panicking_algorithm_is_sentinel() {
        let merge = find("merge").unwrap();
        let mut executor = Executor::new(config());
        let table = executor
            .execute(&[&EXPLODING, merge], &[10, 20], ValueRange::DEFAULT)
            .unwrap();

        let exploding = table.get("exploding").unwrap();
        assert!(
            exploding
                .iter()
                .all(|r| r.status == MeasurementStatus::Failed)
        );
        assert!(
            exploding[0]
                .failure
                .as_deref()
                .unwrap()
                .contains("deliberate failure")
        );
        assert!(table.get("merge").unwrap().iter().all(|r| r.is_measured()));
    }

    #[test]
    fn test_timeout_skips_larger_sizes() {
        let merge = find("merge").unwrap();
        let mut executor = Executor::new(ExecutionConfig {
            timeout: Some(Duration::from_millis(20)),
            ..config()
        });
        let table = executor
            .execute(&[&SLEEPY, merge], &[1, 2, 3], ValueRange::DEFAULT)
            .unwrap();

        let statuses: Vec<MeasurementStatus> =
            table.get("sleepy").unwrap().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                MeasurementStatus::TimedOut,
                MeasurementStatus::Skipped,
                MeasurementStatus::Skipped
            ]
        );
        assert!(table.get("merge").unwrap().iter().all(|r| r.is_measured()));
    }

    #[test]
    fn test_tracking_without_allocator_is_sentinel() {
        // This test binary does not install the tracking allocator
        let mut executor = Executor::new(ExecutionConfig {
            track_allocations: true,
            ..config()
        });
        let table = executor
            .execute(&[find("quick").unwrap()], &[10], ValueRange::DEFAULT)
            .unwrap();
        let result = &table.get("quick").unwrap()[0];
        assert_eq!(result.status, MeasurementStatus::Failed);
        assert!(result.failure.is_some());
    }

    #[test]
    fn test_no_measurement_overlaps_a_timed_out_one() {
        let mut executor = Executor::new(ExecutionConfig {
            timeout: Some(Duration::from_millis(50)),
            ..config()
        });
        let table = executor
            .execute(&[&BUSY, &WATCHFUL], &[10, 20, 30], ValueRange::DEFAULT)
            .unwrap();

        let statuses: Vec<MeasurementStatus> =
            table.get("busy").unwrap().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                MeasurementStatus::TimedOut,
                MeasurementStatus::Skipped,
                MeasurementStatus::Skipped
            ]
        );
        assert!(table.get("watchful").unwrap().iter().all(|r| r.is_measured()));
        assert_eq!(OVERLAPPING_CALLS.load(Ordering::SeqCst), 0);
        assert!(!BUSY_RUNNING.load(Ordering::SeqCst));
    }

    #[test]
    fn test_runaway_builtin_is_stopped() {
        let mut executor = Executor::new(ExecutionConfig {
            timeout: Some(Duration::from_millis(20)),
            ..config()
        });
        let started = Instant::now();
        let table = executor
            .execute(&[find("selection").unwrap()], &[200_000], ValueRange::DEFAULT)
            .unwrap();
        assert_eq!(
            table.get("selection").unwrap()[0].status,
            MeasurementStatus::TimedOut
        );
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}

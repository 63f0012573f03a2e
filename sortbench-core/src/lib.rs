#![warn(missing_docs)]
//! sortbench core
//!
//! Building blocks of the benchmark harness:
//! - The algorithm registry (bubble, quick, selection, insertion, merge)
//! - Seeded or entropy-backed input generation
//! - `TrackingAllocator` for per-thread peak heap measurement
//! - The metric collector, which times one sort on one input copy
//! - Stop requests that end an overrunning sort at its next checkpoint
//! - `MeasurementResult` / `SeriesTable`, the harness's data model

pub mod algorithms;
mod allocator;
mod collector;
pub mod complexity;
mod error;
mod input;
mod measure;
mod series;
mod stop;

pub use algorithms::{AlgorithmEntry, SortFn, find, names, registry};
pub use allocator::{
    AllocationSession, AllocationStats, TrackingAllocator, TrackingError, is_installed,
    session_active,
};
pub use collector::MetricCollector;
pub use error::{BenchError, Result};
pub use input::{
    DEFAULT_SIZES, InputGenerator, InputSample, ValueRange, parse_sizes, validate_sizes,
};
pub use measure::Timer;
pub use series::{MeasurementResult, MeasurementStatus, Series, SeriesTable};
pub use stop::{StopBinding, StopHandle, Stopped, checkpoint, stop_requested};

#[cfg(test)]
#[global_allocator]
static TEST_ALLOCATOR: TrackingAllocator = TrackingAllocator;

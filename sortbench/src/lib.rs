#![warn(missing_docs)]
//! # Sortbench
//!
//! Benchmark harness for textbook comparison sorts.
//!
//! Sortbench measures bubble, quick, selection, insertion and merge sort on
//! random integer inputs of increasing size:
//! - **Wall-clock time**: one monotonic `Instant` reading per call
//! - **Peak heap usage**: `TrackingAllocator` records the high-water mark of net bytes allocated by the sorting thread
//! - **Failure isolation**: panics, wrong output and timeouts become sentinel entries and the run continues
//! - **Reports**: a four-panel SVG chart (measured time, measured memory, theoretical time, theoretical space), HTML, JSON, CSV and terminal tables
//!
//! ## Quick Start
//!
//! ```ignore
//! use sortbench::prelude::*;
//!
//! #[global_allocator]
//! static GLOBAL: TrackingAllocator = TrackingAllocator;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut executor = Executor::new(ExecutionConfig {
//!         seed: Some(42),
//!         ..Default::default()
//!     });
//!     let algorithms: Vec<_> = registry().iter().collect();
//!     let table = executor.execute(&algorithms, &DEFAULT_SIZES, ValueRange::DEFAULT)?;
//!     let svg = render_svg(&table, &default_curves(), &ChartStyle::default())?;
//!     std::fs::write("sortbench.svg", svg)?;
//!     Ok(())
//! }
//! ```

// Re-export core types
pub use sortbench_core::{
    AlgorithmEntry, AllocationSession, AllocationStats, BenchError, DEFAULT_SIZES,
    InputGenerator, InputSample, MeasurementResult, MeasurementStatus, MetricCollector, Series,
    SeriesTable, SortFn, StopHandle, Stopped, Timer, TrackingAllocator, TrackingError, ValueRange,
    checkpoint, find, is_installed, names, parse_sizes, registry, session_active, validate_sizes,
};

/// The sorting algorithms themselves, generic over `T: Ord`
pub use sortbench_core::algorithms;

/// O(1), O(n) and O(log n) demonstration routines
pub use sortbench_core::complexity;

// Re-export report types
pub use sortbench_report::{
    ChartStyle, CurveKind, CurveSamples, OutputFormat, RenderError, Report, ReportConfig,
    ReportMeta, ReportSummary, SystemInfo, TheoreticalCurve, Theme, default_curves,
    generate_csv_report, generate_html_report, generate_json_report, render_svg,
};

// Re-export the driver
pub use sortbench_cli::{
    Cli, Commands, ExecutionConfig, Executor, OutputTarget, RunSettings, RunStatus,
    SortbenchConfig, build_report, dispatch, format_human_output, render,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ChartStyle, ExecutionConfig, Executor, MeasurementStatus, SeriesTable, TrackingAllocator,
        ValueRange, default_curves, registry, render_svg, DEFAULT_SIZES,
    };
}

/// Run the Sortbench CLI harness.
///
/// Call this from a binary's `main()` after installing the allocator:
/// ```ignore
/// #[global_allocator]
/// static GLOBAL: sortbench::TrackingAllocator = sortbench::TrackingAllocator;
///
/// fn main() -> anyhow::Result<()> {
///     sortbench::run()
/// }
/// ```
pub use sortbench_cli::run;

//! Benchmark Executor
//!
//! Runs every selected algorithm at every size and turns the results into
//! a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! AlgorithmEntry registry (filtered)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Generate inputs, measure, record sentinels
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Attach metadata, curves, summary
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Benchmark driver and failure policy
//! - [`report`] - Report building
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;

// Re-export public API
pub use execution::{ExecutionConfig, Executor};
pub use formatting::format_human_output;
pub use metadata::build_report_meta;
pub use report::build_report;

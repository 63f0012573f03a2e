#![warn(missing_docs)]
//! Sortbench CLI Library
//!
//! This module provides the command-line driver for the `sortbench` binary.
//! Call `sortbench::run()` (or `sortbench_cli::run()`) from a `main` that
//! installs `TrackingAllocator` as the global allocator to get peak-memory
//! figures.
//!
//! # Example
//!
//! ```ignore
//! use sortbench::TrackingAllocator;
//!
//! #[global_allocator]
//! static GLOBAL: TrackingAllocator = TrackingAllocator;
//!
//! fn main() -> anyhow::Result<()> {
//!     sortbench_cli::run()
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    ExecutionConfig, Executor, build_report, build_report_meta, format_human_output,
};
pub use planner::{ExecutionPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use sortbench_core::{
    BenchError, ValueRange, complexity, is_installed, parse_sizes, registry,
};
use sortbench_report::{
    ChartStyle, OutputFormat, RenderError, Report, ReportConfig, Theme, default_curves,
    generate_csv_report, generate_html_report, generate_json_report, render_svg,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Sortbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sortbench")]
#[command(
    author,
    version,
    about = "Sortbench - compare sorting algorithms by time and peak memory"
)]
pub struct Cli {
    /// Optional subcommand (Run, List, Complexity, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter algorithms by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Input sizes, comma-separated and strictly ascending (e.g. 10,50,100)
    #[arg(long)]
    pub sizes: Option<String>,

    /// Inclusive value range as lo,hi (e.g. -1000,1000)
    #[arg(long, allow_hyphen_values = true)]
    pub range: Option<String>,

    /// Seed for reproducible inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output target: "display" or a file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format: svg, html, json, csv, human (overrides the file extension)
    #[arg(long)]
    pub format: Option<String>,

    /// Per-measurement timeout (e.g. 30s, 500ms); 0 disables
    #[arg(long)]
    pub timeout: Option<String>,

    /// Skip checking that outputs are sorted permutations
    #[arg(long)]
    pub no_verify: bool,

    /// Do not track peak heap usage
    #[arg(long)]
    pub no_track: bool,

    /// Configuration file (default: discover sortbench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and the report
    #[arg(short, long)]
    pub quiet: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run benchmarks (default)
    Run,
    /// List the registered algorithms and their complexities
    List,
    /// Demonstrate O(1), O(n) and O(log n) routines with step counts
    Complexity,
    /// Write a default sortbench.toml to the current directory
    Init,
}

/// How a command finished, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Everything measured and rendered (timeouts are only warnings)
    Success,
    /// At least one algorithm or measurement failed, or rendering failed
    Failures,
    /// Configuration or arguments were rejected before measuring
    InvalidInput,
}

impl RunStatus {
    /// Process exit code
    pub fn code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Failures => 1,
            RunStatus::InvalidInput => 2,
        }
    }
}

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Print to the terminal
    Display,
    /// Write to a file
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BenchError::InvalidInput("empty output target".to_string()));
        }
        if s.eq_ignore_ascii_case("display") {
            Ok(OutputTarget::Display)
        } else {
            Ok(OutputTarget::File(PathBuf::from(s)))
        }
    }
}

/// Effective run settings: defaults, then sortbench.toml, then CLI flags
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Input sizes in run order
    pub sizes: Vec<usize>,
    /// Generated value range
    pub range: ValueRange,
    /// Generator seed
    pub seed: Option<u64>,
    /// Per-measurement budget
    pub timeout: Option<Duration>,
    /// Verify outputs
    pub verify: bool,
    /// Track peak heap usage
    pub track: bool,
    /// Report destination
    pub target: OutputTarget,
    /// Explicit format, if any
    pub format: Option<OutputFormat>,
    /// Chart dimensions and theme
    pub style: ChartStyle,
}

impl RunSettings {
    /// Layer CLI flags over the configuration file.
    ///
    /// Malformed values are `InvalidInput`. Sizes are parsed here but their
    /// ordering is checked by the executor.
    pub fn resolve(cli: &Cli, config: &SortbenchConfig) -> Result<Self, BenchError> {
        let invalid = |e: anyhow::Error| BenchError::InvalidInput(e.to_string());

        let sizes = match &cli.sizes {
            Some(s) => parse_sizes(s)?,
            None => config.runner.sizes.clone(),
        };
        let range = match &cli.range {
            Some(s) => s.parse::<ValueRange>()?,
            None => ValueRange::new(config.runner.range[0], config.runner.range[1])?,
        };

        let timeout_str = cli.timeout.as_deref().unwrap_or(&config.runner.timeout);
        let timeout_ns = SortbenchConfig::parse_duration(timeout_str).map_err(invalid)?;
        let timeout = (timeout_ns > 0).then(|| Duration::from_nanos(timeout_ns));

        let target = cli
            .output
            .as_deref()
            .unwrap_or(&config.output.target)
            .parse::<OutputTarget>()?;
        let format = cli
            .format
            .as_deref()
            .or(config.output.format.as_deref())
            .map(|f| f.parse::<OutputFormat>().map_err(BenchError::InvalidInput))
            .transpose()?;

        let theme: Theme = config
            .visuals
            .theme
            .parse()
            .map_err(BenchError::InvalidInput)?;

        Ok(Self {
            sizes,
            range,
            seed: cli.seed.or(config.runner.seed),
            timeout,
            verify: !cli.no_verify && config.runner.verify,
            track: !cli.no_track && config.allocator.track,
            target,
            format,
            style: ChartStyle {
                width: config.visuals.width,
                height: config.visuals.height,
                theme,
            },
        })
    }

    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            sizes: self.sizes.clone(),
            range: (self.range.lo(), self.range.hi()),
            seed: self.seed,
            timeout_ms: self.timeout.map(|t| t.as_millis() as u64),
            track_allocations: self.track,
            verify_output: self.verify,
        }
    }
}

/// Run the Sortbench CLI with the given arguments.
/// This is the main entry point for the `sortbench` binary.
///
/// Exits the process with code 1 when measurements failed and 2 when the
/// input was rejected.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Sortbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    let status = dispatch(&cli)?;
    if status != RunStatus::Success {
        std::process::exit(status.code());
    }
    Ok(())
}

/// Initialize logging to stderr; `RUST_LOG` takes precedence over flags
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "sortbench=debug"
    } else if cli.quiet {
        "sortbench=warn"
    } else {
        "sortbench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the selected command without touching the process state.
///
/// Rejected input is reported and mapped to [`RunStatus::InvalidInput`];
/// I/O problems outside report rendering are returned as errors.
pub fn dispatch(cli: &Cli) -> anyhow::Result<RunStatus> {
    let result = match cli.command {
        Some(Commands::Init) => init_config(Path::new(CONFIG_FILE_NAME)),
        Some(Commands::List) => load_settings(cli).and_then(|_| list_algorithms(cli)),
        Some(Commands::Complexity) => {
            load_settings(cli).and_then(|settings| show_complexity(&settings))
        }
        Some(Commands::Run) | None => {
            load_settings(cli).and_then(|settings| run_benchmarks(cli, &settings))
        }
    };

    match result {
        Err(e) => match e.downcast_ref::<BenchError>() {
            Some(BenchError::InvalidInput(msg)) => {
                tracing::error!("{}", msg);
                eprintln!("error: {}", msg);
                Ok(RunStatus::InvalidInput)
            }
            _ => Err(e),
        },
        ok => ok,
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<RunSettings> {
    let config = match &cli.config {
        Some(path) => SortbenchConfig::load(path).map_err(|e| {
            BenchError::InvalidInput(format!("failed to load config {}: {:#}", path.display(), e))
        })?,
        None => SortbenchConfig::discover()
            .map_err(|e| BenchError::InvalidInput(format!("{:#}", e)))?
            .unwrap_or_default(),
    };
    Ok(RunSettings::resolve(cli, &config)?)
}

/// Select algorithms matching the CLI filter, in registry order
fn plan_algorithms(cli: &Cli) -> Result<ExecutionPlan, BenchError> {
    let filter = Regex::new(&cli.filter)
        .map_err(|e| BenchError::InvalidInput(format!("invalid filter '{}': {}", cli.filter, e)))?;
    let plan = build_plan(registry(), Some(&filter));
    if plan.algorithms.is_empty() {
        return Err(BenchError::InvalidInput(format!(
            "no algorithm matches '{}' (available: {})",
            cli.filter,
            sortbench_core::names().collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(plan)
}

fn init_config(path: &Path) -> anyhow::Result<RunStatus> {
    if path.exists() {
        return Err(BenchError::InvalidInput(format!("{} already exists", path.display())).into());
    }
    std::fs::write(path, SortbenchConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(RunStatus::Success)
}

fn list_algorithms(cli: &Cli) -> anyhow::Result<RunStatus> {
    let plan = plan_algorithms(cli)?;

    println!("Sortbench Algorithms:");
    println!(
        "  {:<10} {:>12} {:>12} {:>8} {:>7}  {}",
        "name", "average", "worst", "space", "stable", "description"
    );
    for entry in &plan.algorithms {
        println!(
            "  {:<10} {:>12} {:>12} {:>8} {:>7}  {}",
            entry.name,
            entry.average_time,
            entry.worst_time,
            entry.extra_space,
            if entry.stable { "yes" } else { "no" },
            entry.description
        );
    }
    println!("{} algorithms found.", plan.algorithms.len());
    Ok(RunStatus::Success)
}

fn show_complexity(settings: &RunSettings) -> anyhow::Result<RunStatus> {
    println!("Complexity demonstrations");
    println!("{}", "=".repeat(60));

    let values = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    println!("\nO(1)      element_at({:?}, 4) = {:?}", values, complexity::element_at(&values, 4));

    let values = [10, 20, 30, 40, 50];
    for target in [30, 60] {
        let outcome = complexity::linear_search(&values, &target);
        println!(
            "O(n)      linear_search({:?}, {}) = {:?} in {} steps",
            values, target, outcome.index, outcome.steps
        );
    }

    let values = [0, 10, 15, 20, 30, 35, 40, 50, 55, 60, 70, 75, 80, 90, 95, 100];
    for target in [70, 25] {
        let outcome = complexity::binary_search(&values, &target);
        println!(
            "O(log n)  binary_search({} sorted values, {}) = {:?} in {} steps",
            values.len(),
            target,
            outcome.index,
            outcome.steps
        );
    }

    // Worst-case steps (target absent) over the configured sizes
    println!("\nSteps to miss, by input size");
    println!("{}", "-".repeat(60));
    println!("  {:>8} | {:>8} | {:>8} | {:>8}", "n", "O(1)", "O(n)", "O(log n)");
    for &n in &settings.sizes {
        let sorted: Vec<i64> = (0..n as i64).collect();
        let linear = complexity::linear_search(&sorted, &-1);
        let binary = complexity::binary_search(&sorted, &(n as i64));
        println!(
            "  {:>8} | {:>8} | {:>8} | {:>8}",
            n, 1, linear.steps, binary.steps
        );
    }
    Ok(RunStatus::Success)
}

fn run_benchmarks(cli: &Cli, settings: &RunSettings) -> anyhow::Result<RunStatus> {
    let plan = plan_algorithms(cli)?;

    if settings.track && !is_installed() {
        tracing::warn!(
            "allocation tracking enabled but TrackingAllocator is not the global allocator; \
             every measurement will fail (install it or pass --no-track)"
        );
    }

    tracing::info!(
        algorithms = ?plan.names(),
        sizes = ?settings.sizes,
        "running {} algorithms over {} sizes",
        plan.algorithms.len(),
        settings.sizes.len()
    );

    let start_time = Instant::now();
    let mut executor = Executor::new(ExecutionConfig {
        track_allocations: settings.track,
        verify_output: settings.verify,
        timeout: settings.timeout,
        seed: settings.seed,
        quiet: cli.quiet,
    });
    let series = executor.execute(&plan.algorithms, &settings.sizes, settings.range)?;

    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let report = build_report(&series, settings.report_config(), total_duration_ms);

    let rendered = write_output(&report, settings).map_err(BenchError::from);
    if let Err(ref e) = rendered {
        tracing::error!("{}", e);
        // Measurements are not lost: fall back to the terminal tables
        print!("{}", format_human_output(&report));
    }

    if report.summary.timed_out > 0 {
        tracing::warn!(
            "{} measurement(s) timed out, {} skipped",
            report.summary.timed_out,
            report.summary.skipped
        );
    }

    if report.summary.has_failures() || rendered.is_err() {
        if report.summary.has_failures() {
            eprintln!("\n{} measurement(s) failed", report.summary.failed);
        }
        return Ok(RunStatus::Failures);
    }
    Ok(RunStatus::Success)
}

/// Render `report` in `format`
pub fn render(report: &Report, format: OutputFormat, style: &ChartStyle) -> Result<String, RenderError> {
    Ok(match format {
        OutputFormat::Svg => render_svg(&report.series, &default_curves(), style)?,
        OutputFormat::Html => generate_html_report(report, &default_curves(), style)?,
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Human => format_human_output(report),
    })
}

fn write_output(report: &Report, settings: &RunSettings) -> Result<(), RenderError> {
    match &settings.target {
        OutputTarget::Display => {
            let format = settings.format.unwrap_or(OutputFormat::Human);
            let output = render(report, format, &settings.style)?;
            print!("{}", output);
        }
        OutputTarget::File(path) => {
            let format = match settings.format {
                Some(format) => format,
                None => OutputFormat::from_path(path)?,
            };
            let output = render(report, format, &settings.style)?;
            let mut file = std::fs::File::create(path)?;
            file.write_all(output.as_bytes())?;
            println!("Report written to: {}", path.display());
        }
    }
    Ok(())
}

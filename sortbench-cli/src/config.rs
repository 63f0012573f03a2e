//! Configuration loading from sortbench.toml
//!
//! Sortbench configuration can be specified in a `sortbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Command-line flags take precedence over anything set here.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sortbench_core::DEFAULT_SIZES;
use std::path::Path;
use std::time::Duration;

/// File name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "sortbench.toml";

/// Sortbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SortbenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Allocator tracking configuration
    #[serde(default)]
    pub allocator: AllocatorConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Chart configuration
    #[serde(default)]
    pub visuals: VisualsConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Input sizes, strictly ascending
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Inclusive value range `[lo, hi]` of generated integers
    #[serde(default = "default_range")]
    pub range: [i64; 2],
    /// Seed for the input generator; unseeded runs draw from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Timeout for a single measurement (e.g., "30s"); "0" disables it
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Check every output is a sorted permutation of its input
    #[serde(default = "default_true")]
    pub verify: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            range: default_range(),
            seed: None,
            timeout: default_timeout(),
            verify: true,
        }
    }
}

fn default_sizes() -> Vec<usize> {
    DEFAULT_SIZES.to_vec()
}
fn default_range() -> [i64; 2] {
    [-1000, 1000]
}
fn default_timeout() -> String {
    "30s".to_string()
}
fn default_true() -> bool {
    true
}

/// Allocator tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Record peak heap usage of each call
    #[serde(default = "default_true")]
    pub track: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self { track: true }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `display` for terminal tables, otherwise a file path
    #[serde(default = "default_target")]
    pub target: String,
    /// Format override: svg, html, json, csv, human
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            format: None,
        }
    }
}

fn default_target() -> String {
    "display".to_string()
}

/// Visualization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualsConfig {
    /// Color theme: "light" or "dark"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_theme() -> String {
    "light".to_string()
}
fn default_width() -> u32 {
    1400
}
fn default_height() -> u32 {
    800
}

impl SortbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> anyhow::Result<Option<Self>> {
        match std::env::current_dir() {
            Ok(dir) => Self::discover_from(&dir),
            Err(_) => Ok(None),
        }
    }

    /// Walk up from `start` looking for `sortbench.toml`.
    ///
    /// `Ok(None)` when no file is found; a file that exists but cannot be
    /// loaded is an error.
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!("Using {}", config_path.display());
                return Self::load(&config_path)
                    .with_context(|| format!("failed to load {}", config_path.display()))
                    .map(Some);
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Per-measurement timeout; `None` when disabled
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        let nanos = Self::parse_duration(&self.runner.timeout)?;
        Ok((nanos > 0).then(|| Duration::from_nanos(nanos)))
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Sortbench Configuration

[runner]
# Input sizes, strictly ascending
sizes = [10, 50, 100, 200, 500, 1000]
# Inclusive range of generated integers
range = [-1000, 1000]
# Fixed seed for reproducible inputs (uncomment to enable)
# seed = 42
# Timeout for a single measurement, "0" disables
timeout = "30s"
# Check every output is a sorted permutation of its input
verify = true

[allocator]
# Record peak heap usage of each call
track = true

[output]
# "display" prints tables; a path picks the format from its extension
target = "display"
# Force a format: svg, html, json, csv, human (uncomment to enable)
# format = "svg"

[visuals]
# Color theme: light or dark
theme = "light"
# Chart dimensions
width = 1400
height = 800
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Duration must be non-negative: {}", s));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

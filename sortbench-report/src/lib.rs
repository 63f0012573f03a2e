#![warn(missing_docs)]
//! Sortbench Report - Reporting and Visualization
//!
//! Generates various output formats:
//! - SVG (the four-panel comparison chart)
//! - HTML (chart plus results table in one file)
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)

mod csv;
mod curves;
mod error;
mod html;
mod json;
mod report;
mod svg;

pub use csv::generate_csv_report;
pub use curves::{
    CONSTANT, CurveKind, CurveSamples, LINEAR, LINEARITHMIC, LOGARITHMIC, QUADRATIC,
    TheoreticalCurve, default_curves,
};
pub use error::RenderError;
pub use html::generate_html_report;
pub use json::generate_json_report;
pub use report::{Report, ReportConfig, ReportMeta, ReportSummary, SystemInfo};
pub use svg::{ChartStyle, Theme, render_svg};

use std::path::Path;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Four-panel SVG chart
    Svg,
    /// Single-file HTML page
    Html,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal tables
    Human,
}

impl OutputFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                RenderError::UnsupportedFormat(format!("{} has no extension", path.display()))
            })?;
        match ext.as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "html" | "htm" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "txt" => Ok(OutputFormat::Human),
            other => Err(RenderError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/chart.SVG")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("r.htm")).unwrap(),
            OutputFormat::Html
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("r.txt")).unwrap(),
            OutputFormat::Human
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("r.png")),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("results")).is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}

//! SVG Chart Rendering
//!
//! Renders the fixed four-panel comparison chart:
//!
//! ```text
//! ┌──────────────────────┬──────────────────────┐
//! │ (a) elapsed time     │ (b) peak memory      │
//! │     measured, log y  │     measured, log y  │
//! ├──────────────────────┼──────────────────────┤
//! │ (c) theoretical time │ (d) theoretical space│
//! │     O(n^2), O(n lg n)│     O(1), O(lg n), O(n)
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! All panels share the x domain (the configured sizes) and use a log10 y
//! axis. Sentinel entries and non-positive values have no position on a log
//! axis; they break a line into separate segments instead of being drawn.

use crate::curves::{CurveKind, TheoreticalCurve};
use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use sortbench_core::SeriesTable;
use std::fmt::Write as _;
use std::str::FromStr;

/// Line colors, assigned in series order
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on white
    #[default]
    Light,
    /// Light text on near-black
    Dark,
}

impl Theme {
    fn background(&self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#1e1e1e",
        }
    }

    fn foreground(&self) -> &'static str {
        match self {
            Theme::Light => "#222222",
            Theme::Dark => "#dddddd",
        }
    }

    fn grid(&self) -> &'static str {
        match self {
            Theme::Light => "#e0e0e0",
            Theme::Dark => "#3a3a3a",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Chart dimensions and theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Total width in pixels
    pub width: u32,
    /// Total height in pixels
    pub height: u32,
    /// Color theme
    pub theme: Theme,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            theme: Theme::Light,
        }
    }
}

/// One plotted line. `points[i]` is `None` where there is nothing to draw.
struct Line {
    label: String,
    points: Vec<Option<(f64, f64)>>,
    dashed: bool,
}

struct Panel {
    title: &'static str,
    y_label: &'static str,
    lines: Vec<Line>,
}

fn positive(x: usize, y: f64) -> Option<(f64, f64)> {
    (y > 0.0 && y.is_finite()).then_some((x as f64, y))
}

fn build_panels(series: &SeriesTable, curves: &[TheoreticalCurve]) -> [Panel; 4] {
    let sizes = series.sizes();

    let measured = |metric: fn(&sortbench_core::MeasurementResult) -> Option<f64>| {
        series
            .series()
            .iter()
            .map(|s| Line {
                label: s.algorithm.clone(),
                points: s
                    .results
                    .iter()
                    .map(|r| metric(r).and_then(|y| positive(r.size, y)))
                    .collect(),
                dashed: false,
            })
            .collect::<Vec<_>>()
    };

    let theoretical = |kind: CurveKind| {
        curves
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| Line {
                label: c.label.to_string(),
                points: sizes.iter().map(|&n| positive(n, c.evaluate(n))).collect(),
                dashed: true,
            })
            .collect::<Vec<_>>()
    };

    [
        Panel {
            title: "Execution time",
            y_label: "seconds",
            lines: measured(|r| r.elapsed()),
        },
        Panel {
            title: "Peak memory",
            y_label: "bytes",
            lines: measured(|r| r.peak_memory().map(|b| b as f64)),
        },
        Panel {
            title: "Theoretical time complexity",
            y_label: "operations",
            lines: theoretical(CurveKind::Time),
        },
        Panel {
            title: "Theoretical space complexity",
            y_label: "cells",
            lines: theoretical(CurveKind::Space),
        },
    ]
}

/// Render the four-panel chart as a standalone SVG document.
///
/// Reads `series` only. Fails when there are no sizes to plot.
pub fn render_svg(
    series: &SeriesTable,
    curves: &[TheoreticalCurve],
    style: &ChartStyle,
) -> Result<String, RenderError> {
    let sizes = series.sizes();
    if sizes.is_empty() {
        return Err(RenderError::EmptyDomain);
    }

    let x_min = sizes.iter().copied().min().unwrap_or(0) as f64;
    let x_max = sizes.iter().copied().max().unwrap_or(0) as f64;
    let x_domain = if x_max > x_min {
        (x_min, x_max)
    } else {
        (x_min - 1.0, x_max + 1.0)
    };

    let (width, height) = (style.width.max(400) as f64, style.height.max(300) as f64);
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="11">"#,
        w = width,
        h = height
    );
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        style.theme.background()
    );

    let (cell_w, cell_h) = (width / 2.0, height / 2.0);
    for (i, panel) in build_panels(series, curves).iter().enumerate() {
        let cell = Rect {
            x: (i % 2) as f64 * cell_w,
            y: (i / 2) as f64 * cell_h,
            w: cell_w,
            h: cell_h,
        };
        render_panel(&mut out, panel, cell, x_domain, style.theme);
    }

    out.push_str("</svg>\n");
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

fn render_panel(out: &mut String, panel: &Panel, cell: Rect, x_domain: (f64, f64), theme: Theme) {
    let fg = theme.foreground();
    let plot = Rect {
        x: cell.x + 70.0,
        y: cell.y + 32.0,
        w: cell.w - 90.0,
        h: cell.h - 80.0,
    };

    let _ = writeln!(out, r#"<g class="panel">"#);
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14" fill="{}">{}</text>"#,
        cell.x + cell.w / 2.0,
        cell.y + 20.0,
        fg,
        escape(panel.title)
    );
    let _ = writeln!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}"/>"#,
        plot.x, plot.y, plot.w, plot.h, fg
    );

    // x axis
    let x_to_px = |x: f64| plot.x + (x - x_domain.0) / (x_domain.1 - x_domain.0) * plot.w;
    for tick in linear_ticks(x_domain.0, x_domain.1, 6) {
        let px = x_to_px(tick);
        let _ = writeln!(
            out,
            r#"<line x1="{px:.1}" y1="{:.1}" x2="{px:.1}" y2="{:.1}" stroke="{}"/>"#,
            plot.y,
            plot.y + plot.h,
            theme.grid()
        );
        let _ = writeln!(
            out,
            r#"<text x="{px:.1}" y="{:.1}" text-anchor="middle" fill="{}">{}</text>"#,
            plot.y + plot.h + 14.0,
            fg,
            format_tick(tick)
        );
    }
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{}">Input size</text>"#,
        plot.x + plot.w / 2.0,
        plot.y + plot.h + 32.0,
        fg
    );
    let _ = writeln!(
        out,
        r#"<text transform="translate({:.1},{:.1}) rotate(-90)" text-anchor="middle" fill="{}">{}</text>"#,
        cell.x + 16.0,
        plot.y + plot.h / 2.0,
        fg,
        escape(panel.y_label)
    );

    // y axis (log10)
    let ys: Vec<f64> = panel
        .lines
        .iter()
        .flat_map(|l| l.points.iter().flatten().map(|&(_, y)| y))
        .collect();
    let Some((lo, hi)) = log_bounds(&ys) else {
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{}">no data</text>"#,
            plot.x + plot.w / 2.0,
            plot.y + plot.h / 2.0,
            fg
        );
        out.push_str("</g>\n");
        return;
    };
    let y_to_px = |y: f64| plot.y + plot.h - (y.log10() - lo) / (hi - lo) * plot.h;
    let step = ((hi - lo) / 8.0).ceil().max(1.0) as i32;
    for exp in (lo as i32..=hi as i32).step_by(step as usize) {
        let py = y_to_px(10f64.powi(exp));
        let _ = writeln!(
            out,
            r#"<line x1="{:.1}" y1="{py:.1}" x2="{:.1}" y2="{py:.1}" stroke="{}"/>"#,
            plot.x,
            plot.x + plot.w,
            theme.grid()
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="{}">1e{}</text>"#,
            plot.x - 6.0,
            py + 4.0,
            fg,
            exp
        );
    }

    for (idx, line) in panel.lines.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let dash = if line.dashed {
            r#" stroke-dasharray="6,4""#
        } else {
            ""
        };
        for segment in segments(&line.points) {
            let coords: Vec<String> = segment
                .iter()
                .map(|&(x, y)| format!("{:.1},{:.1}", x_to_px(x), y_to_px(y)))
                .collect();
            let _ = writeln!(
                out,
                r#"<polyline data-series="{}" points="{}" fill="none" stroke="{}" stroke-width="1.5"{}/>"#,
                escape(&line.label),
                coords.join(" "),
                color,
                dash
            );
        }
        if !line.dashed {
            for &(x, y) in line.points.iter().flatten() {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
                    x_to_px(x),
                    y_to_px(y),
                    color
                );
            }
        }

        // legend, top-left inside the plot
        let ly = plot.y + 14.0 + idx as f64 * 14.0;
        let _ = writeln!(
            out,
            r#"<line x1="{:.1}" y1="{ly:.1}" x2="{:.1}" y2="{ly:.1}" stroke="{}" stroke-width="2"{}/>"#,
            plot.x + 8.0,
            plot.x + 28.0,
            color,
            dash
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" fill="{}">{}</text>"#,
            plot.x + 34.0,
            ly + 4.0,
            fg,
            escape(&line.label)
        );
    }

    out.push_str("</g>\n");
}

/// Runs of consecutive drawable points. Single points still form a segment.
fn segments(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(*p),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Decade bounds `(floor(log10 min), ceil(log10 max))` of the positive values
fn log_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let positives = values.iter().copied().filter(|v| *v > 0.0 && v.is_finite());
    let (min, max) = positives.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;
    let lo = min.log10().floor();
    let mut hi = max.log10().ceil();
    if hi <= lo {
        hi = lo + 1.0;
    }
    Some((lo, hi))
}

/// Roughly `target` evenly spaced ticks on 1/2/5 multiples of a power of ten
fn linear_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if span <= 0.0 || target == 0 {
        return vec![min];
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    let first = (min / step).ceil() * step;
    let mut ticks = Vec::new();
    let mut tick = first;
    while tick <= max + step * 1e-9 {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

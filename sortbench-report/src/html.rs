//! Single-file HTML report: the four-panel SVG inlined above a results table.

use crate::curves::TheoreticalCurve;
use crate::error::RenderError;
use crate::report::Report;
use crate::svg::{ChartStyle, Theme, render_svg};
use sortbench_core::MeasurementStatus;
use std::fmt::Write as _;

/// Generate a standalone HTML page for `report`
pub fn generate_html_report(
    report: &Report,
    curves: &[TheoreticalCurve],
    style: &ChartStyle,
) -> Result<String, RenderError> {
    let chart = render_svg(&report.series, curves, style)?;
    let (bg, fg) = match style.theme {
        Theme::Light => ("#ffffff", "#222222"),
        Theme::Dark => ("#1e1e1e", "#dddddd"),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>sortbench report</title>
<style>
body {{ background: {bg}; color: {fg}; font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; margin-top: 1.5em; }}
th, td {{ border: 1px solid #888; padding: 4px 8px; text-align: right; }}
th:first-child, td:first-child {{ text-align: left; }}
td.sentinel {{ color: #d62728; }}
</style>
</head>
<body>
<h1>Sorting benchmark</h1>
<p>Version {version} &middot; {timestamp} &middot; {os}/{arch} &middot; {cpu}</p>
<p>{measured} measured, {failed} failed, {timed_out} timed out, {skipped} skipped in {total:.0} ms</p>
"#,
        bg = bg,
        fg = fg,
        version = escape(&report.meta.version),
        timestamp = report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        os = escape(&report.meta.system.os),
        arch = escape(&report.meta.system.arch),
        cpu = escape(&report.meta.system.cpu),
        measured = report.summary.measured,
        failed = report.summary.failed,
        timed_out = report.summary.timed_out,
        skipped = report.summary.skipped,
        total = report.summary.total_duration_ms,
    );

    html.push_str(&chart);

    html.push_str("<table>\n<thead><tr><th>algorithm</th>");
    for size in report.series.sizes() {
        let _ = write!(html, "<th>n={}</th>", size);
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for series in report.series.series() {
        let _ = write!(html, "<tr><td>{}</td>", escape(&series.algorithm));
        for result in &series.results {
            match result.status {
                MeasurementStatus::Measured => {
                    let _ = write!(
                        html,
                        "<td>{:.3} ms<br>{} B</td>",
                        result.elapsed_seconds * 1e3,
                        result.peak_memory_bytes
                    );
                }
                status => {
                    let _ = write!(
                        html,
                        r#"<td class="sentinel" title="{}">{}</td>"#,
                        escape(result.failure.as_deref().unwrap_or("")),
                        status.as_str()
                    );
                }
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    Ok(html)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//! CSV Output
//!
//! One row per (algorithm, size) pair, sentinels included.

use crate::report::Report;

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::from("algorithm,size,status,elapsed_seconds,peak_memory_bytes,failure\n");
    for result in report.series.results() {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape(&result.algorithm),
            result.size,
            result.status.as_str(),
            result.elapsed_seconds,
            result.peak_memory_bytes,
            result.failure.as_deref().map(escape).unwrap_or_default()
        ));
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

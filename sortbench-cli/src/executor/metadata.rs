//! Report metadata: where and how a run was taken.
//!
//! Besides the run options this records the git revision and a short host
//! description (OS, architecture, CPU model, core count, RAM). CPU model and
//! RAM come from `/proc` and are `"Unknown"` / `0.0` where it is unavailable.

use chrono::Utc;
use sortbench_report::{ReportConfig, ReportMeta, SystemInfo};

/// Bumped whenever the JSON layout changes
pub const SCHEMA_VERSION: u32 = 1;

/// Build report metadata including system info and git details
pub fn build_report_meta(config: ReportConfig) -> ReportMeta {
    let git_commit = git(&["rev-parse", "HEAD"]);
    let git_branch = git(&["rev-parse", "--abbrev-ref", "HEAD"]);

    let system = host();

    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        git_commit,
        git_branch,
        system,
        config,
    }
}

/// Trimmed stdout of a successful git command
fn git(args: &[&str]) -> Option<String> {
    std::process::Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn host() -> SystemInfo {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").unwrap_or_default();
    let meminfo = std::fs::read_to_string("/proc/meminfo").unwrap_or_default();

    SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: proc_field(&cpuinfo, "model name").unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1),
        memory_gb: proc_field(&meminfo, "MemTotal")
            .and_then(|v| v.split_whitespace().next()?.parse::<u64>().ok())
            .map(|kib| kib as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0),
    }
}

/// Value of the first `key: value` line in a `/proc` listing
fn proc_field(listing: &str, key: &str) -> Option<String> {
    listing.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then(|| v.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_carries_config() {
        let meta = build_report_meta(ReportConfig {
            sizes: vec![10, 20],
            range: (-5, 5),
            seed: Some(3),
            timeout_ms: Some(1000),
            track_allocations: false,
            verify_output: true,
        });
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.config.sizes, vec![10, 20]);
        assert_eq!(meta.system.os, std::env::consts::OS);
        assert!(meta.system.cpu_cores >= 1);
    }

    #[test]
    fn test_proc_field() {
        let cpuinfo = "processor\t: 0\nmodel name\t: Example CPU @ 3.00GHz\nmodel name\t: second\n";
        assert_eq!(
            proc_field(cpuinfo, "model name").as_deref(),
            Some("Example CPU @ 3.00GHz")
        );
        assert_eq!(
            proc_field("MemTotal:       16384000 kB\n", "MemTotal").as_deref(),
            Some("16384000 kB")
        );
        assert!(proc_field("", "MemTotal").is_none());
    }
}

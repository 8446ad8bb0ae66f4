//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, LookupStats};

/// Logs the count of every failure kind that occurred.
pub fn print_lookup_statistics(stats: &LookupStats) {
    for line in lookup_statistics_lines(stats) {
        info!("{}", line);
    }
}

/// Failure count lines: a header, then one line per kind that occurred.
///
/// Empty when nothing failed.
pub fn lookup_statistics_lines(stats: &LookupStats) -> Vec<String> {
    let total = stats.total_failures();
    if total == 0 {
        return Vec::new();
    }

    let mut lines = vec![format!("Failure Counts ({} total):", total)];
    for kind in FailureKind::iter() {
        let count = stats.failure_count(kind);
        if count > 0 {
            lines.push(format!("   {}: {}", kind.as_str(), count));
        }
    }
    lines
}

/// One-line summary of a run.
pub fn summary_line(submitted: usize, succeeded: usize, failed: usize, elapsed_seconds: f64) -> String {
    format!(
        "Looked up {} quer{} ({} succeeded, {} failed) in {:.1}s",
        submitted,
        if submitted == 1 { "y" } else { "ies" },
        succeeded,
        failed,
        elapsed_seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_statistics_lines_without_failures() {
        let stats = LookupStats::new();
        stats.record_success();
        assert!(lookup_statistics_lines(&stats).is_empty());
    }

    #[test]
    fn test_statistics_lines_list_only_occurring_kinds() {
        let stats = LookupStats::new();
        stats.record_failure(FailureKind::LookupFailed);
        stats.record_failure(FailureKind::LookupFailed);
        stats.record_failure(FailureKind::EmptyInput);

        assert_eq!(
            lookup_statistics_lines(&stats),
            vec![
                "Failure Counts (3 total):".to_string(),
                "   Empty input: 1".to_string(),
                "   Lookup failed: 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_line_pluralization() {
        assert_eq!(
            summary_line(1, 1, 0, 0.5),
            "Looked up 1 query (1 succeeded, 0 failed) in 0.5s"
        );
        assert_eq!(
            summary_line(3, 2, 1, 1.0),
            "Looked up 3 queries (2 succeeded, 1 failed) in 1.0s"
        );
    }
}

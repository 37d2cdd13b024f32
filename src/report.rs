//! Rendering of per-repository command results.

use crate::git::RepoResult;
use std::fmt::Write as _;

/// Render results in order. Failures are always shown; successes only when
/// `verbose` is on.
pub fn render_results(results: &[RepoResult], verbose: bool) -> String {
    let mut out = String::new();
    for result in results.iter().filter(|r| verbose || !r.success) {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== {} ===", result.display_name());
        let _ = writeln!(out, "{}", result.output);
    }
    out
}

/// Number of failed results.
pub fn failure_count(results: &[RepoResult]) -> usize {
    results.iter().filter(|r| !r.success).count()
}

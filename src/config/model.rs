//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a git-mgr session.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
/// Command-line flags override these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Execution settings
    // =========================================================================
    /// Worker threads for parallel git commands.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Show output of successful commands, not just failures.
    #[serde(default)]
    pub verbose: bool,

    // =========================================================================
    // Scan settings
    // =========================================================================
    /// Glob patterns (relative to the scan root) for directories the scan skips.
    #[serde(default)]
    pub scan_exclude: Vec<String>,

    // =========================================================================
    // Shell settings
    // =========================================================================
    /// Whether to load and append to the persistent history file.
    #[serde(default = "default_true")]
    pub history: bool,

    /// Persistent history file; a leading `~` is expanded.
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// Commands to run, one per line, before the first prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_script: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            verbose: false,
            scan_exclude: Vec::new(),
            history: default_true(),
            history_file: default_history_file(),
            startup_script: None,
        }
    }
}

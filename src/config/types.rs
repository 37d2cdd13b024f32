//! Constants and default value functions used by the Config struct.

use std::path::PathBuf;

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "git-mgr";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Worker threads used when nothing else is configured.
pub const DEFAULT_THREADS: usize = 4;

/// History file used when nothing else is configured.
pub const DEFAULT_HISTORY_FILE: &str = "~/.gitrepomanager_history";

/// Expand a leading `~` to the user's home directory.
///
/// Paths not starting with `~`, or a missing home directory, leave the
/// input unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// Default value functions for serde
pub(crate) fn default_threads() -> usize {
    DEFAULT_THREADS
}
pub(crate) fn default_history_file() -> String {
    DEFAULT_HISTORY_FILE.to_string()
}
pub(crate) fn default_true() -> bool {
    true
}

//! Repository discovery.
//!
//! Walks a directory tree and reports every directory holding a `.git`
//! directory. The walk never descends into a repository once found, so
//! nested repositories (vendored checkouts, submodules) are not reported.

use crate::error::{MgrError, Result};
use crate::git;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories the scan must not enter, matched against paths relative to
/// the scan root (`node_modules`, `**/target`, `archive/*`).
#[derive(Debug, Clone)]
pub struct ScanExclude {
    globs: GlobSet,
}

impl ScanExclude {
    /// Compile exclusion patterns.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern.trim_end_matches('/')).map_err(|e| {
                MgrError::ConfigError(format!(
                    "invalid glob pattern in scan_exclude: '{}' - {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }

        let globs = builder.build().map_err(|e| {
            MgrError::ConfigError(format!("failed to compile scan_exclude globs: {}", e))
        })?;
        Ok(Self { globs })
    }

    /// Exclusion set that matches nothing.
    pub fn none() -> Self {
        Self {
            globs: GlobSet::empty(),
        }
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.globs.is_match(relative)
    }
}

impl Default for ScanExclude {
    fn default() -> Self {
        Self::none()
    }
}

/// Find Git repositories under `root` (including `root` itself).
///
/// Returned paths are absolute, in walk order (sorted by file name at each
/// level). Symlinks are not followed. Unreadable directories are skipped.
///
/// # Errors
///
/// * `MgrError::UserError` - `root` is not an existing directory
pub fn discover(root: &Path, exclude: &ScanExclude) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(MgrError::UserError(format!(
            "Directory not found: {}",
            root.display()
        )));
    }
    let root = std::path::absolute(root)?;

    let mut repos = Vec::new();
    let mut walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry during scan");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if !relative.as_os_str().is_empty() && exclude.is_excluded(relative) {
            tracing::debug!(path = %entry.path().display(), "excluded from scan");
            walker.skip_current_dir();
            continue;
        }

        if git::is_git_repo(entry.path()) {
            repos.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }

    Ok(repos)
}

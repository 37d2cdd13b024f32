//! The set of repositories the session currently knows about.

use crate::git;
use crate::pool;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Shown by `list`, `git`, and `branch_switch_default` before any scan.
pub const NO_REPOSITORIES: &str = "No repositories found. Use 'scan' to discover repositories.";

/// Repository path to current branch, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    repos: BTreeMap<PathBuf, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every known repository and remember `entries` instead.
    pub fn replace<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (PathBuf, String)>,
    {
        self.repos = entries.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Repository paths in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.repos.keys().cloned().collect()
    }

    #[cfg(test)]
    pub fn branch(&self, repo: &std::path::Path) -> Option<&str> {
        self.repos.get(repo).map(String::as_str)
    }

    /// Re-read the current branch of every repository on `threads` workers.
    pub fn refresh_branches(&mut self, threads: usize) {
        let paths = self.paths();
        let branches = pool::run_parallel(&paths, threads, |repo| git::current_branch(repo));
        self.replace(paths.into_iter().zip(branches));
    }

    /// Render the repository/branch table printed by `list`.
    pub fn render_table(&self) -> String {
        if self.repos.is_empty() {
            return format!("{}\n", NO_REPOSITORIES);
        }

        let rows: Vec<(String, &str)> = self
            .repos
            .iter()
            .map(|(path, branch)| (git::repo_name(path), branch.as_str()))
            .collect();
        let width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "Discovered Git repositories:");
        let _ = writeln!(out, "{:<width$}  Branch", "Repository");
        let _ = writeln!(out, "{}", "-".repeat(width + 20));
        for (name, branch) in rows {
            let _ = writeln!(out, "{:<width$}  {}", name, branch);
        }
        out
    }
}

//! Git command runner for git-mgr.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. All git operations go through this module.

use crate::error::{MgrError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Branch name reported when git cannot tell us one.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Outcome of running one command in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoResult {
    /// Absolute path of the repository.
    pub repo: PathBuf,
    /// Stdout on success, a formatted error block on failure.
    pub output: String,
    pub success: bool,
}

impl RepoResult {
    /// Directory name shown in reports and tables.
    pub fn display_name(&self) -> String {
        repo_name(&self.repo)
    }
}

/// Last path component of a repository, or the whole path if it has none.
pub fn repo_name(repo: &Path) -> String {
    repo.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo.display().to_string())
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(MgrError::GitError)` - If git could not be spawned or exited non-zero.
///   The message is git's stderr, or stdout when stderr is empty.
pub fn run_git<P: AsRef<Path>, S: AsRef<str>>(cwd: P, args: &[S]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    tracing::debug!(repo = %cwd.display(), ?args, "running git");

    let output = Command::new("git")
        .current_dir(cwd)
        .args(&args)
        .output()
        .map_err(|e| {
            MgrError::GitError(format!("failed to execute git (is git installed?): {}", e))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        tracing::debug!(
            repo = %cwd.display(),
            code = output.status.code().unwrap_or(-1),
            "git exited with failure"
        );
        let message = if git_output.stderr.is_empty() {
            git_output.stdout
        } else {
            git_output.stderr
        };
        Err(MgrError::GitError(message))
    }
}

/// Check whether `path` has a `.git` directory.
///
/// A `.git` *file* (linked worktree, submodule checkout) does not count.
pub fn is_git_repo<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().join(".git").is_dir()
}

/// Current branch of a repository, or [`UNKNOWN_BRANCH`] if git fails.
pub fn current_branch<P: AsRef<Path>>(repo: P) -> String {
    match run_git(repo, &["rev-parse", "--abbrev-ref", "HEAD"]) {
        Ok(output) => output.stdout,
        Err(_) => UNKNOWN_BRANCH.to_string(),
    }
}

/// Determine the default branch of a repository.
///
/// Asks `origin` for its HEAD branch first. When the remote answers but
/// names no HEAD branch, falls back to looking for a local or remote-tracking
/// `main`, then `master`. Any git failure yields [`UNKNOWN_BRANCH`].
pub fn default_branch<P: AsRef<Path>>(repo: P) -> String {
    let repo = repo.as_ref();
    match resolve_default_branch(repo) {
        Ok(branch) => branch,
        Err(e) => {
            tracing::debug!(repo = %repo.display(), error = %e, "could not resolve default branch");
            UNKNOWN_BRANCH.to_string()
        }
    }
}

fn resolve_default_branch(repo: &Path) -> Result<String> {
    let remote = run_git(repo, &["remote", "show", "origin"])?;
    if let Some(branch) = parse_head_branch(&remote.stdout) {
        return Ok(branch);
    }

    let branches = run_git(repo, &["branch", "-a"])?;
    Ok(pick_fallback_branch(&branches.lines()))
}

/// Extract the branch from the `HEAD branch: <name>` line of `git remote show`.
///
/// Returns `None` when the line is missing or carries no name (git prints
/// `HEAD branch (remote HEAD is ambiguous, ...):` with nothing after the colon).
fn parse_head_branch(remote_show: &str) -> Option<String> {
    let line = remote_show.lines().find(|line| line.contains("HEAD branch"))?;
    let name = line.rsplit(':').next()?.trim();
    if name.is_empty() || name == "(unknown)" {
        None
    } else {
        Some(name.to_string())
    }
}

/// Choose `main` or `master` from `git branch -a` output.
///
/// A local branch must be named exactly `main`/`master`; a remote-tracking
/// branch counts once its `remotes/<remote>/` prefix is stripped, since
/// `git checkout main` creates the local branch from it.
fn pick_fallback_branch(branch_lines: &[&str]) -> String {
    let names: Vec<&str> = branch_lines
        .iter()
        .map(|line| line.trim_start_matches(['*', '+']).trim())
        .filter(|line| !line.contains(" -> "))
        .map(|line| {
            line.strip_prefix("remotes/")
                .and_then(|remote| remote.split_once('/'))
                .map_or(line, |(_, name)| name)
        })
        .collect();

    ["main", "master"]
        .into_iter()
        .find(|candidate| names.contains(candidate))
        .unwrap_or(UNKNOWN_BRANCH)
        .to_string()
}

/// Run `git <words>` in a repository and fold the outcome into a [`RepoResult`].
pub fn run_in_repo<S: AsRef<str>>(repo: &Path, words: &[S]) -> RepoResult {
    match run_git(repo, words) {
        Ok(output) => RepoResult {
            repo: repo.to_path_buf(),
            output: output.stdout,
            success: true,
        },
        Err(e) => RepoResult {
            repo: repo.to_path_buf(),
            output: format!("Error in {}:\n{}", repo.display(), e),
            success: false,
        },
    }
}

/// Split a command line into git arguments using POSIX shell quoting rules.
pub fn split_command(command: &str) -> Result<Vec<String>> {
    shell_words::split(command).map_err(|e| {
        MgrError::UserError(format!(
            "failed to parse command: {}\nCommand: {}\nFix: check for unmatched quotes.",
            e, command
        ))
    })
}

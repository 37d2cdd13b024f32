//! Session state and the commands that act on it.
//!
//! A [`Session`] owns the repository registry and the execution settings
//! (verbose, threads). Each command writes its user-facing output to the
//! writer it is given and reports problems as [`MgrError`]s, which the shell
//! prints without ending the session.

use crate::config::Config;
use crate::error::{MgrError, Result};
use crate::git::{self, RepoResult, UNKNOWN_BRANCH};
use crate::pool;
use crate::registry::{NO_REPOSITORIES, Registry};
use crate::report;
use crate::scan::{self, ScanExclude};
use std::io::Write;
use std::path::{Path, PathBuf};


/// Mutable state shared by every command of one shell session.
#[derive(Debug, Clone)]
pub struct Session {
    registry: Registry,
    verbose: bool,
    threads: usize,
    exclude: ScanExclude,
}

impl Session {
    /// Start a session with settings taken from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            registry: Registry::new(),
            verbose: config.verbose,
            threads: config.threads.max(1),
            exclude: config.scan_exclude()?,
        })
    }

    #[cfg(test)]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[cfg(test)]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[cfg(test)]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// `scan [-d DIR]`: replace the registry with the repositories under `dir`.
    pub fn scan(&mut self, dir: Option<&Path>, out: &mut dyn Write) -> Result<()> {
        let dir: PathBuf = match dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };

        if !dir.is_dir() {
            return Err(MgrError::UserError(format!(
                "Directory not found: {}",
                dir.display()
            )));
        }

        writeln!(out, "Scanning for Git repositories in {}...", dir.display())?;

        let repos = scan::discover(&dir, &self.exclude)?;
        let branches = pool::run_parallel(&repos, self.threads, |repo| git::current_branch(repo));
        self.registry.replace(repos.into_iter().zip(branches));
        tracing::info!(count = self.registry.len(), dir = %dir.display(), "scan complete");

        writeln!(out, "Found {} Git repositories.", self.registry.len())?;
        if !self.registry.is_empty() {
            self.list(out)?;
        }
        Ok(())
    }

    /// `list`: print every known repository with its branch.
    pub fn list(&self, out: &mut dyn Write) -> Result<()> {
        write!(out, "{}", self.registry.render_table())?;
        Ok(())
    }

    /// `git <args>`: run git with `args` in every known repository.
    ///
    /// Fails with a `GitError` after printing the report when any repository
    /// failed, so scripted runs can tell.
    pub fn git(&mut self, args: &[String], out: &mut dyn Write) -> Result<()> {
        self.require_repositories()?;
        if args.is_empty() {
            return Err(MgrError::UserError(
                "usage: git <command> [args...]".to_string(),
            ));
        }

        writeln!(
            out,
            "Executing 'git {}' in {} repositories...",
            shell_words::join(args),
            self.registry.len()
        )?;

        let paths = self.registry.paths();
        let results =
            pool::run_parallel(&paths, self.threads, |repo| git::run_in_repo(repo, args));
        self.finish(&results, out)
    }

    /// `branch_switch_default`: check out each repository's default branch.
    pub fn branch_switch_default(&mut self, out: &mut dyn Write) -> Result<()> {
        self.require_repositories()?;

        writeln!(
            out,
            "Switching to default branches in {} repositories...",
            self.registry.len()
        )?;

        let paths = self.registry.paths();
        let defaults = pool::run_parallel(&paths, self.threads, |repo| git::default_branch(repo));
        let targets: Vec<(PathBuf, String)> = paths.into_iter().zip(defaults).collect();

        let results = pool::run_parallel(&targets, self.threads, |(repo, branch)| {
            if branch == UNKNOWN_BRANCH {
                RepoResult {
                    repo: repo.clone(),
                    output: format!(
                        "Error in {}:\ncould not determine the default branch",
                        repo.display()
                    ),
                    success: false,
                }
            } else {
                git::run_in_repo(repo, &["checkout", branch.as_str()])
            }
        });

        let outcome = self.finish(&results, out);
        self.registry.refresh_branches(self.threads);
        outcome
    }

    /// `verbose [on|off]`: set, or toggle when `state` is `None`.
    pub fn set_verbose(&mut self, state: Option<bool>, out: &mut dyn Write) -> Result<()> {
        self.verbose = state.unwrap_or(!self.verbose);
        writeln!(
            out,
            "Verbose output is {}",
            if self.verbose { "ON" } else { "OFF" }
        )?;
        Ok(())
    }

    /// `threads <n>`: set the worker count used by later commands.
    pub fn set_threads(&mut self, num: i64, out: &mut dyn Write) -> Result<()> {
        let threads = usize::try_from(num).ok().filter(|&n| n >= 1).ok_or_else(|| {
            MgrError::UserError("Number of threads must be at least 1".to_string())
        })?;

        self.threads = threads;
        writeln!(out, "Using {} threads for parallel execution", self.threads)?;
        Ok(())
    }

    fn require_repositories(&self) -> Result<()> {
        if self.registry.is_empty() {
            Err(MgrError::UserError(NO_REPOSITORIES.to_string()))
        } else {
            Ok(())
        }
    }

    /// Print the report and turn failed repositories into an error.
    fn finish(&self, results: &[RepoResult], out: &mut dyn Write) -> Result<()> {
        write!(out, "{}", report::render_results(results, self.verbose))?;

        let failed = report::failure_count(results);
        if failed > 0 {
            tracing::debug!(failed, total = results.len(), "command failed in some repositories");
            return Err(MgrError::GitError(format!(
                "{} of {} repositories failed",
                failed,
                results.len()
            )));
        }
        Ok(())
    }
}

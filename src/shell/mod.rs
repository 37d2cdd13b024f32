//! Interactive shell: the `git-mgr>` prompt loop, startup scripts, and
//! one-shot command execution.
//!
//! Each input line is split with shell quoting rules. A line starting with a
//! shell command name is parsed by [`ShellLine`]; anything else is passed to
//! git in every repository, as if it had been typed after `git`.

mod history;

#[cfg(test)]
mod tests;

pub use history::History;

use crate::cli::{Category, ShellCommand, ShellLine};
use crate::error::{MgrError, Result};
use crate::git;
use crate::session::Session;
use clap::Parser;
use clap::error::ErrorKind;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::Path;

pub const INTRO: &str = "Git Repo Manager - Type 'help' for available commands";
pub const PROMPT: &str = "git-mgr> ";

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    session: Session,
    history: History,
}

impl Shell {
    pub fn new(session: Session, history: History) -> Self {
        Self { session, history }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Read, execute, print until `exit`/`quit` or end of input.
    ///
    /// Command failures are printed to `err` and the loop continues.
    pub fn run_interactive<R: BufRead>(
        &mut self,
        input: R,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        writeln!(out, "{}", INTRO)?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            self.history.record(&line);
            match self.execute(&line, out) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(err, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    /// Run `commands` in order, stopping at the first failure or `exit`.
    pub fn run_commands(&mut self, commands: &[String], out: &mut dyn Write) -> Result<()> {
        for command in commands {
            if self.execute(command, out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Execute every command in a startup script.
    ///
    /// Blank lines and `#` comments are skipped. A failing command is
    /// reported on `err` and the script continues. An `exit` line stops the
    /// script and returns [`Flow::Exit`], so the caller never starts the prompt.
    pub fn run_script(
        &mut self,
        path: &Path,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Flow> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read startup script");
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(path = %path.display(), "running startup script");
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.execute(line, out) {
                Ok(Flow::Exit) => return Ok(Flow::Exit),
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(err, "Error: {}", e)?,
            }
        }
        Ok(Flow::Continue)
    }

    /// Execute a single input line.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let words = git::split_command(line.trim())?;
        let Some(first) = words.first() else {
            return Ok(Flow::Continue);
        };

        if !ShellLine::is_command(first) {
            tracing::debug!(command = %first, "not a shell command, running as git");
            self.session.git(&words, out)?;
            return Ok(Flow::Continue);
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                let message = e.render().to_string();
                let message = message.trim_end();
                return Err(MgrError::UserError(
                    message.strip_prefix("error: ").unwrap_or(message).to_string(),
                ));
            }
        };

        match parsed.command {
            ShellCommand::Scan(args) => self.session.scan(args.directory.as_deref(), out)?,
            ShellCommand::List => self.session.list(out)?,
            ShellCommand::Git(args) => self.session.git(&args.args, out)?,
            ShellCommand::BranchSwitchDefault => self.session.branch_switch_default(out)?,
            ShellCommand::Verbose(args) => {
                self.session.set_verbose(args.state.map(|s| s.is_on()), out)?
            }
            ShellCommand::Threads(args) => self.session.set_threads(args.num, out)?,
            ShellCommand::Help(args) => write!(out, "{}", render_help(args.command.as_deref())?)?,
            ShellCommand::History => write!(out, "{}", self.history.render())?,
            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}

/// Text of `help` (command list by category) or `help <command>`.
fn render_help(command: Option<&str>) -> Result<String> {
    if let Some(name) = command {
        return ShellLine::command_help(name)
            .ok_or_else(|| MgrError::UserError(format!("No help on {}", name)));
    }

    let summaries = ShellLine::summaries();
    let width = summaries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Documented commands (use 'help <command>' for details):");
    for category in Category::ALL {
        let mut rows: Vec<&(String, String)> = summaries
            .iter()
            .filter(|(name, _)| Category::of(name) == category)
            .collect();
        rows.sort();

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", category.title());
        let _ = writeln!(out, "{}", "=".repeat(category.title().len()));
        for (name, about) in rows {
            let _ = writeln!(out, "  {:<width$}  {}", name, about);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Anything else is run as a git command in every repository.");
    Ok(out)
}

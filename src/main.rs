//! git-mgr: run Git commands across many repositories in parallel.
//!
//! This is the main entry point for the `git-mgr` CLI. It parses arguments,
//! loads configuration, and either runs the given commands or starts the
//! interactive shell, mapping errors to exit codes.

mod cli;
mod config;
mod error;
mod exit_codes;
mod git;
mod pool;
mod registry;
mod report;
mod scan;
mod session;
mod shell;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::Config;
use error::{MgrError, Result};
use session::Session;
use shell::{Flow, History, Shell};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `git_mgr=trace`).
const LOG_ENV: &str = "GIT_MGR_LOG";

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse_args();

    if cli.commands.is_empty() {
        // Ctrl-C reaches running git children; the prompt itself keeps going.
        if let Err(e) = ctrlc::set_handler(|| {}) {
            tracing::warn!(error = %e, "could not install Ctrl-C handler");
        }
    }

    // Unlocked handles: worker threads may log to stderr while a command runs.
    let stdin = io::stdin();
    match run(cli, stdin.lock(), &mut io::stdout(), &mut io::stderr()) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Apply command-line flags on top of the loaded config.
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(threads) = cli.threads {
        if threads == 0 {
            return Err(MgrError::UserError(
                "Number of threads must be at least 1".to_string(),
            ));
        }
        config.threads = threads;
    }
    if cli.verbose {
        config.verbose = true;
    }
    if cli.no_history {
        config.history = false;
    }
    Ok(())
}

fn run<R: BufRead>(cli: Cli, input: R, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    let mut config = Config::resolve(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;

    if cli.print_config {
        write!(out, "{}", config.to_yaml()?)?;
        return Ok(());
    }

    let session = Session::new(&config)?;

    if !cli.commands.is_empty() {
        let mut shell = Shell::new(session, History::in_memory());
        let outcome = shell.run_commands(&cli.commands, out);
        out.flush()?;
        return outcome;
    }

    let history = match config.history_path() {
        Some(path) => History::with_file(path),
        None => History::in_memory(),
    };
    let mut shell = Shell::new(session, history);

    if let Some(script) = config.startup_script_path()
        && shell.run_script(&script, out, err)? == Flow::Exit
    {
        out.flush()?;
        return Ok(());
    }

    shell.run_interactive(input, out, err)
}

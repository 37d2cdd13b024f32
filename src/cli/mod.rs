//! Argument parsing for git-mgr.
//!
//! Uses clap derive macros for two grammars: the process command line
//! ([`Cli`]) and each line typed at the interactive prompt ([`ShellLine`]).
//! Command behavior lives in the `session` and `shell` modules.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Git Repo Manager: run Git commands across many repositories in parallel.
///
/// Starts an interactive shell. Use `scan` to discover repositories, then
/// type any git command (with or without the leading `git`) to run it in
/// every discovered repository.
#[derive(Parser, Debug)]
#[command(name = "git-mgr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load instead of `<config dir>/git-mgr/config.yaml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Worker threads for parallel execution (overrides config).
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Show output of successful commands, not just failures.
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not read or write the persistent history file.
    #[arg(long)]
    pub no_history: bool,

    /// Print the effective configuration as YAML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Run a shell command and exit instead of starting the prompt.
    ///
    /// May be given several times; commands run in order and the first
    /// failure stops the run.
    #[arg(short = 'c', long = "command", value_name = "COMMAND")]
    pub commands: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// One line entered at the `git-mgr>` prompt.
#[derive(Parser, Debug)]
#[command(name = "git-mgr", no_binary_name = true)]
#[command(disable_help_subcommand = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands understood by the interactive shell.
///
/// Input whose first word is none of these runs as `git <input>`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Scan for Git repositories in the specified directory or current directory.
    Scan(ScanArgs),

    /// List all discovered Git repositories and their current branches.
    List,

    /// Execute a Git command in all repositories.
    #[command(disable_help_flag = true)]
    Git(GitArgs),

    /// Switch all repositories to their default branch (main/master).
    #[command(name = "branch_switch_default")]
    BranchSwitchDefault,

    /// Toggle verbose output (show all command results, not just errors).
    Verbose(VerboseArgs),

    /// Set the number of threads to use for parallel execution.
    Threads(ThreadsArgs),

    /// List available commands or show help for one command.
    Help(HelpArgs),

    /// Show previously entered commands.
    History,

    /// Exit this application.
    #[command(alias = "quit")]
    Exit,
}

/// Arguments for `scan`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    /// Directory to scan (default: current directory).
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

/// Arguments for `git`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GitArgs {
    /// Arguments passed to git unchanged.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

/// Arguments for `verbose`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct VerboseArgs {
    /// Turn verbose output on or off (toggles when omitted).
    pub state: Option<Switch>,
}

/// `on` / `off` argument.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

/// Arguments for `threads`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ThreadsArgs {
    /// Number of threads to use for parallel execution.
    #[arg(allow_negative_numbers = true)]
    pub num: i64,
}

/// Arguments for `help`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HelpArgs {
    /// Command to describe.
    pub command: Option<String>,
}

/// Help category, listed in this order by `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Discovery,
    Execution,
    Configuration,
    Shell,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Discovery,
        Category::Execution,
        Category::Configuration,
        Category::Shell,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Discovery => "discovery",
            Category::Execution => "execution",
            Category::Configuration => "configuration",
            Category::Shell => "shell",
        }
    }

    /// Category of a shell command by its name.
    pub fn of(command: &str) -> Category {
        match command {
            "scan" | "list" => Category::Discovery,
            "git" | "branch_switch_default" => Category::Execution,
            "verbose" | "threads" => Category::Configuration,
            _ => Category::Shell,
        }
    }
}

impl ShellLine {
    /// Whether `word` names a shell command (or alias) rather than git input.
    pub fn is_command(word: &str) -> bool {
        Self::command()
            .get_subcommands()
            .any(|sub| sub.get_name() == word || sub.get_all_aliases().any(|a| a == word))
    }

    /// `(name, one-line description)` of every shell command in declaration order.
    pub fn summaries() -> Vec<(String, String)> {
        Self::command()
            .get_subcommands()
            .map(|sub| {
                let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
                (sub.get_name().to_string(), about)
            })
            .collect()
    }

    /// Full clap help for one shell command, if it exists.
    pub fn command_help(name: &str) -> Option<String> {
        let mut cmd = Self::command();
        let sub = cmd.find_subcommand_mut(name)?;
        Some(sub.render_long_help().to_string())
    }
}

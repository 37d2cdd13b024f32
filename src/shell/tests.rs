//! Tests for the interactive shell.

use super::*;
use crate::config::Config;
use crate::test_support::create_workspace;
use std::io::Cursor;
use tempfile::TempDir;

fn shell() -> Shell {
    Shell::new(
        Session::new(&Config::default()).unwrap(),
        History::in_memory(),
    )
}

/// Feed `input` to the prompt loop and return (stdout, stderr).
fn run(shell: &mut Shell, input: &str) -> (String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    shell
        .run_interactive(Cursor::new(input.to_string()), &mut out, &mut err)
        .unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_intro_prompt_and_exit() {
    let mut shell = shell();
    let (out, err) = run(&mut shell, "exit\nlist\n");

    assert_eq!(out, format!("{}\n{}", INTRO, PROMPT));
    assert!(err.is_empty());
}

#[test]
fn test_end_of_input_ends_loop() {
    let mut shell = shell();
    let (out, _) = run(&mut shell, "");
    assert_eq!(out, format!("{}\n{}\n", INTRO, PROMPT));
}

#[test]
fn test_errors_are_printed_and_loop_continues() {
    let mut shell = shell();
    let (out, err) = run(&mut shell, "threads 0\nthreads 3\nquit\n");

    assert_eq!(err, "Error: Number of threads must be at least 1\n");
    assert!(out.contains("Using 3 threads for parallel execution"));
    assert_eq!(shell.session().threads(), 3);
}

#[test]
fn test_unknown_command_runs_as_git() {
    let mut shell = shell();
    let (_, err) = run(&mut shell, "status\n");
    assert_eq!(
        err,
        "Error: No repositories found. Use 'scan' to discover repositories.\n"
    );
}

#[test]
fn test_default_git_after_scan() {
    let workspace = create_workspace();
    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();

    let scan = format!("scan -d '{}'", workspace.path().display());
    shell.execute(&scan, &mut out).unwrap();
    shell.execute("verbose on", &mut out).unwrap();

    let mut out: Vec<u8> = Vec::new();
    shell.execute("rev-parse --abbrev-ref HEAD", &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("Executing 'git rev-parse --abbrev-ref HEAD' in 3 repositories...\n"));
    assert!(out.contains("=== alpha ===\nmain\n"));
}

#[test]
fn test_explicit_git_prefix_is_equivalent() {
    let workspace = create_workspace();
    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();

    let scan = format!("scan --directory '{}'", workspace.path().display());
    shell.execute(&scan, &mut out).unwrap();

    let mut out: Vec<u8> = Vec::new();
    shell.execute("git status --short", &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Executing 'git status --short' in 3 repositories...\n"
    );
}

#[test]
fn test_unbalanced_quotes_are_rejected() {
    let mut shell = shell();
    let err = shell
        .execute("commit -m \"unterminated", &mut Vec::<u8>::new())
        .unwrap_err();
    assert!(matches!(err, MgrError::UserError(_)));
}

#[test]
fn test_argument_errors_are_user_errors() {
    let mut shell = shell();
    let err = shell
        .execute("verbose sideways", &mut Vec::<u8>::new())
        .unwrap_err();

    assert!(matches!(err, MgrError::UserError(_)));
    assert!(!err.to_string().starts_with("error: "));
}

#[test]
fn test_help_lists_commands_by_category() {
    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();
    shell.execute("help", &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    let discovery = out.find("discovery\n=========").unwrap();
    let execution = out.find("execution\n=========").unwrap();
    let configuration = out.find("configuration\n=============").unwrap();
    assert!(discovery < execution && execution < configuration);
    assert!(out.contains("branch_switch_default"));
}

#[test]
fn test_help_for_one_command() {
    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();
    shell.execute("help threads", &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Number of threads"));

    let err = shell
        .execute("help frobnicate", &mut Vec::<u8>::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "No help on frobnicate");
}

#[test]
fn test_dash_help_prints_usage() {
    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();
    assert_eq!(shell.execute("scan --help", &mut out).unwrap(), Flow::Continue);
    assert!(String::from_utf8(out).unwrap().contains("--directory"));
}

#[test]
fn test_history_records_entered_lines() {
    let mut shell = shell();
    let (out, _) = run(&mut shell, "verbose\n\nhistory\nexit\n");

    assert!(out.contains("    1  verbose\n    2  history\n"));
    assert_eq!(shell.history().entries(), ["verbose", "history", "exit"]);
}

#[test]
fn test_run_commands_stops_at_first_failure() {
    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();
    let commands = vec![
        "threads 2".to_string(),
        "list".to_string(),
        "git status".to_string(),
        "threads 9".to_string(),
    ];

    let err = shell.run_commands(&commands, &mut out).unwrap_err();

    assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
    assert_eq!(shell.session().threads(), 2);
}

#[test]
fn test_run_commands_stops_at_exit() {
    let mut shell = shell();
    let commands = vec!["exit".to_string(), "threads 0".to_string()];
    assert!(shell.run_commands(&commands, &mut Vec::<u8>::new()).is_ok());
}

#[test]
fn test_startup_script_runs_commands_and_skips_comments() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("rc");
    std::fs::write(&script, "# settings\n\nthreads 6\nthreads 0\nverbose on\n").unwrap();

    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let flow = shell.run_script(&script, &mut out, &mut err).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert_eq!(shell.session().threads(), 6);
    assert!(shell.session().verbose());
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "Error: Number of threads must be at least 1\n"
    );
    assert!(shell.history().entries().is_empty());
}

#[test]
fn test_missing_startup_script_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut shell = shell();
    let result = shell.run_script(
        &dir.path().join("absent"),
        &mut Vec::<u8>::new(),
        &mut Vec::<u8>::new(),
    );
    assert_eq!(result.unwrap(), Flow::Continue);
}

#[test]
fn test_exit_in_startup_script_stops_script_and_reports_exit() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("rc");
    std::fs::write(&script, "threads 3
exit
threads 9
").unwrap();

    let mut shell = shell();
    let mut out: Vec<u8> = Vec::new();
    let flow = shell.run_script(&script, &mut out, &mut Vec::<u8>::new()).unwrap();

    assert_eq!(flow, Flow::Exit);
    assert_eq!(shell.session().threads(), 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Using 3 threads for parallel execution\n"
    );
}

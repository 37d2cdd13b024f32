use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The process working directory is global; serialize every test that moves it.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Single-commit repository on `main`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path());
    temp_dir
}

/// Repository whose `origin` points at itself, so `git remote show origin`
/// reports `main` as the HEAD branch.
pub(crate) fn create_test_repo_with_remote() -> TempDir {
    let temp_dir = create_test_repo();
    let path_str = temp_dir.path().to_string_lossy().to_string();
    git(temp_dir.path(), &["remote", "add", "origin", &path_str]);
    temp_dir
}

/// Initialize a repository with one commit at `path`, creating it if needed.
pub(crate) fn init_repo(path: &Path) {
    std::fs::create_dir_all(path).unwrap();

    git(path, &["init"]);
    // Deterministic default branch name regardless of the host's init.defaultBranch.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
}

/// Workspace directory holding several repositories plus non-repo clutter:
///
/// ```text
/// root/
///   alpha/           repo
///   group/beta/      repo
///   group/notes/     plain directory
///   gamma/           repo, with gamma/vendor/inner/ also a repo (not reported)
/// ```
pub(crate) fn create_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    init_repo(&root.join("alpha"));
    init_repo(&root.join("group").join("beta"));
    std::fs::create_dir_all(root.join("group").join("notes")).unwrap();
    init_repo(&root.join("gamma"));
    init_repo(&root.join("gamma").join("vendor").join("inner"));

    temp_dir
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

//! Command history, optionally persisted to a file.
//!
//! The file holds one command per line. It is read once at startup, cut
//! back to the most recent entries if it has grown too long, and appended to
//! as commands are entered. History problems never stop the
//! shell: they are logged and the in-memory history keeps working.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Most recent entries kept in memory and in the file when it is loaded.
const MAX_LOADED_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    file: Option<PathBuf>,
}

impl History {
    /// History that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// History backed by `path`, preloaded with its existing entries.
    pub fn with_file(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let lines: Vec<String> = content
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect();
                let skip = lines.len().saturating_sub(MAX_LOADED_ENTRIES);
                let kept: Vec<String> = lines.into_iter().skip(skip).collect();
                if skip > 0
                    && let Err(e) = rewrite(&path, &kept)
                {
                    tracing::warn!(path = %path.display(), error = %e, "could not trim history file");
                }
                kept
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read history file");
                Vec::new()
            }
        };

        Self {
            entries,
            file: Some(path),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[cfg(test)]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Remember `line` and append it to the history file, if any.
    pub fn record(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.entries.push(line.to_string());

        if let Some(path) = &self.file
            && let Err(e) = append_line(path, line)
        {
            tracing::warn!(path = %path.display(), error = %e, "could not write history file");
        }
    }

    /// Numbered listing printed by the `history` command.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(out, "{:>5}  {}", index + 1, entry);
        }
        out
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

/// Replace the file's contents with `entries`, one per line.
fn rewrite(path: &Path, entries: &[String]) -> std::io::Result<()> {
    let mut content = entries.join("\n");
    content.push('\n');
    std::fs::write(path, content)
}

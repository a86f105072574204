//! Git-backed realization of a commit plan.
//!
//! [`GitWorkspace`] owns a temporary repository and creates backdated
//! commits by shelling out to `git` with `GIT_AUTHOR_DATE` and
//! `GIT_COMMITTER_DATE` overrides. The directory is removed when the
//! workspace is dropped unless the caller takes ownership of the path.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use tempfile::TempDir;
use tracing::debug;

use crate::domain::error::{Result, StippleError};
use crate::populate::CommitSink;

const ACTIVITY_FILE: &str = "activity.log";

/// A throwaway git repository that accepts backdated commits.
pub struct GitWorkspace {
    dir: TempDir,
}

impl GitWorkspace {
    /// Create and initialize a repository under the system temp directory.
    pub fn new() -> Result<Self> {
        Self::create(TempDir::new()?)
    }

    /// Create and initialize a repository under `base`.
    pub fn new_in(base: &Path) -> Result<Self> {
        Self::create(TempDir::new_in(base)?)
    }

    fn create(dir: TempDir) -> Result<Self> {
        run_git(dir.path(), &["init", "--quiet"])?;
        run_git(dir.path(), &["config", "user.name", "stipple"])?;
        run_git(dir.path(), &["config", "user.email", "stipple@localhost"])?;
        debug!(path = %dir.path().display(), "initialized git workspace");
        Ok(Self { dir })
    }

    /// Path of the working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Persist the repository on disk and return its path, disabling the
    /// drop-time cleanup.
    pub fn into_path(self) -> PathBuf {
        self.dir.into_path()
    }
}

impl CommitSink for GitWorkspace {
    /// Append to the tracked activity file and commit once per unit of
    /// `count`, each commit stamped at noon of `date`. Noon keeps DST shifts
    /// from moving a commit onto a neighboring day.
    fn commit(&mut self, date: NaiveDate, count: u32) -> Result<()> {
        let stamp = format!("{date}T12:00:00");
        for seq in 0..count {
            let path = self.dir.path().join(ACTIVITY_FILE);
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{date} {seq}")?;

            run_git(self.dir.path(), &["add", ACTIVITY_FILE])?;
            let message = format!("activity on {date}");
            let output = Command::new("git")
                .args(["commit", "--quiet", "-m", &message, "--date", &stamp])
                .env("GIT_COMMITTER_DATE", &stamp)
                .current_dir(self.dir.path())
                .output()
                .map_err(|e| StippleError::Git(format!("failed to run git: {e}")))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(StippleError::Git(format!("git commit failed: {stderr}")));
            }
        }
        debug!(%date, count, "applied backdated commits");
        Ok(())
    }
}

fn run_git(repo_dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .map_err(|e| StippleError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StippleError::Git(format!(
            "git {} failed: {stderr}",
            args.first().copied().unwrap_or("")
        )));
    }

    Ok(())
}

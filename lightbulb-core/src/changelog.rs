//! Change log of source files.

use crate::error::ChangeLogError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Other(String),
}

impl ChangeStatus {
    /// Parse a git `--name-status` letter such as `M` or `R100`
    pub fn from_git(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => ChangeStatus::Added,
            Some('M') => ChangeStatus::Modified,
            Some('D') => ChangeStatus::Deleted,
            Some('R') => ChangeStatus::Renamed,
            _ => ChangeStatus::Other(code.to_string()),
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Added => write!(f, "added"),
            ChangeStatus::Modified => write!(f, "modified"),
            ChangeStatus::Deleted => write!(f, "deleted"),
            ChangeStatus::Renamed => write!(f, "renamed"),
            ChangeStatus::Other(code) => write!(f, "{}", code),
        }
    }
}

/// One changed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeLogEntry {
    pub filename: PathBuf,
    pub status: ChangeStatus,
    pub timestamp: Option<DateTime<Utc>>,
}

pub trait ChangeLog {
    fn entries(&self) -> Result<Vec<ChangeLogEntry>, ChangeLogError>;
}

impl ChangeLog for Vec<ChangeLogEntry> {
    fn entries(&self) -> Result<Vec<ChangeLogEntry>, ChangeLogError> {
        Ok(self.clone())
    }
}

/// Changes under `pathspec` since a git ref, read from the `git` binary
///
/// `repo_dir` may be a subdirectory of the repository. Reported filenames
/// and `pathspec` are both relative to it.
#[derive(Debug, Clone)]
pub struct GitChangeLog {
    pub repo_dir: PathBuf,
    pub since: String,
    pub pathspec: PathBuf,
}

impl GitChangeLog {
    pub fn new(repo_dir: impl Into<PathBuf>, since: impl Into<String>, pathspec: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            since: since.into(),
            pathspec: pathspec.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String, ChangeLogError> {
        let command = format!("git {}", args.join(" "));
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .output()
            .map_err(|source| ChangeLogError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ChangeLogError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Commit time of the latest commit touching `path` since the ref
    fn latest_commit_time(&self, path: &Path) -> Option<DateTime<Utc>> {
        let range = format!("{}..HEAD", self.since);
        let path = path.to_string_lossy();
        let stdout = self
            .git(&["log", "-1", "--format=%ct", &range, "--", &path])
            .ok()?;
        let seconds = stdout.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp(seconds, 0)
    }
}

impl ChangeLog for GitChangeLog {
    fn entries(&self) -> Result<Vec<ChangeLogEntry>, ChangeLogError> {
        let pathspec = self.pathspec.to_string_lossy();
        let stdout = self.git(&[
            "diff",
            "--relative",
            "--name-status",
            &self.since,
            "--",
            &pathspec,
        ])?;

        Ok(parse_name_status(&stdout)
            .into_iter()
            .map(|(status, filename)| ChangeLogEntry {
                timestamp: self.latest_commit_time(&filename),
                filename,
                status,
            })
            .collect())
    }
}

/// Parse `git diff --name-status` output; renames report their new path
pub fn parse_name_status(stdout: &str) -> Vec<(ChangeStatus, PathBuf)> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let code = fields.next()?.trim();
            let path = fields.last()?;
            if code.is_empty() || path.is_empty() {
                return None;
            }
            Some((ChangeStatus::from_git(code), PathBuf::from(path)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_status() {
        let out = "M\tsource/2012/hello.rst\nA\tsource/new post.rst\nR087\tsource/old.rst\tsource/renamed.rst\nD\tsource/gone.rst\nT\tsource/link.rst\n\n";
        let entries = parse_name_status(out);

        assert_eq!(
            entries,
            vec![
                (ChangeStatus::Modified, PathBuf::from("source/2012/hello.rst")),
                (ChangeStatus::Added, PathBuf::from("source/new post.rst")),
                (ChangeStatus::Renamed, PathBuf::from("source/renamed.rst")),
                (ChangeStatus::Deleted, PathBuf::from("source/gone.rst")),
                (ChangeStatus::Other("T".into()), PathBuf::from("source/link.rst")),
            ]
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ChangeStatus::Modified.to_string(), "modified");
        assert_eq!(ChangeStatus::Other("C75".into()).to_string(), "C75");
    }

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_project_in_repo_subdirectory() {
        let repo = tempfile::tempdir().unwrap();
        if !git(repo.path(), &["init", "-q"]) {
            // No git binary available
            return;
        }
        let project = repo.path().join("site");
        std::fs::create_dir_all(project.join("source")).unwrap();
        std::fs::write(project.join("source/a.rst"), "A.\n").unwrap();
        assert!(git(repo.path(), &["add", "."]));
        assert!(git(repo.path(), &["commit", "-q", "-m", "first"]));

        std::fs::write(project.join("source/a.rst"), "A again.\n").unwrap();
        std::fs::write(project.join("source/b.rst"), "B.\n").unwrap();
        assert!(git(repo.path(), &["add", "."]));
        assert!(git(repo.path(), &["commit", "-q", "-m", "second"]));

        let entries = GitChangeLog::new(&project, "HEAD~1", "source").entries().unwrap();
        let found: Vec<_> = entries
            .iter()
            .map(|e| (e.status.clone(), e.filename.clone(), e.timestamp.is_some()))
            .collect();
        assert_eq!(
            found,
            vec![
                (ChangeStatus::Modified, PathBuf::from("source/a.rst"), true),
                (ChangeStatus::Added, PathBuf::from("source/b.rst"), true),
            ]
        );
    }

    #[test]
    fn test_vec_is_a_change_log() {
        let log = vec![ChangeLogEntry {
            filename: "source/a.rst".into(),
            status: ChangeStatus::Added,
            timestamp: None,
        }];
        assert_eq!(log.entries().unwrap(), log);
    }
}

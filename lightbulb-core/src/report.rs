//! Outcome of a build or load run.

use crate::error::DocumentError;
use std::path::{Path, PathBuf};

/// Documents processed by one run and those that failed
#[derive(Debug, Default)]
pub struct RunReport {
    /// Slugs written or stored, in processing order
    pub processed: Vec<String>,
    pub failures: Vec<DocumentError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_paths(&self) -> Vec<&Path> {
        self.failures.iter().map(DocumentError::path).collect()
    }

    /// One line per failure, for the final summary
    pub fn failure_summary(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn record_failure(&mut self, err: DocumentError) {
        tracing::error!("{}", err);
        self.failures.push(err);
    }
}

/// Remembers which file claimed each slug
#[derive(Debug, Default)]
pub(crate) struct ClaimSet {
    claimed: std::collections::HashMap<String, PathBuf>,
}

impl ClaimSet {
    /// Claim `key` for `path`, returning the earlier claimant on collision
    pub(crate) fn claim(&mut self, key: &str, path: &Path) -> Result<(), PathBuf> {
        match self.claimed.get(key) {
            Some(first) if first != path => Err(first.clone()),
            Some(_) => Ok(()),
            None => {
                self.claimed.insert(key.to_string(), path.to_path_buf());
                Ok(())
            }
        }
    }
}

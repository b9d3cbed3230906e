//! Error types for the document pipeline.

use lightbulb_rst::RstError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A document's docinfo block is missing or does not follow the
/// `docid` / `tags` field convention
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Source file is missing its docinfo block: {path:?}")]
    MissingDocinfo { path: PathBuf },

    #[error("Source file is missing data ({field}): {path:?}")]
    MissingField { path: PathBuf, field: String },
}

impl MetadataError {
    pub fn path(&self) -> &Path {
        match self {
            MetadataError::MissingDocinfo { path } | MetadataError::MissingField { path, .. } => {
                path
            }
        }
    }
}

/// Failure to turn one source file into a record or fragment
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {path:?}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RstError,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl DocumentError {
    /// Source file the failure belongs to
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::Read { path, .. } | DocumentError::Render { path, .. } => path,
            DocumentError::Metadata(err) => err.path(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ChangeLogError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed: {stderr}")]
    Command { command: String, stderr: String },
}

/// Run-level failures of the builder and loader
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Documents {first:?} and {second:?} both resolve to {slug}")]
    PathCollision {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    ChangeLog(#[from] ChangeLogError),
}

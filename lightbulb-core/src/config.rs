//! Configuration parsing and management.

use crate::paths::normalize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Project configuration matching the lightbulb.yml schema
///
/// Every field is optional in the file. A relative `project_dir` is
/// resolved against the config file location, and a relative `store_path`
/// against `project_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_dir: PathBuf,
    pub source_folder: String,
    pub build_folder: String,
    /// IANA timezone name recorded alongside the watermark
    pub timezone: String,
    pub store_path: PathBuf,
    /// Abort on the first document that fails instead of reporting at the end
    pub fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            source_folder: default_source_folder(),
            build_folder: default_build_folder(),
            timezone: default_timezone(),
            store_path: default_store_path(),
            fail_fast: false,
        }
    }
}

fn default_source_folder() -> String {
    String::from("source")
}

fn default_build_folder() -> String {
    String::from("build")
}

fn default_timezone() -> String {
    String::from("America/Chicago")
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".lightbulb/store.json")
}

impl Config {
    /// Default configuration rooted at `project_dir`
    pub fn new<P: Into<PathBuf>>(project_dir: P) -> Self {
        Self {
            project_dir: project_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&contents)?
        };

        if let Some(parent) = path.parent() {
            config.project_dir = resolve_path(parent, &config.project_dir);
        }

        Ok(config)
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// `project_dir/source_folder`
    pub fn source_dir(&self) -> PathBuf {
        self.project_dir.join(&self.source_folder)
    }

    /// `project_dir/build_folder`
    pub fn build_dir(&self) -> PathBuf {
        self.project_dir.join(&self.build_folder)
    }

    /// Store file, resolved relative to the project root
    pub fn store_file(&self) -> PathBuf {
        resolve_path(&self.project_dir, &self.store_path)
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        normalize(&base.join(path))
    }
}

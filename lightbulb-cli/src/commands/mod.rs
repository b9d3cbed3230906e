//! CLI command implementations.

pub mod build;
pub mod changes;
pub mod load;
pub mod watermark;

pub use build::build;
pub use changes::changes;
pub use load::load;
pub use watermark::{watermark_get, watermark_set};

use anyhow::{bail, Context, Result};
use lightbulb_core::{Config, RunReport};
use std::path::Path;

/// Resolve the configuration for this invocation
///
/// A relative config path is looked up under `--project` when one is given.
/// A missing config file falls back to the defaults rooted at the project.
pub fn load_config(config_path: &Path, project: Option<&Path>, fail_fast: bool) -> Result<Config> {
    let config_path = match project {
        Some(project) if config_path.is_relative() => project.join(config_path),
        _ => config_path.to_path_buf(),
    };

    let mut config = if config_path.exists() {
        tracing::debug!("Loading config from {:?}", config_path);
        Config::from_file(&config_path).context("Failed to load configuration")?
    } else {
        let root = match project {
            Some(project) => project.to_path_buf(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        tracing::debug!("No config at {:?}; using defaults in {:?}", config_path, root);
        Config::new(root)
    };

    if let Some(project) = project {
        config.project_dir = project.to_path_buf();
    }
    if fail_fast {
        config.fail_fast = true;
    }
    Ok(config)
}

/// Turn a report with failures into a non-zero exit
fn finish(report: &RunReport, action: &str) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }
    for line in report.failure_summary() {
        eprintln!("  {}", line);
    }
    bail!("{} failed for {} document(s)", action, report.failures.len())
}

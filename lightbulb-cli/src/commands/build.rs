//! Build command implementation.

use anyhow::{Context, Result};
use lightbulb_core::{Builder, Config};

/// Write one HTML fragment per source document
pub fn build(config: Config) -> Result<()> {
    tracing::info!("Building {:?} into {:?}", config.source_dir(), config.build_dir());

    let report = Builder::new(config).run().context("Build aborted")?;
    for slug in &report.processed {
        println!("{}", slug);
    }
    super::finish(&report, "Build")
}

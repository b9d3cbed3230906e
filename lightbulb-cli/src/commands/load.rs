//! Load command implementation.

use anyhow::{Context, Result};
use lightbulb_core::{ChangeLogEntry, Config, JsonFileStore, Loader};

/// Upsert every source document into the JSON store
pub fn load(config: Config) -> Result<()> {
    let store_path = config.store_file();
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("Failed to open store {:?}", store_path))?;

    let mut loader = Loader::new(config, store, Vec::<ChangeLogEntry>::new());
    let report = loader.update_all().context("Load aborted")?;
    for slug in &report.processed {
        println!("{}", slug);
    }
    super::finish(&report, "Load")
}

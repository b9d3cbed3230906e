//! Change summaries since a git ref.

use anyhow::{Context, Result};
use lightbulb_core::{Config, GitChangeLog, Loader, MemoryStore};

pub fn changes(config: Config, since: &str, json: bool) -> Result<()> {
    let changelog = GitChangeLog::new(&config.project_dir, since, &config.source_folder);
    let loader = Loader::new(config, MemoryStore::new(), changelog);

    let entries = loader.save().context("Failed to read change log")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Changes since {}", since);
    for entry in &entries {
        let timestamp = entry
            .timestamp
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!("- {} {} ({})", entry.status, entry.filename.display(), timestamp);
    }
    Ok(())
}

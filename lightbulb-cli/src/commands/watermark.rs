//! Watermark commands.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lightbulb_core::{ChangeLogEntry, Config, JsonFileStore, Loader};

fn open(config: Config) -> Result<Loader<JsonFileStore, Vec<ChangeLogEntry>>> {
    let store_path = config.store_file();
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("Failed to open store {:?}", store_path))?;
    Ok(Loader::new(config, store, Vec::new()))
}

/// Print the watermark as RFC 3339, or nothing when it was never set
pub fn watermark_get(config: Config) -> Result<()> {
    let mut loader = open(config)?;
    if let Some(ts) = loader.get_last_updated()? {
        println!("{}", ts.to_rfc3339());
    }
    Ok(())
}

pub fn watermark_set(config: Config, timestamp: Option<&str>) -> Result<()> {
    let ts = match timestamp {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid RFC 3339 timestamp: {}", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut loader = open(config)?;
    loader.set_last_updated(ts)?;
    println!("{}", ts.to_rfc3339());
    Ok(())
}

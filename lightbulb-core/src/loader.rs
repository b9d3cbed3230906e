//! Loader: upserts document records into a store and tracks the watermark.

use crate::changelog::{ChangeLog, ChangeLogEntry};
use crate::config::Config;
use crate::discovery::list_sources;
use crate::error::{DocumentError, PipelineError};
use crate::parser::DocumentParser;
use crate::paths::PathResolver;
use crate::record::Assembler;
use crate::report::{ClaimSet, RunReport};
use crate::store::{MetaRecord, Store};
use chrono::{DateTime, Utc};

/// Collection that document records are stored in
pub const ENTRIES: &str = "entries";

pub struct Loader<S, L> {
    config: Config,
    assembler: Assembler,
    store: S,
    changelog: L,
}

impl<S: Store, L: ChangeLog> Loader<S, L> {
    pub fn new(config: Config, store: S, changelog: L) -> Self {
        let assembler = Assembler::new(PathResolver::new(&config), DocumentParser::new());
        Self {
            config,
            assembler,
            store,
            changelog,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Assemble every discovered source and upsert it by slug
    ///
    /// Per-document failures are reported and skipped unless `fail_fast` is
    /// set. Store failures and slug collisions always abort.
    pub fn update_all(&mut self) -> Result<RunReport, PipelineError> {
        let mut report = RunReport::default();
        let mut slugs = ClaimSet::default();
        let source_dir = self.assembler.resolver().source_dir().to_path_buf();

        tracing::info!("Loading records from {:?}", source_dir);

        for source in list_sources(&source_dir) {
            let record = match self.assembler.build_record(&source) {
                Ok(record) => record,
                Err(err) => {
                    self.handle_failure(&mut report, err)?;
                    continue;
                }
            };

            slugs
                .claim(&record.slug, &source)
                .map_err(|first| PipelineError::PathCollision {
                    slug: record.slug.clone(),
                    first,
                    second: source.clone(),
                })?;

            let entry = self.store.save_entry(ENTRIES, &record)?;
            tracing::info!(eid = entry.eid(), slug = %record.slug, "Stored entry");
            tracing::debug!("{:?}", entry.map());
            report.processed.push(record.slug);
        }

        tracing::info!(
            "Done. {} records stored, {} failed",
            report.processed.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Report what the change log lists, without touching the store
    pub fn save(&self) -> Result<Vec<ChangeLogEntry>, PipelineError> {
        let entries = self.changelog.entries()?;
        for entry in &entries {
            let timestamp = entry
                .timestamp
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| "-".to_string());
            tracing::info!("{} {} {}", entry.status, entry.filename.display(), timestamp);
        }
        Ok(entries)
    }

    pub fn get_last_updated(&mut self) -> Result<Option<DateTime<Utc>>, PipelineError> {
        Ok(self.meta()?.last_updated())
    }

    pub fn set_last_updated(&mut self, last_updated: DateTime<Utc>) -> Result<(), PipelineError> {
        let mut meta = self.meta()?;
        meta.set_last_updated(last_updated);
        meta.set("timezone", self.config.timezone.as_str());
        self.store.save_meta(&meta)?;
        Ok(())
    }

    fn meta(&mut self) -> Result<MetaRecord, PipelineError> {
        Ok(self.store.get_or_create_meta(ENTRIES)?)
    }

    fn handle_failure(&self, report: &mut RunReport, err: DocumentError) -> Result<(), PipelineError> {
        if self.config.fail_fast {
            tracing::error!("{}", err);
            return Err(err.into());
        }
        report.record_failure(err);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ChangeStatus;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use std::fs;

    fn no_changes() -> Vec<ChangeLogEntry> {
        Vec::new()
    }

    #[test]
    fn test_update_all_is_an_upsert() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source/post.rst");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "Post\n====\n\n:docid: 9\n:tags: x\n\nv1\n").unwrap();

        let mut loader = Loader::new(Config::new(dir.path()), MemoryStore::new(), no_changes());
        loader.update_all().unwrap();
        let first = loader.store().entry(ENTRIES, "post").unwrap();

        fs::write(&source, "Post\n====\n\n:docid: 9\n:tags: x\n\nv2\n").unwrap();
        loader.update_all().unwrap();
        let second = loader.store().entry(ENTRIES, "post").unwrap();

        assert_eq!(first.eid(), second.eid());
        assert_eq!(second.map()["fragment"], "<p>v2</p>\n");
        assert_eq!(loader.store().len(ENTRIES), 1);
    }

    #[test]
    fn test_watermark_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new(Config::new(dir.path()), MemoryStore::new(), no_changes());
        assert_eq!(loader.get_last_updated().unwrap(), None);

        let ts = Utc.with_ymd_and_hms(2012, 1, 2, 3, 4, 5).unwrap();
        loader.set_last_updated(ts).unwrap();
        assert_eq!(loader.get_last_updated().unwrap(), Some(ts));

        let mut store = loader.into_store();
        let meta = store.get_or_create_meta(ENTRIES).unwrap();
        assert_eq!(meta.get("timezone"), Some("America/Chicago"));
    }

    #[test]
    fn test_save_reports_without_storing() {
        let dir = tempfile::tempdir().unwrap();
        let log = vec![ChangeLogEntry {
            filename: "source/post.rst".into(),
            status: ChangeStatus::Modified,
            timestamp: Some(Utc.with_ymd_and_hms(2012, 5, 1, 0, 0, 0).unwrap()),
        }];

        let loader = Loader::new(Config::new(dir.path()), MemoryStore::new(), log.clone());
        assert_eq!(loader.save().unwrap(), log);
        assert!(loader.store().is_empty(ENTRIES));
    }
}

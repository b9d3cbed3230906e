//! Document store interface and bundled implementations.
//!
//! The loader only needs two things from a store: upserting records into a
//! named collection, and named meta records that hold per-collection
//! watermarks. [`MemoryStore`] keeps both in process; [`JsonFileStore`]
//! persists them to a single JSON file.

use crate::error::StoreError;
use crate::record::DocumentRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const LAST_UPDATED: &str = "last_updated";

/// A stored record and the id the store assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub eid: u64,
    pub data: BTreeMap<String, String>,
}

impl StoredEntry {
    pub fn eid(&self) -> u64 {
        self.eid
    }

    pub fn map(&self) -> &BTreeMap<String, String> {
        &self.data
    }
}

/// A named key/value record, one per entity collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl MetaRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.get(LAST_UPDATED)
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn set_last_updated(&mut self, ts: DateTime<Utc>) {
        self.set(LAST_UPDATED, ts.to_rfc3339());
    }
}

pub trait Store {
    /// Create or update the record keyed by its slug
    fn save_entry(
        &mut self,
        collection: &str,
        record: &DocumentRecord,
    ) -> Result<StoredEntry, StoreError>;

    /// Look up a stored record by slug
    fn entry(&self, collection: &str, slug: &str) -> Option<StoredEntry>;

    /// Fetch the meta record called `name`, creating an empty one if needed
    fn get_or_create_meta(&mut self, name: &str) -> Result<MetaRecord, StoreError>;

    fn save_meta(&mut self, meta: &MetaRecord) -> Result<(), StoreError>;
}

/// In-process store
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    collections: BTreeMap<String, BTreeMap<String, StoredEntry>>,
    #[serde(default)]
    meta: BTreeMap<String, MetaRecord>,
    #[serde(default)]
    next_eid: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl Store for MemoryStore {
    fn save_entry(
        &mut self,
        collection: &str,
        record: &DocumentRecord,
    ) -> Result<StoredEntry, StoreError> {
        let entries = self.collections.entry(collection.to_string()).or_default();
        let eid = match entries.get(&record.slug) {
            Some(existing) => existing.eid,
            None => {
                self.next_eid += 1;
                self.next_eid
            }
        };

        let entry = StoredEntry {
            eid,
            data: record.to_map(),
        };
        entries.insert(record.slug.clone(), entry.clone());
        Ok(entry)
    }

    fn entry(&self, collection: &str, slug: &str) -> Option<StoredEntry> {
        self.collections.get(collection)?.get(slug).cloned()
    }

    fn get_or_create_meta(&mut self, name: &str) -> Result<MetaRecord, StoreError> {
        Ok(self
            .meta
            .entry(name.to_string())
            .or_insert_with(|| MetaRecord::new(name))
            .clone())
    }

    fn save_meta(&mut self, meta: &MetaRecord) -> Result<(), StoreError> {
        self.meta.insert(meta.name.clone(), meta.clone());
        Ok(())
    }
}

/// Store persisted to one JSON file, rewritten after every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file starts empty
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                data: MemoryStore::new(),
            });
        }

        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let data = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self, collection: &str) -> usize {
        self.data.len(collection)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.data.is_empty(collection)
    }

    /// Write through a sibling temp file so a failed write never truncates
    /// the existing store
    fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn save_entry(
        &mut self,
        collection: &str,
        record: &DocumentRecord,
    ) -> Result<StoredEntry, StoreError> {
        let entry = self.data.save_entry(collection, record)?;
        self.persist()?;
        Ok(entry)
    }

    fn entry(&self, collection: &str, slug: &str) -> Option<StoredEntry> {
        self.data.entry(collection, slug)
    }

    fn get_or_create_meta(&mut self, name: &str) -> Result<MetaRecord, StoreError> {
        self.data.get_or_create_meta(name)
    }

    fn save_meta(&mut self, meta: &MetaRecord) -> Result<(), StoreError> {
        self.data.save_meta(meta)?;
        self.persist()
    }
}

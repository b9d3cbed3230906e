//! # lightbulb-core
//!
//! Turns a tree of reStructuredText documents into HTML fragments and
//! metadata records.
//!
//! - [`Builder`] writes one fragment per source under the build folder.
//! - [`Loader`] upserts one [`DocumentRecord`] per source into a [`Store`]
//!   and keeps the per-collection "last updated" watermark.

pub mod builder;
pub mod changelog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod metadata;
pub mod parser;
pub mod paths;
pub mod record;
pub mod report;
pub mod store;

pub use builder::Builder;
pub use changelog::{ChangeLog, ChangeLogEntry, ChangeStatus, GitChangeLog};
pub use config::{Config, ConfigError};
pub use discovery::list_sources;
pub use error::{ChangeLogError, DocumentError, MetadataError, PipelineError, StoreError};
pub use loader::{Loader, ENTRIES};
pub use metadata::DocInfo;
pub use parser::DocumentParser;
pub use paths::PathResolver;
pub use record::{Assembler, DocumentRecord};
pub use report::RunReport;
pub use store::{JsonFileStore, MemoryStore, MetaRecord, Store, StoredEntry};

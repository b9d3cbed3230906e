//! Metadata extraction from the docinfo block.
//!
//! A lightbulb document opens with a field list that the engine promotes to
//! `docinfo`:
//!
//! ```text
//! :docid: 42
//! :date: 2012-01-01
//! :author: Jane
//! :tags: foo,bar
//! ```
//!
//! Bibliographic fields (`date`, `author`, ...) become named elements and
//! are read by name. The two custom fields are read by position, the way
//! the lightbulb document layout places them:
//!
//! - `tags` is the body of the last generic `field` in the block, the
//!   direct sibling of that field's `field_name` marker.
//! - `docid` is the body of the first entry in the block, a
//!   sibling-of-sibling of the marker.
//!
//! This module is the only place that knows the tree shape.

use crate::error::MetadataError;
use lightbulb_rst::{Element, Node, Tag};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Typed view of a document's docinfo block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocInfo {
    pub author: Option<String>,
    pub date: Option<String>,
    pub tags: String,
    pub docid: String,
    /// Other bibliographic fields, keyed by lowercased element name
    pub extra: BTreeMap<String, String>,
}

impl DocInfo {
    /// Flat field name to text mapping
    pub fn fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.extra.clone();
        if let Some(author) = &self.author {
            fields.insert("author".to_string(), author.clone());
        }
        if let Some(date) = &self.date {
            fields.insert("date".to_string(), date.clone());
        }
        fields.insert("tags".to_string(), self.tags.clone());
        fields.insert("docid".to_string(), self.docid.clone());
        fields
    }
}

/// Extract the docinfo metadata of `doctree`
///
/// `source_path` only names the document in errors. Nothing partial is
/// returned: any structural mismatch fails the whole extraction.
pub fn extract(doctree: &Element, source_path: &Path) -> Result<DocInfo, MetadataError> {
    let docinfo = doctree
        .find(Tag::Docinfo)
        .ok_or_else(|| MetadataError::MissingDocinfo {
            path: source_path.to_path_buf(),
        })?;

    let missing = |field: &str| MetadataError::MissingField {
        path: source_path.to_path_buf(),
        field: field.to_string(),
    };

    let mut values: BTreeMap<String, &Node> = BTreeMap::new();
    let mut custom: Option<&Element> = None;

    for entry in docinfo.elements() {
        let key = entry.tagname().to_lowercase();
        let value = entry.child(0).ok_or_else(|| missing(&key))?;
        if entry.tag == Tag::Field {
            custom = Some(entry);
        }
        values.insert(key, value);
    }

    let custom = custom.ok_or_else(|| missing("field"))?;
    let tags = custom.child(1).ok_or_else(|| missing("tags"))?;
    let docid = docinfo
        .child(0)
        .and_then(|first| first.child(1))
        .ok_or_else(|| missing("docid"))?;

    values.remove(Tag::Field.as_str());

    let mut extra: BTreeMap<String, String> = values
        .into_iter()
        .map(|(key, node)| (key, node.astext()))
        .collect();

    Ok(DocInfo {
        author: extra.remove("author"),
        date: extra.remove("date"),
        tags: tags.astext(),
        docid: docid.astext(),
        extra,
    })
}

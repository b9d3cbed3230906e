//! Per-document records and the assembler that produces them.

use crate::error::DocumentError;
use crate::metadata::{self, DocInfo};
use crate::parser::DocumentParser;
use crate::paths::{to_slash, PathResolver};
use lightbulb_rst::Parts;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Everything the loader knows about one source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub title: String,
    pub subtitle: String,
    pub fragment: String,
    pub metadata: DocInfo,
    pub slug: String,
    pub fragment_path: String,
    pub source_path: String,
}

impl DocumentRecord {
    /// Flat field mapping as handed to the store
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.metadata.fields();
        map.insert("title".to_string(), self.title.clone());
        map.insert("subtitle".to_string(), self.subtitle.clone());
        map.insert("fragment".to_string(), self.fragment.clone());
        map.insert("slug".to_string(), self.slug.clone());
        map.insert("fragment_path".to_string(), self.fragment_path.clone());
        map.insert("source_path".to_string(), self.source_path.clone());
        map
    }
}

/// Combines path resolution, rendering and metadata extraction
#[derive(Debug, Clone)]
pub struct Assembler {
    resolver: PathResolver,
    parser: DocumentParser,
}

impl Assembler {
    pub fn new(resolver: PathResolver, parser: DocumentParser) -> Self {
        Self { resolver, parser }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Render only the fragment, as the builder needs
    pub fn build_fragment(&self, source_abspath: &Path) -> Result<String, DocumentError> {
        Ok(self.render(source_abspath)?.fragment)
    }

    /// Full record for one source file
    pub fn build_record(&self, source_abspath: &Path) -> Result<DocumentRecord, DocumentError> {
        let parts = self.render(source_abspath)?;
        let metadata = metadata::extract(&parts.doctree, source_abspath)?;

        Ok(DocumentRecord {
            title: parts.title,
            subtitle: parts.subtitle,
            fragment: parts.fragment,
            metadata,
            slug: self.resolver.slug(source_abspath),
            fragment_path: to_slash(&self.resolver.fragment_path(source_abspath)),
            source_path: to_slash(&self.resolver.source_path(source_abspath)),
        })
    }

    fn render(&self, source_abspath: &Path) -> Result<Parts, DocumentError> {
        let raw = fs::read_to_string(source_abspath).map_err(|source| DocumentError::Read {
            path: source_abspath.to_path_buf(),
            source,
        })?;

        let parts = self
            .parser
            .render(&raw)
            .map_err(|source| DocumentError::Render {
                path: source_abspath.to_path_buf(),
                source,
            })?;
        for message in &parts.messages {
            tracing::warn!(path = %source_abspath.display(), "{}", message);
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::MetadataError;

    fn assembler(root: &Path) -> Assembler {
        let config = Config::new(root);
        Assembler::new(PathResolver::new(&config), DocumentParser::new())
    }

    #[test]
    fn test_build_record() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source/2012/hello.rst");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(
            &source,
            "Hello\n=====\n\nWorld\n-----\n\n:docid: 42\n:date: 2012-01-01\n:author: Jane\n:tags: foo,bar\n\nFirst post.\n",
        )
        .unwrap();

        let record = assembler(dir.path()).build_record(&source).unwrap();
        assert_eq!(record.title, "Hello");
        assert_eq!(record.subtitle, "World");
        assert_eq!(record.fragment, "<p>First post.</p>\n");
        assert_eq!(record.slug, "2012/hello");
        assert_eq!(record.source_path, "source/2012/hello.rst");
        assert_eq!(record.fragment_path, "build/2012/hello.html");

        let map = record.to_map();
        assert_eq!(map["docid"], "42");
        assert_eq!(map["tags"], "foo,bar");
        assert_eq!(map["author"], "Jane");
        assert!(!map.contains_key("field"));
    }

    #[test]
    fn test_fragment_does_not_need_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source/plain.rst");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "Just *text*.\n").unwrap();

        let assembler = assembler(dir.path());
        assert_eq!(
            assembler.build_fragment(&source).unwrap(),
            "<p>Just <em>text</em>.</p>\n"
        );

        let err = assembler.build_record(&source).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Metadata(MetadataError::MissingDocinfo { .. })
        ));
        assert_eq!(err.path(), source.as_path());
    }

    #[test]
    fn test_unknown_directive_does_not_fail_record() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source/odd.rst");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "Odd\n===\n\n:docid: 9\n:tags: x\n\n.. bogus:: nope\n").unwrap();

        let record = assembler(dir.path()).build_record(&source).unwrap();
        assert_eq!(record.title, "Odd");
        assert_eq!(record.metadata.docid, "9");
        assert!(record.fragment.contains("Unknown directive type &quot;bogus&quot;."));
    }

    #[test]
    fn test_unreadable_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("source/none.rst");

        let err = assembler(dir.path()).build_record(&missing).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}

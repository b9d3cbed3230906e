//! Source file discovery.

use glob::Pattern;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

static SOURCE_PATTERN: OnceLock<Pattern> = OnceLock::new();
static BACKUP_PATTERN: OnceLock<Pattern> = OnceLock::new();

fn source_pattern() -> &'static Pattern {
    SOURCE_PATTERN.get_or_init(|| Pattern::new("*.rst").unwrap())
}

/// Emacs lock and autosave files such as `.#post.rst`
fn backup_pattern() -> &'static Pattern {
    BACKUP_PATTERN.get_or_init(|| Pattern::new("*.#*").unwrap())
}

/// Whether a file name is a source document
pub fn is_source_name(name: &str) -> bool {
    source_pattern().matches(name) && !backup_pattern().matches(name)
}

/// Lazily walk `source_dir` for source documents
///
/// The walk is depth-first with the entries of each directory sorted by
/// file name, so a directory's documents come out where its name sorts
/// among its siblings (`a/x.rst` before `a.rst`). Two walks over the same
/// tree yield the same sequence. Calling again starts a fresh walk.
pub fn list_sources(source_dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter(|entry| is_source_name(&entry.file_name().to_string_lossy()))
        .map(|entry| {
            tracing::debug!("Discovered {:?}", entry.path());
            entry.into_path()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_source_names() {
        assert!(is_source_name("hello.rst"));
        assert!(!is_source_name("hello.md"));
        assert!(!is_source_name("hello.rst~"));
        assert!(!is_source_name(".#hello.rst"));
        assert!(!is_source_name("notes.#1.rst"));
    }

    #[test]
    fn test_list_sources_filters_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2012/06")).unwrap();
        fs::create_dir_all(root.join("drafts.rst")).unwrap();
        for name in [
            "index.rst",
            "2012/hello.rst",
            "2012/.#hello.rst",
            "2012/06/deep.rst",
            "2012/readme.txt",
        ] {
            fs::write(root.join(name), "x\n").unwrap();
        }

        let found: Vec<_> = list_sources(root)
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from("2012/06/deep.rst"),
                PathBuf::from("2012/hello.rst"),
                PathBuf::from("index.rst"),
            ]
        );
        for path in &found {
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(!name.contains(".#"));
            assert_eq!(path.extension().unwrap(), "rst");
        }
    }

    #[test]
    fn test_directories_sort_among_sibling_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        for name in ["b.rst", "a.rst", "a/x.rst"] {
            fs::write(root.join(name), "x\n").unwrap();
        }

        let found: Vec<_> = list_sources(root)
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            found,
            vec![
                PathBuf::from("a/x.rst"),
                PathBuf::from("a.rst"),
                PathBuf::from("b.rst"),
            ]
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rst"), "a\n").unwrap();

        assert_eq!(list_sources(dir.path()).count(), 1);
        fs::write(dir.path().join("b.rst"), "b\n").unwrap();
        assert_eq!(list_sources(dir.path()).count(), 2);
    }

    #[test]
    fn test_missing_source_dir_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(list_sources(&dir.path().join("nope")).count(), 0);
    }
}

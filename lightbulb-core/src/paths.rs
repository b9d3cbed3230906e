//! Path algebra: slugs, source paths and fragment paths.
//!
//! Everything here is lexical. Nothing touches the filesystem, so a path
//! outside the source directory simply produces `..` segments.

use crate::config::Config;
use std::path::{Component, Path, PathBuf};

/// Maps source files to their slug and output locations
#[derive(Debug, Clone)]
pub struct PathResolver {
    project_dir: PathBuf,
    source_dir: PathBuf,
    build_folder: PathBuf,
}

impl PathResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            project_dir: config.project_dir.clone(),
            source_dir: config.source_dir(),
            build_folder: PathBuf::from(&config.build_folder),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Path relative to the source directory without its extension,
    /// always `/`-separated
    ///
    /// ```
    /// use lightbulb_core::{Config, PathResolver};
    /// use std::path::Path;
    ///
    /// let resolver = PathResolver::new(&Config::new("/site"));
    /// assert_eq!(resolver.slug(Path::new("/site/source/2012/hello.rst")), "2012/hello");
    /// ```
    pub fn slug(&self, path: &Path) -> String {
        let relative = relpath(path, &self.source_dir);
        to_slash(&relative.with_extension(""))
    }

    /// Path relative to the project root, source folder included
    pub fn source_path(&self, path: &Path) -> PathBuf {
        relpath(path, &self.project_dir)
    }

    /// `build_folder/<dir relative to source>/<stem>.html`
    pub fn fragment_path(&self, path: &Path) -> PathBuf {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let folder = relpath(parent, &self.source_dir);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        normalize(&self.build_folder.join(folder).join(format!("{}.html", stem)))
    }

    pub fn fragment_abspath(&self, path: &Path) -> PathBuf {
        self.project_dir.join(self.fragment_path(path))
    }
}

/// Join path components with `/` regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lexically remove `.` segments and fold `name/..` pairs
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Relative path from `start` to `path`, computed lexically
pub fn relpath(path: &Path, start: &Path) -> PathBuf {
    let path = normalize(&absolute(path));
    let start = normalize(&absolute(start));

    let path_parts: Vec<_> = path.components().collect();
    let start_parts: Vec<_> = start.components().collect();
    let common = path_parts
        .iter()
        .zip(&start_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..start_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

//! Section identifier generation.

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Convert a section title to an HTML id
///
/// Rules:
/// - Lowercase
/// - Anything that is not alphanumeric becomes a hyphen
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use lightbulb_rst::make_id;
///
/// assert_eq!(make_id("Hello World"), "hello-world");
/// assert_eq!(make_id("Rust & Safety"), "rust-safety");
/// ```
pub fn make_id(title: &str) -> String {
    let lowercased = title.to_lowercase();

    let mut id = String::with_capacity(lowercased.len());
    for g in lowercased.graphemes(true) {
        let keep = g.chars().next().map(char::is_alphanumeric).unwrap_or(false);
        if keep {
            id.push_str(g);
        } else if !id.ends_with('-') {
            id.push('-');
        }
    }

    id.trim_matches('-').to_string()
}

/// Hands out unique ids within one document
#[derive(Debug, Default)]
pub(crate) struct IdRegistry {
    used: HashSet<String>,
}

impl IdRegistry {
    pub(crate) fn claim(&mut self, title: &str) -> String {
        let mut base = make_id(title);
        if base.is_empty() {
            base = "section".to_string();
        }

        if self.used.insert(base.clone()) {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ids() {
        assert_eq!(make_id("Hello World"), "hello-world");
        assert_eq!(make_id("C++ Programming"), "c-programming");
        assert_eq!(make_id("  Part 2: The Return  "), "part-2-the-return");
    }

    #[test]
    fn test_unicode_kept() {
        assert_eq!(make_id("Café Society"), "café-society");
    }

    #[test]
    fn test_registry_dedupes() {
        let mut ids = IdRegistry::default();
        assert_eq!(ids.claim("Notes"), "notes");
        assert_eq!(ids.claim("Notes"), "notes-1");
        assert_eq!(ids.claim("notes!"), "notes-2");
        assert_eq!(ids.claim("!!!"), "section");
    }
}

//! Rendering glue around the reStructuredText engine.

use lightbulb_rst::{publish_parts, Parts, RstError, Settings};

/// Character substitutions shipped with lightbulb, in scope for every document
pub const SUBSTITUTIONS: &str = include_str!("../assets/substitutions.rst");

/// Fragment headings start here; `<h1>` is left to page templates
pub const INITIAL_HEADER_LEVEL: u8 = 2;

/// Renders raw document text with the bundled substitution definitions
#[derive(Debug, Clone)]
pub struct DocumentParser {
    settings: Settings,
    prelude: &'static str,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser {
    pub fn new() -> Self {
        let prelude = SUBSTITUTIONS;
        Self {
            settings: Settings::default()
                .with_initial_header_level(INITIAL_HEADER_LEVEL)
                .with_line_offset(prelude_lines(prelude)),
            prelude,
        }
    }

    /// The exact text handed to the engine: prelude, newline, document
    pub fn source(&self, raw: &str) -> String {
        format!("{}\n{}", self.prelude, raw)
    }

    /// Render a document into fragment, title, subtitle and doctree
    ///
    /// Only severe problems fail the render; the rest come back in
    /// `Parts::messages`. Reported lines refer to the document itself, not
    /// the prelude.
    pub fn render(&self, raw: &str) -> Result<Parts, RstError> {
        publish_parts(&self.source(raw), &self.settings)
    }
}

/// Number of lines that precede the document in [`DocumentParser::source`]
fn prelude_lines(prelude: &str) -> usize {
    prelude.matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_substitutions_available() {
        let parts = DocumentParser::new()
            .render("Copyright |copy| 2012 |mdash| Jane.\n")
            .unwrap();
        assert_eq!(parts.fragment, "<p>Copyright \u{a9} 2012 \u{2014} Jane.</p>\n");
    }

    #[test]
    fn test_prelude_adds_no_content() {
        let parts = DocumentParser::new().render("").unwrap();
        assert_eq!(parts.fragment, "");
        assert!(parts.doctree.children.is_empty());
    }

    #[test]
    fn test_headers_start_at_h2() {
        let source = "Title\n=====\n\nOne\n---\n\nA.\n\nTwo\n---\n\nB.\n";
        let parts = DocumentParser::new().render(source).unwrap();
        assert_eq!(parts.title, "Title");
        assert!(parts.fragment.contains("<h2>One</h2>"));
        assert!(!parts.fragment.contains("<h1>"));
    }

    #[test]
    fn test_severe_error_lines_are_document_relative() {
        let err = DocumentParser::new()
            .render("A\n=====\n\nB\n-----\n\nC\n=====\n\nD\n~~~~~\n")
            .unwrap_err();
        assert_eq!(
            err,
            RstError::InconsistentTitleLevel {
                line: 10,
                title: "D".into()
            }
        );
    }

    #[test]
    fn test_message_lines_are_document_relative() {
        let parts = DocumentParser::new()
            .render("Fine.\n\nBroken |nothing| here.\n")
            .unwrap();
        assert_eq!(
            parts.messages,
            vec![RstError::UndefinedSubstitution {
                line: 3,
                name: "nothing".into()
            }]
        );
        assert!(parts.fragment.contains("line 3)"));
    }

    #[test]
    fn test_redefining_bundled_substitution_is_reported() {
        let parts = DocumentParser::new()
            .render(".. |copy| replace:: (c)\n\n|copy| 2012\n")
            .unwrap();
        assert!(parts.fragment.starts_with("<p>(c) 2012</p>\n"));
        assert!(matches!(
            &parts.messages[..],
            [RstError::DuplicateSubstitution { line: 1, .. }]
        ));
    }

    #[test]
    fn test_literal_definitions_do_not_clash_with_prelude() {
        let parts = DocumentParser::new()
            .render("Example::\n\n    .. |copy| unicode:: U+A9\n\nDone.\n")
            .unwrap();
        assert!(parts.messages.is_empty());
        assert_eq!(
            parts.fragment,
            "<p>Example:</p>\n<pre class=\"literal-block\">\n.. |copy| unicode:: U+A9\n</pre>\n<p>Done.</p>\n"
        );
    }

    #[test]
    fn test_empty_contents_renders() {
        let parts = DocumentParser::new()
            .render("Hello\n=====\n\n.. contents::\n\nBody.\n")
            .unwrap();
        assert_eq!(parts.title, "Hello");
        assert_eq!(parts.fragment, "<p>Body.</p>\n");
    }
}

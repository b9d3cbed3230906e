//! # lightbulb-rst
//!
//! A reStructuredText reader and HTML fragment writer covering the subset
//! of the language that lightbulb documents use:
//! - Sections with title and subtitle promotion
//! - Docinfo field lists with bibliographic fields
//! - Paragraphs, literal blocks, lists, block quotes, transitions
//! - Admonition, code, image, figure, topic, sidebar, contents and raw
//!   directives
//! - Inline markup, hyperlink targets and substitutions
//!
//! Problems below the severe level do not stop a render. They are written
//! into the document as system messages, the way docutils reports them, and
//! returned in [`Parts::messages`].
//!
//! ## Example
//!
//! ```
//! use lightbulb_rst::{publish_parts, Settings};
//!
//! let source = "Title\n=====\n\n:docid: 7\n\nHello *world*.\n";
//! let parts = publish_parts(source, &Settings::default()).unwrap();
//! assert_eq!(parts.title, "Title");
//! assert_eq!(parts.fragment, "<p>Hello <em>world</em>.</p>\n");
//! ```

pub mod definitions;
pub mod error;
pub mod html;
pub mod ids;
pub mod inline;
pub mod nodes;
pub mod parser;
mod reporter;
pub mod transforms;

#[cfg(test)]
mod tests;

pub use error::{Level, Result, RstError};
pub use html::HtmlWriter;
pub use ids::make_id;
pub use nodes::{Element, Node, Tag};

use definitions::Definitions;
use ids::IdRegistry;
use parser::{nest_sections, split_lines, BlockParser};
use reporter::Reporter;

/// Reader and writer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Heading level used for top-level sections in the fragment
    pub initial_header_level: u8,
    /// Promote a lone top-level section to document title
    pub doctitle_xform: bool,
    /// Turn the first field list into the docinfo block
    pub docinfo_xform: bool,
    /// Lines preceding the document proper, such as a definitions prelude;
    /// reported lines are counted from the first line after them
    pub line_offset: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_header_level: 1,
            doctitle_xform: true,
            docinfo_xform: true,
            line_offset: 0,
        }
    }
}

impl Settings {
    pub fn with_initial_header_level(mut self, level: u8) -> Self {
        self.initial_header_level = level;
        self
    }

    pub fn with_line_offset(mut self, lines: usize) -> Self {
        self.line_offset = lines;
        self
    }
}

/// Output of [`publish_parts`]
#[derive(Debug, Clone)]
pub struct Parts {
    /// Body HTML without title, subtitle or docinfo
    pub fragment: String,
    pub title: String,
    pub subtitle: String,
    /// The transformed document tree
    pub doctree: Element,
    /// Non-severe problems, in the order they were reported
    pub messages: Vec<RstError>,
}

/// Parse a source string into a transformed document tree
pub fn publish_doctree(source: &str, settings: &Settings) -> Result<Element> {
    parse(source, settings).map(|(doctree, _)| doctree)
}

/// Render a source string to its HTML parts
pub fn publish_parts(source: &str, settings: &Settings) -> Result<Parts> {
    let (doctree, messages) = parse(source, settings)?;
    let writer = HtmlWriter::new(settings);

    Ok(Parts {
        fragment: writer.fragment(&doctree),
        title: writer.title(&doctree),
        subtitle: writer.subtitle(&doctree),
        doctree,
        messages,
    })
}

fn parse(source: &str, settings: &Settings) -> Result<(Element, Vec<RstError>)> {
    let lines = split_lines(source);
    let shift = |err: RstError| err.shift_lines(settings.line_offset);

    // Collect definitions first so references may precede them
    let none = Definitions::default();
    let mut collector = BlockParser::new(&none, Reporter::quiet());
    collector.parse_top(&lines).map_err(shift)?;
    let (mut defs, _) = collector.finish();

    let mut reporter = Reporter::new(settings.line_offset);
    for problem in defs.take_problems() {
        reporter.detached(problem);
    }

    let mut parser = BlockParser::new(&defs, reporter);
    let blocks = parser.parse_top(&lines).map_err(shift)?;
    let (_, reporter) = parser.finish();

    let mut ids = IdRegistry::default();
    let mut doc = Element::new(Tag::Document).with_children(nest_sections(blocks, &mut ids));

    if settings.doctitle_xform && transforms::promote_title(&mut doc) {
        transforms::promote_subtitle(&mut doc);
    }
    if settings.docinfo_xform {
        transforms::promote_docinfo(&mut doc);
    }
    transforms::build_contents(&mut doc, &mut ids);

    let (messages, trailing) = reporter.finish();
    if let Some(section) = trailing {
        doc.children.push(section.into());
    }

    tracing::debug!(
        lines = lines.len(),
        children = doc.children.len(),
        messages = messages.len(),
        "Parsed document tree"
    );
    Ok((doc, messages))
}

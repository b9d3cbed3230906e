//! Document node tree.
//!
//! The tree follows docutils naming so callers that know the docutils
//! doctree (`docinfo`, `field`, `field_name`, `field_body`, ...) can walk it
//! the same way.

use std::collections::BTreeMap;

/// Element kinds produced by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Document,
    Section,
    Title,
    Subtitle,
    Docinfo,
    // Bibliographic fields
    Author,
    Authors,
    Organization,
    Address,
    Contact,
    Version,
    Revision,
    Status,
    Date,
    Copyright,
    // Body elements
    FieldList,
    Field,
    FieldName,
    FieldBody,
    Paragraph,
    LiteralBlock,
    BulletList,
    EnumeratedList,
    ListItem,
    BlockQuote,
    Transition,
    Admonition,
    Image,
    Figure,
    Caption,
    Legend,
    Topic,
    Sidebar,
    Raw,
    SystemMessage,
    // Inline elements
    Emphasis,
    Strong,
    Literal,
    TitleReference,
    Reference,
    Problematic,
}

impl Tag {
    /// docutils tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Document => "document",
            Tag::Section => "section",
            Tag::Title => "title",
            Tag::Subtitle => "subtitle",
            Tag::Docinfo => "docinfo",
            Tag::Author => "author",
            Tag::Authors => "authors",
            Tag::Organization => "organization",
            Tag::Address => "address",
            Tag::Contact => "contact",
            Tag::Version => "version",
            Tag::Revision => "revision",
            Tag::Status => "status",
            Tag::Date => "date",
            Tag::Copyright => "copyright",
            Tag::FieldList => "field_list",
            Tag::Field => "field",
            Tag::FieldName => "field_name",
            Tag::FieldBody => "field_body",
            Tag::Paragraph => "paragraph",
            Tag::LiteralBlock => "literal_block",
            Tag::BulletList => "bullet_list",
            Tag::EnumeratedList => "enumerated_list",
            Tag::ListItem => "list_item",
            Tag::BlockQuote => "block_quote",
            Tag::Transition => "transition",
            Tag::Admonition => "admonition",
            Tag::Image => "image",
            Tag::Figure => "figure",
            Tag::Caption => "caption",
            Tag::Legend => "legend",
            Tag::Topic => "topic",
            Tag::Sidebar => "sidebar",
            Tag::Raw => "raw",
            Tag::SystemMessage => "system_message",
            Tag::Emphasis => "emphasis",
            Tag::Strong => "strong",
            Tag::Literal => "literal",
            Tag::TitleReference => "title_reference",
            Tag::Reference => "reference",
            Tag::Problematic => "problematic",
        }
    }

    /// Map a field name to its bibliographic element, if it is one
    pub fn bibliographic(name: &str) -> Option<Tag> {
        match name.trim().to_lowercase().as_str() {
            "author" => Some(Tag::Author),
            "authors" => Some(Tag::Authors),
            "organization" => Some(Tag::Organization),
            "address" => Some(Tag::Address),
            "contact" => Some(Tag::Contact),
            "version" => Some(Tag::Version),
            "revision" => Some(Tag::Revision),
            "status" => Some(Tag::Status),
            "date" => Some(Tag::Date),
            "copyright" => Some(Tag::Copyright),
            _ => None,
        }
    }

    /// Text elements join their children without a separator in `astext`
    pub fn is_text_element(&self) -> bool {
        matches!(
            self,
            Tag::Title
                | Tag::Subtitle
                | Tag::Author
                | Tag::Organization
                | Tag::Address
                | Tag::Contact
                | Tag::Version
                | Tag::Revision
                | Tag::Status
                | Tag::Date
                | Tag::Copyright
                | Tag::FieldName
                | Tag::Paragraph
                | Tag::LiteralBlock
                | Tag::Caption
                | Tag::Raw
                | Tag::Emphasis
                | Tag::Strong
                | Tag::Literal
                | Tag::TitleReference
                | Tag::Reference
                | Tag::Problematic
        )
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Tag name, `#text` for text nodes
    pub fn tagname(&self) -> &'static str {
        match self {
            Node::Element(el) => el.tag.as_str(),
            Node::Text(_) => "#text",
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// The `index`th child, `None` for text nodes or out of range
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.as_element().and_then(|el| el.children.get(index))
    }

    /// Plain text content of this node and its descendants
    pub fn astext(&self) -> String {
        match self {
            Node::Element(el) => el.astext(),
            Node::Text(text) => text.clone(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
    /// 1-based source line, 0 when synthesized
    pub line: usize,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: BTreeMap::new(),
            children: Vec::new(),
            line: 0,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn tagname(&self) -> &'static str {
        self.tag.as_str()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Child elements, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First element with the given tag, depth-first, including `self`
    pub fn find(&self, tag: Tag) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.elements().find_map(|el| el.find(tag))
    }

    pub fn astext(&self) -> String {
        let separator = if self.tag.is_text_element() { "" } else { "\n\n" };
        self.children
            .iter()
            .map(Node::astext)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

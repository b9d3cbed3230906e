//! HTML fragment writer.

use crate::nodes::{Element, Node, Tag};
use crate::Settings;

/// Renders a document tree to HTML parts
pub struct HtmlWriter {
    initial_header_level: u8,
}

impl HtmlWriter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            initial_header_level: settings.initial_header_level.clamp(1, 6),
        }
    }

    /// Body of the document without title, subtitle and docinfo
    pub fn fragment(&self, doc: &Element) -> String {
        let mut out = String::new();
        for node in &doc.children {
            if let Node::Element(el) = node {
                if matches!(el.tag, Tag::Title | Tag::Subtitle | Tag::Docinfo) {
                    continue;
                }
            }
            self.block(node, 1, &mut out);
        }
        out
    }

    pub fn title(&self, doc: &Element) -> String {
        self.titular(doc, Tag::Title)
    }

    pub fn subtitle(&self, doc: &Element) -> String {
        self.titular(doc, Tag::Subtitle)
    }

    fn titular(&self, doc: &Element, tag: Tag) -> String {
        let mut out = String::new();
        if let Some(el) = doc.elements().find(|el| el.tag == tag) {
            self.inline(&el.children, &mut out);
        }
        out
    }

    fn block(&self, node: &Node, depth: usize, out: &mut String) {
        let el = match node {
            Node::Element(el) => el,
            Node::Text(text) => {
                out.push_str(&escape_html(text));
                return;
            }
        };

        match el.tag {
            Tag::Section => self.section(el, depth, out),
            Tag::Paragraph => {
                out.push_str("<p>");
                self.inline(&el.children, out);
                out.push_str("</p>\n");
            }
            Tag::LiteralBlock => {
                let class = match (el.attr("class"), el.attr("language")) {
                    (Some(_), Some(lang)) => format!("code {} literal-block", escape_html(lang)),
                    (Some(_), None) => "code literal-block".to_string(),
                    _ => "literal-block".to_string(),
                };
                out.push_str(&format!(
                    "<pre class=\"{}\">\n{}\n</pre>\n",
                    class,
                    escape_html(&el.astext())
                ));
            }
            Tag::BulletList => {
                match el.attr("class") {
                    Some(class) => out.push_str(&format!("<ul class=\"{}\">\n", escape_html(class))),
                    None => out.push_str("<ul>\n"),
                }
                self.items(el, out);
                out.push_str("</ul>\n");
            }
            Tag::EnumeratedList => {
                match el.attr("start") {
                    Some(start) => out.push_str(&format!(
                        "<ol class=\"arabic\" start=\"{}\">\n",
                        escape_html(start)
                    )),
                    None => out.push_str("<ol class=\"arabic\">\n"),
                }
                self.items(el, out);
                out.push_str("</ol>\n");
            }
            Tag::BlockQuote => {
                out.push_str("<blockquote>\n");
                self.blocks(&el.children, depth, out);
                out.push_str("</blockquote>\n");
            }
            Tag::Transition => out.push_str("<hr class=\"docutils\" />\n"),
            Tag::FieldList => {
                out.push_str("<dl class=\"field-list\">\n");
                for field in el.elements() {
                    out.push_str("<dt>");
                    if let Some(Node::Element(name)) = field.child(0) {
                        self.inline(&name.children, out);
                    }
                    out.push_str("</dt>\n<dd>");
                    if let Some(Node::Element(body)) = field.child(1) {
                        self.compact(&body.children, depth, out);
                    }
                    out.push_str("</dd>\n");
                }
                out.push_str("</dl>\n");
            }
            Tag::Admonition => {
                let class = el.attr("class").unwrap_or("note");
                out.push_str(&format!(
                    "<div class=\"admonition {}\">\n<p class=\"admonition-title\">{}</p>\n",
                    escape_html(class),
                    escape_html(&capitalize(class))
                ));
                self.blocks(&el.children, depth, out);
                out.push_str("</div>\n");
            }
            Tag::Image => {
                out.push_str(&format!(
                    "<img alt=\"{}\" src=\"{}\" />\n",
                    escape_html(el.attr("alt").unwrap_or("")),
                    escape_html(el.attr("uri").unwrap_or(""))
                ));
            }
            Tag::Figure => {
                out.push_str("<div class=\"figure\">\n");
                self.blocks(&el.children, depth, out);
                out.push_str("</div>\n");
            }
            Tag::Caption => {
                out.push_str("<p class=\"caption\">");
                self.inline(&el.children, out);
                out.push_str("</p>\n");
            }
            Tag::Legend => {
                out.push_str("<div class=\"legend\">\n");
                self.blocks(&el.children, depth, out);
                out.push_str("</div>\n");
            }
            Tag::Topic | Tag::Sidebar => self.topic(el, depth, out),
            Tag::Raw => {
                let format = el.attr("format").unwrap_or("");
                if format.split_whitespace().any(|f| f == "html") {
                    out.push_str(&el.astext());
                }
            }
            Tag::SystemMessage => self.system_message(el, depth, out),
            // Titular and bibliographic elements only render through their parts
            _ => {}
        }
    }

    fn section(&self, el: &Element, depth: usize, out: &mut String) {
        let level = (self.initial_header_level as usize + depth - 1).min(6);
        let class = match el.attr("class") {
            Some(class) => format!("{} section", class),
            None => "section".to_string(),
        };
        out.push_str(&open_div(&class, el.attr("ids")));
        let mut children = el.children.iter();
        if let Some(Node::Element(title)) = children.next() {
            out.push_str(&format!("<h{}>", level));
            self.inline(&title.children, out);
            out.push_str(&format!("</h{}>\n", level));
        }
        for child in children {
            self.block(child, depth + 1, out);
        }
        out.push_str("</div>\n");
    }

    /// Topics and sidebars: a styled title paragraph followed by the body
    fn topic(&self, el: &Element, depth: usize, out: &mut String) {
        let (class, title_class) = match (el.tag, el.attr("class")) {
            (Tag::Sidebar, _) => ("sidebar".to_string(), "sidebar-title"),
            (_, Some(class)) => (format!("{} topic", class), "topic-title first"),
            (_, None) => ("topic".to_string(), "topic-title first"),
        };
        out.push_str(&open_div(&class, el.attr("ids")));
        for child in &el.children {
            match child {
                Node::Element(title) if title.tag == Tag::Title => {
                    out.push_str(&format!("<p class=\"{}\">", title_class));
                    self.inline(&title.children, out);
                    out.push_str("</p>\n");
                }
                _ => self.block(child, depth, out),
            }
        }
        out.push_str("</div>\n");
    }

    fn system_message(&self, el: &Element, depth: usize, out: &mut String) {
        out.push_str(&open_div("system-message", el.attr("ids")));
        out.push_str(&format!(
            "<p class=\"system-message-title\">System Message: {}/{} (<tt class=\"docutils\">&lt;string&gt;</tt>, line {})",
            escape_html(el.attr("type").unwrap_or("")),
            escape_html(el.attr("level").unwrap_or("")),
            escape_html(el.attr("line").unwrap_or(""))
        ));
        if let Some(backref) = el.attr("backref") {
            out.push_str(&format!(
                "; <em><a href=\"#{}\">backlink</a></em>",
                escape_html(backref)
            ));
        }
        out.push_str("</p>\n");
        self.blocks(&el.children, depth, out);
        out.push_str("</div>\n");
    }

    fn blocks(&self, nodes: &[Node], depth: usize, out: &mut String) {
        for node in nodes {
            self.block(node, depth, out);
        }
    }

    fn items(&self, list: &Element, out: &mut String) {
        for item in list.elements() {
            out.push_str("<li>");
            self.compact(&item.children, 1, out);
            out.push_str("</li>\n");
        }
    }

    /// A lone paragraph renders without its `<p>` wrapper, as does the
    /// leading paragraph of a contents entry
    fn compact(&self, nodes: &[Node], depth: usize, out: &mut String) {
        match nodes {
            [Node::Element(p)] if p.tag == Tag::Paragraph => self.inline(&p.children, out),
            [Node::Element(p), sublist]
                if p.tag == Tag::Paragraph
                    && sublist.as_element().and_then(|l| l.attr("class")) == Some("simple") =>
            {
                self.inline(&p.children, out);
                out.push('\n');
                self.block(sublist, depth, out);
            }
            _ => {
                out.push('\n');
                self.blocks(nodes, depth, out);
            }
        }
    }

    fn inline(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Element(el) => {
                    let (open, close) = match el.tag {
                        Tag::Emphasis => ("<em>".to_string(), "</em>"),
                        Tag::Strong => ("<strong>".to_string(), "</strong>"),
                        Tag::Literal => ("<code class=\"docutils literal\">".to_string(), "</code>"),
                        Tag::TitleReference => ("<cite>".to_string(), "</cite>"),
                        Tag::Reference => match el.attr("refid") {
                            Some(refid) => (
                                format!(
                                    "<a class=\"reference internal\" href=\"#{}\"{}>",
                                    escape_html(refid),
                                    id_attr(el.attr("ids"))
                                ),
                                "</a>",
                            ),
                            None => (
                                format!(
                                    "<a class=\"reference external\" href=\"{}\">",
                                    escape_html(el.attr("refuri").unwrap_or(""))
                                ),
                                "</a>",
                            ),
                        },
                        Tag::Problematic => (
                            format!(
                                "<a href=\"#{}\" class=\"problematic\"{}>",
                                escape_html(el.attr("refid").unwrap_or("")),
                                id_attr(el.attr("ids"))
                            ),
                            "</a>",
                        ),
                        _ => (String::new(), ""),
                    };
                    out.push_str(&open);
                    self.inline(&el.children, out);
                    out.push_str(close);
                }
            }
        }
    }
}

fn id_attr(id: Option<&str>) -> String {
    match id {
        Some(id) => format!(" id=\"{}\"", escape_html(id)),
        None => String::new(),
    }
}

fn open_div(class: &str, id: Option<&str>) -> String {
    format!("<div class=\"{}\"{}>\n", escape_html(class), id_attr(id))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("warning"), "Warning");
        assert_eq!(capitalize(""), "");
    }
}

//! Line-oriented block parser.
//!
//! Blocks are recognised from indentation and markers at column 0 of the
//! current context. Indented regions (list items, block quotes, directive
//! bodies, field bodies) are dedented and parsed recursively; section titles
//! are only recognised at the top level.

use crate::definitions::Definitions;
use crate::error::{Result, RstError};
use crate::ids::IdRegistry;
use crate::inline::{parse_inline, InlineContext};
use crate::nodes::{Element, Node, Tag};
use crate::reporter::Reporter;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const ADORNMENT_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const TAB_WIDTH: usize = 8;

const ADMONITIONS: [&str; 9] = [
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "warning",
];

static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
static OPTION_REGEX: OnceLock<Regex> = OnceLock::new();
static FIELD_REGEX: OnceLock<Regex> = OnceLock::new();
static ENUMERATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE_REGEX.get_or_init(|| Regex::new(r"^([A-Za-z0-9][\w-]*)::(?:\s+(.*))?$").unwrap())
}

fn option_regex() -> &'static Regex {
    OPTION_REGEX.get_or_init(|| Regex::new(r"^:([A-Za-z0-9][\w-]*):(?:\s+(.*))?$").unwrap())
}

fn field_regex() -> &'static Regex {
    FIELD_REGEX.get_or_init(|| Regex::new(r"^:([^:\s](?:[^:]*[^:\s])?):(?:\s+(.*))?$").unwrap())
}

fn enumerator_regex() -> &'static Regex {
    ENUMERATOR_REGEX.get_or_init(|| Regex::new(r"^(\d+|#)\.(?:\s+|$)").unwrap())
}

/// One physical source line, tabs expanded and trailing whitespace removed
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SourceLine {
    pub(crate) number: usize,
    pub(crate) text: String,
}

impl SourceLine {
    pub(crate) fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn indent(&self) -> usize {
        self.text.len() - self.text.trim_start_matches(' ').len()
    }
}

pub(crate) fn split_lines(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| SourceLine::new(i + 1, expand_tabs(line.trim_end())))
        .collect()
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

/// A parsed block; titles are folded into sections afterwards
#[derive(Debug)]
pub(crate) enum Block {
    Node(Node),
    Title { level: usize, title: Element },
}

pub(crate) struct BlockParser<'d> {
    /// Definitions that inline markup resolves against
    defs: &'d Definitions,
    /// Definitions met while parsing this source
    collected: Definitions,
    reporter: Reporter,
    /// Adornment styles in order of first appearance: (char, has overline)
    styles: Vec<(char, bool)>,
    current_level: usize,
}

impl<'d> BlockParser<'d> {
    pub(crate) fn new(defs: &'d Definitions, reporter: Reporter) -> Self {
        Self {
            defs,
            collected: Definitions::default(),
            reporter,
            styles: Vec::new(),
            current_level: 0,
        }
    }

    pub(crate) fn finish(self) -> (Definitions, Reporter) {
        (self.collected, self.reporter)
    }

    /// Parse the top level of a document, section titles included
    pub(crate) fn parse_top(&mut self, lines: &[SourceLine]) -> Result<Vec<Block>> {
        self.parse_blocks(lines, true)
    }

    fn parse_nested(&mut self, lines: &[SourceLine]) -> Result<Vec<Node>> {
        let blocks = self.parse_blocks(lines, false)?;
        Ok(blocks
            .into_iter()
            .filter_map(|block| match block {
                Block::Node(node) => Some(node),
                Block::Title { .. } => None,
            })
            .collect())
    }

    fn parse_blocks(&mut self, lines: &[SourceLine], top: bool) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            if line.is_blank() {
                i += 1;
                continue;
            }

            if line.indent() > 0 {
                let end = take_indented(lines, i, 1);
                let children = self.parse_nested(&dedent(&lines[i..end]))?;
                blocks.push(element(
                    Element::new(Tag::BlockQuote)
                        .with_children(children)
                        .at_line(line.number),
                ));
                i = end;
                continue;
            }

            if is_explicit_markup(&line.text) {
                let end = take_indented(lines, i + 1, 1);
                if let Some(node) = self.explicit_markup(&lines[i..end])? {
                    blocks.push(Block::Node(node));
                }
                i = end;
                continue;
            }

            if top {
                if let Some((title, next)) = self.section_title(lines, i)? {
                    blocks.extend(title);
                    i = next;
                    continue;
                }
            }

            if adornment_char(&line.text).is_some()
                && line.text.chars().count() >= 4
                && lines.get(i + 1).map_or(true, SourceLine::is_blank)
            {
                blocks.push(element(
                    Element::new(Tag::Transition).at_line(line.number),
                ));
                i += 1;
                continue;
            }

            if let Some(marker) = bullet_marker(&line.text) {
                let (node, next) = self.bullet_list(lines, i, marker)?;
                blocks.push(Block::Node(node));
                i = next;
                continue;
            }

            if enumerator_regex().is_match(&line.text) {
                let (node, next) = self.enumerated_list(lines, i)?;
                blocks.push(Block::Node(node));
                i = next;
                continue;
            }

            if field_regex().is_match(&line.text) {
                let (node, next) = self.field_list(lines, i)?;
                blocks.push(Block::Node(node));
                i = next;
                continue;
            }

            let (nodes, next) = self.paragraph(lines, i)?;
            blocks.extend(nodes.into_iter().map(Block::Node));
            i = next;
        }

        Ok(blocks)
    }

    /// A title with its over/underline; an underline shorter than the
    /// title still counts once it is four characters long, with a warning
    fn section_title(&mut self, lines: &[SourceLine], i: usize) -> Result<Option<(Vec<Block>, usize)>> {
        let line = &lines[i];

        if let Some(over) = adornment_char(&line.text) {
            if let (Some(title), Some(under)) = (lines.get(i + 1), lines.get(i + 2)) {
                if !title.is_blank() && adornment_char(&under.text) == Some(over) {
                    let block = self.title(title.text.trim(), (over, true), line.number)?;
                    return Ok(Some((vec![block], i + 3)));
                }
            }
            return Ok(None);
        }

        let Some(under) = lines.get(i + 1) else {
            return Ok(None);
        };
        let Some(ch) = adornment_char(&under.text) else {
            return Ok(None);
        };

        let title = line.text.trim();
        let under_len = under.text.chars().count();
        let title_len = title.chars().count();
        if under_len < title_len && under_len < 4 {
            return Ok(None);
        }

        let mut blocks = vec![self.title(title, (ch, false), line.number)?];
        if under_len < title_len {
            let warning = RstError::TitleUnderlineTooShort {
                line: under.number,
                title: title.to_string(),
            };
            let source = format!("{}\n{}", line.text, under.text);
            blocks.push(Block::Node(self.reporter.system_message(warning, &source)));
        }
        Ok(Some((blocks, i + 2)))
    }

    fn title(&mut self, text: &str, style: (char, bool), line: usize) -> Result<Block> {
        let level = match self.styles.iter().position(|s| *s == style) {
            Some(pos) => pos + 1,
            None => {
                self.styles.push(style);
                self.styles.len()
            }
        };

        if level > self.current_level + 1 {
            return Err(RstError::InconsistentTitleLevel {
                line,
                title: text.to_string(),
            });
        }
        self.current_level = level;

        let children = self.inline(text, line);
        Ok(Block::Title {
            level,
            title: Element::new(Tag::Title)
                .with_children(children)
                .at_line(line),
        })
    }

    fn inline(&mut self, text: &str, line: usize) -> Vec<Node> {
        parse_inline(text, &InlineContext::new(self.defs, line), &mut self.reporter)
    }

    /// `block` is the `..` line followed by its indented body
    fn explicit_markup(&mut self, block: &[SourceLine]) -> Result<Option<Node>> {
        let line = &block[0];
        let body = dedent(&block[1..]);
        let rest = line.text[2..].trim();

        if self.collected.register(rest, &body, line.number) {
            return Ok(None);
        }

        if let Some(caps) = directive_regex().captures(rest) {
            let name = caps[1].to_lowercase();
            let args = caps.get(2).map_or("", |m| m.as_str()).trim();
            let directive = Directive {
                name: &name,
                args,
                line: line.number,
                source: join_lines(block),
            };
            return self.directive(&directive, &body).map(Some);
        }

        // Anything else is a comment
        Ok(None)
    }

    fn directive(&mut self, directive: &Directive<'_>, body: &[SourceLine]) -> Result<Node> {
        let (options, content) = split_options(body);
        let (name, args, line) = (directive.name, directive.args, directive.line);

        if ADMONITIONS.contains(&name) {
            let mut inner = Vec::new();
            if !args.is_empty() {
                inner.push(SourceLine::new(line, args));
                inner.push(SourceLine::new(line, ""));
            }
            inner.extend(content);
            let children = self.parse_nested(&inner)?;
            return Ok(Element::new(Tag::Admonition)
                .with_attr("class", name)
                .with_children(children)
                .at_line(line)
                .into());
        }

        match name {
            "code" | "code-block" | "sourcecode" => {
                let mut block = Element::new(Tag::LiteralBlock)
                    .with_attr("class", "code")
                    .with_children(vec![Node::text(join_lines(&content))])
                    .at_line(line);
                if !args.is_empty() {
                    block = block.with_attr("language", args);
                }
                Ok(block.into())
            }
            "image" => match image(args, &options, line) {
                Some(image) => Ok(image.into()),
                None => Ok(self.directive_error(directive, "1 argument(s) required, 0 supplied.")),
            },
            "figure" => {
                let Some(image) = image(args, &options, line) else {
                    return Ok(self.directive_error(directive, "1 argument(s) required, 0 supplied."));
                };
                let mut children = vec![Node::from(image)];
                let mut body = self.parse_nested(&content)?;
                let has_caption =
                    matches!(body.first(), Some(Node::Element(first)) if first.tag == Tag::Paragraph);
                if has_caption {
                    if let Node::Element(mut caption) = body.remove(0) {
                        caption.tag = Tag::Caption;
                        children.push(caption.into());
                    }
                }
                if !body.is_empty() {
                    children.push(Element::new(Tag::Legend).with_children(body).into());
                }
                Ok(Element::new(Tag::Figure)
                    .with_children(children)
                    .at_line(line)
                    .into())
            }
            "topic" | "sidebar" => {
                if args.is_empty() {
                    return Ok(self.directive_error(directive, "1 argument(s) required, 0 supplied."));
                }
                if content.is_empty() {
                    let message = format!("The \"{}\" directive is empty; content required.", name);
                    return Ok(self.directive_error(directive, &message));
                }
                let tag = if name == "topic" { Tag::Topic } else { Tag::Sidebar };
                let title = Element::new(Tag::Title).with_children(self.inline(args, line));
                let mut children = vec![Node::from(title)];
                children.extend(self.parse_nested(&content)?);
                Ok(Element::new(tag)
                    .with_children(children)
                    .at_line(line)
                    .into())
            }
            "contents" => {
                let local = options.contains_key("local");
                let mut topic = Element::new(Tag::Topic)
                    .with_attr("class", "contents")
                    .with_attr("pending", "contents")
                    .at_line(line);
                if !local || !args.is_empty() {
                    let title = if args.is_empty() { "Contents" } else { args };
                    topic = topic.with_children(vec![Element::new(Tag::Title)
                        .with_children(self.inline(title, line))
                        .into()]);
                }
                if local {
                    topic = topic.with_attr("local", "true");
                }
                if let Some(depth) = options.get("depth") {
                    match depth.parse::<usize>() {
                        Ok(depth) => topic = topic.with_attr("depth", depth.to_string()),
                        Err(_) => {
                            let message = format!("invalid option value: (option: \"depth\"; value: {:?})", depth);
                            return Ok(self.directive_error(directive, &message));
                        }
                    }
                }
                Ok(topic.into())
            }
            "raw" => {
                if args.is_empty() {
                    return Ok(self.directive_error(directive, "1 argument(s) required, 0 supplied."));
                }
                if content.is_empty() {
                    return Ok(self.directive_error(
                        directive,
                        "The \"raw\" directive requires content; none supplied.",
                    ));
                }
                Ok(Element::new(Tag::Raw)
                    .with_attr("format", args.to_lowercase())
                    .with_children(vec![Node::text(join_lines(&content))])
                    .at_line(line)
                    .into())
            }
            _ => {
                let err = RstError::UnknownDirective {
                    line,
                    name: name.to_string(),
                };
                Ok(self.reporter.system_message(err, &directive.source))
            }
        }
    }

    fn directive_error(&mut self, directive: &Directive<'_>, message: &str) -> Node {
        let err = RstError::DirectiveError {
            line: directive.line,
            name: directive.name.to_string(),
            message: message.to_string(),
        };
        self.reporter.system_message(err, &directive.source)
    }

    fn bullet_list(&mut self, lines: &[SourceLine], start: usize, marker: char) -> Result<(Node, usize)> {
        let mut items = Vec::new();
        let mut i = start;

        loop {
            let (item, end) = self.list_item(lines, i, 1)?;
            items.push(item);
            i = end;

            let next = skip_blank(lines, i);
            match lines.get(next) {
                Some(l) if l.indent() == 0 && bullet_marker(&l.text) == Some(marker) => i = next,
                _ => break,
            }
        }

        let list = Element::new(Tag::BulletList)
            .with_attr("bullet", marker.to_string())
            .with_children(items)
            .at_line(lines[start].number);
        Ok((list.into(), i))
    }

    fn enumerated_list(&mut self, lines: &[SourceLine], start: usize) -> Result<(Node, usize)> {
        let mut items = Vec::new();
        let mut i = start;

        let first = enumerator_regex()
            .captures(&lines[start].text)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .unwrap_or(1);

        loop {
            let marker_len = enumerator_regex()
                .captures(&lines[i].text)
                .and_then(|caps| caps.get(1))
                .map_or(1, |m| m.end() + 1);
            let (item, end) = self.list_item(lines, i, marker_len)?;
            items.push(item);
            i = end;

            let next = skip_blank(lines, i);
            match lines.get(next) {
                Some(l) if l.indent() == 0 && enumerator_regex().is_match(&l.text) => i = next,
                _ => break,
            }
        }

        let mut list = Element::new(Tag::EnumeratedList)
            .with_attr("enumtype", "arabic")
            .with_children(items)
            .at_line(lines[start].number);
        if first != 1 {
            list = list.with_attr("start", first.to_string());
        }
        Ok((list.into(), i))
    }

    /// Parse one list item whose marker occupies `marker_len` columns
    fn list_item(&mut self, lines: &[SourceLine], i: usize, marker_len: usize) -> Result<(Node, usize)> {
        let line = &lines[i];
        let after = &line.text[marker_len..];
        let first = after.trim_start();
        let content_indent = if first.is_empty() {
            marker_len + 1
        } else {
            marker_len + (after.len() - first.len())
        };

        let end = take_indented(lines, i + 1, content_indent);
        let mut item_lines = vec![SourceLine::new(line.number, first)];
        item_lines.extend(strip_indent(&lines[i + 1..end], content_indent));

        let children = self.parse_nested(&item_lines)?;
        let item = Element::new(Tag::ListItem)
            .with_children(children)
            .at_line(line.number);
        Ok((item.into(), end))
    }

    fn field_list(&mut self, lines: &[SourceLine], start: usize) -> Result<(Node, usize)> {
        let mut fields = Vec::new();
        let mut i = start;

        while let Some(caps) = lines.get(i).and_then(|l| field_regex().captures(&l.text)) {
            let line = &lines[i];
            let name = caps[1].to_string();
            let first = caps.get(2).map_or("", |m| m.as_str()).trim();

            let end = take_indented(lines, i + 1, 1);
            let mut body_lines = Vec::new();
            if !first.is_empty() {
                body_lines.push(SourceLine::new(line.number, first));
            }
            body_lines.extend(dedent(&lines[i + 1..end]));
            let body = self.parse_nested(&body_lines)?;

            let field = Element::new(Tag::Field)
                .with_children(vec![
                    Element::new(Tag::FieldName)
                        .with_children(vec![Node::text(name)])
                        .at_line(line.number)
                        .into(),
                    Element::new(Tag::FieldBody)
                        .with_children(body)
                        .at_line(line.number)
                        .into(),
                ])
                .at_line(line.number);
            fields.push(field.into());
            i = end;

            let next = skip_blank(lines, i);
            match lines.get(next) {
                Some(l) if l.indent() == 0 && field_regex().is_match(&l.text) => i = next,
                _ => break,
            }
        }

        let list = Element::new(Tag::FieldList)
            .with_children(fields)
            .at_line(lines[start].number);
        Ok((list.into(), i))
    }

    fn paragraph(&mut self, lines: &[SourceLine], start: usize) -> Result<(Vec<Node>, usize)> {
        let mut end = start;
        while end < lines.len() && !lines[end].is_blank() {
            end += 1;
        }

        let number = lines[start].number;
        let mut text = lines[start..end]
            .iter()
            .map(|l| l.text.trim())
            .collect::<Vec<_>>()
            .join("\n");

        let literal_follows = text.ends_with("::");
        if literal_follows {
            let stripped = &text[..text.len() - 2];
            text = if stripped.trim().is_empty() {
                String::new()
            } else if stripped.ends_with(char::is_whitespace) {
                stripped.trim_end().to_string()
            } else {
                format!("{}:", stripped)
            };
        }

        let mut nodes = Vec::new();
        if !text.is_empty() {
            let children = self.inline(&text, number);
            nodes.push(
                Element::new(Tag::Paragraph)
                    .with_children(children)
                    .at_line(number)
                    .into(),
            );
        }

        let mut next = end;
        if literal_follows {
            let j = skip_blank(lines, end);
            if j < lines.len() && lines[j].indent() > 0 {
                let literal_end = take_indented(lines, j, 1);
                let literal = dedent(&lines[j..literal_end]);
                nodes.push(
                    Element::new(Tag::LiteralBlock)
                        .with_children(vec![Node::text(join_lines(&literal))])
                        .at_line(lines[j].number)
                        .into(),
                );
                next = literal_end;
            }
        }

        Ok((nodes, next))
    }
}

/// The `..` line of a directive and its full source
struct Directive<'a> {
    name: &'a str,
    args: &'a str,
    line: usize,
    source: String,
}

fn image(uri: &str, options: &BTreeMap<String, String>, line: usize) -> Option<Element> {
    if uri.is_empty() {
        return None;
    }
    let alt = options.get("alt").map(String::as_str).unwrap_or(uri);
    Some(
        Element::new(Tag::Image)
            .with_attr("uri", uri)
            .with_attr("alt", alt)
            .at_line(line),
    )
}

/// Fold title blocks into nested sections
pub(crate) fn nest_sections(blocks: Vec<Block>, ids: &mut IdRegistry) -> Vec<Node> {
    let mut root = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    for block in blocks {
        match block {
            Block::Node(node) => match open.last_mut() {
                Some(section) => section.children.push(node),
                None => root.push(node),
            },
            Block::Title { level, title } => {
                while open.len() >= level {
                    close_section(&mut open, &mut root);
                }
                let id = ids.claim(&title.astext());
                let line = title.line;
                open.push(
                    Element::new(Tag::Section)
                        .with_attr("ids", id)
                        .with_children(vec![title.into()])
                        .at_line(line),
                );
            }
        }
    }

    while !open.is_empty() {
        close_section(&mut open, &mut root);
    }
    root
}

fn close_section(open: &mut Vec<Element>, root: &mut Vec<Node>) {
    if let Some(section) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(section.into()),
            None => root.push(section.into()),
        }
    }
}

fn element(el: Element) -> Block {
    Block::Node(el.into())
}

fn is_explicit_markup(text: &str) -> bool {
    text == ".." || text.starts_with(".. ")
}

/// The repeated punctuation character of an adornment line
fn adornment_char(text: &str) -> Option<char> {
    let first = text.chars().next()?;
    if !ADORNMENT_CHARS.contains(first) {
        return None;
    }
    text.chars().all(|c| c == first).then_some(first)
}

fn bullet_marker(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !matches!(first, '-' | '*' | '+') {
        return None;
    }
    match chars.next() {
        None | Some(' ') => Some(first),
        _ => None,
    }
}

fn skip_blank(lines: &[SourceLine], mut i: usize) -> usize {
    while i < lines.len() && lines[i].is_blank() {
        i += 1;
    }
    i
}

/// End (exclusive) of the run of lines starting at `start` that are blank or
/// indented at least `min_indent`; trailing blank lines are not included.
fn take_indented(lines: &[SourceLine], start: usize, min_indent: usize) -> usize {
    let mut end = start;
    let mut i = start;
    while i < lines.len() {
        let line = &lines[i];
        if line.is_blank() {
            i += 1;
            continue;
        }
        if line.indent() < min_indent {
            break;
        }
        i += 1;
        end = i;
    }
    end
}

/// Remove the common indentation of the non-blank lines
fn dedent(lines: &[SourceLine]) -> Vec<SourceLine> {
    let indent = lines
        .iter()
        .filter(|l| !l.is_blank())
        .map(SourceLine::indent)
        .min()
        .unwrap_or(0);
    strip_indent(lines, indent)
}

fn strip_indent(lines: &[SourceLine], indent: usize) -> Vec<SourceLine> {
    lines
        .iter()
        .map(|l| {
            if l.is_blank() {
                SourceLine::new(l.number, "")
            } else {
                SourceLine::new(l.number, &l.text[indent.min(l.indent())..])
            }
        })
        .collect()
}

fn join_lines(lines: &[SourceLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split leading `:name: value` option lines off a directive body
fn split_options(body: &[SourceLine]) -> (BTreeMap<String, String>, Vec<SourceLine>) {
    let mut options = BTreeMap::new();
    let mut i = 0;
    while let Some(caps) = body.get(i).and_then(|l| option_regex().captures(&l.text)) {
        let value = caps.get(2).map_or("", |m| m.as_str()).trim();
        options.insert(caps[1].to_lowercase(), value.to_string());
        i += 1;
    }
    let i = skip_blank(body, i);
    (options, body[i..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adornment_detection() {
        assert_eq!(adornment_char("====="), Some('='));
        assert_eq!(adornment_char("-=-="), None);
        assert_eq!(adornment_char("Title"), None);
        assert_eq!(adornment_char(""), None);
    }

    #[test]
    fn test_bullet_marker() {
        assert_eq!(bullet_marker("- item"), Some('-'));
        assert_eq!(bullet_marker("*"), Some('*'));
        assert_eq!(bullet_marker("*emphasis* text"), None);
        assert_eq!(bullet_marker("----"), None);
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx"), "        x");
        assert_eq!(expand_tabs("ab\tx"), "ab      x");
    }

    #[test]
    fn test_take_indented_stops_at_dedent() {
        let lines = split_lines("  a\n\n  b\n\nc\n");
        assert_eq!(take_indented(&lines, 0, 1), 3);
    }

    #[test]
    fn test_split_options() {
        let body = split_lines(":alt: A picture\n\ncontent\n");
        let (options, content) = split_options(&body);
        assert_eq!(options.get("alt").map(String::as_str), Some("A picture"));
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].text, "content");
    }
}

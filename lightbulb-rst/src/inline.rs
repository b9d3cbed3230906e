//! Inline markup: emphasis, strong, literals, references and substitutions.

use crate::definitions::{Definitions, Substitution};
use crate::error::RstError;
use crate::nodes::{Element, Node, Tag};
use crate::reporter::Reporter;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static INLINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn inline_regex() -> &'static Regex {
    INLINE_REGEX.get_or_init(|| {
        Regex::new(
            r"(?x)
              \\(?P<escaped>.)
            | \*\*(?P<strong>[^\s*](?:[^*]*[^\s*])?)\*\*
            | \*(?P<emphasis>[^\s*](?:[^*]*[^\s*])?)\*
            | ``(?P<literal>[^\s`](?:.*?[^\s`])?)``
            | `(?P<phrase>[^`]+)`_
            | `(?P<interpreted>[^`]+)`
            | \|(?P<substitution>[^\s|](?:[^|]*[^\s|])?)\|
            | (?P<name>[A-Za-z0-9](?:[\w-]*[A-Za-z0-9])?)_\b
            ",
        )
        .unwrap()
    })
}

/// What inline parsing can see: definitions and the line for reports
#[derive(Clone, Copy)]
pub(crate) struct InlineContext<'a> {
    defs: &'a Definitions,
    line: usize,
    substitutions: bool,
}

impl<'a> InlineContext<'a> {
    pub(crate) fn new(defs: &'a Definitions, line: usize) -> Self {
        Self {
            defs,
            line,
            substitutions: true,
        }
    }
}

/// Parse inline markup; unresolved references are reported and left as
/// `problematic` nodes
pub(crate) fn parse_inline(text: &str, ctx: &InlineContext<'_>, reporter: &mut Reporter) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in inline_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut nodes, &text[last..whole.start()]);
        for node in markup(&caps, whole.as_str(), ctx, reporter) {
            push_node(&mut nodes, node);
        }
        last = whole.end();
    }
    push_text(&mut nodes, &text[last..]);

    nodes
}

fn markup(caps: &Captures<'_>, whole: &str, ctx: &InlineContext<'_>, reporter: &mut Reporter) -> Vec<Node> {
    if let Some(m) = caps.name("escaped") {
        return vec![Node::text(m.as_str())];
    }
    if let Some(m) = caps.name("strong") {
        return vec![wrap(Tag::Strong, m.as_str())];
    }
    if let Some(m) = caps.name("emphasis") {
        return vec![wrap(Tag::Emphasis, m.as_str())];
    }
    if let Some(m) = caps.name("literal") {
        return vec![wrap(Tag::Literal, m.as_str())];
    }
    if let Some(m) = caps.name("phrase") {
        return vec![phrase_reference(m.as_str(), whole, ctx, reporter)];
    }
    if let Some(m) = caps.name("interpreted") {
        return vec![wrap(Tag::TitleReference, m.as_str())];
    }
    if let Some(m) = caps.name("substitution") {
        if !ctx.substitutions {
            return vec![Node::text(whole)];
        }
        return substitute(m.as_str(), whole, ctx, reporter);
    }
    if let Some(m) = caps.name("name") {
        return vec![named_reference(m.as_str(), m.as_str(), whole, ctx, reporter)];
    }
    vec![Node::text(whole)]
}

/// `` `label <uri>`_ `` or `` `target name`_ ``
fn phrase_reference(content: &str, whole: &str, ctx: &InlineContext<'_>, reporter: &mut Reporter) -> Node {
    if let Some(open) = content.rfind('<') {
        let label = &content[..open];
        if content.ends_with('>') && (label.is_empty() || label.ends_with(char::is_whitespace)) {
            let uri = content[open + 1..content.len() - 1].trim();
            let label = label.trim();
            let label = if label.is_empty() { uri } else { label };
            return reference(label, uri);
        }
    }

    named_reference(content, content, whole, ctx, reporter)
}

fn named_reference(
    name: &str,
    label: &str,
    whole: &str,
    ctx: &InlineContext<'_>,
    reporter: &mut Reporter,
) -> Node {
    match ctx.defs.target(name) {
        Some(uri) => reference(label, uri),
        None => reporter.problematic(
            RstError::UnknownTarget {
                line: ctx.line,
                name: name.to_string(),
            },
            whole,
        ),
    }
}

fn substitute(name: &str, whole: &str, ctx: &InlineContext<'_>, reporter: &mut Reporter) -> Vec<Node> {
    match ctx.defs.substitution(name) {
        Some(Substitution::Unicode(text)) => vec![Node::text(text.as_str())],
        Some(Substitution::Replace(markup)) => {
            // Replacement text may not reference further substitutions
            let inner = InlineContext {
                substitutions: false,
                ..*ctx
            };
            parse_inline(markup, &inner, reporter)
        }
        None => vec![reporter.problematic(
            RstError::UndefinedSubstitution {
                line: ctx.line,
                name: name.to_string(),
            },
            whole,
        )],
    }
}

fn wrap(tag: Tag, text: &str) -> Node {
    Element::new(tag)
        .with_children(vec![Node::text(text)])
        .into()
}

fn reference(label: &str, uri: &str) -> Node {
    Element::new(Tag::Reference)
        .with_attr("refuri", uri)
        .with_children(vec![Node::text(label)])
        .into()
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(prev)) = nodes.last_mut() {
        prev.push_str(text);
    } else {
        nodes.push(Node::text(text));
    }
}

fn push_node(nodes: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(text) => push_text(nodes, &text),
        other => nodes.push(other),
    }
}

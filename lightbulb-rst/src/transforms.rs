//! Document-level transforms applied after parsing.
//!
//! - Title promotion: a lone top-level section becomes the document title,
//!   and a lone subsection directly below it becomes the subtitle.
//! - Docinfo: the first field list after the title becomes the `docinfo`
//!   block, with bibliographic fields turned into named elements.
//! - Contents: each `contents` topic is filled with links to the sections
//!   it covers.

use crate::ids::IdRegistry;
use crate::nodes::{Element, Node, Tag};

/// Title, subtitle and system messages may precede the docinfo block
fn is_prebibliographic(node: &Node) -> bool {
    matches!(
        node,
        Node::Element(el) if matches!(el.tag, Tag::Title | Tag::Subtitle | Tag::SystemMessage)
    )
}

fn first_body_index(doc: &Element) -> Option<usize> {
    doc.children.iter().position(|n| !is_prebibliographic(n))
}

/// Index of a section that is the only remaining body element
fn candidate_index(doc: &Element) -> Option<usize> {
    let index = first_body_index(doc)?;
    if doc.children.len() > index + 1 {
        return None;
    }
    match &doc.children[index] {
        Node::Element(el) if el.tag == Tag::Section => Some(index),
        _ => None,
    }
}

fn take_section(doc: &mut Element, index: usize) -> Option<Element> {
    match doc.children.remove(index) {
        Node::Element(section) => Some(section),
        other => {
            doc.children.insert(index, other);
            None
        }
    }
}

pub(crate) fn promote_title(doc: &mut Element) -> bool {
    let Some(index) = candidate_index(doc) else {
        return false;
    };
    let Some(mut section) = take_section(doc, index) else {
        return false;
    };

    if let Some(ids) = section.attrs.remove("ids") {
        doc.attrs.insert("ids".to_string(), ids);
    }

    let mut rest = section.children.into_iter();
    let mut children: Vec<Node> = rest.next().into_iter().collect();
    children.append(&mut doc.children);
    children.extend(rest);
    doc.children = children;
    true
}

pub(crate) fn promote_subtitle(doc: &mut Element) -> bool {
    let Some(index) = candidate_index(doc) else {
        return false;
    };
    let Some(section) = take_section(doc, index) else {
        return false;
    };

    let mut rest = section.children.into_iter();
    let subtitle = match rest.next() {
        Some(Node::Element(mut title)) => {
            title.tag = Tag::Subtitle;
            if let Some(ids) = section.attrs.get("ids") {
                title.attrs.insert("ids".to_string(), ids.clone());
            }
            title
        }
        _ => Element::new(Tag::Subtitle),
    };

    let split = doc.children.len().min(1);
    let tail = doc.children.split_off(split);
    doc.children.push(subtitle.into());
    doc.children.extend(tail);
    doc.children.extend(rest);
    true
}

pub(crate) fn promote_docinfo(doc: &mut Element) {
    let Some(index) = first_body_index(doc) else {
        return;
    };
    let is_field_list = matches!(&doc.children[index], Node::Element(el) if el.tag == Tag::FieldList);
    if !is_field_list {
        return;
    }
    let Node::Element(field_list) = doc.children.remove(index) else {
        return;
    };

    let docinfo = extract_bibliographic(field_list);
    let at = first_body_index(doc).unwrap_or(doc.children.len());
    doc.children.insert(at, docinfo.into());
}

fn extract_bibliographic(field_list: Element) -> Element {
    let line = field_list.line;
    let entries = field_list
        .children
        .into_iter()
        .map(|node| match node {
            Node::Element(field) if field.tag == Tag::Field => bibliographic_entry(field),
            other => other,
        })
        .collect();

    Element::new(Tag::Docinfo)
        .with_children(entries)
        .at_line(line)
}

/// A recognised field with a single-paragraph body becomes a named element;
/// anything else stays a generic `field`.
fn bibliographic_entry(field: Element) -> Node {
    let name = field.child(0).map(Node::astext).unwrap_or_default();
    let Some(tag) = Tag::bibliographic(&name) else {
        return field.into();
    };

    let paragraph = field
        .child(1)
        .and_then(Node::as_element)
        .filter(|body| body.children.len() == 1)
        .and_then(|body| body.child(0))
        .and_then(Node::as_element)
        .filter(|p| p.tag == Tag::Paragraph)
        .cloned();
    let Some(paragraph) = paragraph else {
        return field.into();
    };

    if tag == Tag::Authors {
        let text = paragraph.astext();
        let separator = if text.contains(';') { ';' } else { ',' };
        let authors = text
            .split(separator)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| {
                Element::new(Tag::Author)
                    .with_children(vec![Node::text(a)])
                    .into()
            })
            .collect();
        return Element::new(Tag::Authors)
            .with_children(authors)
            .at_line(field.line)
            .into();
    }

    Element::new(tag)
        .with_children(paragraph.children)
        .at_line(field.line)
        .into()
}

/// Fill every pending `contents` topic; a topic with no sections to list
/// is dropped
pub(crate) fn build_contents(doc: &mut Element, ids: &mut IdRegistry) {
    let scope = doc.children.clone();
    let mut entries = 0;
    fill_contents(doc, &scope, ids, &mut entries);
}

fn is_pending_contents(node: &Node) -> bool {
    matches!(node, Node::Element(el) if el.attr("pending") == Some("contents"))
}

fn fill_contents(el: &mut Element, doc_scope: &[Node], ids: &mut IdRegistry, entries: &mut usize) {
    let local_scope = if el.children.iter().any(is_pending_contents) {
        el.children.clone()
    } else {
        Vec::new()
    };

    for node in std::mem::take(&mut el.children) {
        let Node::Element(mut child) = node else {
            el.children.push(node);
            continue;
        };

        if child.attrs.remove("pending").is_none() {
            fill_contents(&mut child, doc_scope, ids, entries);
            el.children.push(child.into());
            continue;
        }

        let scope = if child.attrs.remove("local").is_some() {
            local_scope.as_slice()
        } else {
            doc_scope
        };
        let depth = child.attr("depth").and_then(|d| d.parse::<usize>().ok());
        if let Some(list) = contents_list(scope, depth, entries) {
            let name = child
                .elements()
                .find(|e| e.tag == Tag::Title)
                .map(Element::astext)
                .unwrap_or_else(|| "contents".to_string());
            child.attrs.insert("ids".to_string(), ids.claim(&name));
            child.children.push(list.into());
            el.children.push(child.into());
        }
    }
}

fn contents_list(scope: &[Node], depth: Option<usize>, entries: &mut usize) -> Option<Element> {
    if depth == Some(0) {
        return None;
    }

    let mut items = Vec::new();
    for section in scope.iter().filter_map(Node::as_element) {
        let Some(id) = section.attr("ids").filter(|_| section.tag == Tag::Section) else {
            continue;
        };
        *entries += 1;

        let label = section
            .elements()
            .next()
            .map(|title| title.children.clone())
            .unwrap_or_default();
        let reference = Element::new(Tag::Reference)
            .with_attr("refid", id)
            .with_attr("ids", format!("toc-entry-{}", entries))
            .with_children(label);

        let mut children = vec![Node::from(
            Element::new(Tag::Paragraph).with_children(vec![reference.into()]),
        )];
        if let Some(sublist) = contents_list(&section.children, depth.map(|d| d - 1), entries) {
            children.push(sublist.into());
        }
        items.push(Element::new(Tag::ListItem).with_children(children).into());
    }

    if items.is_empty() {
        return None;
    }
    Some(
        Element::new(Tag::BulletList)
            .with_attr("class", "simple")
            .with_children(items),
    )
}

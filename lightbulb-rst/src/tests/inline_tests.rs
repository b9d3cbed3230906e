use crate::*;

fn paragraph(source: &str) -> Element {
    let doc = publish_doctree(source, &Settings::default()).unwrap();
    doc.find(Tag::Paragraph).cloned().unwrap()
}

#[test]
fn test_emphasis_strong_literal() {
    let p = paragraph("Some *soft* and **loud** and ``raw *text*``.\n");
    let tags: Vec<_> = p.children.iter().map(Node::tagname).collect();
    assert_eq!(
        tags,
        vec!["#text", "emphasis", "#text", "strong", "#text", "literal", "#text"]
    );
    assert_eq!(p.children[5].astext(), "raw *text*");
}

#[test]
fn test_interpreted_text_is_title_reference() {
    let p = paragraph("Read `The Book` today.\n");
    assert_eq!(p.children[1].tagname(), "title_reference");
}

#[test]
fn test_escaped_markup_stays_text() {
    let p = paragraph("Not \\*emphasis\\* here.\n");
    assert_eq!(p.children, vec![Node::text("Not *emphasis* here.")]);
}

#[test]
fn test_embedded_uri_reference() {
    let p = paragraph("See `Rust <https://www.rust-lang.org>`_ now.\n");
    let link = p.children[1].as_element().unwrap();
    assert_eq!(link.tag, Tag::Reference);
    assert_eq!(link.attr("refuri"), Some("https://www.rust-lang.org"));
    assert_eq!(link.astext(), "Rust");
}

#[test]
fn test_named_references_resolve_targets() {
    let source = "Try python_ or `Rust Lang`_.\n\n.. _python: https://python.org\n.. _Rust Lang: https://rust-lang.org\n";
    let p = paragraph(source);
    let links: Vec<_> = p
        .elements()
        .map(|el| el.attr("refuri").unwrap_or_default().to_string())
        .collect();
    assert_eq!(links, vec!["https://python.org", "https://rust-lang.org"]);
}

#[test]
fn test_unknown_target_is_problematic() {
    let parts = publish_parts("Line one.\n\nSee nowhere_ please.\n", &Settings::default()).unwrap();
    let p = parts.doctree.children[1].as_element().unwrap();
    let problematic = p.children[1].as_element().unwrap();
    assert_eq!(problematic.tag, Tag::Problematic);
    assert_eq!(problematic.astext(), "nowhere_");
    assert_eq!(problematic.attr("refid"), Some("system-message-1"));
    assert_eq!(p.astext(), "See nowhere_ please.");

    let trailing = parts.doctree.children[2].as_element().unwrap();
    assert_eq!(trailing.attr("class"), Some("system-messages"));
    assert_eq!(trailing.children[0].astext(), "Docutils System Messages");
    let message = trailing.children[1].as_element().unwrap();
    assert_eq!(message.attr("backref"), Some("problematic-1"));
    assert_eq!(message.astext(), "Unknown target name: \"nowhere\".");

    assert_eq!(
        parts.messages,
        vec![RstError::UnknownTarget {
            line: 3,
            name: "nowhere".into()
        }]
    );
}

#[test]
fn test_replace_substitution_parses_markup() {
    let p = paragraph(".. |name| replace:: *lightbulb*\n\nUse |name| daily.\n");
    assert_eq!(p.children[1].tagname(), "emphasis");
    assert_eq!(p.astext(), "Use lightbulb daily.");
}

#[test]
fn test_unicode_substitution() {
    let p = paragraph(".. |copy| unicode:: 0xA9\n\n|copy| 2012\n");
    assert_eq!(p.astext(), "\u{a9} 2012");
}

#[test]
fn test_undefined_substitution_is_problematic() {
    let parts = publish_parts("Text.\n\nSee |missing| here.\n", &Settings::default()).unwrap();
    let p = parts.doctree.children[1].as_element().unwrap();
    assert_eq!(p.children[1].tagname(), "problematic");
    assert_eq!(p.children[1].astext(), "|missing|");
    assert_eq!(
        parts.messages,
        vec![RstError::UndefinedSubstitution {
            line: 3,
            name: "missing".into()
        }]
    );
}

#[test]
fn test_snake_case_is_not_a_reference() {
    let p = paragraph("Call snake_case here.\n");
    assert_eq!(p.children, vec![Node::text("Call snake_case here.")]);
}

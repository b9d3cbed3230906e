//! Non-severe problems rendered into the document.
//!
//! Block-level problems become a `system_message` where they occur. Inline
//! problems leave a `problematic` node in the text that links to a message
//! collected at the end of the document.

use crate::error::RstError;
use crate::nodes::{Element, Node, Tag};

#[derive(Debug, Default)]
pub(crate) struct Reporter {
    quiet: bool,
    line_offset: usize,
    messages: Vec<RstError>,
    trailing: Vec<Node>,
    next_id: usize,
}

impl Reporter {
    /// Reported lines are shifted back by `line_offset`
    pub(crate) fn new(line_offset: usize) -> Self {
        Self {
            line_offset,
            ..Self::default()
        }
    }

    /// A reporter that does not log, for passes whose output is discarded
    pub(crate) fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    fn record(&mut self, err: RstError) -> RstError {
        let err = err.shift_lines(self.line_offset);
        if !self.quiet {
            tracing::debug!("{}", err);
        }
        self.messages.push(err.clone());
        err
    }

    /// Report a block-level problem; `source` is the offending markup
    pub(crate) fn system_message(&mut self, err: RstError, source: &str) -> Node {
        let err = self.record(err);
        message_element(&err, source).into()
    }

    /// Report an inline problem and return the node that replaces `text`
    pub(crate) fn problematic(&mut self, err: RstError, text: &str) -> Node {
        let err = self.record(err);
        self.next_id += 1;
        let message_id = format!("system-message-{}", self.next_id);
        let problematic_id = format!("problematic-{}", self.next_id);

        self.trailing.push(
            message_element(&err, "")
                .with_attr("ids", message_id.as_str())
                .with_attr("backref", problematic_id.as_str())
                .into(),
        );
        Element::new(Tag::Problematic)
            .with_attr("ids", problematic_id)
            .with_attr("refid", message_id)
            .with_children(vec![Node::text(text)])
            .into()
    }

    /// Report a problem that has no place in the text
    pub(crate) fn detached(&mut self, err: RstError) {
        let err = self.record(err);
        self.trailing.push(message_element(&err, "").into());
    }

    /// Messages in report order and the section collecting inline ones
    pub(crate) fn finish(self) -> (Vec<RstError>, Option<Element>) {
        if self.trailing.is_empty() {
            return (self.messages, None);
        }

        let mut children = vec![Element::new(Tag::Title)
            .with_children(vec![Node::text("Docutils System Messages")])
            .into()];
        children.extend(self.trailing);
        let section = Element::new(Tag::Section)
            .with_attr("class", "system-messages")
            .with_children(children);
        (self.messages, Some(section))
    }
}

fn message_element(err: &RstError, source: &str) -> Element {
    let mut children = vec![Element::new(Tag::Paragraph)
        .with_children(vec![Node::text(err.description())])
        .into()];
    if !source.is_empty() {
        children.push(
            Element::new(Tag::LiteralBlock)
                .with_children(vec![Node::text(source)])
                .into(),
        );
    }

    Element::new(Tag::SystemMessage)
        .with_attr("type", err.level().as_str())
        .with_attr("level", (err.level() as u8).to_string())
        .with_attr("line", err.line().to_string())
        .with_children(children)
        .at_line(err.line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problematic_links_to_trailing_message() {
        let mut reporter = Reporter::new(10);
        let node = reporter.problematic(
            RstError::UnknownTarget {
                line: 13,
                name: "nowhere".into(),
            },
            "nowhere_",
        );

        let problematic = node.as_element().unwrap();
        assert_eq!(problematic.attr("refid"), Some("system-message-1"));
        assert_eq!(problematic.astext(), "nowhere_");

        let (messages, section) = reporter.finish();
        assert_eq!(messages[0].line(), 3);
        let section = section.unwrap();
        let message = section.children[1].as_element().unwrap();
        assert_eq!(message.attr("ids"), Some("system-message-1"));
        assert_eq!(message.attr("line"), Some("3"));
    }

    #[test]
    fn test_block_messages_stay_in_place() {
        let mut reporter = Reporter::new(0);
        let node = reporter.system_message(
            RstError::UnknownDirective {
                line: 2,
                name: "bogus".into(),
            },
            ".. bogus:: arg",
        );
        assert_eq!(node.tagname(), "system_message");
        assert_eq!(node.child(1).unwrap().astext(), ".. bogus:: arg");

        let (messages, section) = reporter.finish();
        assert_eq!(messages.len(), 1);
        assert!(section.is_none());
    }
}

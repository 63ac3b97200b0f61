//! HTML → document tree construction.
//!
//! The parser is a single pass over the token stream with an open-tag
//! stack. Unknown tags become generic elements, formatting whitespace
//! between blocks is dropped, and adjacent text runs with identical marks
//! are merged so segmentation is canonical regardless of how the source
//! markup was split.

use crate::error::{ParseError, ParseResult};
use crate::schema::{classify_tag, is_void, TagClass};
use crate::tokenizer::{tokenize, HtmlToken};
use manuscript_model::{marks_equal, Attrs, DocNode, Mark, NodeKind};

/// Parse an HTML fragment into a tree rooted at a `doc` node.
pub fn parse_document(source: &str) -> ParseResult<DocNode> {
    let tokens = tokenize(source)?;
    let mut builder = TreeBuilder::new();
    for (token, span) in tokens {
        match token {
            HtmlToken::Text(text) => builder.text(text),
            HtmlToken::Open {
                name,
                attrs,
                self_closing,
            } => builder.open(&name, attrs, self_closing),
            HtmlToken::Close(name) => builder.close(&name, span.start)?,
        }
    }
    builder.finish()
}

enum Frame {
    Element {
        tag: String,
        node_type: String,
        attrs: Attrs,
        content: Vec<DocNode>,
    },
    Mark {
        tag: String,
        mark: Mark,
    },
    Transparent {
        tag: String,
    },
}

impl Frame {
    fn tag(&self) -> &str {
        match self {
            Frame::Element { tag, .. } => tag,
            Frame::Mark { tag, .. } => tag,
            Frame::Transparent { tag } => tag,
        }
    }
}

struct TreeBuilder {
    /// Finished top-level children of the document.
    top: Vec<DocNode>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            top: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn text(&mut self, text: String) {
        if !self.in_textblock() && text.trim().is_empty() {
            // formatting whitespace between blocks
            return;
        }
        let marks = self.active_marks();
        let mut node = DocNode::text(text);
        for mark in marks {
            node = node.with_mark(mark);
        }
        self.append(node);
    }

    fn open(&mut self, name: &str, raw_attrs: Vec<(String, String)>, self_closing: bool) {
        match classify_tag(name, &raw_attrs) {
            TagClass::Mark(mark) => {
                if !self_closing {
                    self.stack.push(Frame::Mark {
                        tag: name.to_string(),
                        mark,
                    });
                }
            }
            TagClass::Transparent => {
                if !self_closing {
                    self.stack.push(Frame::Transparent {
                        tag: name.to_string(),
                    });
                }
            }
            TagClass::Node { node_type, attrs } => {
                if self_closing || is_void(name) {
                    self.append(build_element(node_type, attrs, Vec::new()));
                } else {
                    self.stack.push(Frame::Element {
                        tag: name.to_string(),
                        node_type,
                        attrs,
                        content: Vec::new(),
                    });
                }
            }
        }
    }

    fn close(&mut self, name: &str, pos: usize) -> ParseResult<()> {
        match self.stack.pop() {
            Some(Frame::Element {
                tag,
                node_type,
                attrs,
                content,
            }) => {
                if tag != name {
                    return Err(ParseError::mismatched_close(pos, tag, name));
                }
                self.append(build_element(node_type, attrs, content));
                Ok(())
            }
            Some(Frame::Mark { tag, .. }) | Some(Frame::Transparent { tag }) => {
                if tag != name {
                    return Err(ParseError::mismatched_close(pos, tag, name));
                }
                Ok(())
            }
            None => Err(ParseError::stray_close(pos, name)),
        }
    }

    fn finish(mut self) -> ParseResult<DocNode> {
        if let Some(frame) = self.stack.pop() {
            return Err(ParseError::unclosed_tag(frame.tag()));
        }
        Ok(DocNode::element("doc").with_children(self.top))
    }

    /// Append a finished node to the nearest enclosing element, merging
    /// into the previous sibling when both are text with equal marks.
    fn append(&mut self, child: DocNode) {
        let content = self.target_content();
        if let DocNode::Text { text, marks } = &child {
            if let Some(DocNode::Text {
                text: prev_text,
                marks: prev_marks,
            }) = content.last_mut()
            {
                if marks_equal(prev_marks, marks) {
                    prev_text.push_str(text);
                    return;
                }
            }
        }
        content.push(child);
    }

    fn target_content(&mut self) -> &mut Vec<DocNode> {
        for frame in self.stack.iter_mut().rev() {
            if let Frame::Element { content, .. } = frame {
                return content;
            }
        }
        &mut self.top
    }

    fn in_textblock(&self) -> bool {
        for frame in self.stack.iter().rev() {
            if let Frame::Element { node_type, .. } = frame {
                return NodeKind::of(node_type).is_textblock();
            }
        }
        false
    }

    /// Marks currently open, outermost first.
    fn active_marks(&self) -> Vec<Mark> {
        self.stack
            .iter()
            .filter_map(|frame| match frame {
                Frame::Mark { mark, .. } => Some(mark.clone()),
                _ => None,
            })
            .collect()
    }
}

fn build_element(node_type: String, attrs: Attrs, content: Vec<DocNode>) -> DocNode {
    // Atoms are leaves; fallback content inside them (audio, custom spans)
    // is discarded.
    let content = if NodeKind::of(&node_type).is_atom() {
        Vec::new()
    } else {
        content
    };
    DocNode::Element {
        node_type,
        attrs,
        content,
    }
}

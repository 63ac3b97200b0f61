use crate::{Mark, NodeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute map for element nodes and marks.
///
/// `serde_json::Map` is BTreeMap-backed, so key order is canonical in both
/// comparison and serialization.
pub type Attrs = serde_json::Map<String, Value>;

/// A node in the document tree.
///
/// A node is either a text run (string payload plus marks, never children)
/// or an element (type string, attrs, ordered children). Leaf atoms such as
/// images are elements with no content; their kind decides their size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocNode {
    Element {
        #[serde(rename = "type")]
        node_type: String,

        #[serde(default, skip_serializing_if = "Attrs::is_empty")]
        attrs: Attrs,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<DocNode>,
    },

    Text {
        text: String,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

impl DocNode {
    pub fn element(node_type: impl Into<String>) -> Self {
        DocNode::Element {
            node_type: node_type.into(),
            attrs: Attrs::new(),
            content: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        DocNode::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let DocNode::Element { ref mut attrs, .. } = self {
            attrs.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        if let DocNode::Text { ref mut marks, .. } = self {
            marks.push(mark);
        }
        self
    }

    pub fn with_child(mut self, child: DocNode) -> Self {
        if let DocNode::Element {
            ref mut content, ..
        } = self
        {
            content.push(child);
        }
        self
    }

    pub fn with_children(mut self, children: Vec<DocNode>) -> Self {
        if let DocNode::Element {
            ref mut content, ..
        } = self
        {
            content.extend(children);
        }
        self
    }

    /// Type string of this node; text nodes report `"text"`.
    pub fn node_type(&self) -> &str {
        match self {
            DocNode::Element { node_type, .. } => node_type,
            DocNode::Text { .. } => "text",
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            DocNode::Element { node_type, .. } => NodeKind::of(node_type),
            DocNode::Text { .. } => NodeKind::Text,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DocNode::Text { .. })
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            DocNode::Element { attrs, .. } => Some(attrs),
            DocNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs().and_then(|attrs| attrs.get(key))
    }

    /// Children of this node; text nodes yield an empty slice.
    pub fn children(&self) -> &[DocNode] {
        match self {
            DocNode::Element { content, .. } => content,
            DocNode::Text { .. } => &[],
        }
    }

    pub fn child(&self, index: usize) -> Option<&DocNode> {
        self.children().get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Marks on this node; elements yield an empty slice.
    pub fn marks(&self) -> &[Mark] {
        match self {
            DocNode::Text { marks, .. } => marks,
            DocNode::Element { .. } => &[],
        }
    }

    /// Character length of a text node, 0 for elements.
    pub fn text_len(&self) -> usize {
        match self {
            DocNode::Text { text, .. } => text.chars().count(),
            DocNode::Element { .. } => 0,
        }
    }

    /// Size of this node in live-document positions: a text node spans its
    /// character count, an atom spans 1, and any other element spans its
    /// content plus open and close boundary tokens.
    pub fn size(&self) -> usize {
        match self {
            DocNode::Text { text, .. } => text.chars().count(),
            DocNode::Element { content, .. } => {
                if self.kind().is_atom() {
                    1
                } else {
                    2 + content.iter().map(DocNode::size).sum::<usize>()
                }
            }
        }
    }

    /// Summed size of the children. For the document root this is the span
    /// of valid inner positions, since the root's own boundary tokens are
    /// not addressable.
    pub fn content_size(&self) -> usize {
        self.children().iter().map(DocNode::size).sum()
    }

    /// Concatenated text of the whole subtree.
    pub fn text_content(&self) -> String {
        match self {
            DocNode::Text { text, .. } => text.clone(),
            DocNode::Element { content, .. } => {
                content.iter().map(DocNode::text_content).collect()
            }
        }
    }
}

use manuscript_model::{DocNode, Mark, NodePath};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to the node or text the record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Insert,
    Delete,
    Modify,
}

/// A character-level edit inside an inline container.
///
/// `offset` and `length` count Unicode scalar values over the container's
/// flattened text, in new-document coordinates. `text` is the inserted or
/// removed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub offset: usize,
    pub length: usize,
    pub text: String,
}

/// A single attribute key that changed value on an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrChange {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

/// A mark-set change over a run of characters, or over a whole text node
/// when the offsets are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkChange {
    pub old: Vec<Mark>,
    pub new: Vec<Mark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_offset: Option<usize>,
}

/// The change-specific payload of a [`DiffRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiffPayload {
    /// Whole subtree inserted or deleted.
    Node { node: DocNode },

    /// Character edit inside an inline container.
    Text { range: TextRange },

    /// Attribute value change on an element.
    Attr { change: AttrChange },

    /// Inline formatting change with unchanged text.
    Marks { change: MarkChange },
}

/// One atomic difference between the old and new document.
///
/// `path` addresses the changed node in the new document; delete records
/// use the nearest surviving new-side position, so every record resolves
/// against the document being displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub kind: ChangeKind,
    pub path: NodePath,
    #[serde(flatten)]
    pub payload: DiffPayload,
}

impl DiffRecord {
    pub fn insert_node(path: NodePath, node: DocNode) -> Self {
        DiffRecord {
            kind: ChangeKind::Insert,
            path,
            payload: DiffPayload::Node { node },
        }
    }

    pub fn delete_node(path: NodePath, node: DocNode) -> Self {
        DiffRecord {
            kind: ChangeKind::Delete,
            path,
            payload: DiffPayload::Node { node },
        }
    }

    pub fn insert_text(path: NodePath, offset: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        DiffRecord {
            kind: ChangeKind::Insert,
            path,
            payload: DiffPayload::Text {
                range: TextRange {
                    offset,
                    length: text.chars().count(),
                    text,
                },
            },
        }
    }

    pub fn delete_text(path: NodePath, offset: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        DiffRecord {
            kind: ChangeKind::Delete,
            path,
            payload: DiffPayload::Text {
                range: TextRange {
                    offset,
                    length: text.chars().count(),
                    text,
                },
            },
        }
    }

    pub fn attr_change(
        path: NodePath,
        key: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Self {
        DiffRecord {
            kind: ChangeKind::Modify,
            path,
            payload: DiffPayload::Attr {
                change: AttrChange {
                    key: key.into(),
                    old_value,
                    new_value,
                },
            },
        }
    }

    pub fn mark_change(
        path: NodePath,
        old: Vec<Mark>,
        new: Vec<Mark>,
        run: Option<(usize, usize)>,
    ) -> Self {
        let (from_offset, to_offset) = match run {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        };
        DiffRecord {
            kind: ChangeKind::Modify,
            path,
            payload: DiffPayload::Marks {
                change: MarkChange {
                    old,
                    new,
                    from_offset,
                    to_offset,
                },
            },
        }
    }

    pub fn text_range(&self) -> Option<&TextRange> {
        match &self.payload {
            DiffPayload::Text { range } => Some(range),
            _ => None,
        }
    }

    pub fn node(&self) -> Option<&DocNode> {
        match &self.payload {
            DiffPayload::Node { node } => Some(node),
            _ => None,
        }
    }

    pub fn attr(&self) -> Option<&AttrChange> {
        match &self.payload {
            DiffPayload::Attr { change } => Some(change),
            _ => None,
        }
    }

    pub fn marks(&self) -> Option<&MarkChange> {
        match &self.payload {
            DiffPayload::Marks { change } => Some(change),
            _ => None,
        }
    }
}

//! Turning diff records into renderable editor decorations.
//!
//! Every record is resolved against the new document: inserts and mark
//! changes become highlight ranges, deletions become point widgets that
//! carry the removed content as a label. Records that cannot be resolved
//! are logged and skipped rather than failing the whole batch.

use crate::position::{map_inline_offset, path_to_position, resolve_node_at_path};
use crate::record::{ChangeKind, DiffPayload, DiffRecord, MarkChange};
use manuscript_model::{DocNode, NodePath};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightStyle {
    Insert,
    Delete,
    Modify,
}

impl HighlightStyle {
    /// CSS class the front end attaches to the highlighted range.
    pub fn css_class(&self) -> &'static str {
        match self {
            HighlightStyle::Insert => "diff-insert",
            HighlightStyle::Delete => "diff-delete",
            HighlightStyle::Modify => "diff-modify",
        }
    }
}

/// Label rendered at a deletion point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionMarker {
    pub label: String,
}

impl DeletionMarker {
    fn for_text(text: &str) -> Self {
        DeletionMarker {
            label: text.to_string(),
        }
    }

    fn for_node(node: &DocNode) -> Self {
        let text = node.text_content();
        if text.is_empty() {
            DeletionMarker {
                label: format!("[{}]", node.node_type()),
            }
        } else {
            DeletionMarker { label: text }
        }
    }
}

/// A renderable annotation over the new document.
///
/// Positions are flat editor positions; `Inline` spans characters,
/// `Node` spans a whole element including its boundaries, and `Widget`
/// sits between characters at a single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Decoration {
    Inline {
        from: usize,
        to: usize,
        style: HighlightStyle,
    },
    Node {
        from: usize,
        to: usize,
        style: HighlightStyle,
    },
    Widget {
        at: usize,
        marker: DeletionMarker,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecorationError {
    #[error("path {path} does not resolve in the new document")]
    UnresolvedPath { path: NodePath },

    #[error("path {path} does not point at a text node")]
    NotATextNode { path: NodePath },

    #[error("{kind:?} record carries an incompatible payload")]
    MalformedRecord { kind: ChangeKind },
}

/// Build decorations for a batch of records against the new document.
///
/// Unresolvable records are logged and dropped; the rest of the batch
/// still renders.
pub fn build_decorations(records: &[DiffRecord], doc: &DocNode) -> Vec<Decoration> {
    let mut decorations = Vec::new();
    for record in records {
        match decorate(record, doc) {
            Ok(Some(decoration)) => decorations.push(decoration),
            Ok(None) => {}
            Err(err) => {
                warn!(path = %record.path, error = %err, "skipping undecoratable record");
            }
        }
    }
    debug!(decorations = decorations.len(), "decoration batch built");
    decorations
}

fn decorate(record: &DiffRecord, doc: &DocNode) -> Result<Option<Decoration>, DecorationError> {
    match (record.kind, &record.payload) {
        (ChangeKind::Insert, DiffPayload::Text { range }) => {
            let from = resolve_text_offset(doc, &record.path, range.offset);
            let to = resolve_text_offset(doc, &record.path, range.offset + range.length);
            Ok(inline_highlight(from, to, HighlightStyle::Insert))
        }
        (ChangeKind::Insert, DiffPayload::Node { node }) => {
            Ok(insert_node_highlight(record, node, doc))
        }
        (ChangeKind::Delete, DiffPayload::Text { range }) => {
            let at = resolve_text_offset(doc, &record.path, range.offset);
            Ok(Some(Decoration::Widget {
                at,
                marker: DeletionMarker::for_text(&range.text),
            }))
        }
        (ChangeKind::Delete, DiffPayload::Node { node }) => {
            let at = path_to_position(doc, &record.path);
            Ok(Some(Decoration::Widget {
                at,
                marker: DeletionMarker::for_node(node),
            }))
        }
        (ChangeKind::Modify, DiffPayload::Marks { change }) => mark_highlight(record, change, doc),
        (ChangeKind::Modify, DiffPayload::Attr { .. }) => attr_highlight(record, doc),
        _ => Err(DecorationError::MalformedRecord { kind: record.kind }),
    }
}

fn insert_node_highlight(record: &DiffRecord, node: &DocNode, doc: &DocNode) -> Option<Decoration> {
    let from = path_to_position(doc, &record.path);
    match resolve_node_at_path(doc, &record.path) {
        Some(DocNode::Text { text, .. }) => Some(Decoration::Inline {
            from,
            to: from + text.chars().count(),
            style: HighlightStyle::Insert,
        }),
        Some(resolved) => Some(Decoration::Node {
            from,
            to: (from + resolved.size()).min(doc.content_size()),
            style: HighlightStyle::Insert,
        }),
        // the path no longer resolves; fall back to a clamped range from
        // the payload and drop it if nothing remains
        None => {
            let to = (from + node.size()).min(doc.content_size());
            inline_highlight(from, to, HighlightStyle::Insert)
        }
    }
}

fn mark_highlight(
    record: &DiffRecord,
    change: &MarkChange,
    doc: &DocNode,
) -> Result<Option<Decoration>, DecorationError> {
    if let (Some(from_offset), Some(to_offset)) = (change.from_offset, change.to_offset) {
        let from = resolve_text_offset(doc, &record.path, from_offset);
        let to = resolve_text_offset(doc, &record.path, to_offset);
        return Ok(inline_highlight(from, to, HighlightStyle::Modify));
    }
    match resolve_node_at_path(doc, &record.path) {
        Some(node @ DocNode::Text { .. }) => {
            let from = path_to_position(doc, &record.path);
            Ok(inline_highlight(from, from + node.text_len(), HighlightStyle::Modify))
        }
        Some(_) => Err(DecorationError::NotATextNode {
            path: record.path.clone(),
        }),
        None => Err(DecorationError::UnresolvedPath {
            path: record.path.clone(),
        }),
    }
}

fn attr_highlight(record: &DiffRecord, doc: &DocNode) -> Result<Option<Decoration>, DecorationError> {
    match resolve_node_at_path(doc, &record.path) {
        Some(node) => {
            if node.kind().suppresses_node_highlight() {
                return Ok(None);
            }
            let from = path_to_position(doc, &record.path);
            let to = (from + node.size()).min(doc.content_size());
            Ok(Some(Decoration::Node {
                from,
                to,
                style: HighlightStyle::Modify,
            }))
        }
        None => Err(DecorationError::UnresolvedPath {
            path: record.path.clone(),
        }),
    }
}

/// Position of a character offset addressed by a record path, whether
/// the path names the text node itself or its inline container.
fn resolve_text_offset(doc: &DocNode, path: &NodePath, offset: usize) -> usize {
    let pos = path_to_position(doc, path);
    match resolve_node_at_path(doc, path) {
        Some(DocNode::Text { text, .. }) => pos + offset.min(text.chars().count()),
        Some(container) => map_inline_offset(pos, container, offset),
        None => pos,
    }
}

fn inline_highlight(from: usize, to: usize, style: HighlightStyle) -> Option<Decoration> {
    (to > from).then_some(Decoration::Inline { from, to, style })
}

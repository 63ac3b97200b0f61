//! Mapping tree paths and text offsets to flat editor positions.
//!
//! Positions count one per character of text, one per atom, and two
//! boundary tokens around every other element. The root's boundaries are
//! not addressable, so its first child starts at position zero.

use manuscript_model::{DocNode, NodePath};

/// Flat position of the node the path points at.
///
/// A component that runs past a node's children stops the walk and
/// yields the position accumulated so far, which is the end of the last
/// container that did resolve.
pub fn path_to_position(doc: &DocNode, path: &NodePath) -> usize {
    let mut pos = 0;
    let mut node = doc;
    for (depth, &index) in path.as_slice().iter().enumerate() {
        if depth > 0 {
            pos += 1;
        }
        let children = node.children();
        for child in children.iter().take(index) {
            pos += child.size();
        }
        match children.get(index) {
            Some(child) => node = child,
            None => break,
        }
    }
    pos
}

/// Node the path points at, if every component resolves.
pub fn resolve_node_at_path<'a>(doc: &'a DocNode, path: &NodePath) -> Option<&'a DocNode> {
    let mut node = doc;
    for &index in path.as_slice() {
        node = node.child(index)?;
    }
    Some(node)
}

/// Flat position of a character offset into a container's inline text.
///
/// `container_pos` is the container's own position. Atoms between text
/// segments occupy their full size; an offset on a segment boundary
/// resolves to the end of the earlier segment. Offsets past the text
/// clamp to the end of the content.
pub fn map_inline_offset(container_pos: usize, container: &DocNode, offset: usize) -> usize {
    let mut pos = container_pos + 1;
    let mut remaining = offset;
    for child in container.children() {
        match child {
            DocNode::Text { text, .. } => {
                let len = text.chars().count();
                if remaining <= len {
                    return pos + remaining;
                }
                remaining -= len;
                pos += len;
            }
            _ => pos += child.size(),
        }
    }
    pos
}

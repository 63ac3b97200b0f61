//! # Manuscript Diff
//!
//! Structural comparison between two document trees. [`tree::compare`]
//! walks the old and new trees, aligns children on equality and then on
//! identity, and refines matched textblocks with a character-level diff
//! that reconciles mark boundaries. The result is a flat list of
//! [`DiffRecord`]s addressed against the new document, which
//! [`build_decorations`] resolves into renderable editor spans.

pub mod align;
pub mod decoration;
pub mod inline;
pub mod position;
pub mod record;
pub mod text;
pub mod tree;

pub use decoration::{
    build_decorations, Decoration, DecorationError, DeletionMarker, HighlightStyle,
};
pub use position::{map_inline_offset, path_to_position, resolve_node_at_path};
pub use record::{AttrChange, ChangeKind, DiffPayload, DiffRecord, MarkChange, TextRange};
pub use tree::compare;

#[cfg(test)]
mod tests_scenarios;

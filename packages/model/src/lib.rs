//! # Manuscript Model
//!
//! Document tree types shared across the toolkit: nodes, marks, structural
//! paths, and the closed node-kind registry that comparison dispatches
//! through.
//!
//! A document is a tree of [`DocNode`] values. Interior nodes carry a type
//! string, an attribute map, and ordered children; leaf text nodes carry a
//! string payload plus the [`Mark`] set describing its inline formatting.
//! [`NodePath`] addresses a node by child indices from the root and is the
//! value type the diff engine hands to position mapping.

mod kind;
mod mark;
mod node;
mod path;

pub use kind::NodeKind;
pub use mark::{mark_set_key, marks_equal, Mark};
pub use node::{Attrs, DocNode};
pub use path::NodePath;

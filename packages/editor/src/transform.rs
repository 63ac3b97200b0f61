//! Position mapping through document edits.
//!
//! While a diff is displayed the user keeps typing, so the decoration
//! positions computed against one revision must survive into the next.
//! A [`PositionMap`] records the replaced ranges of a single edit and
//! rebases positions across it, the same way the editor itself rebases
//! selections.

use manuscript_diff::Decoration;
use serde::{Deserialize, Serialize};

/// Which side a position sticks to when it sits exactly on an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// One replaced span of an edit, in pre-edit coordinates.
///
/// `old_len` of zero is a pure insertion, `new_len` of zero a pure
/// deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacedRange {
    pub start: usize,
    pub old_len: usize,
    pub new_len: usize,
}

/// Maps positions from before an edit to after it.
///
/// Ranges must not overlap; they are kept sorted by start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionMap {
    ranges: Vec<ReplacedRange>,
}

impl PositionMap {
    pub fn new(mut ranges: Vec<ReplacedRange>) -> Self {
        ranges.sort_by_key(|range| range.start);
        PositionMap { ranges }
    }

    pub fn insertion(at: usize, len: usize) -> Self {
        PositionMap::new(vec![ReplacedRange {
            start: at,
            old_len: 0,
            new_len: len,
        }])
    }

    pub fn deletion(at: usize, len: usize) -> Self {
        PositionMap::new(vec![ReplacedRange {
            start: at,
            old_len: len,
            new_len: 0,
        }])
    }

    pub fn replacement(at: usize, old_len: usize, new_len: usize) -> Self {
        PositionMap::new(vec![ReplacedRange {
            start: at,
            old_len,
            new_len,
        }])
    }

    /// Map a pre-edit position to its post-edit equivalent.
    ///
    /// Positions inside a replaced span collapse to its edge: `Before`
    /// sticks to the start of the replacement, `After` to its end.
    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        let mut delta: isize = 0;
        for range in &self.ranges {
            if pos < range.start {
                break;
            }
            let old_end = range.start + range.old_len;
            if pos > old_end {
                delta += range.new_len as isize - range.old_len as isize;
                continue;
            }
            let base = match assoc {
                Assoc::Before => range.start,
                Assoc::After => range.start + range.new_len,
            };
            return (base as isize + delta) as usize;
        }
        (pos as isize + delta) as usize
    }
}

/// Rebase decorations through an edit, dropping ranges the edit emptied.
///
/// Range ends hug the highlighted content: text inserted exactly at a
/// boundary falls outside the highlight.
pub fn map_decorations(decorations: &[Decoration], map: &PositionMap) -> Vec<Decoration> {
    decorations
        .iter()
        .filter_map(|decoration| match *decoration {
            Decoration::Inline { from, to, style } => {
                let from = map.map(from, Assoc::After);
                let to = map.map(to, Assoc::Before);
                (to > from).then_some(Decoration::Inline { from, to, style })
            }
            Decoration::Node { from, to, style } => {
                let from = map.map(from, Assoc::After);
                let to = map.map(to, Assoc::Before);
                (to > from).then_some(Decoration::Node { from, to, style })
            }
            Decoration::Widget { at, ref marker } => Some(Decoration::Widget {
                at: map.map(at, Assoc::Before),
                marker: marker.clone(),
            }),
        })
        .collect()
}

//! Inline content comparison for textblocks.
//!
//! A textblock's text segmentation is an artifact of mark boundaries, so
//! the two sides are flattened to plain strings before the character diff
//! and mark changes are recovered afterwards by scanning the equal
//! regions. Non-text atoms are excluded from the flattening and aligned
//! separately by type.

use crate::align::align;
use crate::record::DiffRecord;
use crate::text::{diff_chars, BlockOp, DiffBlock};
use manuscript_model::{mark_set_key, DocNode, Mark, NodePath};
use serde_json::Value;

/// Compare two textblocks, emitting text, mark and atom records.
///
/// `path` addresses the container in the new document; all text offsets
/// are character offsets into the new container's flattened text.
pub fn compare_inline(old: &DocNode, new: &DocNode, path: &NodePath) -> Vec<DiffRecord> {
    let old_flat = FlatText::of(old);
    let new_flat = FlatText::of(new);

    let blocks = diff_chars(&old_flat.as_string(), &new_flat.as_string());
    let mut records = walk_blocks(&blocks, path, Some((&old_flat, &new_flat)));
    records.extend(compare_atoms(old, new, path));
    records
}

/// Character edits between two bare text nodes, without mark scanning.
pub(crate) fn text_edit_records(old: &str, new: &str, path: &NodePath) -> Vec<DiffRecord> {
    let blocks = diff_chars(old, new);
    walk_blocks(&blocks, path, None)
}

/// Flattened view of a textblock: characters of the text children laid
/// end to end, each tagged with its source segment's mark set.
struct FlatText<'a> {
    chars: Vec<char>,
    origin: Vec<usize>,
    seg_marks: Vec<&'a [Mark]>,
    seg_keys: Vec<String>,
}

impl<'a> FlatText<'a> {
    fn of(container: &'a DocNode) -> Self {
        let mut flat = FlatText {
            chars: Vec::new(),
            origin: Vec::new(),
            seg_marks: Vec::new(),
            seg_keys: Vec::new(),
        };
        for child in container.children() {
            if let DocNode::Text { text, marks } = child {
                let seg = flat.seg_marks.len();
                flat.seg_marks.push(marks.as_slice());
                flat.seg_keys.push(mark_set_key(marks));
                for ch in text.chars() {
                    flat.chars.push(ch);
                    flat.origin.push(seg);
                }
            }
        }
        flat
    }

    fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    fn key_at(&self, index: usize) -> &str {
        &self.seg_keys[self.origin[index]]
    }

    fn marks_at(&self, index: usize) -> &'a [Mark] {
        self.seg_marks[self.origin[index]]
    }
}

fn walk_blocks(
    blocks: &[DiffBlock],
    path: &NodePath,
    flats: Option<(&FlatText, &FlatText)>,
) -> Vec<DiffRecord> {
    let walk = blocks
        .iter()
        .fold(BlockWalk::default(), |walk, block| walk.step(block, path, flats));
    walk.records
}

/// Fold state for the block walk: cursors into both flattened strings
/// plus the records emitted so far.
#[derive(Default)]
struct BlockWalk {
    old_offset: usize,
    new_offset: usize,
    records: Vec<DiffRecord>,
}

impl BlockWalk {
    fn step(mut self, block: &DiffBlock, path: &NodePath, flats: Option<(&FlatText, &FlatText)>) -> Self {
        let len = block.char_len();
        match block.op {
            BlockOp::Equal => {
                if let Some((old_flat, new_flat)) = flats {
                    self.scan_mark_runs(len, path, old_flat, new_flat);
                }
                self.old_offset += len;
                self.new_offset += len;
            }
            BlockOp::Delete => {
                // anchored where the text used to sit in new coordinates
                self.records.push(DiffRecord::delete_text(
                    path.clone(),
                    self.new_offset,
                    block.text.clone(),
                ));
                self.old_offset += len;
            }
            BlockOp::Insert => {
                self.records.push(DiffRecord::insert_text(
                    path.clone(),
                    self.new_offset,
                    block.text.clone(),
                ));
                self.new_offset += len;
            }
        }
        self
    }

    /// Walk an equal region and emit one modify record per contiguous run
    /// of characters whose mark sets differ between the two sides.
    fn scan_mark_runs(
        &mut self,
        len: usize,
        path: &NodePath,
        old_flat: &FlatText,
        new_flat: &FlatText,
    ) {
        let mut run: Option<(usize, usize)> = None;
        for i in 0..len {
            let old_i = self.old_offset + i;
            let new_i = self.new_offset + i;
            if old_flat.key_at(old_i) != new_flat.key_at(new_i) {
                if run.is_none() {
                    run = Some((old_i, new_i));
                }
            } else if let Some((old_start, new_start)) = run.take() {
                self.emit_mark_run(path, old_flat, new_flat, old_start, new_start, new_i);
            }
        }
        if let Some((old_start, new_start)) = run.take() {
            self.emit_mark_run(
                path,
                old_flat,
                new_flat,
                old_start,
                new_start,
                self.new_offset + len,
            );
        }
    }

    fn emit_mark_run(
        &mut self,
        path: &NodePath,
        old_flat: &FlatText,
        new_flat: &FlatText,
        old_start: usize,
        new_start: usize,
        new_end: usize,
    ) {
        self.records.push(DiffRecord::mark_change(
            path.clone(),
            old_flat.marks_at(old_start).to_vec(),
            new_flat.marks_at(new_start).to_vec(),
            Some((new_start, new_end)),
        ));
    }
}

/// Align the non-text children of two textblocks by type and report
/// inserts, deletes, and attribute changes on the survivors.
fn compare_atoms(old: &DocNode, new: &DocNode, path: &NodePath) -> Vec<DiffRecord> {
    let old_atoms = inline_atoms(old);
    let new_atoms = inline_atoms(new);
    if old_atoms.is_empty() && new_atoms.is_empty() {
        return Vec::new();
    }

    let pairs = align(&old_atoms, &new_atoms, |(_, a), (_, b)| {
        a.node_type() == b.node_type()
    });

    let mut records = Vec::new();
    let mut oi = 0;
    let mut ni = 0;
    let end = (old_atoms.len(), new_atoms.len());
    for &(pa, pb) in pairs.iter().chain(std::iter::once(&end)) {
        while oi < pa {
            let anchor = new_atoms
                .get(ni)
                .map(|&(index, _)| index)
                .unwrap_or_else(|| new.child_count());
            records.push(DiffRecord::delete_node(
                path.child(anchor),
                old_atoms[oi].1.clone(),
            ));
            oi += 1;
        }
        while ni < pb {
            let (index, atom) = new_atoms[ni];
            records.push(DiffRecord::insert_node(path.child(index), atom.clone()));
            ni += 1;
        }
        if pa < old_atoms.len() && pb < new_atoms.len() {
            let (_, old_atom) = old_atoms[pa];
            let (new_index, new_atom) = new_atoms[pb];
            if old_atom.attrs() != new_atom.attrs() {
                records.push(DiffRecord::attr_change(
                    path.child(new_index),
                    "attrs",
                    old_atom.attrs().cloned().map(Value::Object),
                    new_atom.attrs().cloned().map(Value::Object),
                ));
            }
            oi = pa + 1;
            ni = pb + 1;
        }
    }
    records
}

fn inline_atoms(container: &DocNode) -> Vec<(usize, &DocNode)> {
    container
        .children()
        .iter()
        .enumerate()
        .filter(|(_, child)| !child.is_text())
        .collect()
}

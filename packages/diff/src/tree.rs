//! Structural comparison of document trees.
//!
//! Children are aligned in two passes: exact equality first, then a
//! looser pass inside the gaps that pairs nodes by type and identity
//! attributes. Paired nodes recurse, unpaired ones become inserts and
//! deletes. All paths and offsets in the output address the new tree.

use crate::align::align;
use crate::inline;
use crate::record::DiffRecord;
use manuscript_model::{marks_equal, Attrs, DocNode, NodeKind, NodePath};
use tracing::{debug, instrument};

/// Compare two documents and return the edit records in document order.
#[instrument(skip(old, new))]
pub fn compare(old: &DocNode, new: &DocNode) -> Vec<DiffRecord> {
    let mut records = Vec::new();
    compare_nodes(old, new, &NodePath::root(), &mut records);
    debug!(records = records.len(), "document comparison finished");
    records
}

fn compare_nodes(old: &DocNode, new: &DocNode, path: &NodePath, records: &mut Vec<DiffRecord>) {
    if old == new {
        return;
    }

    if old.node_type() != new.node_type() {
        records.push(DiffRecord::delete_node(path.clone(), old.clone()));
        records.push(DiffRecord::insert_node(path.clone(), new.clone()));
        return;
    }

    if let (
        DocNode::Text { text: old_text, marks: old_marks },
        DocNode::Text { text: new_text, marks: new_marks },
    ) = (old, new)
    {
        records.extend(inline::text_edit_records(old_text, new_text, path));
        if !marks_equal(old_marks, new_marks) {
            records.push(DiffRecord::mark_change(
                path.clone(),
                old_marks.clone(),
                new_marks.clone(),
                None,
            ));
        }
        return;
    }

    compare_attrs(old, new, path, records);

    if new.kind().is_textblock() {
        records.extend(inline::compare_inline(old, new, path));
        return;
    }

    compare_children(old, new, path, records);
}

/// One record per changed key, removed keys included.
fn compare_attrs(old: &DocNode, new: &DocNode, path: &NodePath, records: &mut Vec<DiffRecord>) {
    let empty = Attrs::new();
    let old_attrs = old.attrs().unwrap_or(&empty);
    let new_attrs = new.attrs().unwrap_or(&empty);
    if old_attrs == new_attrs {
        return;
    }

    for (key, old_value) in old_attrs {
        let new_value = new_attrs.get(key);
        if new_value != Some(old_value) {
            records.push(DiffRecord::attr_change(
                path.clone(),
                key.as_str(),
                Some(old_value.clone()),
                new_value.cloned(),
            ));
        }
    }
    for (key, new_value) in new_attrs {
        if !old_attrs.contains_key(key) {
            records.push(DiffRecord::attr_change(
                path.clone(),
                key.as_str(),
                None,
                Some(new_value.clone()),
            ));
        }
    }
}

fn compare_children(old: &DocNode, new: &DocNode, path: &NodePath, records: &mut Vec<DiffRecord>) {
    let old_children = old.children();
    let new_children = new.children();

    // pass 1: anchor on exactly equal children
    let exact = align(old_children, new_children, |a, b| a == b);

    // pass 2: inside each gap, pair what kept its identity
    let mut pairs: Vec<(usize, usize, bool)> = Vec::new();
    let mut oi = 0;
    let mut ni = 0;
    let stop = (old_children.len(), new_children.len());
    for &(pa, pb) in exact.iter().chain(std::iter::once(&stop)) {
        let gap = align(&old_children[oi..pa], &new_children[ni..pb], |a, b| {
            similar(a, b)
        });
        for &(ga, gb) in &gap {
            pairs.push((oi + ga, ni + gb, false));
        }
        if pa < old_children.len() && pb < new_children.len() {
            pairs.push((pa, pb, true));
            oi = pa + 1;
            ni = pb + 1;
        }
    }

    // merged walk: deletes anchor at the current new-side index and do
    // not advance it, inserts land at their real index
    let mut oi = 0;
    let mut ni = 0;
    let stop = (old_children.len(), new_children.len(), true);
    for &(pa, pb, is_exact) in pairs.iter().chain(std::iter::once(&stop)) {
        while oi < pa {
            records.push(DiffRecord::delete_node(
                path.child(ni),
                old_children[oi].clone(),
            ));
            oi += 1;
        }
        while ni < pb {
            records.push(DiffRecord::insert_node(
                path.child(ni),
                new_children[ni].clone(),
            ));
            ni += 1;
        }
        if pa < old_children.len() && pb < new_children.len() {
            if !is_exact {
                compare_nodes(&old_children[pa], &new_children[pb], &path.child(pb), records);
            }
            oi = pa + 1;
            ni = pb + 1;
        }
    }
}

/// Same type and same identity attributes, so edits inside the node are
/// reported as modifications rather than replacement.
fn similar(a: &DocNode, b: &DocNode) -> bool {
    if a.node_type() != b.node_type() {
        return false;
    }
    NodeKind::of(a.node_type())
        .match_keys()
        .iter()
        .all(|key| a.attr(key) == b.attr(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ChangeKind, DiffPayload};

    fn doc(children: Vec<DocNode>) -> DocNode {
        DocNode::element("doc").with_children(children)
    }

    fn paragraph(text: &str) -> DocNode {
        DocNode::element("paragraph").with_child(DocNode::text(text))
    }

    fn heading(level: u64, text: &str) -> DocNode {
        DocNode::element("heading")
            .with_attr("level", level)
            .with_child(DocNode::text(text))
    }

    #[test]
    fn test_compare_identical_documents() {
        let a = doc(vec![paragraph("Hello"), paragraph("world")]);
        assert!(compare(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_compare_text_edit_recurses_to_textblock() {
        let old = doc(vec![paragraph("Hello world")]);
        let new = doc(vec![paragraph("Hello brave world")]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::Insert);
        assert_eq!(records[0].path.as_slice(), &[0]);
        assert_eq!(records[0].text_range().unwrap().offset, 6);
        assert_eq!(records[0].text_range().unwrap().text, "brave ");
    }

    #[test]
    fn test_compare_inserted_paragraph_between_anchors() {
        let old = doc(vec![paragraph("First"), paragraph("Second")]);
        let new = doc(vec![
            paragraph("First"),
            paragraph("Between"),
            paragraph("Second"),
        ]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::Insert);
        assert_eq!(records[0].path.as_slice(), &[1]);
        match &records[0].payload {
            DiffPayload::Node { node } => assert_eq!(node.text_content(), "Between"),
            other => panic!("expected node payload, got {other:?}"),
        }
    }

    #[test]
    fn test_compare_deleted_paragraph_anchors_at_new_index() {
        let old = doc(vec![
            paragraph("First"),
            paragraph("Gone"),
            paragraph("Last"),
        ]);
        let new = doc(vec![paragraph("First"), paragraph("Last")]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::Delete);
        assert_eq!(records[0].path.as_slice(), &[1]);
        match &records[0].payload {
            DiffPayload::Node { node } => assert_eq!(node.text_content(), "Gone"),
            other => panic!("expected node payload, got {other:?}"),
        }
    }

    #[test]
    fn test_compare_type_change_is_delete_and_insert() {
        let old = doc(vec![paragraph("Title")]);
        let new = doc(vec![heading(1, "Title")]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ChangeKind::Delete);
        assert_eq!(records[1].kind, ChangeKind::Insert);
        assert_eq!(records[0].path.as_slice(), &[0]);
        assert_eq!(records[1].path.as_slice(), &[0]);
    }

    #[test]
    fn test_compare_heading_level_change_replaces_block() {
        // level is an identity attribute, so the blocks do not pair
        let old = doc(vec![heading(1, "Title")]);
        let new = doc(vec![heading(2, "Title")]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ChangeKind::Delete);
        assert_eq!(records[1].kind, ChangeKind::Insert);
    }

    #[test]
    fn test_compare_attr_change_on_matched_element() {
        let old = doc(vec![DocNode::element("code_block")
            .with_attr("language", "rust")
            .with_child(DocNode::text("fn main() {}"))]);
        let new = doc(vec![DocNode::element("code_block")
            .with_attr("language", "rust")
            .with_attr("wrap", true)
            .with_child(DocNode::text("fn main() {}"))]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::Modify);
        let change = records[0].attr().unwrap();
        assert_eq!(change.key, "wrap");
        assert_eq!(change.old_value, None);
        assert_eq!(change.new_value, Some(serde_json::json!(true)));
    }

    #[test]
    fn test_compare_nested_edit_path() {
        let old = doc(vec![
            paragraph("intro"),
            DocNode::element("blockquote").with_child(paragraph("quoted text")),
        ]);
        let new = doc(vec![
            paragraph("intro"),
            DocNode::element("blockquote").with_child(paragraph("quoted words")),
        ]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.path.as_slice(), &[1, 0]);
        }
    }

    #[test]
    fn test_compare_list_reorder_keeps_anchors() {
        let item = |text: &str| {
            DocNode::element("list_item").with_child(paragraph(text))
        };
        let old = doc(vec![DocNode::element("bullet_list").with_children(vec![
            item("alpha"),
            item("beta"),
            item("gamma"),
        ])]);
        let new = doc(vec![DocNode::element("bullet_list").with_children(vec![
            item("alpha"),
            item("gamma"),
        ])]);
        let records = compare(&old, &new);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::Delete);
        assert_eq!(records[0].path.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_compare_root_type_change() {
        let old = DocNode::element("doc");
        let new = DocNode::element("fragment");
        let records = compare(&old, &new);

        assert_eq!(records.len(), 2);
        assert!(records[0].path.is_root());
        assert!(records[1].path.is_root());
    }
}

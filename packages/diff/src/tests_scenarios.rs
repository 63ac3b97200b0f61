//! End-to-end comparison scenarios driven through parsed HTML snapshots.

use crate::decoration::{build_decorations, Decoration, HighlightStyle};
use crate::record::{ChangeKind, DiffPayload, DiffRecord};
use crate::tree::compare;
use manuscript_parser::parse_document;

fn diff_html(old: &str, new: &str) -> (Vec<DiffRecord>, Vec<Decoration>) {
    let old_doc = parse_document(old).unwrap();
    let new_doc = parse_document(new).unwrap();
    let records = compare(&old_doc, &new_doc);
    let decorations = build_decorations(&records, &new_doc);
    (records, decorations)
}

#[test]
fn test_scenario_single_word_insertion() {
    let (records, decorations) =
        diff_html("<p>Hello world</p>", "<p>Hello brave world</p>");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ChangeKind::Insert);
    assert_eq!(records[0].path.as_slice(), &[0]);
    let range = records[0].text_range().unwrap();
    assert_eq!(range.offset, 6);
    assert_eq!(range.length, 6);
    assert_eq!(range.text, "brave ");

    assert_eq!(
        decorations,
        vec![Decoration::Inline {
            from: 7,
            to: 13,
            style: HighlightStyle::Insert,
        }]
    );
}

#[test]
fn test_scenario_word_replacement() {
    let (records, decorations) = diff_html(
        "<p>The cat sat on the mat</p>",
        "<p>The dog sat on the mat</p>",
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, ChangeKind::Delete);
    assert_eq!(records[0].text_range().unwrap().text, "cat");
    assert_eq!(records[0].text_range().unwrap().offset, 4);
    assert_eq!(records[1].kind, ChangeKind::Insert);
    assert_eq!(records[1].text_range().unwrap().text, "dog");
    assert_eq!(records[1].text_range().unwrap().offset, 4);

    // the deletion widget sits where the replacement begins
    assert_eq!(
        decorations,
        vec![
            Decoration::Widget {
                at: 5,
                marker: crate::decoration::DeletionMarker {
                    label: "cat".to_string(),
                },
            },
            Decoration::Inline {
                from: 5,
                to: 8,
                style: HighlightStyle::Insert,
            },
        ]
    );
}

#[test]
fn test_scenario_mark_only_change() {
    let (records, _) = diff_html("<p><strong>Hi</strong> there</p>", "<p>Hi there</p>");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ChangeKind::Modify);
    let change = records[0].marks().unwrap();
    assert_eq!(change.old.len(), 1);
    assert_eq!(change.old[0].mark_type, "bold");
    assert!(change.new.is_empty());
    assert_eq!(change.from_offset, Some(0));
    assert_eq!(change.to_offset, Some(2));
}

#[test]
fn test_scenario_block_insertion_between_anchors() {
    let (records, decorations) = diff_html(
        "<p>First</p><p>Second</p>",
        "<p>First</p><p>Between</p><p>Second</p>",
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ChangeKind::Insert);
    assert_eq!(records[0].path.as_slice(), &[1]);
    match &records[0].payload {
        DiffPayload::Node { node } => assert_eq!(node.text_content(), "Between"),
        other => panic!("expected node payload, got {other:?}"),
    }

    assert_eq!(
        decorations,
        vec![Decoration::Node {
            from: 7,
            to: 16,
            style: HighlightStyle::Insert,
        }]
    );
}

#[test]
fn test_scenario_block_type_change() {
    let (records, decorations) = diff_html("<p>Title</p>", "<h1>Title</h1>");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, ChangeKind::Delete);
    assert_eq!(records[1].kind, ChangeKind::Insert);

    assert_eq!(decorations.len(), 2);
    assert!(matches!(decorations[0], Decoration::Widget { at: 0, .. }));
    assert!(matches!(
        decorations[1],
        Decoration::Node {
            from: 0,
            to: 7,
            style: HighlightStyle::Insert,
        }
    ));
}

#[test]
fn test_scenario_identical_documents_produce_nothing() {
    let (records, decorations) = diff_html(
        "<h1>Notes</h1><p>Same <em>content</em> here</p>",
        "<h1>Notes</h1><p>Same <em>content</em> here</p>",
    );

    assert!(records.is_empty());
    assert!(decorations.is_empty());
}

#[test]
fn test_scenario_records_survive_mismatched_document() {
    // records computed against one revision, resolved against another
    let old = parse_document("<p>First</p><p>Second</p><p>Third</p>").unwrap();
    let new = parse_document("<p>First</p><p>Second</p><p>Third edited</p>").unwrap();
    let records = compare(&old, &new);
    assert!(!records.is_empty());

    let shrunk = parse_document("<p>First</p>").unwrap();
    let decorations = build_decorations(&records, &shrunk);

    // everything past the end clamps or drops, nothing panics
    let end = shrunk.content_size();
    for decoration in &decorations {
        match decoration {
            Decoration::Inline { from, to, .. } | Decoration::Node { from, to, .. } => {
                assert!(from <= to && *to <= end);
            }
            Decoration::Widget { at, .. } => assert!(*at <= end),
        }
    }
}

#[test]
fn test_scenario_list_item_edit_keeps_siblings() {
    let (records, _) = diff_html(
        "<ul><li><p>alpha</p></li><li><p>beta</p></li></ul>",
        "<ul><li><p>alpha</p></li><li><p>betas</p></li></ul>",
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ChangeKind::Insert);
    assert_eq!(records[0].path.as_slice(), &[0, 1, 0]);
    assert_eq!(records[0].text_range().unwrap().text, "s");
}

#[test]
fn test_scenario_code_block_language_change() {
    let (records, _) = diff_html(
        "<pre data-language=\"rust\">let x = 1;</pre>",
        "<pre data-language=\"python\">let x = 1;</pre>",
    );

    // language is an identity attribute, so the block is replaced
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, ChangeKind::Delete);
    assert_eq!(records[1].kind, ChangeKind::Insert);
}

#[test]
fn test_scenario_image_source_change() {
    let (records, decorations) = diff_html(
        "<p>see <img src=\"a.png\"> here</p>",
        "<p>see <img src=\"b.png\"> here</p>",
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ChangeKind::Modify);
    assert_eq!(records[0].attr().unwrap().key, "attrs");
    assert_eq!(records[0].path.as_slice(), &[0, 1]);

    assert_eq!(
        decorations,
        vec![Decoration::Node {
            from: 5,
            to: 6,
            style: HighlightStyle::Modify,
        }]
    );
}

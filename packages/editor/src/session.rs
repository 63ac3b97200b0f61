//! # Diff Session Management
//!
//! One client's comparison state: the document being displayed and,
//! while review mode is on, the records and decorations computed for it.

use crate::errors::EditorError;
use crate::transform::{map_decorations, PositionMap};
use manuscript_diff::{build_decorations, compare, Decoration, DiffRecord};
use manuscript_model::DocNode;
use manuscript_parser::{parse_document, serialize_document};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Records and decorations of one displayed comparison, in the shape
/// handed to the host editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffState {
    pub records: Vec<DiffRecord>,
    pub decorations: Vec<Decoration>,
}

/// A document plus optional review-mode diff state.
pub struct DiffSession {
    document: DocNode,
    diff: Option<DiffState>,
}

impl DiffSession {
    /// Create a session over an already-built document tree.
    pub fn new(document: DocNode) -> Self {
        DiffSession {
            document,
            diff: None,
        }
    }

    /// Create a session from an HTML snapshot.
    pub fn from_html(html: &str) -> Result<Self, EditorError> {
        Ok(DiffSession::new(parse_document(html)?))
    }

    pub fn document(&self) -> &DocNode {
        &self.document
    }

    /// Current document serialized back to HTML for host handoff.
    pub fn document_html(&self) -> String {
        serialize_document(&self.document)
    }

    /// Compare two revisions and enter review mode on the new one.
    ///
    /// The session document becomes the new revision either way. Returns
    /// `Ok(false)` when the revisions are identical, in which case review
    /// mode is not entered. A parse failure leaves the session untouched.
    pub fn show_diff(&mut self, old_html: &str, new_html: &str) -> Result<bool, EditorError> {
        let old_doc = parse_document(old_html)?;
        let new_doc = parse_document(new_html)?;

        let records = compare(&old_doc, &new_doc);
        if records.is_empty() {
            debug!("revisions are identical, review mode not entered");
            self.document = new_doc;
            self.diff = None;
            return Ok(false);
        }

        let decorations = build_decorations(&records, &new_doc);
        debug!(
            records = records.len(),
            decorations = decorations.len(),
            "review mode entered"
        );
        self.document = new_doc;
        self.diff = Some(DiffState {
            records,
            decorations,
        });
        Ok(true)
    }

    /// Leave review mode, keeping the current document.
    pub fn hide_diff(&mut self) {
        self.diff = None;
    }

    pub fn is_active(&self) -> bool {
        self.diff.is_some()
    }

    /// Records of the displayed comparison, empty when review is off.
    pub fn records(&self) -> &[DiffRecord] {
        self.diff
            .as_ref()
            .map(|state| state.records.as_slice())
            .unwrap_or(&[])
    }

    /// Decorations of the displayed comparison, empty when review is off.
    pub fn decorations(&self) -> &[Decoration] {
        self.diff
            .as_ref()
            .map(|state| state.decorations.as_slice())
            .unwrap_or(&[])
    }

    /// Adopt an edited document and rebase the displayed decorations
    /// through the edit.
    ///
    /// Records keep describing the compared revisions; only decoration
    /// positions follow the live document.
    pub fn map_through(&mut self, document: DocNode, map: &PositionMap) {
        self.document = document;
        if let Some(state) = self.diff.as_mut() {
            state.decorations = map_decorations(&state.decorations, map);
        }
    }
}

//! # Manuscript Editor
//!
//! Editor-facing surface for document comparison.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: HTML snapshot → document tree       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ diff: old tree × new tree → records         │
//! │       records × new tree → decorations      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session state + position rebasing   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The session owns the document being displayed. Entering review mode
//! parses both revisions, runs the comparison, and keeps the resulting
//! decorations alive across subsequent edits by rebasing them through a
//! [`PositionMap`].

pub mod errors;
pub mod session;
pub mod transform;

pub use errors::EditorError;
pub use session::{DiffSession, DiffState};
pub use transform::{map_decorations, Assoc, PositionMap, ReplacedRange};

//! Error types for the editor surface

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] manuscript_parser::ParseError),
}

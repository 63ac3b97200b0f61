//! # Manuscript Parser
//!
//! HTML snapshot parsing for the comparison toolkit. Converts the HTML
//! snapshots stored by the host application into [`manuscript_model`]
//! document trees, and serializes trees back to HTML for fixtures and
//! host handoff.

pub mod error;
pub mod parser;
pub mod schema;
pub mod serializer;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use parser::parse_document;
pub use serializer::{serialize_document, Serializer};
pub use tokenizer::{tokenize, HtmlToken};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize_smoke() {
        let doc = parse_document("<p>Hello <strong>world</strong></p>").unwrap();
        assert_eq!(doc.child_count(), 1);
        assert_eq!(
            serialize_document(&doc),
            "<p>Hello <strong>world</strong></p>"
        );
    }
}

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character at {pos}")]
    LexerError { pos: usize },

    #[error("Malformed tag at {pos}: {message}")]
    MalformedTag { pos: usize, message: String },

    #[error("Unexpected end of input inside tag at {pos}")]
    UnexpectedEof { pos: usize },

    #[error("Mismatched closing tag </{found}> at {pos}: expected </{expected}>")]
    MismatchedClose {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Closing tag </{tag}> at {pos} has nothing to close")]
    StrayClose { pos: usize, tag: String },

    #[error("Unclosed <{tag}> at end of input")]
    UnclosedTag { tag: String },
}

impl ParseError {
    pub fn lexer_error(pos: usize) -> Self {
        Self::LexerError { pos }
    }

    pub fn malformed_tag(pos: usize, message: impl Into<String>) -> Self {
        Self::MalformedTag {
            pos,
            message: message.into(),
        }
    }

    pub fn unexpected_eof(pos: usize) -> Self {
        Self::UnexpectedEof { pos }
    }

    pub fn mismatched_close(pos: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::MismatchedClose {
            pos,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn stray_close(pos: usize, tag: impl Into<String>) -> Self {
        Self::StrayClose {
            pos,
            tag: tag.into(),
        }
    }

    pub fn unclosed_tag(tag: impl Into<String>) -> Self {
        Self::UnclosedTag { tag: tag.into() }
    }
}

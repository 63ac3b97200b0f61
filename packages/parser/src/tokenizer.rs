use crate::error::{ParseError, ParseResult};
use logos::{Logos, Span};

/// Token types for text content between tags
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"<!--([^-]|-[^-]|--[^>])*-->")]
#[logos(skip r"<![a-zA-Z][^>]*>")]
pub enum ContentToken<'src> {
    #[token("</")]
    CloseStart,

    #[token("<")]
    OpenStart,

    // Character references, named or numeric
    #[regex(r"&[a-zA-Z][a-zA-Z0-9]*;|&#[0-9]+;|&#[xX][0-9a-fA-F]+;", |lex| lex.slice())]
    Entity(&'src str),

    // A bare ampersand is kept as literal text
    #[token("&")]
    Ampersand,

    #[regex(r"[^<&]+", |lex| lex.slice())]
    Text(&'src str),
}

/// Token types inside a tag, between `<` and `>`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum TagToken<'src> {
    // Tag and attribute names, also unquoted word values
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_:.-]*", |lex| lex.slice())]
    Name(&'src str),

    // Unquoted numeric attribute values
    #[regex(r"[0-9]+", |lex| lex.slice())]
    Number(&'src str),

    #[regex(r#""[^"]*""#, |lex| trim_quotes(lex.slice()))]
    Quoted(&'src str),

    #[regex(r"'[^']*'", |lex| trim_quotes(lex.slice()))]
    SingleQuoted(&'src str),

    #[token("=")]
    Equals,

    #[token("/>")]
    SelfCloseEnd,

    #[token(">")]
    TagEnd,
}

fn trim_quotes(slice: &str) -> &str {
    &slice[1..slice.len() - 1]
}

/// A structural token produced by [`tokenize`]: a decoded text run, an
/// opening tag with its attributes, or a closing tag.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlToken {
    Text(String),
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
}

/// Tokenize an HTML fragment into structural tokens with source spans.
///
/// Entities are decoded, comments and doctypes are skipped, and tag and
/// attribute names are lowercased. Fails on markup the tag lexer cannot
/// make sense of, such as an unterminated tag.
pub fn tokenize(source: &str) -> ParseResult<Vec<(HtmlToken, Span)>> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut text_start = 0usize;
    let mut lexer = ContentToken::lexer(source);

    while let Some(result) = lexer.next() {
        let token = result.map_err(|_| ParseError::lexer_error(lexer.span().start))?;
        match token {
            ContentToken::Text(slice) => {
                if text.is_empty() {
                    text_start = lexer.span().start;
                }
                text.push_str(slice);
            }
            ContentToken::Entity(entity) => {
                if text.is_empty() {
                    text_start = lexer.span().start;
                }
                match decode_entity(entity) {
                    Some(ch) => text.push(ch),
                    None => text.push_str(entity),
                }
            }
            ContentToken::Ampersand => {
                if text.is_empty() {
                    text_start = lexer.span().start;
                }
                text.push('&');
            }
            ContentToken::OpenStart => {
                let start = lexer.span().start;
                flush_text(&mut text, text_start, start, &mut tokens);
                let mut tag = lexer.morph::<TagToken>();
                let open = read_open_tag(&mut tag, start)?;
                tokens.push((open, start..tag.span().end));
                lexer = tag.morph();
            }
            ContentToken::CloseStart => {
                let start = lexer.span().start;
                flush_text(&mut text, text_start, start, &mut tokens);
                let mut tag = lexer.morph::<TagToken>();
                let close = read_close_tag(&mut tag, start)?;
                tokens.push((close, start..tag.span().end));
                lexer = tag.morph();
            }
        }
    }
    flush_text(&mut text, text_start, source.len(), &mut tokens);

    Ok(tokens)
}

fn flush_text(text: &mut String, start: usize, end: usize, tokens: &mut Vec<(HtmlToken, Span)>) {
    if !text.is_empty() {
        tokens.push((HtmlToken::Text(std::mem::take(text)), start..end));
    }
}

fn read_open_tag<'src>(
    lexer: &mut logos::Lexer<'src, TagToken<'src>>,
    start: usize,
) -> ParseResult<HtmlToken> {
    let name = match lexer.next() {
        Some(Ok(TagToken::Name(name))) => name.to_ascii_lowercase(),
        Some(Ok(_)) => {
            return Err(ParseError::malformed_tag(
                lexer.span().start,
                "expected tag name after '<'",
            ))
        }
        Some(Err(_)) => return Err(ParseError::lexer_error(lexer.span().start)),
        None => return Err(ParseError::unexpected_eof(start)),
    };

    let mut attrs: Vec<(String, String)> = Vec::new();
    // Attribute name seen but not yet assigned a value
    let mut pending: Option<String> = None;

    loop {
        match lexer.next() {
            Some(Ok(TagToken::Name(word))) => {
                if let Some(key) = pending.take() {
                    attrs.push((key, String::new()));
                }
                pending = Some(word.to_ascii_lowercase());
            }
            Some(Ok(TagToken::Equals)) => {
                let key = pending.take().ok_or_else(|| {
                    ParseError::malformed_tag(lexer.span().start, "'=' without attribute name")
                })?;
                let value = read_attr_value(lexer)?;
                attrs.push((key, value));
            }
            Some(Ok(TagToken::TagEnd)) => {
                if let Some(key) = pending.take() {
                    attrs.push((key, String::new()));
                }
                return Ok(HtmlToken::Open {
                    name,
                    attrs,
                    self_closing: false,
                });
            }
            Some(Ok(TagToken::SelfCloseEnd)) => {
                if let Some(key) = pending.take() {
                    attrs.push((key, String::new()));
                }
                return Ok(HtmlToken::Open {
                    name,
                    attrs,
                    self_closing: true,
                });
            }
            Some(Ok(_)) => {
                return Err(ParseError::malformed_tag(
                    lexer.span().start,
                    "unexpected token in tag",
                ))
            }
            Some(Err(_)) => return Err(ParseError::lexer_error(lexer.span().start)),
            None => return Err(ParseError::unexpected_eof(start)),
        }
    }
}

fn read_attr_value<'src>(lexer: &mut logos::Lexer<'src, TagToken<'src>>) -> ParseResult<String> {
    match lexer.next() {
        Some(Ok(TagToken::Quoted(value))) | Some(Ok(TagToken::SingleQuoted(value))) => {
            Ok(decode_entities(value))
        }
        Some(Ok(TagToken::Name(value))) => Ok(value.to_string()),
        Some(Ok(TagToken::Number(value))) => Ok(value.to_string()),
        Some(Ok(_)) => Err(ParseError::malformed_tag(
            lexer.span().start,
            "expected attribute value after '='",
        )),
        Some(Err(_)) => Err(ParseError::lexer_error(lexer.span().start)),
        None => Err(ParseError::unexpected_eof(lexer.span().start)),
    }
}

fn read_close_tag<'src>(
    lexer: &mut logos::Lexer<'src, TagToken<'src>>,
    start: usize,
) -> ParseResult<HtmlToken> {
    let name = match lexer.next() {
        Some(Ok(TagToken::Name(name))) => name.to_ascii_lowercase(),
        Some(Ok(_)) => {
            return Err(ParseError::malformed_tag(
                lexer.span().start,
                "expected tag name after '</'",
            ))
        }
        Some(Err(_)) => return Err(ParseError::lexer_error(lexer.span().start)),
        None => return Err(ParseError::unexpected_eof(start)),
    };
    match lexer.next() {
        Some(Ok(TagToken::TagEnd)) => Ok(HtmlToken::Close(name)),
        Some(Ok(_)) => Err(ParseError::malformed_tag(
            lexer.span().start,
            "expected '>' after closing tag name",
        )),
        Some(Err(_)) => Err(ParseError::lexer_error(lexer.span().start)),
        None => Err(ParseError::unexpected_eof(start)),
    }
}

/// Decode a single character reference, `&amp;` or `&#169;` or `&#x2713;`.
fn decode_entity(entity: &str) -> Option<char> {
    let body = &entity[1..entity.len() - 1];
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00a0}'),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        "hellip" => Some('\u{2026}'),
        _ => {
            if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    }
}

/// Decode every character reference in a string, used for attribute values.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match rest.find(';') {
            Some(end) if end > 1 => match decode_entity(&rest[..=end]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

use manuscript_model::{Attrs, Mark};
use serde_json::Value;

/// What an opening tag means to the document model.
#[derive(Debug, Clone, PartialEq)]
pub enum TagClass {
    /// Opens an element node with the given type and attributes.
    Node { node_type: String, attrs: Attrs },
    /// Opens an inline formatting mark around the enclosed text.
    Mark(Mark),
    /// Structural wrapper with no model counterpart (`tbody`, bare `span`);
    /// its children are hoisted into the surrounding node.
    Transparent,
}

/// Classify an opening tag against the registered schema.
///
/// A `data-type` attribute overrides the tag name, which is how custom
/// nodes round-trip through HTML. Unregistered tags become generic
/// elements carrying their tag name as type, so parsing is total over
/// well-formed markup.
pub fn classify_tag(name: &str, attrs: &[(String, String)]) -> TagClass {
    if let Some(mark) = classify_mark(name, attrs) {
        return TagClass::Mark(mark);
    }
    if let Some(node_type) = attr_value(attrs, "data-type") {
        return TagClass::Node {
            node_type: node_type.to_string(),
            attrs: data_attrs(attrs),
        };
    }
    match name {
        "thead" | "tbody" | "tfoot" | "span" => TagClass::Transparent,
        _ => {
            let (node_type, attrs) = classify_node(name, attrs);
            TagClass::Node { node_type, attrs }
        }
    }
}

/// Tags with no closing counterpart.
pub fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

fn classify_mark(name: &str, attrs: &[(String, String)]) -> Option<Mark> {
    let mark = match name {
        "strong" | "b" => Mark::new("bold"),
        "em" | "i" => Mark::new("italic"),
        "u" => Mark::new("underline"),
        "s" | "del" => Mark::new("strike"),
        "code" => Mark::new("code"),
        "a" => {
            let mut mark = Mark::new("link");
            if let Some(href) = attr_value(attrs, "href") {
                mark = mark.with_attr("href", href);
            }
            if let Some(title) = attr_value(attrs, "title") {
                mark = mark.with_attr("title", title);
            }
            mark
        }
        _ => return None,
    };
    Some(mark)
}

fn classify_node(name: &str, attrs: &[(String, String)]) -> (String, Attrs) {
    if let Some(level) = heading_level(name) {
        let mut out = Attrs::new();
        out.insert("level".to_string(), Value::from(level));
        return ("heading".to_string(), out);
    }
    match name {
        "p" => ("paragraph".to_string(), Attrs::new()),
        "pre" => {
            let mut out = Attrs::new();
            if let Some(language) = code_language(attrs) {
                out.insert("language".to_string(), Value::String(language.to_string()));
            }
            ("code_block".to_string(), out)
        }
        "blockquote" => ("blockquote".to_string(), Attrs::new()),
        "ul" => ("bullet_list".to_string(), Attrs::new()),
        "ol" => ("ordered_list".to_string(), Attrs::new()),
        "li" => ("list_item".to_string(), Attrs::new()),
        "table" => ("table".to_string(), Attrs::new()),
        "tr" => ("table_row".to_string(), Attrs::new()),
        "td" => ("table_cell".to_string(), span_attrs(attrs)),
        "th" => ("table_header".to_string(), span_attrs(attrs)),
        "details" => ("panel".to_string(), Attrs::new()),
        "img" => {
            let mut out = Attrs::new();
            for key in ["src", "alt", "title"] {
                if let Some(value) = attr_value(attrs, key) {
                    out.insert(key.to_string(), Value::String(value.to_string()));
                }
            }
            ("image".to_string(), out)
        }
        "audio" => {
            let mut out = Attrs::new();
            if let Some(src) = attr_value(attrs, "src") {
                out.insert("src".to_string(), Value::String(src.to_string()));
            }
            ("audio".to_string(), out)
        }
        "br" => ("hard_break".to_string(), Attrs::new()),
        "hr" => ("horizontal_rule".to_string(), Attrs::new()),
        _ => (name.to_string(), string_attrs(attrs)),
    }
}

fn heading_level(name: &str) -> Option<u64> {
    let digit = name.strip_prefix('h')?;
    let level: u64 = digit.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// `data-language` wins; a `language-*` class is the form older snapshots
/// carry.
fn code_language(attrs: &[(String, String)]) -> Option<&str> {
    if let Some(language) = attr_value(attrs, "data-language") {
        return Some(language);
    }
    attr_value(attrs, "class")?
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
}

/// `colspan`/`rowspan` for table cells, kept numeric when they parse.
fn span_attrs(attrs: &[(String, String)]) -> Attrs {
    let mut out = Attrs::new();
    for key in ["colspan", "rowspan"] {
        if let Some(value) = attr_value(attrs, key) {
            match value.parse::<u64>() {
                Ok(n) => out.insert(key.to_string(), Value::from(n)),
                Err(_) => out.insert(key.to_string(), Value::String(value.to_string())),
            };
        }
    }
    out
}

/// `data-*` attributes with the prefix stripped, minus `data-type` itself.
fn data_attrs(attrs: &[(String, String)]) -> Attrs {
    let mut out = Attrs::new();
    for (key, value) in attrs {
        if key == "data-type" {
            continue;
        }
        if let Some(stripped) = key.strip_prefix("data-") {
            out.insert(stripped.to_string(), Value::String(value.clone()));
        }
    }
    out
}

fn string_attrs(attrs: &[(String, String)]) -> Attrs {
    attrs
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect()
}

fn attr_value<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_heading_levels() {
        match classify_tag("h3", &[]) {
            TagClass::Node { node_type, attrs } => {
                assert_eq!(node_type, "heading");
                assert_eq!(attrs.get("level"), Some(&Value::from(3u64)));
            }
            other => panic!("expected node, got {:?}", other),
        }
        // h7 is not a heading
        match classify_tag("h7", &[]) {
            TagClass::Node { node_type, .. } => assert_eq!(node_type, "h7"),
            other => panic!("expected generic node, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_marks() {
        assert_eq!(classify_tag("b", &[]), TagClass::Mark(Mark::new("bold")));
        assert_eq!(classify_tag("em", &[]), TagClass::Mark(Mark::new("italic")));
        let link = classify_tag("a", &owned(&[("href", "https://example.com")]));
        assert_eq!(
            link,
            TagClass::Mark(Mark::new("link").with_attr("href", "https://example.com"))
        );
    }

    #[test]
    fn test_classify_data_type_override() {
        let attrs = owned(&[("data-type", "math_inline"), ("data-latex", "x^2")]);
        match classify_tag("span", &attrs) {
            TagClass::Node { node_type, attrs } => {
                assert_eq!(node_type, "math_inline");
                assert_eq!(attrs.get("latex"), Some(&Value::String("x^2".to_string())));
                assert!(attrs.get("type").is_none());
            }
            other => panic!("expected node, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_table_cell_spans() {
        let attrs = owned(&[("colspan", "2"), ("rowspan", "3")]);
        match classify_tag("td", &attrs) {
            TagClass::Node { node_type, attrs } => {
                assert_eq!(node_type, "table_cell");
                assert_eq!(attrs.get("colspan"), Some(&Value::from(2u64)));
                assert_eq!(attrs.get("rowspan"), Some(&Value::from(3u64)));
            }
            other => panic!("expected node, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_code_block_language() {
        let data = owned(&[("data-language", "rust")]);
        match classify_tag("pre", &data) {
            TagClass::Node { node_type, attrs } => {
                assert_eq!(node_type, "code_block");
                assert_eq!(
                    attrs.get("language"),
                    Some(&Value::String("rust".to_string()))
                );
            }
            other => panic!("expected node, got {:?}", other),
        }
        // older snapshots carry the language as a class
        let class = owned(&[("class", "hljs language-python")]);
        match classify_tag("pre", &class) {
            TagClass::Node { attrs, .. } => {
                assert_eq!(
                    attrs.get("language"),
                    Some(&Value::String("python".to_string()))
                );
            }
            other => panic!("expected node, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_transparent_wrappers() {
        assert_eq!(classify_tag("tbody", &[]), TagClass::Transparent);
        assert_eq!(classify_tag("span", &[]), TagClass::Transparent);
    }

    #[test]
    fn test_void_tags() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(!is_void("p"));
    }
}

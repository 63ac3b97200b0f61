use manuscript_model::{DocNode, Mark, NodeKind};
use serde_json::Value;
use std::fmt::Write;

/// Serializer converts a document tree back to HTML.
///
/// Registered node and mark types round-trip exactly through
/// [`crate::parse_document`]. Generic elements are emitted with their type
/// string as the tag name, and marks with no registered tag are dropped
/// while their text is kept.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Serialize a document root to an HTML fragment.
    pub fn serialize(mut self, doc: &DocNode) -> String {
        for child in doc.children() {
            self.node(child);
        }
        self.output
    }

    fn node(&mut self, node: &DocNode) {
        match node {
            DocNode::Text { text, marks } => self.text_run(text, marks),
            DocNode::Element { .. } => self.element(node),
        }
    }

    fn text_run(&mut self, text: &str, marks: &[Mark]) {
        let mut open: Vec<&'static str> = Vec::new();
        for mark in marks {
            if let Some((tag, attrs)) = mark_tag(mark) {
                self.open_tag(tag, &attrs);
                open.push(tag);
            }
        }
        self.output.push_str(&escape_text(text));
        for tag in open.iter().rev() {
            let _ = write!(self.output, "</{}>", tag);
        }
    }

    fn element(&mut self, node: &DocNode) {
        match node.kind() {
            NodeKind::Doc => {
                for child in node.children() {
                    self.node(child);
                }
            }
            NodeKind::Paragraph => self.wrap("p", &[], node),
            NodeKind::Heading => {
                let level = node
                    .attr("level")
                    .and_then(Value::as_u64)
                    .filter(|level| (1..=6).contains(level))
                    .unwrap_or(1);
                let tag = format!("h{}", level);
                self.wrap(&tag, &[], node);
            }
            NodeKind::CodeBlock => {
                let mut attrs = Vec::new();
                if let Some(language) = node.attr("language").and_then(Value::as_str) {
                    attrs.push(("data-language".to_string(), language.to_string()));
                }
                self.wrap("pre", &attrs, node);
            }
            NodeKind::Blockquote => self.wrap("blockquote", &[], node),
            NodeKind::BulletList => self.wrap("ul", &[], node),
            NodeKind::OrderedList => self.wrap("ol", &[], node),
            NodeKind::ListItem => self.wrap("li", &[], node),
            NodeKind::Table => self.wrap("table", &[], node),
            NodeKind::TableRow => self.wrap("tr", &[], node),
            NodeKind::TableCell => self.wrap("td", &cell_attrs(node), node),
            NodeKind::TableHeader => self.wrap("th", &cell_attrs(node), node),
            NodeKind::Image => self.void_tag("img", &picked_attrs(node, &["src", "alt", "title"])),
            NodeKind::Audio => {
                self.open_tag("audio", &picked_attrs(node, &["src"]));
                self.output.push_str("</audio>");
            }
            NodeKind::HardBreak => self.void_tag("br", &[]),
            NodeKind::HorizontalRule => self.void_tag("hr", &[]),
            NodeKind::Panel => self.wrap("details", &[], node),
            NodeKind::PanelContent => {
                let mut attrs = vec![("data-type".to_string(), "panel_content".to_string())];
                attrs.extend(prefixed_data_attrs(node));
                self.wrap("div", &attrs, node);
            }
            NodeKind::MathInline
            | NodeKind::Attachment
            | NodeKind::LinkCard
            | NodeKind::Diagram => {
                let mut attrs = vec![("data-type".to_string(), node.node_type().to_string())];
                attrs.extend(prefixed_data_attrs(node));
                self.open_tag("span", &attrs);
                self.output.push_str("</span>");
            }
            NodeKind::Text | NodeKind::Other => {
                let attrs: Vec<(String, String)> = node
                    .attrs()
                    .map(|attrs| {
                        attrs
                            .iter()
                            .map(|(key, value)| (key.clone(), attr_string(value)))
                            .collect()
                    })
                    .unwrap_or_default();
                self.wrap(node.node_type(), &attrs, node);
            }
        }
    }

    fn wrap(&mut self, tag: &str, attrs: &[(String, String)], node: &DocNode) {
        self.open_tag(tag, attrs);
        for child in node.children() {
            self.node(child);
        }
        let _ = write!(self.output, "</{}>", tag);
    }

    fn open_tag(&mut self, tag: &str, attrs: &[(String, String)]) {
        self.output.push('<');
        self.output.push_str(tag);
        for (key, value) in attrs {
            let _ = write!(self.output, r#" {}="{}""#, key, escape_attr(value));
        }
        self.output.push('>');
    }

    fn void_tag(&mut self, tag: &str, attrs: &[(String, String)]) {
        self.open_tag(tag, attrs);
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a document root to an HTML fragment.
pub fn serialize_document(doc: &DocNode) -> String {
    Serializer::new().serialize(doc)
}

fn mark_tag(mark: &Mark) -> Option<(&'static str, Vec<(String, String)>)> {
    match mark.mark_type.as_str() {
        "bold" => Some(("strong", Vec::new())),
        "italic" => Some(("em", Vec::new())),
        "underline" => Some(("u", Vec::new())),
        "strike" => Some(("s", Vec::new())),
        "code" => Some(("code", Vec::new())),
        "link" => {
            let mut attrs = Vec::new();
            for key in ["href", "title"] {
                if let Some(value) = mark.attrs.get(key).and_then(Value::as_str) {
                    attrs.push((key.to_string(), value.to_string()));
                }
            }
            Some(("a", attrs))
        }
        _ => None,
    }
}

fn cell_attrs(node: &DocNode) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for key in ["colspan", "rowspan"] {
        if let Some(value) = node.attr(key) {
            out.push((key.to_string(), attr_string(value)));
        }
    }
    out
}

fn picked_attrs(node: &DocNode, keys: &[&str]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for key in keys {
        if let Some(value) = node.attr(key) {
            out.push((key.to_string(), attr_string(value)));
        }
    }
    out
}

fn prefixed_data_attrs(node: &DocNode) -> Vec<(String, String)> {
    node.attrs()
        .map(|attrs| {
            attrs
                .iter()
                .map(|(key, value)| (format!("data-{}", key), attr_string(value)))
                .collect()
        })
        .unwrap_or_default()
}

fn attr_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

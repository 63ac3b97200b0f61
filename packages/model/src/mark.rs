use crate::Attrs;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inline formatting applied to a text run (bold, link, code, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,

    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Mark {
            mark_type: mark_type.into(),
            attrs: Attrs::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Canonical identity of this mark: serialized type plus serialized
    /// attrs.
    ///
    /// Both portions are emitted as JSON so control characters in either
    /// are escaped. `Attrs` is BTreeMap-backed, so attr key order is
    /// already canonical and two structurally equal marks always produce
    /// the same key.
    pub fn identity_key(&self) -> String {
        let mark_type = Value::String(self.mark_type.clone());
        if self.attrs.is_empty() {
            return mark_type.to_string();
        }
        format!("{}:{}", mark_type, Value::Object(self.attrs.clone()))
    }
}

/// Order-independent set equality over canonical `(type, attrs)` identities.
pub fn marks_equal(a: &[Mark], b: &[Mark]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    mark_set_key(a) == mark_set_key(b)
}

/// Canonical key for a whole mark set: sorted identity keys joined.
///
/// Serialized JSON escapes control characters, so a newline separator can
/// never collide with key contents.
pub fn mark_set_key(marks: &[Mark]) -> String {
    let mut keys: Vec<String> = marks.iter().map(Mark::identity_key).collect();
    keys.sort();
    keys.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_equal_ignores_order() {
        let a = vec![Mark::new("bold"), Mark::new("italic")];
        let b = vec![Mark::new("italic"), Mark::new("bold")];
        assert!(marks_equal(&a, &b));
    }

    #[test]
    fn test_marks_equal_ignores_attr_key_order() {
        let a = vec![Mark::new("link")
            .with_attr("href", "https://example.com")
            .with_attr("title", "Example")];
        let b = vec![Mark::new("link")
            .with_attr("title", "Example")
            .with_attr("href", "https://example.com")];
        assert!(marks_equal(&a, &b));
    }

    #[test]
    fn test_marks_differ_by_attrs() {
        let a = vec![Mark::new("link").with_attr("href", "https://a.example")];
        let b = vec![Mark::new("link").with_attr("href", "https://b.example")];
        assert!(!marks_equal(&a, &b));
    }

    #[test]
    fn test_marks_differ_by_count() {
        let a = vec![Mark::new("bold")];
        let b = vec![Mark::new("bold"), Mark::new("bold")];
        assert!(!marks_equal(&a, &b));
    }

    #[test]
    fn test_identity_key_stable() {
        let mark = Mark::new("link")
            .with_attr("title", "t")
            .with_attr("href", "h");
        assert_eq!(mark.identity_key(), r#""link":{"href":"h","title":"t"}"#);
    }

    #[test]
    fn test_marks_with_newline_types_do_not_collide() {
        // raw types would join both sets to the same "a\nb\nc" key
        let a = vec![Mark::new("a\nb"), Mark::new("c")];
        let b = vec![Mark::new("a"), Mark::new("b\nc")];
        assert!(!marks_equal(&a, &b));
    }
}

/// Closed set of node categories the comparison engine understands.
///
/// Behavior that depends on a node's type is resolved once through this enum
/// instead of scattering string comparisons: which attributes disambiguate
/// children during alignment, which nodes hold inline content, which are
/// leaf atoms, and which suppress node-level attribute highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    CodeBlock,
    Blockquote,
    BulletList,
    OrderedList,
    ListItem,
    Table,
    TableRow,
    TableCell,
    TableHeader,
    Image,
    Audio,
    Attachment,
    MathInline,
    Diagram,
    LinkCard,
    HardBreak,
    HorizontalRule,
    Panel,
    PanelContent,
    Text,
    /// Unregistered type; compared by its raw type string.
    Other,
}

impl NodeKind {
    /// Resolve a node type string to its kind.
    pub fn of(node_type: &str) -> NodeKind {
        match node_type {
            "doc" => NodeKind::Doc,
            "paragraph" => NodeKind::Paragraph,
            "heading" => NodeKind::Heading,
            "code_block" => NodeKind::CodeBlock,
            "blockquote" => NodeKind::Blockquote,
            "bullet_list" => NodeKind::BulletList,
            "ordered_list" => NodeKind::OrderedList,
            "list_item" => NodeKind::ListItem,
            "table" => NodeKind::Table,
            "table_row" => NodeKind::TableRow,
            "table_cell" => NodeKind::TableCell,
            "table_header" => NodeKind::TableHeader,
            "image" => NodeKind::Image,
            "audio" => NodeKind::Audio,
            "attachment" => NodeKind::Attachment,
            "math_inline" => NodeKind::MathInline,
            "diagram" => NodeKind::Diagram,
            "link_card" => NodeKind::LinkCard,
            "hard_break" => NodeKind::HardBreak,
            "horizontal_rule" => NodeKind::HorizontalRule,
            "panel" => NodeKind::Panel,
            "panel_content" => NodeKind::PanelContent,
            "text" => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    /// Attributes that participate in child-alignment identity.
    ///
    /// Two children only pair up for recursive comparison when their kind
    /// matches and every key listed here has an equal value on both sides.
    pub fn match_keys(self) -> &'static [&'static str] {
        match self {
            NodeKind::Heading => &["level"],
            NodeKind::CodeBlock => &["language"],
            NodeKind::TableCell | NodeKind::TableHeader => &["colspan", "rowspan"],
            _ => &[],
        }
    }

    /// Nodes whose children are a flat run of text plus small inline atoms.
    ///
    /// These are handed to the inline content differ rather than recursed
    /// node-by-node, since their text segmentation is not stable across
    /// edits.
    pub fn is_textblock(self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph | NodeKind::Heading | NodeKind::CodeBlock
        )
    }

    /// Leaf nodes that occupy a single position and never have children.
    pub fn is_atom(self) -> bool {
        matches!(
            self,
            NodeKind::Image
                | NodeKind::Audio
                | NodeKind::Attachment
                | NodeKind::MathInline
                | NodeKind::Diagram
                | NodeKind::LinkCard
                | NodeKind::HardBreak
                | NodeKind::HorizontalRule
        )
    }

    /// Collapsible-panel family: attribute-only changes on these containers
    /// must not paint the whole node, since the highlight would swallow the
    /// nested interactive chrome.
    pub fn suppresses_node_highlight(self) -> bool {
        matches!(self, NodeKind::Panel | NodeKind::PanelContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(NodeKind::of("paragraph"), NodeKind::Paragraph);
        assert_eq!(NodeKind::of("table_cell"), NodeKind::TableCell);
        assert_eq!(NodeKind::of("text"), NodeKind::Text);
        assert_eq!(NodeKind::of("custom_widget"), NodeKind::Other);
    }

    #[test]
    fn test_match_keys() {
        assert_eq!(NodeKind::Heading.match_keys(), &["level"]);
        assert_eq!(NodeKind::TableHeader.match_keys(), &["colspan", "rowspan"]);
        assert!(NodeKind::Paragraph.match_keys().is_empty());
    }

    #[test]
    fn test_classification() {
        assert!(NodeKind::Paragraph.is_textblock());
        assert!(NodeKind::CodeBlock.is_textblock());
        assert!(!NodeKind::Blockquote.is_textblock());

        assert!(NodeKind::Image.is_atom());
        assert!(NodeKind::HardBreak.is_atom());
        assert!(!NodeKind::Paragraph.is_atom());

        assert!(NodeKind::Panel.suppresses_node_highlight());
        assert!(!NodeKind::Table.suppresses_node_highlight());
    }
}

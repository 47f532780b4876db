//! Zone types for DjVu hidden text.
//!
//! A page's hidden text is a tree of zones. Every zone has a kind and a
//! bounding rectangle in native units; leaf zones carry a text fragment.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a text zone, from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Whole page
    Page,
    /// Column of text
    Column,
    /// Region (block) inside a column
    Region,
    /// Paragraph
    #[serde(rename = "para")]
    Paragraph,
    /// Line of text
    Line,
    /// Word
    Word,
    /// Single character
    Char,
    /// Any other symbol; walked like a structural zone
    Other,
}

impl ZoneKind {
    /// Kind for a hidden-text symbol such as `page` or `word`.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::zone::ZoneKind;
    ///
    /// assert_eq!(ZoneKind::from_symbol("para"), ZoneKind::Paragraph);
    /// assert_eq!(ZoneKind::from_symbol("WORD"), ZoneKind::Word);
    /// assert_eq!(ZoneKind::from_symbol("figure"), ZoneKind::Other);
    /// ```
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.to_ascii_lowercase().as_str() {
            "page" => ZoneKind::Page,
            "column" => ZoneKind::Column,
            "region" => ZoneKind::Region,
            "para" | "paragraph" => ZoneKind::Paragraph,
            "line" => ZoneKind::Line,
            "word" => ZoneKind::Word,
            "char" => ZoneKind::Char,
            _ => ZoneKind::Other,
        }
    }

    /// Hidden-text symbol for this kind.
    pub fn symbol(self) -> &'static str {
        match self {
            ZoneKind::Page => "page",
            ZoneKind::Column => "column",
            ZoneKind::Region => "region",
            ZoneKind::Paragraph => "para",
            ZoneKind::Line => "line",
            ZoneKind::Word => "word",
            ZoneKind::Char => "char",
            ZoneKind::Other => "zone",
        }
    }

    /// Separator bits a zone contributes when selection text crosses into it:
    /// `1` asks for a space, `2` for a newline, `0` for nothing.
    pub fn delimiter_bits(self) -> u8 {
        match self {
            ZoneKind::Char => 0,
            ZoneKind::Word => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Handle of a zone inside a [`PageText`](super::PageText) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the zone in its arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contents of a zone: either a text fragment or nested zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneBody {
    /// Leaf text fragment
    Text(String),
    /// Child zones in reading order
    Children(Vec<NodeId>),
}

/// One zone of the hidden-text tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone kind
    pub kind: ZoneKind,
    /// Bounding rectangle in native units (origin bottom-left)
    pub rect: Rect,
    /// Text or children
    pub body: ZoneBody,
}

impl Zone {
    /// Text fragment if this is a leaf zone.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ZoneBody::Text(text) => Some(text),
            ZoneBody::Children(_) => None,
        }
    }

    /// Child handles (empty for leaves).
    pub fn children(&self) -> &[NodeId] {
        match &self.body {
            ZoneBody::Text(_) => &[],
            ZoneBody::Children(children) => children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip_for_known_kinds() {
        for kind in [
            ZoneKind::Page,
            ZoneKind::Column,
            ZoneKind::Region,
            ZoneKind::Paragraph,
            ZoneKind::Line,
            ZoneKind::Word,
            ZoneKind::Char,
        ] {
            assert_eq!(ZoneKind::from_symbol(kind.symbol()), kind);
        }
    }

    #[test]
    fn test_delimiter_bits() {
        assert_eq!(ZoneKind::Char.delimiter_bits(), 0);
        assert_eq!(ZoneKind::Word.delimiter_bits(), 1);
        assert_eq!(ZoneKind::Line.delimiter_bits(), 2);
        assert_eq!(ZoneKind::Page.delimiter_bits(), 2);
        assert_eq!(ZoneKind::Other.delimiter_bits(), 2);
    }

    #[test]
    fn test_zone_kind_serde_names() {
        let json = serde_json::to_string(&ZoneKind::Paragraph).unwrap();
        assert_eq!(json, "\"para\"");
        let kind: ZoneKind = serde_json::from_str("\"word\"").unwrap();
        assert_eq!(kind, ZoneKind::Word);
    }

    #[test]
    fn test_zone_accessors() {
        let leaf = Zone {
            kind: ZoneKind::Word,
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            body: ZoneBody::Text("cat".to_string()),
        };
        assert_eq!(leaf.text(), Some("cat"));
        assert!(leaf.children().is_empty());

        let parent = Zone {
            kind: ZoneKind::Line,
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            body: ZoneBody::Children(vec![NodeId(0)]),
        };
        assert_eq!(parent.text(), None);
        assert_eq!(parent.children(), &[NodeId(0)]);
    }
}

//! Owned arena of zones.

use super::types::{NodeId, Zone, ZoneBody, ZoneKind};
use super::TextTree;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::lexer::encode_string_escapes;
use crate::parser_config::ParseOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hidden text of one page, stored as an arena of zones.
///
/// Children are always stored before their parent and belong to exactly one
/// parent, so a `PageText` can never contain a cycle or a shared subtree.
/// Trees deserialized from JSON are checked for both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPageText")]
pub struct PageText {
    zones: Vec<Zone>,
    root: Option<NodeId>,
}

#[derive(Deserialize)]
struct RawPageText {
    zones: Vec<Zone>,
    root: Option<NodeId>,
}

impl TryFrom<RawPageText> for PageText {
    type Error = Error;

    fn try_from(raw: RawPageText) -> Result<Self> {
        if let Some(root) = raw.root {
            if root.index() >= raw.zones.len() {
                return Err(Error::InvalidTree(format!(
                    "root zone {} does not exist ({} zones)",
                    root.index(),
                    raw.zones.len()
                )));
            }
        }

        // Each zone may have at most one parent, otherwise a small arena can
        // describe a DAG whose walk grows exponentially.
        let mut has_parent = vec![false; raw.zones.len()];
        for (index, zone) in raw.zones.iter().enumerate() {
            for child in zone.children() {
                if child.index() >= index {
                    return Err(Error::InvalidTree(format!(
                        "zone {} refers to zone {} which is not stored before it",
                        index,
                        child.index()
                    )));
                }
                if std::mem::replace(&mut has_parent[child.index()], true) {
                    return Err(Error::InvalidTree(format!(
                        "zone {} is shared by more than one parent (again under zone {})",
                        child.index(),
                        index
                    )));
                }
            }
        }

        Ok(PageText {
            zones: raw.zones,
            root: raw.root,
        })
    }
}

impl PageText {
    /// A page without hidden text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the hidden-text S-expression of a page.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::parser_config::ParseOptions;
    /// use djvu_text::zone::PageText;
    ///
    /// let page = PageText::parse(
    ///     r#"(page 0 0 100 20 (line 0 0 100 20 (word 0 0 40 20 "cat") (word 60 0 100 20 "dog")))"#,
    ///     &ParseOptions::default(),
    /// )?;
    /// assert_eq!(page.len(), 4);
    /// # Ok::<(), djvu_text::Error>(())
    /// ```
    pub fn parse(input: &str, options: &ParseOptions) -> Result<Self> {
        crate::parser::parse_page_text(input, options)
    }

    /// Load a tree previously written with [`PageText::to_json`].
    ///
    /// A structurally broken arena is reported as [`Error::InvalidTree`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPageText = serde_json::from_str(json)?;
        PageText::try_from(raw)
    }

    /// Serialize the tree as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Root zone handle.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Zone for a handle.
    pub fn zone(&self, id: NodeId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    /// Number of zones in the arena.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the page has no zones at all.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl TextTree for PageText {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn kind(&self, node: NodeId) -> Option<ZoneKind> {
        self.zone(node).map(|zone| zone.kind)
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        self.zone(node).map(|zone| zone.rect)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.zone(node).and_then(Zone::text)
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.zone(node).map_or(0, |zone| zone.children().len())
    }

    fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.zone(node).and_then(|zone| zone.children().get(index).copied())
    }
}

impl fmt::Display for PageText {
    /// Writes the tree back in hidden-text S-expression form, one zone per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return Ok(());
        };
        let Some(root_zone) = self.zone(root) else {
            return Ok(());
        };

        write_zone_head(f, root_zone)?;
        if root_zone.text().is_some() {
            return Ok(());
        }

        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, index) = *top;
            top.1 += 1;

            let Some(child) = self.zone(node).and_then(|zone| zone.children().get(index).copied())
            else {
                f.write_str(")")?;
                stack.pop();
                continue;
            };
            let Some(zone) = self.zone(child) else {
                continue;
            };

            write!(f, "\n{:width$}", "", width = stack.len())?;
            write_zone_head(f, zone)?;
            if zone.text().is_none() {
                stack.push((child, 0));
            }
        }

        Ok(())
    }
}

/// Write `(kind x1 y1 x2 y2`, closing the zone immediately for leaves.
fn write_zone_head(f: &mut fmt::Formatter<'_>, zone: &Zone) -> fmt::Result {
    let r = zone.rect;
    write!(f, "({} {} {} {} {}", zone.kind, r.x1, r.y1, r.x2, r.y2)?;
    if let Some(text) = zone.text() {
        write!(f, " \"{}\")", encode_string_escapes(text))?;
    }
    Ok(())
}

/// Bottom-up builder for [`PageText`].
///
/// Children have to be added before the zone that contains them.
///
/// ```
/// use djvu_text::geometry::Rect;
/// use djvu_text::zone::{PageTextBuilder, ZoneKind};
///
/// let mut builder = PageTextBuilder::new();
/// let h = builder.leaf(ZoneKind::Char, Rect::new(0.0, 0.0, 10.0, 10.0), "H");
/// let i = builder.leaf(ZoneKind::Char, Rect::new(10.0, 0.0, 20.0, 10.0), "i");
/// let word = builder.zone_around(ZoneKind::Word, vec![h, i]);
/// let page = builder.build(word);
/// assert_eq!(page.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct PageTextBuilder {
    zones: Vec<Zone>,
}

impl PageTextBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf zone carrying `text`.
    pub fn leaf(&mut self, kind: ZoneKind, rect: Rect, text: impl Into<String>) -> NodeId {
        self.push(Zone {
            kind,
            rect,
            body: ZoneBody::Text(text.into()),
        })
    }

    /// Add a structural zone over previously added children.
    pub fn zone(&mut self, kind: ZoneKind, rect: Rect, children: Vec<NodeId>) -> NodeId {
        debug_assert!(children.iter().all(|child| child.index() < self.zones.len()));
        self.push(Zone {
            kind,
            rect,
            body: ZoneBody::Children(children),
        })
    }

    /// Add a structural zone whose rectangle encloses all of its children.
    pub fn zone_around(&mut self, kind: ZoneKind, children: Vec<NodeId>) -> NodeId {
        let rect = children
            .iter()
            .filter_map(|child| self.zones.get(child.index()))
            .map(|zone| zone.rect)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default();
        self.zone(kind, rect, children)
    }

    /// Number of zones added so far.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zone has been added.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Finish the tree with `root` as its top-level zone.
    pub fn build(self, root: NodeId) -> PageText {
        let root = (root.index() < self.zones.len()).then_some(root);
        PageText {
            zones: self.zones,
            root,
        }
    }

    fn push(&mut self, zone: Zone) -> NodeId {
        let id = NodeId(self.zones.len() as u32);
        self.zones.push(zone);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_dog() -> PageText {
        let mut b = PageTextBuilder::new();
        let cat = b.leaf(ZoneKind::Word, Rect::new(0.0, 0.0, 30.0, 10.0), "cat");
        let dog = b.leaf(ZoneKind::Word, Rect::new(40.0, 0.0, 70.0, 10.0), "dog");
        let line = b.zone_around(ZoneKind::Line, vec![cat, dog]);
        b.build(line)
    }

    #[test]
    fn test_builder_tree_access() {
        let page = cat_dog();
        let root = page.root().unwrap();
        assert_eq!(page.kind(root), Some(ZoneKind::Line));
        assert_eq!(page.rect(root), Some(Rect::new(0.0, 0.0, 70.0, 10.0)));
        assert_eq!(page.child_count(root), 2);

        let dog = page.child(root, 1).unwrap();
        assert_eq!(page.text(dog), Some("dog"));
        assert!(page.is_leaf(dog));
        assert!(!page.is_leaf(root));
        assert_eq!(page.child(root, 2), None);
    }

    #[test]
    fn test_unknown_handle_is_malformed() {
        let page = cat_dog();
        assert_eq!(page.kind(NodeId(99)), None);
        assert_eq!(page.rect(NodeId(99)), None);
        assert_eq!(page.child_count(NodeId(99)), 0);
    }

    #[test]
    fn test_empty_page() {
        let page = PageText::empty();
        assert!(page.is_empty());
        assert_eq!(page.root(), None);
        assert_eq!(page.to_string(), "");
    }

    #[test]
    fn test_display_writes_hidden_text() {
        let page = cat_dog();
        assert_eq!(
            page.to_string(),
            "(line 0 0 70 10\n (word 0 0 30 10 \"cat\")\n (word 40 0 70 10 \"dog\"))"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let page = cat_dog();
        let json = page.to_json().unwrap();
        let back = PageText::from_json(&json).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_json_rejects_forward_reference() {
        let json = r#"{
            "zones": [
                {"kind": "line", "rect": {"x1": 0, "y1": 0, "x2": 1, "y2": 1}, "body": {"children": [0]}}
            ],
            "root": 0
        }"#;
        let err = PageText::from_json(json).unwrap_err();
        assert!(err.to_string().contains("not stored before it"));
    }

    #[test]
    fn test_json_rejects_shared_child() {
        let json = r#"{
            "zones": [
                {"kind": "word", "rect": {"x1": 0, "y1": 0, "x2": 1, "y2": 1}, "body": {"text": "x"}},
                {"kind": "line", "rect": {"x1": 0, "y1": 0, "x2": 1, "y2": 1}, "body": {"children": [0, 0]}}
            ],
            "root": 1
        }"#;
        let err = PageText::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidTree(_)));
        assert!(err.to_string().contains("more than one parent"));
    }

    #[test]
    fn test_json_rejects_doubling_chain() {
        // Zone k holds zone k-1 twice; walking it would visit 2^40 leaves.
        let mut zones = vec![
            r#"{"kind": "word", "rect": {"x1": 0, "y1": 0, "x2": 1, "y2": 1}, "body": {"text": "x"}}"#.to_string(),
        ];
        for k in 1..40 {
            zones.push(format!(
                r#"{{"kind": "line", "rect": {{"x1": 0, "y1": 0, "x2": 1, "y2": 1}}, "body": {{"children": [{}, {}]}}}}"#,
                k - 1,
                k - 1
            ));
        }
        let json = format!(r#"{{"zones": [{}], "root": 39}}"#, zones.join(","));
        assert!(matches!(PageText::from_json(&json), Err(Error::InvalidTree(_))));
    }

    #[test]
    fn test_json_accepts_parsed_tree() {
        let page = PageText::parse(
            r#"(page 0 0 9 9 (line 0 0 9 9 (word 0 0 1 1 "a") (word 2 0 3 1 "b")) (line 0 0 9 9 (word 0 0 1 1 "c")))"#,
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(PageText::from_json(&page.to_json().unwrap()).unwrap(), page);
    }

    #[test]
    fn test_json_rejects_missing_root() {
        let json = r#"{"zones": [], "root": 3}"#;
        assert!(PageText::from_json(json).is_err());
    }
}

//! Navigation tree model.
//!
//! [`NavNode`] is the owned, nested form used while loading a tree.
//! [`NavTree`] flattens it into an arena in document order with explicit
//! parent links, so ancestor walks are a chain over ids.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Presentation kind of a navigation entry.
///
/// Kinds only affect styling and indentation, never resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavKind {
    /// A chapter without nested entries.
    #[default]
    Leaf,
    /// A section header with no page of its own.
    PartTitle,
    /// A chapter owning a nested, collapsible list.
    Section,
}

/// One entry of the table of contents, with its subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavNode {
    pub label: CompactString,

    /// Target relative to the documentation root. Absent for part titles
    /// and draft chapters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Section number rendered before the label, e.g. `3.1.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<CompactString>,

    #[serde(default)]
    pub kind: NavKind,

    /// Prefix/suffix chapters are never folded.
    #[serde(default)]
    pub affix: bool,

    /// The source opens this group before any page-specific expansion.
    #[serde(default)]
    pub expanded: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    pub fn chapter(label: impl Into<CompactString>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            ..Self::default()
        }
    }

    pub fn part_title(label: impl Into<CompactString>) -> Self {
        Self {
            label: label.into(),
            kind: NavKind::PartTitle,
            ..Self::default()
        }
    }

    pub fn draft(label: impl Into<CompactString>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn numbered(mut self, number: impl Into<CompactString>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn affixed(mut self) -> Self {
        self.affix = true;
        self
    }

    pub fn opened(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Attach nested entries, turning this node into a section.
    pub fn with_children(mut self, children: Vec<NavNode>) -> Self {
        self.children = children;
        self.normalize_kind();
        self
    }

    /// Derive `Section`/`Leaf` from the presence of children.
    ///
    /// Part titles keep their kind.
    pub fn normalize_kind(&mut self) {
        if self.kind != NavKind::PartTitle {
            self.kind = if self.children.is_empty() {
                NavKind::Leaf
            } else {
                NavKind::Section
            };
        }
        for child in &mut self.children {
            child.normalize_kind();
        }
    }
}

/// Index of an entry in a [`NavTree`]. Ids follow document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An entry stored in the arena.
#[derive(Debug, Clone)]
pub struct NavEntry {
    pub label: CompactString,
    pub href: Option<String>,
    pub number: Option<CompactString>,
    pub kind: NavKind,
    pub affix: bool,
    pub expanded: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl NavEntry {
    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of ancestors (0 for top-level entries).
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// A collapsible group: an entry with nested entries.
    #[inline]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Immutable navigation tree in document order.
#[derive(Debug, Clone, Default)]
pub struct NavTree {
    entries: Vec<NavEntry>,
    roots: Vec<NodeId>,
}

impl NavTree {
    pub fn from_nodes(nodes: Vec<NavNode>) -> Self {
        let mut tree = Self::default();
        for node in nodes {
            let id = tree.insert(node, None, 0);
            tree.roots.push(id);
        }
        tree
    }

    /// Preorder insertion keeps ids in document order.
    fn insert(&mut self, node: NavNode, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(NavEntry {
            label: node.label,
            href: node.href,
            number: node.number,
            kind: node.kind,
            affix: node.affix,
            expanded: node.expanded,
            parent,
            children: Vec::new(),
            depth,
        });

        let children: Vec<_> = node
            .children
            .into_iter()
            .map(|child| self.insert(child, Some(id), depth + 1))
            .collect();
        self.entries[id.0].children = children;
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Panics if `id` belongs to another tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> &NavEntry {
        &self.entries[id.0]
    }

    /// All ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.entries.len()).map(NodeId)
    }

    /// Entries carrying a link, in document order.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.href.as_deref().map(|href| (NodeId(i), href)))
    }

    /// Proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).parent,
        }
    }

    /// First entry (document order) whose unrewritten href equals `href`.
    pub fn find_by_href(&self, href: &str) -> Option<NodeId> {
        self.links().find(|(_, h)| *h == href).map(|(id, _)| id)
    }
}

/// Iterator over the parent chain of a node.
pub struct Ancestors<'a> {
    tree: &'a NavTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.get(id).parent;
        Some(id)
    }
}

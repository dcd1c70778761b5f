//! Scroll geometry of the sidebar.
//!
//! Every visible entry is one row of `row_height`; entries under a collapsed
//! group are not laid out.

use crate::nav::{NavTree, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayout {
    pub row_height: f64,
    pub viewport_height: f64,
}

impl Default for ScrollLayout {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            viewport_height: 600.0,
        }
    }
}

/// The scrollable box holding the rows.
#[derive(Debug, Clone)]
pub struct ScrollArea {
    layout: ScrollLayout,
    offset: f64,
    rows: usize,
}

impl ScrollArea {
    pub const fn new(layout: ScrollLayout) -> Self {
        Self {
            layout,
            offset: 0.0,
            rows: 0,
        }
    }

    #[inline]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Set the offset exactly as given, without clamping.
    #[inline]
    pub const fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    #[inline]
    pub const fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    pub fn content_height(&self) -> f64 {
        self.rows as f64 * self.layout.row_height
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_height() - self.layout.viewport_height).max(0.0)
    }

    fn row_top(&self, row: usize) -> f64 {
        row as f64 * self.layout.row_height
    }

    /// Scroll so `row` sits in the vertical center, clamped to the
    /// scrollable range.
    pub fn center_row(&mut self, row: usize) {
        let center = self.row_top(row) + self.layout.row_height / 2.0;
        self.offset = (center - self.layout.viewport_height / 2.0).clamp(0.0, self.max_offset());
    }

    /// `row` lies entirely inside the viewport.
    pub fn is_row_visible(&self, row: usize) -> bool {
        let top = self.row_top(row);
        top >= self.offset && top + self.layout.row_height <= self.offset + self.layout.viewport_height
    }
}

/// Entries laid out as rows, in document order.
pub fn visible_rows(tree: &NavTree, is_expanded: impl Fn(NodeId) -> bool) -> Vec<NodeId> {
    fn walk(tree: &NavTree, ids: &[NodeId], is_expanded: &dyn Fn(NodeId) -> bool, out: &mut Vec<NodeId>) {
        for &id in ids {
            out.push(id);
            if is_expanded(id) {
                walk(tree, tree.get(id).children(), is_expanded, out);
            }
        }
    }

    let mut rows = Vec::with_capacity(tree.len());
    walk(tree, tree.roots(), &is_expanded, &mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavNode;

    fn area(rows: usize) -> ScrollArea {
        let mut area = ScrollArea::new(ScrollLayout {
            row_height: 20.0,
            viewport_height: 100.0,
        });
        area.set_rows(rows);
        area
    }

    #[test]
    fn test_center_row_in_middle() {
        let mut area = area(50);
        area.center_row(20);
        // row 20 spans 400..420, center 410, minus half viewport
        assert_eq!(area.offset(), 360.0);
        assert!(area.is_row_visible(20));
    }

    #[test]
    fn test_center_row_clamps_at_top() {
        let mut area = area(50);
        area.center_row(1);
        assert_eq!(area.offset(), 0.0);
        assert!(area.is_row_visible(1));
    }

    #[test]
    fn test_center_row_clamps_at_bottom() {
        let mut area = area(50);
        area.center_row(49);
        assert_eq!(area.offset(), area.max_offset());
        assert_eq!(area.max_offset(), 900.0);
        assert!(area.is_row_visible(49));
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut area = area(3);
        area.center_row(2);
        assert_eq!(area.offset(), 0.0);
        assert_eq!(area.max_offset(), 0.0);
    }

    #[test]
    fn test_set_offset_is_exact() {
        let mut area = area(3);
        area.set_offset(4321.5);
        assert_eq!(area.offset(), 4321.5);
    }

    #[test]
    fn test_every_row_visible_after_centering() {
        let mut area = area(37);
        for row in 0..37 {
            area.center_row(row);
            assert!(area.is_row_visible(row), "row {row}");
        }
    }

    #[test]
    fn test_visible_rows_hide_collapsed_children() {
        let tree = NavTree::from_nodes(vec![
            NavNode::chapter("A", "a.html").with_children(vec![NavNode::chapter("A1", "a/1.html")]),
            NavNode::chapter("B", "b.html").with_children(vec![NavNode::chapter("B1", "b/1.html")]),
        ]);
        let a = tree.roots()[0];

        let rows = visible_rows(&tree, |id| id == a);
        let labels: Vec<_> = rows.iter().map(|id| tree.get(*id).label.as_str()).collect();
        assert_eq!(labels, ["A", "A1", "B"]);

        assert_eq!(visible_rows(&tree, |_| true).len(), 4);
        assert_eq!(visible_rows(&tree, |_| false).len(), 2);
    }
}

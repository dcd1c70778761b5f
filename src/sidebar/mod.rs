//! The sidebar controller.
//!
//! Attachment runs once per page load, start to finish:
//!
//! 1. materialize the tree (rewrite relative links with `root_prefix`)
//! 2. resolve the active entry
//! 3. expand its ancestor groups
//! 4. restore the saved scroll offset, or center the active entry
//!
//! After attachment the [`Sidebar`] reacts to link clicks (saving the scroll
//! offset for the next page load) and toggle clicks.

mod render;
mod resolve;
mod scroll;

pub use render::render_html;
pub use resolve::{ResolvedState, expansion_for, find_active};
pub use scroll::{ScrollArea, ScrollLayout, visible_rows};

use crate::log;
use crate::nav::{NavTree, NodeId};
use crate::session::{ScrollHandoff, SessionStore};
use crate::utils::link::rewrite_href;
use crate::utils::url::{normalize_location, resolve};
use anyhow::Result;
use compact_str::CompactString;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::borrow::Cow;

/// Default session storage key of the scroll offset.
pub const SCROLL_KEY: &str = "sidebar-scroll";

/// Behavior switches of the sidebar.
#[derive(Debug, Clone)]
pub struct SidebarOptions {
    /// Non-affixed groups start collapsed.
    pub fold: bool,
    /// The root `index.html` aliases the first entry.
    pub alias_first_entry: bool,
    pub storage_key: CompactString,
    pub layout: ScrollLayout,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            fold: true,
            alias_first_entry: true,
            storage_key: SCROLL_KEY.into(),
            layout: ScrollLayout::default(),
        }
    }
}

/// What the hosting page tells the sidebar about itself.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Absolute URL of the current page, possibly with a fragment.
    pub location: &'a str,
    /// Relative path from the current page back to the documentation root.
    pub root_prefix: &'a str,
}

/// Owns the navigation tree until it is attached to a page.
#[derive(Debug, Clone)]
pub struct SidebarController {
    tree: NavTree,
    options: SidebarOptions,
}

impl SidebarController {
    pub const fn new(tree: NavTree, options: SidebarOptions) -> Self {
        Self { tree, options }
    }

    /// Run the page-load sequence and hand back the live sidebar.
    pub fn attach<'s>(self, page: &PageContext<'_>, store: &'s dyn SessionStore) -> Sidebar<'s> {
        let Self { tree, options } = self;

        let targets: Vec<Option<String>> = tree
            .ids()
            .map(|id| {
                tree.get(id)
                    .href
                    .as_deref()
                    .map(|href| rewrite_href(href, page.root_prefix).into_owned())
            })
            .collect();

        let resolved = ResolvedState::resolve(&tree, &targets, page, options.alias_first_entry);

        let mut expanded: FxHashSet<NodeId> = tree
            .ids()
            .filter(|id| {
                let entry = tree.get(*id);
                entry.is_group() && (entry.affix || entry.expanded || !options.fold)
            })
            .collect();
        expanded.extend(resolved.expanded.iter().copied());

        let mut sidebar = Sidebar {
            handoff: ScrollHandoff::new(store, options.storage_key.clone()),
            scroll: ScrollArea::new(options.layout),
            location: page.location.to_owned(),
            tree,
            targets,
            resolved,
            expanded,
        };
        sidebar.relayout();

        match sidebar.resolved.active {
            Some(id) => log!("sidebar"; "active entry: {}", sidebar.tree.get(id).label),
            None => {
                let location = normalize_location(page.location);
                let shown = urlencoding::decode(&location).unwrap_or(Cow::Borrowed(location.as_str()));
                log!("sidebar"; "no entry for {shown}");
            }
        }

        if let Some(offset) = sidebar.handoff.take() {
            sidebar.scroll.set_offset(offset);
            log!("sidebar"; "restored scroll offset {offset}");
        } else if let Some(row) = sidebar.active_row() {
            sidebar.scroll.center_row(row);
            log!("sidebar"; "centered active entry at offset {}", sidebar.scroll.offset());
        }

        sidebar
    }
}

/// A sidebar attached to one page load.
pub struct Sidebar<'s> {
    tree: NavTree,
    /// Rewritten link targets, indexed by `NodeId`.
    targets: Vec<Option<String>>,
    resolved: ResolvedState,
    expanded: FxHashSet<NodeId>,
    scroll: ScrollArea,
    handoff: ScrollHandoff<'s>,
    location: String,
}

impl Sidebar<'_> {
    #[inline]
    pub const fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Link target after root-prefix rewriting.
    #[inline]
    pub fn target(&self, id: NodeId) -> Option<&str> {
        self.targets[id.index()].as_deref()
    }

    #[inline]
    pub const fn resolved(&self) -> &ResolvedState {
        &self.resolved
    }

    #[inline]
    pub const fn active(&self) -> Option<NodeId> {
        self.resolved.active
    }

    #[inline]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    #[inline]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub const fn scroll_area(&self) -> &ScrollArea {
        &self.scroll
    }

    /// User scrolling inside the sidebar.
    pub const fn scroll_to(&mut self, offset: f64) {
        self.scroll.set_offset(offset);
    }

    pub fn visible_rows(&self) -> Vec<NodeId> {
        visible_rows(&self.tree, |id| self.is_expanded(id))
    }

    /// Row index of the active entry, if it is laid out.
    pub fn active_row(&self) -> Option<usize> {
        let active = self.active()?;
        self.visible_rows().iter().position(|id| *id == active)
    }

    /// A click on the entry's link: save the scroll offset for the next page
    /// load and return the URL the browser navigates to.
    ///
    /// Entries without a link (part titles, drafts) ignore clicks.
    pub fn click(&self, id: NodeId) -> Option<String> {
        let target = self.target(id)?;
        self.handoff.send(self.scroll.offset());
        Some(resolve(&self.location, target).unwrap_or_else(|| target.to_owned()))
    }

    /// Flip the expanded state of a group; returns the new state.
    ///
    /// Entries without children carry no toggle and are left alone.
    pub fn toggle(&mut self, id: NodeId) -> Option<bool> {
        if !self.tree.get(id).is_group() {
            return None;
        }
        let expanded = if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        };
        self.relayout();
        Some(expanded)
    }

    fn relayout(&mut self) {
        let rows = self.visible_rows().len();
        self.scroll.set_rows(rows);
    }

    pub fn render_html(&self) -> Result<String> {
        render_html(self)
    }

    pub fn view(&self) -> SidebarView {
        let entry = |id: NodeId| {
            let e = self.tree.get(id);
            EntryView {
                label: e.label.to_string(),
                href: e.href.clone(),
                target: self.target(id).map(str::to_owned),
                depth: e.depth(),
            }
        };

        SidebarView {
            location: normalize_location(&self.location),
            active: self.active().map(entry),
            expanded: self.resolved.expanded.iter().map(|id| entry(*id)).collect(),
            scroll_offset: self.scroll.offset(),
        }
    }
}

/// Serializable summary of an attached sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    pub location: String,
    pub active: Option<EntryView>,
    /// Groups opened to reveal the active entry, nearest first.
    pub expanded: Vec<EntryView>,
    pub scroll_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub label: String,
    pub href: Option<String>,
    pub target: Option<String>,
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavNode;
    use crate::session::MemoryStore;

    const BOOK: &str = "https://docs.example.com/book/";

    fn tree() -> NavTree {
        let mut chapters = vec![
            NavNode::chapter("Introduction", "introduction.html").affixed(),
            NavNode::draft("User Guide").with_children(vec![
                NavNode::chapter("Start", "guide/start.html"),
                NavNode::chapter("Walker", "guide/walker.html").with_children(vec![
                    NavNode::chapter("Steps", "guide/walker/steps.html"),
                ]),
            ]),
            NavNode::chapter("Appendix", "appendix.html")
                .affixed()
                .with_children(vec![NavNode::chapter("Glossary", "appendix/glossary.html")]),
        ];
        // Enough filler to make the sidebar scroll
        chapters.extend((0..60).map(|i| NavNode::chapter(format!("Chapter {i}"), format!("ch{i}.html"))));
        chapters.push(NavNode::chapter("Last", "last.html"));
        NavTree::from_nodes(chapters)
    }

    fn options() -> SidebarOptions {
        SidebarOptions {
            layout: ScrollLayout {
                row_height: 20.0,
                viewport_height: 200.0,
            },
            ..SidebarOptions::default()
        }
    }

    fn attach<'s>(store: &'s MemoryStore, page: &str, root_prefix: &str) -> Sidebar<'s> {
        let location = format!("{BOOK}{page}");
        SidebarController::new(tree(), options()).attach(
            &PageContext {
                location: &location,
                root_prefix,
            },
            store,
        )
    }

    fn id_of(sidebar: &Sidebar<'_>, href: &str) -> NodeId {
        sidebar.tree().find_by_href(href).unwrap()
    }

    // ------------------------------------------------------------------------
    // Attachment
    // ------------------------------------------------------------------------

    #[test]
    fn test_user_guide_scenario() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "guide/start.html", "../");

        let start = id_of(&sidebar, "guide/start.html");
        let intro = id_of(&sidebar, "introduction.html");
        let user_guide = sidebar.tree().get(start).parent().unwrap();

        assert_eq!(sidebar.active(), Some(start));
        assert_ne!(sidebar.active(), Some(intro));
        assert!(sidebar.is_expanded(user_guide));
    }

    #[test]
    fn test_default_fold_state() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "introduction.html", "");

        let walker = id_of(&sidebar, "guide/walker.html");
        let user_guide = sidebar.tree().get(walker).parent().unwrap();
        let appendix = id_of(&sidebar, "appendix.html");

        assert!(!sidebar.is_expanded(user_guide));
        assert!(!sidebar.is_expanded(walker));
        // Affixed groups never fold
        assert!(sidebar.is_expanded(appendix));
    }

    #[test]
    fn test_fold_disabled_expands_everything() {
        let store = MemoryStore::new();
        let location = format!("{BOOK}introduction.html");
        let sidebar = SidebarController::new(
            tree(),
            SidebarOptions {
                fold: false,
                ..options()
            },
        )
        .attach(&PageContext { location: &location, root_prefix: "" }, &store);

        let tree = sidebar.tree();
        assert!(tree.ids().filter(|id| tree.get(*id).is_group()).all(|id| sidebar.is_expanded(id)));
    }

    #[test]
    fn test_groups_opened_by_source_stay_open() {
        let store = MemoryStore::new();
        let location = format!("{BOOK}introduction.html");
        let tree = NavTree::from_nodes(vec![
            NavNode::chapter("Introduction", "introduction.html"),
            NavNode::chapter("Walker", "walker.html")
                .opened()
                .with_children(vec![NavNode::chapter("Steps", "walker/steps.html")]),
            NavNode::chapter("Reference", "reference.html")
                .with_children(vec![NavNode::chapter("API", "reference/api.html")]),
        ]);
        let sidebar = SidebarController::new(tree, options())
            .attach(&PageContext { location: &location, root_prefix: "" }, &store);

        assert!(sidebar.is_expanded(id_of(&sidebar, "walker.html")));
        assert!(!sidebar.is_expanded(id_of(&sidebar, "reference.html")));
    }

    #[test]
    fn test_targets_are_rewritten() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "guide/walker/steps.html", "../../");
        let intro = id_of(&sidebar, "introduction.html");
        assert_eq!(sidebar.target(intro), Some("../../introduction.html"));
    }

    // ------------------------------------------------------------------------
    // Scroll continuity
    // ------------------------------------------------------------------------

    #[test]
    fn test_scroll_round_trip_across_page_loads() {
        let store = MemoryStore::new();

        let mut first = attach(&store, "introduction.html", "");
        first.scroll_to(437.0);
        let last = id_of(&first, "last.html");
        let next = first.click(last).unwrap();
        assert_eq!(next, format!("{BOOK}last.html"));
        drop(first);

        let second = attach(&store, "last.html", "");
        assert_eq!(second.scroll_offset(), 437.0);
        assert_eq!(store.get(SCROLL_KEY), None);
    }

    #[test]
    fn test_stored_offset_is_consumed_once() {
        let store = MemoryStore::new();
        store.set(SCROLL_KEY, "120".into());

        let restored = attach(&store, "ch1.html", "");
        assert_eq!(restored.scroll_offset(), 120.0);
        drop(restored);

        // Next load without a click falls back to centering
        let fresh = attach(&store, "ch1.html", "");
        assert_ne!(fresh.scroll_offset(), 120.0);
    }

    #[test]
    fn test_without_stored_offset_active_is_in_view() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "ch40.html", "");

        let row = sidebar.active_row().unwrap();
        assert!(sidebar.scroll_offset() > 0.0);
        assert!(sidebar.scroll_area().is_row_visible(row));
    }

    #[test]
    fn test_nested_active_is_in_view() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "guide/walker/steps.html", "../../");
        let row = sidebar.active_row().unwrap();
        assert!(sidebar.scroll_area().is_row_visible(row));
    }

    #[test]
    fn test_no_active_no_stored_offset_stays_at_top() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "unlisted.html", "");
        assert_eq!(sidebar.active(), None);
        assert_eq!(sidebar.scroll_offset(), 0.0);
    }

    #[test]
    fn test_click_on_part_without_link_saves_nothing() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "introduction.html", "");
        let walker = id_of(&sidebar, "guide/walker.html");
        let user_guide = sidebar.tree().get(walker).parent().unwrap();

        assert_eq!(sidebar.click(user_guide), None);
        assert_eq!(store.get(SCROLL_KEY), None);
    }

    #[test]
    fn test_click_resolves_against_current_page() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "guide/walker/steps.html", "../../");
        let intro = id_of(&sidebar, "introduction.html");
        assert_eq!(
            sidebar.click(intro).as_deref(),
            Some("https://docs.example.com/book/introduction.html")
        );
    }

    // ------------------------------------------------------------------------
    // Toggle interaction
    // ------------------------------------------------------------------------

    #[test]
    fn test_toggle_flips_group() {
        let store = MemoryStore::new();
        let mut sidebar = attach(&store, "introduction.html", "");
        let walker = id_of(&sidebar, "guide/walker.html");
        let user_guide = sidebar.tree().get(walker).parent().unwrap();
        let rows = sidebar.visible_rows().len();

        assert_eq!(sidebar.toggle(user_guide), Some(true));
        assert!(sidebar.is_expanded(user_guide));
        assert_eq!(sidebar.visible_rows().len(), rows + 2);

        assert_eq!(sidebar.toggle(user_guide), Some(false));
        assert!(!sidebar.is_expanded(user_guide));
        assert_eq!(sidebar.visible_rows().len(), rows);
    }

    #[test]
    fn test_toggle_does_not_touch_resolution() {
        let store = MemoryStore::new();
        let mut sidebar = attach(&store, "guide/start.html", "../");
        let start = id_of(&sidebar, "guide/start.html");
        let user_guide = sidebar.tree().get(start).parent().unwrap();

        sidebar.toggle(user_guide);
        assert!(!sidebar.is_expanded(user_guide));
        assert_eq!(sidebar.active(), Some(start));
        assert_eq!(sidebar.resolved().expanded.as_slice(), &[user_guide]);
    }

    #[test]
    fn test_toggle_on_leaf_is_ignored() {
        let store = MemoryStore::new();
        let mut sidebar = attach(&store, "introduction.html", "");
        let intro = id_of(&sidebar, "introduction.html");
        assert_eq!(sidebar.toggle(intro), None);
        assert!(!sidebar.is_expanded(intro));
    }

    // ------------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------------

    #[test]
    fn test_view_serializes() {
        let store = MemoryStore::new();
        let sidebar = attach(&store, "guide/walker/steps.html#filters", "../../");
        let view = sidebar.view();

        assert_eq!(view.location, format!("{BOOK}guide/walker/steps.html"));
        let active = view.active.as_ref().unwrap();
        assert_eq!(active.label, "Steps");
        assert_eq!(active.depth, 2);
        assert_eq!(active.target.as_deref(), Some("../../guide/walker/steps.html"));

        let expanded: Vec<_> = view.expanded.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(expanded, ["Walker", "User Guide"]);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["active"]["label"], "Steps");
    }
}

//! Page loads driven from the command line.
//!
//! Each function attaches the sidebar to one page, performs the requested
//! interaction and returns what a user would observe.

use crate::cli::{Format, PageArgs};
use crate::config::TocbarConfig;
use crate::nav::{NavTree, NodeId};
use crate::session::SessionStore;
use crate::sidebar::{PageContext, Sidebar, SidebarController};
use anyhow::{Result, bail};
use std::borrow::Cow;

/// Attach a sidebar for `page`, taking any pending scroll offset from `store`.
pub fn load<'s>(
    tree: NavTree,
    config: &TocbarConfig,
    page: &PageArgs,
    store: &'s dyn SessionStore,
) -> Sidebar<'s> {
    let root_prefix = page.root_prefix();
    let context = PageContext {
        location: &page.location,
        root_prefix: &root_prefix,
    };
    SidebarController::new(tree, config.sidebar_options()).attach(&context, store)
}

pub fn render(sidebar: &Sidebar<'_>, format: Format) -> Result<String> {
    match format {
        Format::Html => sidebar.render_html(),
        Format::Json => Ok(serde_json::to_string_pretty(&sidebar.view())?),
    }
}

pub fn resolve(sidebar: &Sidebar<'_>) -> Result<String> {
    render(sidebar, Format::Json)
}

/// Scroll (if asked), click the entry linking to `href`, and return the URL
/// the browser follows.
pub fn click(sidebar: &mut Sidebar<'_>, href: &str, scroll: Option<f64>) -> Result<String> {
    let id = find_entry(sidebar, href)?;
    if let Some(offset) = scroll {
        sidebar.scroll_to(offset);
    }
    match sidebar.click(id) {
        Some(url) => {
            crate::log!("session"; "saved scroll offset {}", sidebar.scroll_offset());
            Ok(url)
        }
        None => bail!("entry `{href}` has no link"),
    }
}

/// Flip the group linking to `href` and return the re-rendered sidebar.
pub fn toggle(sidebar: &mut Sidebar<'_>, href: &str) -> Result<String> {
    let id = find_entry(sidebar, href)?;
    match sidebar.toggle(id) {
        Some(expanded) => {
            let state = if expanded { "expanded" } else { "collapsed" };
            crate::log!("sidebar"; "{} {state}", sidebar.tree().get(id).label);
            sidebar.render_html()
        }
        None => bail!("entry `{href}` has no nested entries to toggle"),
    }
}

/// Match `href` against the links as written in the tree, then as rewritten,
/// then with percent-encoding undone on both sides.
fn find_entry(sidebar: &Sidebar<'_>, href: &str) -> Result<NodeId> {
    let tree = sidebar.tree();
    let wanted = decode(href);
    tree.find_by_href(href)
        .or_else(|| tree.ids().find(|id| sidebar.target(*id) == Some(href)))
        .or_else(|| {
            tree.links()
                .find(|(_, link)| decode(link) == wanted)
                .map(|(id, _)| id)
        })
        .ok_or_else(|| anyhow::anyhow!("no navigation entry links to `{href}`"))
}

fn decode(href: &str) -> Cow<'_, str> {
    urlencoding::decode(href).unwrap_or(Cow::Borrowed(href))
}

//! HTML output of an attached sidebar.
//!
//! Uses mdBook's class vocabulary, so existing sidebar stylesheets apply:
//! nested lists follow their chapter item as `<li><ol class="section">`.

use super::Sidebar;
use crate::nav::{NavKind, NodeId};
use crate::utils::xml::{
    XmlWriter, create_xml_writer, into_string, write_end, write_start, write_text,
    write_text_element,
};
use anyhow::Result;

/// Content of the toggle control placed on every group item.
const TOGGLE_GLYPH: &str = "❱";

pub fn render_html(sidebar: &Sidebar<'_>) -> Result<String> {
    let mut writer = create_xml_writer();
    write_list(&mut writer, sidebar, sidebar.tree().roots(), "chapter")?;
    into_string(writer)
}

fn write_list(writer: &mut XmlWriter, sidebar: &Sidebar<'_>, ids: &[NodeId], class: &str) -> Result<()> {
    write_start(writer, "ol", &[("class", class)])?;
    for &id in ids {
        write_item(writer, sidebar, id)?;
    }
    write_end(writer, "ol")
}

fn write_item(writer: &mut XmlWriter, sidebar: &Sidebar<'_>, id: NodeId) -> Result<()> {
    let entry = sidebar.tree().get(id);

    if entry.kind == NavKind::PartTitle {
        return write_text_element(writer, "li", &[("class", "part-title")], &entry.label);
    }

    let class = item_class(sidebar, id);
    write_start(writer, "li", &[("class", class.as_str())])?;

    let active = sidebar.active() == Some(id);
    match sidebar.target(id) {
        Some(target) if active => write_start(writer, "a", &[("href", target), ("class", "active")])?,
        Some(target) => write_start(writer, "a", &[("href", target)])?,
        None => write_start(writer, "div", &[])?,
    }
    if let Some(number) = &entry.number {
        write_text_element(writer, "strong", &[("aria-hidden", "true")], number)?;
        write_text(writer, " ")?;
    }
    write_text(writer, &entry.label)?;
    write_end(writer, if sidebar.target(id).is_some() { "a" } else { "div" })?;

    if entry.is_group() {
        write_start(writer, "a", &[("class", "toggle")])?;
        write_text_element(writer, "div", &[], TOGGLE_GLYPH)?;
        write_end(writer, "a")?;
    }
    write_end(writer, "li")?;

    if entry.is_group() {
        write_start(writer, "li", &[])?;
        write_list(writer, sidebar, entry.children(), "section")?;
        write_end(writer, "li")?;
    }
    Ok(())
}

fn item_class(sidebar: &Sidebar<'_>, id: NodeId) -> String {
    let mut class = String::from("chapter-item");
    if sidebar.tree().get(id).affix {
        class.push_str(" affix");
    }
    // The active item is marked even when it is a leaf
    if sidebar.is_expanded(id) || sidebar.active() == Some(id) {
        class.push_str(" expanded");
    }
    class
}

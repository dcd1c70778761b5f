//! mdBook-style navigation markup.
//!
//! ```html
//! <ol class="chapter">
//!   <li class="chapter-item affix "><a href="introduction.html">Introduction</a></li>
//!   <li class="part-title">User Guide</li>
//!   <li class="chapter-item "><a href="guide/walker.html"><strong aria-hidden="true">1.</strong> Walker</a></li>
//!   <li><ol class="section">
//!     <li class="chapter-item "><a href="guide/walker/steps.html"><strong aria-hidden="true">1.1.</strong> Steps</a></li>
//!   </ol></li>
//! </ol>
//! ```
//!
//! A `<li>` that only wraps an `<ol>` holds the children of the chapter item
//! before it. Items may be left unclosed: a new `<li>` closes the open one,
//! as in HTML.

use super::error::NavError;
use super::node::{NavKind, NavNode};
use crate::utils::xml::{attr_value, create_xml_reader, has_class, resolve_entity};
use anyhow::Result;
use quick_xml::events::{BytesStart, Event};
use std::str;

/// Parse a navigation fragment into top-level nodes.
pub fn parse_markup(content: &str) -> Result<Vec<NavNode>> {
    let mut reader = create_xml_reader(content.as_bytes());
    let mut parser = TocParser::default();

    loop {
        let event = reader.read_event().map_err(|e| NavError::Markup {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;
        match event {
            Event::Start(elem) => parser.start(&elem, false)?,
            Event::Empty(elem) => parser.start(&elem, true)?,
            Event::End(elem) => parser.end(elem.name().as_ref()),
            Event::Text(text) => parser.text(str::from_utf8(&text)?),
            Event::CData(text) => parser.text(str::from_utf8(&text)?),
            Event::GeneralRef(name) => parser.text(&resolve_entity(str::from_utf8(&name)?)),
            Event::Eof => break,
            _ => {}
        }
    }

    let mut roots = parser.finish().ok_or(NavError::NoList)?;
    for node in &mut roots {
        node.normalize_kind();
    }
    Ok(roots)
}

/// An open `<ol>` or `<li>`.
enum Frame {
    List(Vec<NavNode>),
    Item(ItemBuilder),
}

#[derive(Default)]
struct ItemBuilder {
    part_title: bool,
    affix: bool,
    expanded: bool,
    href: Option<String>,
    label: String,
    number: String,
    nested: Option<Vec<NavNode>>,
}

impl ItemBuilder {
    fn into_node(self) -> Option<NavNode> {
        let label = self.label.split_whitespace().collect::<Vec<_>>().join(" ");

        if self.part_title {
            return (!label.is_empty()).then(|| NavNode::part_title(label));
        }
        if label.is_empty() && self.href.is_none() {
            return None;
        }

        let number = self.number.trim();
        Some(NavNode {
            label: label.into(),
            href: self.href,
            number: (!number.is_empty()).then(|| number.into()),
            affix: self.affix,
            expanded: self.expanded,
            children: self.nested.unwrap_or_default(),
            ..NavNode::default()
        })
    }

    fn is_wrapper(&self) -> bool {
        !self.part_title && self.href.is_none() && self.label.trim().is_empty()
    }
}

#[derive(Default)]
struct TocParser {
    stack: Vec<Frame>,
    roots: Option<Vec<NavNode>>,
    in_number: bool,
    /// Nesting depth inside an `<a class="toggle">`, whose content is chrome.
    skip_depth: usize,
}

impl TocParser {
    fn top_item(&mut self) -> Option<&mut ItemBuilder> {
        match self.stack.last_mut() {
            Some(Frame::Item(item)) => Some(item),
            _ => None,
        }
    }

    fn start(&mut self, elem: &BytesStart<'_>, empty: bool) -> Result<()> {
        if self.skip_depth > 0 {
            if !empty {
                self.skip_depth += 1;
            }
            return Ok(());
        }

        match elem.name().as_ref() {
            b"ol" if !empty => self.stack.push(Frame::List(Vec::new())),
            b"li" if !empty => {
                if self.top_item().is_some() {
                    self.close_item();
                }
                self.stack.push(Frame::Item(ItemBuilder {
                    part_title: has_class(elem, "part-title"),
                    affix: has_class(elem, "affix"),
                    expanded: has_class(elem, "expanded"),
                    ..ItemBuilder::default()
                }));
            }
            b"a" if has_class(elem, "toggle") => {
                if !empty {
                    self.skip_depth = 1;
                }
            }
            b"a" => {
                let href = attr_value(elem, b"href")?;
                if let Some(item) = self.top_item() {
                    item.href = href.filter(|h| !h.is_empty());
                }
            }
            b"strong" if !empty => self.in_number = true,
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        match name {
            b"strong" => self.in_number = false,
            b"li" => {
                if self.top_item().is_some() {
                    self.close_item();
                }
            }
            b"ol" => {
                if self.top_item().is_some() {
                    self.close_item();
                }
                if let Some(Frame::List(nodes)) = self.stack.last_mut() {
                    let nodes = std::mem::take(nodes);
                    self.stack.pop();
                    self.attach_list(nodes);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let in_number = self.in_number;
        if self.skip_depth > 0 {
            return;
        }
        if let Some(item) = self.top_item() {
            if in_number {
                item.number.push_str(text);
            } else {
                item.label.push_str(text);
            }
        }
    }

    /// Hand a closed list to the enclosing item, or make it top-level.
    fn attach_list(&mut self, nodes: Vec<NavNode>) {
        match self.top_item() {
            Some(item) => item.nested.get_or_insert_with(Vec::new).extend(nodes),
            None => self.roots.get_or_insert_with(Vec::new).extend(nodes),
        }
    }

    fn close_item(&mut self) {
        let Some(Frame::Item(item)) = self.stack.pop() else {
            return;
        };
        self.in_number = false;

        let Some(Frame::List(list)) = self.stack.last_mut() else {
            // An item outside any list carries nothing we can place.
            return;
        };

        if item.is_wrapper() {
            let Some(children) = item.nested else {
                return;
            };
            match list.last_mut() {
                Some(prev) if prev.kind != NavKind::PartTitle => {
                    prev.children.extend(children);
                }
                _ => list.extend(children),
            }
            return;
        }

        if let Some(node) = item.into_node() {
            list.push(node);
        }
    }

    /// Close whatever the fragment left open.
    fn finish(mut self) -> Option<Vec<NavNode>> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Item(item) => {
                    self.stack.push(Frame::Item(item));
                    self.close_item();
                }
                Frame::List(nodes) => self.attach_list(nodes),
            }
        }
        self.roots
    }
}

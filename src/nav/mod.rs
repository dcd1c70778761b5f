//! Navigation tree: model and loaders.
//!
//! | Extension | Loader |
//! |-----------|--------|
//! | `.html`, `.htm` | [`markup::parse_markup`] |
//! | `.toml` | [`NavDocument::from_toml`] |
//! | `.json` | [`NavDocument::from_json`] |

mod data;
mod error;
mod markup;
mod node;

pub use data::NavDocument;
pub use error::NavError;
pub use markup::parse_markup;
pub use node::{Ancestors, NavEntry, NavKind, NavNode, NavTree, NodeId};

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Load a navigation tree from a file, picking the loader by extension.
pub fn load_tree(path: &Path) -> Result<NavTree> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let content =
        fs::read_to_string(path).map_err(|err| NavError::Io(path.to_path_buf(), err))?;

    let nodes = match ext.as_deref() {
        Some("html" | "htm") => parse_markup(&content),
        Some("toml") => NavDocument::from_toml(&content).map(|doc| doc.chapters),
        Some("json") => NavDocument::from_json(&content).map(|doc| doc.chapters),
        _ => return Err(NavError::UnsupportedFormat(path.to_path_buf()).into()),
    }
    .with_context(|| format!("failed to load navigation from `{}`", path.display()))?;

    crate::log!("nav"; "loaded {} entries from {}", count(&nodes), path.display());
    Ok(NavTree::from_nodes(nodes))
}

fn count(nodes: &[NavNode]) -> usize {
    nodes.iter().map(|n| 1 + count(&n.children)).sum()
}

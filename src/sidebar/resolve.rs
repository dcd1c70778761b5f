//! Active-entry resolution and ancestor expansion.

use super::PageContext;
use crate::nav::{NavTree, NodeId};
use crate::utils::url::{normalize_location, resolve};
use smallvec::SmallVec;

/// Derived per page load, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedState {
    /// The entry for the current page, if the tree lists it.
    pub active: Option<NodeId>,
    /// Groups opened so `active` is reachable: the active entry itself when
    /// it is a group, then every ancestor, nearest first.
    pub expanded: SmallVec<[NodeId; 8]>,
}

impl ResolvedState {
    /// `targets` holds each entry's rewritten link target, indexed by id.
    pub fn resolve(
        tree: &NavTree,
        targets: &[Option<String>],
        page: &PageContext<'_>,
        alias_first_entry: bool,
    ) -> Self {
        let active = find_active(tree, targets, page, alias_first_entry);
        let expanded = active
            .map(|id| expansion_for(tree, id))
            .unwrap_or_default();
        Self { active, expanded }
    }
}

/// Scan links in document order; first match wins.
///
/// A link matches when its resolved URL equals the normalized location, or
/// when it is the first link, the page sits at the documentation root
/// (`root_prefix` empty) and the location is an `index.html`: the root index
/// aliases the first chapter.
pub fn find_active(
    tree: &NavTree,
    targets: &[Option<String>],
    page: &PageContext<'_>,
    alias_first_entry: bool,
) -> Option<NodeId> {
    let current = normalize_location(page.location);
    let root_alias =
        alias_first_entry && page.root_prefix.is_empty() && current.ends_with("/index.html");

    tree.links()
        .enumerate()
        .find(|(i, (id, _))| {
            let resolved = targets[id.index()]
                .as_deref()
                .and_then(|target| resolve(page.location, target));
            resolved.as_deref() == Some(current.as_str()) || (*i == 0 && root_alias)
        })
        .map(|(_, (id, _))| id)
}

/// Groups to open for `active`.
pub fn expansion_for(tree: &NavTree, active: NodeId) -> SmallVec<[NodeId; 8]> {
    let own = tree.get(active).is_group().then_some(active);
    own.into_iter()
        .chain(tree.ancestors(active).filter(|id| tree.get(*id).is_group()))
        .collect()
}

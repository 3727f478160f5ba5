//! Reduce a dependency tree to its unique package identities

use crate::tree::DependencyTree;
use crate::types::Identity;
use std::collections::HashSet;

/// Collect every `(name, version)` pair below the root.
///
/// The root is the audited project, not a dependency, so it is never part of
/// the result. Packages appearing at several tree positions collapse to one
/// entry.
pub fn flatten_dependency_tree(tree: &DependencyTree) -> HashSet<Identity> {
    tree.descendants(tree.root_id())
        .map(|id| Identity::of(tree.node(id)))
        .collect()
}

/// Same as [`flatten_dependency_tree`], sorted by name then version
pub fn flatten_sorted(tree: &DependencyTree) -> Vec<Identity> {
    let mut identities: Vec<_> = flatten_dependency_tree(tree).into_iter().collect();
    identities.sort();
    identities
}

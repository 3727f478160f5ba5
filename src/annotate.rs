//! License policy annotation of dependency trees

use crate::config::LicensePolicy;
use crate::license::{LicenseNormalizer, SpdxNormalizer};
use crate::tree::{DependencyTree, NodeId};
use std::collections::HashSet;
use tracing::{debug, info};

/// Result of annotating a single subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtreeAnnotation {
    /// Some node in the subtree, its root included, has a license problem
    pub has_problem: bool,
    /// Raw license strings that failed the whitelist inside the subtree
    pub unknown_licenses: HashSet<String>,
}

impl SubtreeAnnotation {
    /// Combine the results of two disjoint subtrees
    pub fn merge(mut self, other: SubtreeAnnotation) -> Self {
        self.has_problem |= other.has_problem;
        self.unknown_licenses.extend(other.unknown_licenses);
        self
    }
}

/// Annotate every node of `tree` against `whitelist`.
///
/// Each node, the root included, gets its normalized license, its own
/// `license_problem` flag and its `subtree_problem` flag. Previous annotations
/// are overwritten. Returns the raw license strings that are not allowed.
pub fn annotate_dep_tree<N>(
    tree: &mut DependencyTree,
    whitelist: &HashSet<String>,
    normalizer: &N,
) -> HashSet<String>
where
    N: LicenseNormalizer + ?Sized,
{
    info!(
        "Annotating {} packages against {} whitelisted licenses",
        tree.len(),
        whitelist.len()
    );

    let root = tree.root_id();
    let annotation = annotate_subtree(tree, root, whitelist, normalizer);

    info!(
        "Annotation complete: {} unknown licenses, problems found: {}",
        annotation.unknown_licenses.len(),
        annotation.has_problem
    );

    annotation.unknown_licenses
}

/// Annotate the tree with the default SPDX normalizer and the policy whitelist
pub fn annotate_with_policy(tree: &mut DependencyTree, policy: &LicensePolicy) -> HashSet<String> {
    annotate_dep_tree(tree, &policy.whitelist_set(), &SpdxNormalizer)
}

/// Annotate the subtree rooted at `id` only.
///
/// The outcome depends on nothing outside the subtree, so disjoint subtrees
/// can be annotated separately, combined with [`SubtreeAnnotation::merge`] and
/// finished with [`annotate_root`].
pub fn annotate_subtree<N>(
    tree: &mut DependencyTree,
    id: NodeId,
    whitelist: &HashSet<String>,
    normalizer: &N,
) -> SubtreeAnnotation
where
    N: LicenseNormalizer + ?Sized,
{
    let order: Vec<NodeId> = std::iter::once(id).chain(tree.descendants(id)).collect();
    let mut unknown_licenses = HashSet::new();

    // Reversed pre-order reaches every child before its parent
    for &current in order.iter().rev() {
        let children_problem = tree
            .children(current)
            .iter()
            .any(|&child| tree.node(child).subtree_problem);
        annotate_node(
            tree,
            current,
            children_problem,
            whitelist,
            normalizer,
            &mut unknown_licenses,
        );
    }

    SubtreeAnnotation {
        has_problem: tree.node(id).subtree_problem,
        unknown_licenses,
    }
}

/// Annotate the root alone from the merged results of its children's subtrees.
///
/// Together with [`annotate_subtree`] on every direct child of the root this
/// yields the same tree and license set as [`annotate_dep_tree`].
pub fn annotate_root<N>(
    tree: &mut DependencyTree,
    children: SubtreeAnnotation,
    whitelist: &HashSet<String>,
    normalizer: &N,
) -> SubtreeAnnotation
where
    N: LicenseNormalizer + ?Sized,
{
    let mut annotation = children;
    let root = tree.root_id();
    annotation.has_problem = annotate_node(
        tree,
        root,
        annotation.has_problem,
        whitelist,
        normalizer,
        &mut annotation.unknown_licenses,
    );
    annotation
}

/// Write the derived fields of a single node; `children_problem` must already
/// reflect every descendant
fn annotate_node<N>(
    tree: &mut DependencyTree,
    id: NodeId,
    children_problem: bool,
    whitelist: &HashSet<String>,
    normalizer: &N,
    unknown_licenses: &mut HashSet<String>,
) -> bool
where
    N: LicenseNormalizer + ?Sized,
{
    let node = tree.node_mut(id);
    let normalized = normalizer.normalize(&node.license);
    let license_problem = !whitelist.contains(&normalized);

    if license_problem {
        debug!(
            "License {:?} of {}@{} is not whitelisted",
            node.license, node.name, node.version
        );
        unknown_licenses.insert(node.license.clone());
    }

    node.license_normalized = Some(normalized);
    node.license_problem = license_problem;
    node.subtree_problem = license_problem || children_problem;
    node.subtree_problem
}

/// Nodes whose own license failed the whitelist, in pre-order
pub fn problem_nodes(tree: &DependencyTree) -> Vec<NodeId> {
    tree.iter()
        .filter(|(_, node)| node.license_problem)
        .map(|(id, _)| id)
        .collect()
}

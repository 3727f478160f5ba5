//! Core data types for license audit reporting

use crate::tree::{DependencyTree, Node, NodeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A package identity: the unit of flattening
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub version: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Identity of a tree node
    pub fn of(node: &Node) -> Self {
        Self::new(node.name.clone(), node.version.clone())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Complete audit report for a dependency tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Name of the audited project (the tree root)
    pub project_name: String,
    /// Timestamp when audit was performed
    pub timestamp: DateTime<Utc>,
    /// Annotated tree, nested from the root
    pub tree: AnnotatedNode,
    /// Unique dependencies, sorted by name and version
    pub dependencies: Vec<Identity>,
    /// Raw license strings that failed the whitelist, sorted
    pub unknown_licenses: Vec<String>,
    /// Packages whose own license failed the whitelist
    pub problems: Vec<LicenseProblem>,
    /// Summary statistics
    pub summary: AuditSummary,
}

/// Summary statistics for an audit report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_nodes: usize,
    pub unique_dependencies: usize,
    pub problem_nodes: usize,
    pub unique_problem_packages: usize,
    pub unknown_licenses: usize,
}

/// Serializable view of an annotated node and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedNode {
    pub name: String,
    pub version: String,
    pub license: String,
    pub license_normalized: Option<String>,
    pub license_problem: bool,
    pub subtree_problem: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<AnnotatedNode>,
}

impl AnnotatedNode {
    /// Build the nested view of the subtree rooted at `id`
    pub fn from_tree(tree: &DependencyTree, id: NodeId) -> Self {
        let order: Vec<NodeId> = std::iter::once(id).chain(tree.descendants(id)).collect();
        let mut built: HashMap<NodeId, AnnotatedNode> = HashMap::with_capacity(order.len());

        // Reversed pre-order builds every child before its parent
        for &current in order.iter().rev() {
            let node = tree.node(current);
            let dependencies = node
                .children()
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(current, Self::with_dependencies(node, dependencies));
        }

        built
            .remove(&id)
            .unwrap_or_else(|| Self::with_dependencies(tree.node(id), Vec::new()))
    }

    fn with_dependencies(node: &Node, dependencies: Vec<AnnotatedNode>) -> Self {
        Self {
            name: node.name.clone(),
            version: node.version.clone(),
            license: node.license.clone(),
            license_normalized: node.license_normalized.clone(),
            license_problem: node.license_problem,
            subtree_problem: node.subtree_problem,
            dependencies,
        }
    }
}

/// A package whose own license is not on the whitelist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseProblem {
    pub package: Identity,
    /// License as declared
    pub license: String,
    /// Ancestors from the direct parent up to the root, as `name@version`
    pub required_by: Vec<String>,
}

impl AuditReport {
    /// Create a new audit report
    pub fn new(
        tree: &DependencyTree,
        dependencies: Vec<Identity>,
        unknown_licenses: HashSet<String>,
        problems: Vec<LicenseProblem>,
    ) -> Self {
        let mut unknown_licenses: Vec<_> = unknown_licenses.into_iter().collect();
        unknown_licenses.sort();

        let mut report = Self {
            project_name: tree.root().name.clone(),
            timestamp: Utc::now(),
            tree: AnnotatedNode::from_tree(tree, tree.root_id()),
            dependencies,
            unknown_licenses,
            problems,
            summary: AuditSummary::default(),
        };
        report.compute_summary(tree.len());
        report
    }

    /// Compute summary statistics from the report contents
    pub fn compute_summary(&mut self, total_nodes: usize) {
        let unique_problem_packages: HashSet<_> =
            self.problems.iter().map(|p| &p.package).collect();

        self.summary = AuditSummary {
            total_nodes,
            unique_dependencies: self.dependencies.len(),
            problem_nodes: self.problems.len(),
            unique_problem_packages: unique_problem_packages.len(),
            unknown_licenses: self.unknown_licenses.len(),
        };
    }

    /// Whether any package in the tree violates the license policy
    pub fn has_problems(&self) -> bool {
        self.tree.subtree_problem
    }
}

//! Build a [`DependencyTree`] from an already materialized nested tree
//!
//! The expected JSON shape is:
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "license": "MIT",
//!   "dependencies": [
//!     { "name": "left-pad", "version": "1.3.0", "license": "WTFPL" }
//!   ]
//! }
//! ```

use crate::error::{AuditError, Result};
use crate::tree::{DependencyTree, NodeId};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// One package entry as handed over by a package-manager integration
#[derive(Debug, Clone, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<PackageEntry>,
}

/// Parse a nested JSON tree
pub fn parse_tree(content: &str) -> Result<DependencyTree> {
    let root: PackageEntry = serde_json::from_str(content)?;
    build_tree(root)
}

/// Read and parse a nested JSON tree from disk
pub fn load_tree(path: &Path) -> Result<DependencyTree> {
    debug!("Loading dependency tree from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_tree(&content)
}

/// Convert a nested entry into an arena tree, keeping child order
pub fn build_tree(root: PackageEntry) -> Result<DependencyTree> {
    if root.name.trim().is_empty() {
        return Err(AuditError::parse("root package has no name"));
    }

    let mut tree = DependencyTree::new(root.name, root.version, root.license.unwrap_or_default());
    let root_id = tree.root_id();

    let mut pending: Vec<(NodeId, PackageEntry)> = root
        .dependencies
        .into_iter()
        .rev()
        .map(|entry| (root_id, entry))
        .collect();

    while let Some((parent, entry)) = pending.pop() {
        if entry.name.trim().is_empty() {
            return Err(AuditError::parse(format!(
                "dependency of {} has no name",
                tree.node(parent).name
            )));
        }

        let license = entry.license.unwrap_or_else(|| {
            warn!("{}@{} declares no license", entry.name, entry.version);
            String::new()
        });

        let id = tree.add_child(parent, entry.name, entry.version, license)?;
        pending.extend(entry.dependencies.into_iter().rev().map(|child| (id, child)));
    }

    debug!("Loaded dependency tree with {} nodes", tree.len());
    Ok(tree)
}

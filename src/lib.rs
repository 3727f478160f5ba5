//! # license_tree_audit
//!
//! License policy auditing for package dependency trees:
//! - **Annotation**: flag every package whose license is not whitelisted, and
//!   every subtree that contains such a package
//! - **Flattening**: reduce a tree to its unique `(name, version)` identities
//! - **Normalization**: map common license spellings to SPDX identifiers
//!
//! ## Quick Start
//!
//! ```
//! use license_tree_audit::{annotate_dep_tree, flatten_dependency_tree, DependencyTree, SpdxNormalizer};
//! use std::collections::HashSet;
//!
//! # fn main() -> license_tree_audit::Result<()> {
//! let mut tree = DependencyTree::new("my-app", "", "MIT");
//! let root = tree.root_id();
//! let dep = tree.add_child(root, "left-pad", "1.3.0", "WTFPL")?;
//! tree.add_child(dep, "is-odd", "3.0.1", "MIT License")?;
//!
//! let whitelist: HashSet<String> = ["MIT".to_string()].into();
//! let unknown = annotate_dep_tree(&mut tree, &whitelist, &SpdxNormalizer);
//!
//! assert!(unknown.contains("WTFPL"));
//! assert!(tree.root().subtree_problem);
//! assert_eq!(flatten_dependency_tree(&tree).len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Annotation and flattening perform no I/O. The [`loader`] and [`AuditConfig`]
//! helpers read trees and whitelists for callers that need them.

mod annotate;
mod audit;
mod config;
mod error;
mod flatten;
mod license;
pub mod loader;
mod tree;
mod types;

#[cfg(test)]
mod test_support;

// Re-export public API
pub use annotate::{annotate_dep_tree, annotate_root, annotate_subtree, annotate_with_policy, problem_nodes, SubtreeAnnotation};
pub use audit::audit_tree;
pub use config::{AuditConfig, AuditConfigBuilder, LicensePolicy};
pub use error::{AuditError, Result};
pub use flatten::{flatten_dependency_tree, flatten_sorted};
pub use license::{LicenseNormalizer, SpdxNormalizer};
pub use tree::{Descendants, DependencyTree, Node, NodeId};
pub use types::{AnnotatedNode, AuditReport, AuditSummary, Identity, LicenseProblem};

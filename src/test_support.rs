//! Shared fixtures for unit tests

use crate::tree::DependencyTree;

/// Reference tree used throughout the tests:
///
/// ```text
/// Name (MIT)
/// |-- @company/package1@1.1.1 (MIT)
/// |   |-- package2@2.2.2 (MIT)
/// |   |   |-- package5@5.5.5 (MIT)
/// |   |   +-- package7@7.7.7 (MIT)
/// |   |-- package3@3.3.3 (MIT)
/// |   |   +-- package7@7.7.6 (GPL)
/// |   |-- package4@4.4.4 (MIT)
/// |   +-- package5@5.5.5 (MIT)
/// |       +-- package6@6.6.6 (GPL)
/// +-- package4@4.4.4 (MIT)
///     +-- package6@6.6.6 (GPL)
/// ```
pub(crate) fn reference_tree() -> DependencyTree {
    let mut tree = DependencyTree::new("Name", "", "MIT");
    let root = tree.root_id();

    let package1 = tree.add_child(root, "@company/package1", "1.1.1", "MIT").unwrap();
    let package4 = tree.add_child(root, "package4", "4.4.4", "MIT").unwrap();

    let package2 = tree.add_child(package1, "package2", "2.2.2", "MIT").unwrap();
    tree.add_child(package2, "package5", "5.5.5", "MIT").unwrap();
    tree.add_child(package2, "package7", "7.7.7", "MIT").unwrap();

    let package3 = tree.add_child(package1, "package3", "3.3.3", "MIT").unwrap();
    tree.add_child(package3, "package7", "7.7.6", "GPL").unwrap();

    tree.add_child(package1, "package4", "4.4.4", "MIT").unwrap();

    let package5 = tree.add_child(package1, "package5", "5.5.5", "MIT").unwrap();
    tree.add_child(package5, "package6", "6.6.6", "GPL").unwrap();

    tree.add_child(package4, "package6", "6.6.6", "GPL").unwrap();
    tree
}

/// Whitelist used alongside [`reference_tree`]
pub(crate) fn reference_whitelist() -> std::collections::HashSet<String> {
    ["MIT", "Apache-2.0"].into_iter().map(String::from).collect()
}

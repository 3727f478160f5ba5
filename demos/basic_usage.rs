//! Basic usage example

use license_tree_audit::{
    annotate_dep_tree, flatten_sorted, DependencyTree, Result, SpdxNormalizer,
};
use std::collections::HashSet;

fn main() -> Result<()> {
    let mut tree = DependencyTree::new("my-app", "", "MIT");
    let root = tree.root_id();

    let express = tree.add_child(root, "express", "4.18.2", "MIT")?;
    tree.add_child(express, "debug", "2.6.9", "MIT License")?;
    let readline = tree.add_child(root, "readline-sync", "1.4.10", "GPLv3")?;
    tree.add_child(readline, "debug", "2.6.9", "MIT")?;

    let whitelist: HashSet<String> = ["MIT", "Apache-2.0"].into_iter().map(String::from).collect();
    let unknown = annotate_dep_tree(&mut tree, &whitelist, &SpdxNormalizer);

    println!("=== Dependency Tree ===");
    for (id, node) in tree.iter() {
        let depth = tree.path_to_root(id).len();
        let marker = match (node.license_problem, node.subtree_problem) {
            (true, _) => "✗",
            (false, true) => "!",
            _ => " ",
        };
        println!(
            "{} {}{} {} ({})",
            marker,
            "  ".repeat(depth),
            node.name,
            node.version,
            node.license_normalized.as_deref().unwrap_or("")
        );
    }

    println!("\n=== Unique Dependencies ===");
    for identity in flatten_sorted(&tree) {
        println!("  {}", identity);
    }

    if !unknown.is_empty() {
        println!("\nLicenses needing review: {:?}", unknown);
    }

    Ok(())
}

//! Example showing custom configuration and a custom normalizer

use license_tree_audit::{annotate_dep_tree, audit_tree, loader, AuditConfig, LicensePolicy};

const TREE: &str = r#"{
    "name": "service",
    "license": "Apache-2.0",
    "dependencies": [
        { "name": "serde", "version": "1.0.200", "license": "MIT OR Apache-2.0" },
        { "name": "internal-codegen", "version": "0.3.0", "license": "Proprietary" },
        { "name": "ring", "version": "0.17.8", "license": "" }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AuditConfig::builder()
        .license_policy(LicensePolicy {
            whitelist: Some(vec![
                "MIT OR Apache-2.0".to_string(),
                "Apache-2.0".to_string(),
            ]),
        })
        .ignore_dependency("internal-codegen".to_string())
        .build();

    let mut tree = loader::parse_tree(TREE)?;
    let report = audit_tree(&mut tree, &config);

    println!("=== Custom Audit Results ===");
    println!("Project: {}", report.project_name);
    println!("Unique dependencies: {}", report.summary.unique_dependencies);
    for problem in &report.problems {
        println!("  - {} ({:?})", problem.package, problem.license);
    }

    // Case-folding normalizer: whitelist entries are compared lowercased
    let lowercase = |license: &str| license.trim().to_lowercase();
    let whitelist = ["apache-2.0", "mit or apache-2.0"].into_iter().map(String::from).collect();
    let unknown = annotate_dep_tree(&mut tree, &whitelist, &lowercase);
    println!("\nWith lowercase normalizer, licenses to review: {:?}", unknown);

    Ok(())
}

//! Main audit orchestration logic

use crate::annotate::{annotate_with_policy, problem_nodes};
use crate::config::AuditConfig;
use crate::flatten::flatten_sorted;
use crate::tree::DependencyTree;
use crate::types::{AuditReport, Identity, LicenseProblem};
use tracing::{debug, info};

/// Annotate and flatten a dependency tree and collect the results in a report.
///
/// The tree is annotated in place. Ignored dependencies are only dropped from
/// the flattened list; they are still checked against the license policy.
pub fn audit_tree(tree: &mut DependencyTree, config: &AuditConfig) -> AuditReport {
    info!("Starting license audit of '{}'", tree.root().name);

    let unknown_licenses = annotate_with_policy(tree, &config.license_policy);

    let dependencies: Vec<Identity> = flatten_sorted(tree)
        .into_iter()
        .filter(|identity| {
            let ignored = config.ignored_dependencies.contains(&identity.name);
            if ignored {
                debug!("Skipping ignored dependency: {}", identity);
            }
            !ignored
        })
        .collect();

    let problems = problem_nodes(tree)
        .into_iter()
        .map(|id| {
            let node = tree.node(id);
            LicenseProblem {
                package: Identity::of(node),
                license: node.license.clone(),
                required_by: tree
                    .path_to_root(id)
                    .into_iter()
                    .map(|ancestor| Identity::of(tree.node(ancestor)).to_string())
                    .collect(),
            }
        })
        .collect();

    let report = AuditReport::new(tree, dependencies, unknown_licenses, problems);

    info!(
        "Audit complete: {} unique dependencies, {} license problems, {} unknown licenses",
        report.summary.unique_dependencies,
        report.summary.problem_nodes,
        report.summary.unknown_licenses,
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::reference_tree;

    fn reference_config() -> AuditConfig {
        AuditConfig::builder()
            .allow_license("MIT")
            .allow_license("Apache-2.0")
            .build()
    }

    #[test]
    fn test_audit_reference_tree() {
        let mut tree = reference_tree();
        let report = audit_tree(&mut tree, &reference_config());

        assert_eq!(report.project_name, "Name");
        assert!(report.has_problems());
        assert_eq!(report.dependencies.len(), 8);
        assert_eq!(report.unknown_licenses, vec!["GPL".to_string()]);
        assert_eq!(report.summary.problem_nodes, 3);
        assert_eq!(report.summary.unique_problem_packages, 2);

        let first = &report.problems[0];
        assert_eq!(first.package, Identity::new("package7", "7.7.6"));
        assert_eq!(
            first.required_by,
            vec![
                "package3@3.3.3".to_string(),
                "@company/package1@1.1.1".to_string(),
                "Name@".to_string(),
            ]
        );
    }

    #[test]
    fn test_ignored_dependencies_are_still_checked() {
        let mut tree = reference_tree();
        let config = AuditConfig::builder()
            .allow_license("MIT")
            .ignore_dependency("package6".to_string())
            .build();

        let report = audit_tree(&mut tree, &config);

        assert_eq!(report.dependencies.len(), 7);
        assert!(report.problems.iter().any(|p| p.package.name == "package6"));
    }

    #[test]
    fn test_unversioned_license_can_be_whitelisted() {
        let mut tree = reference_tree();
        let config = AuditConfig::builder()
            .allow_license("MIT")
            .allow_license("GPL")
            .build();

        let report = audit_tree(&mut tree, &config);

        assert!(!report.has_problems());
        assert!(report.unknown_licenses.is_empty());
        assert!(tree
            .iter()
            .filter(|(_, node)| node.license == "GPL")
            .all(|(_, node)| node.license_normalized.as_deref() == Some("GPL")));
    }

    #[test]
    fn test_report_serializes() {
        let mut tree = reference_tree();
        let report = audit_tree(&mut tree, &reference_config());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tree"]["subtree_problem"], true);
        assert_eq!(json["tree"]["license_normalized"], "MIT");
        assert_eq!(json["unknown_licenses"][0], "GPL");
    }
}

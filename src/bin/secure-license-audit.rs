//! CLI tool for auditing dependency tree licenses

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use license_tree_audit::{
    audit_tree, flatten_sorted, loader, AuditConfig, AuditReport, DependencyTree,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "secure-license-audit")]
#[command(about = "Check dependency tree licenses against a whitelist", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Additional whitelisted license (can be specified multiple times)
    #[arg(short = 'w', long = "whitelist", global = true)]
    whitelist: Vec<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check licenses and fail if any package is not whitelisted
    Check {
        /// Dependency tree (JSON)
        tree: PathBuf,
    },

    /// List unique dependencies as name@version
    Flatten {
        /// Dependency tree (JSON)
        tree: PathBuf,
    },

    /// Generate detailed audit report
    Report {
        /// Dependency tree (JSON)
        tree: PathBuf,

        /// Output format
        #[arg(short = 'f', long, default_value = "markdown")]
        format: ReportFormat,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Debug)]
enum ReportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(2);
        }
    }
}

/// Returns `false` when license problems should fail the process
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => AuditConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AuditConfig::default(),
    };

    for license in cli.whitelist {
        config.license_policy.allow(license);
    }
    config.validate()?;

    match cli.command {
        Commands::Check { tree } => {
            let mut tree = read_tree(&tree)?;
            let report = audit_tree(&mut tree, &config);

            if report.has_problems() {
                display_problems(&report);
                return Ok(false);
            }
            println!("{} All licenses are whitelisted!", "Success:".green().bold());
        }

        Commands::Flatten { tree } => {
            let tree = read_tree(&tree)?;
            for identity in flatten_sorted(&tree) {
                println!("{}", identity);
            }
        }

        Commands::Report {
            tree,
            format,
            output,
        } => {
            let mut tree = read_tree(&tree)?;
            let report = audit_tree(&mut tree, &config);

            let content = match format {
                ReportFormat::Json => serde_json::to_string_pretty(&report)?,
                ReportFormat::Markdown => generate_markdown_report(&report),
            };

            match output {
                Some(output_path) => {
                    std::fs::write(&output_path, content).with_context(|| {
                        format!("Failed to write report to {}", output_path.display())
                    })?;
                    info!("Report written to: {}", output_path.display());
                }
                None => println!("{}", content),
            }
        }
    }

    Ok(true)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_tree(path: &Path) -> anyhow::Result<DependencyTree> {
    loader::load_tree(path)
        .with_context(|| format!("Failed to read dependency tree {}", path.display()))
}

fn display_problems(report: &AuditReport) {
    eprintln!(
        "{} {} packages with licenses outside the whitelist:",
        "Failed:".red().bold(),
        report.summary.problem_nodes
    );

    for problem in &report.problems {
        let license = if problem.license.is_empty() {
            "<none>"
        } else {
            problem.license.as_str()
        };
        eprintln!("  - {} ({})", problem.package.to_string().bold(), license.yellow());
        if !problem.required_by.is_empty() {
            eprintln!("    required by: {}", problem.required_by.join(" <- "));
        }
    }

    eprintln!(
        "\nLicenses to review: {}",
        report.unknown_licenses.join(", ")
    );
}

fn generate_markdown_report(report: &AuditReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# License Audit Report: {}\n\n", report.project_name));
    md.push_str(&format!("**Generated:** {}\n\n", report.timestamp));

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- Packages in tree: {}\n", report.summary.total_nodes));
    md.push_str(&format!(
        "- Unique dependencies: {}\n",
        report.summary.unique_dependencies
    ));
    md.push_str(&format!("- License problems: {}\n", report.summary.problem_nodes));
    md.push_str(&format!(
        "- Licenses to review: {}\n\n",
        report.unknown_licenses.join(", ")
    ));

    if !report.problems.is_empty() {
        md.push_str("## Problems\n\n");
        md.push_str("| Package | License | Required by |\n");
        md.push_str("|---------|---------|-------------|\n");
        for problem in &report.problems {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&problem.package.to_string()),
                escape_cell(&problem.license),
                escape_cell(&problem.required_by.join(" <- "))
            ));
        }
        md.push('\n');
    }

    md.push_str("## Dependencies\n\n");
    md.push_str("| Name | Version |\n");
    md.push_str("|------|---------|\n");
    for dep in &report.dependencies {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&dep.name),
            escape_cell(&dep.version)
        ));
    }

    md
}

/// Keep declared values from splitting a markdown table row
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

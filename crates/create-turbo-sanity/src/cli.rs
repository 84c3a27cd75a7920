//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;
use turbo_sanity_core::types::ProvisionOptions;
use turbo_sanity_templates::PackageManager;

/// Create a Turborepo monorepo with a Next.js site and a Sanity Studio
#[derive(Parser, Debug)]
#[command(name = "create-turbo-sanity")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to create the project in
    pub project_directory: Option<Utf8PathBuf>,

    /// Skip prompts and use defaults
    #[arg(short, long)]
    pub yes: bool,

    /// Use an existing Sanity project by id
    #[arg(long, value_name = "ID")]
    pub project: Option<String>,

    /// Use or create this dataset
    #[arg(long, value_name = "NAME")]
    pub dataset: Option<String>,

    /// Organization (id or slug) for a new project
    #[arg(long, value_name = "ID_OR_SLUG")]
    pub organization: Option<String>,

    /// Template name or git repository URL
    #[arg(long, value_name = "NAME_OR_URL")]
    pub template: Option<String>,

    /// Package manager used to install dependencies (npm, yarn, pnpm)
    #[arg(long, value_name = "PM", value_parser = parse_package_manager)]
    pub package_manager: Option<PackageManager>,

    /// Do not install dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn provision_options(&self) -> ProvisionOptions {
        ProvisionOptions {
            yes: self.yes,
            project: self.project.clone(),
            dataset: self.dataset.clone(),
            organization: self.organization.clone(),
        }
    }
}

fn parse_package_manager(value: &str) -> Result<PackageManager, String> {
    value.parse().map_err(|e: turbo_sanity_templates::Error| e.to_string())
}

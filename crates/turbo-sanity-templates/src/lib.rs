//! # turbo-sanity-templates
//!
//! Scaffolding library for create-turbo-sanity providing:
//! - Turborepo + Sanity templates (embedded or cloned from git)
//! - Placeholder substitution with the provisioned project values
//! - Environment files for the web app and the studio
//! - Project directory checks and dependency installation

pub mod env;
pub mod error;
pub mod git;
pub mod install;
pub mod project_dir;
pub mod templates;

pub use env::write_env_files;
pub use error::{Error, Result};
pub use install::PackageManager;
pub use project_dir::{
    absolute_directory, inspect_directory, project_name, resolve_directory,
    validate_package_name, DirectoryState, DEFAULT_PROJECT_DIRECTORY,
};
pub use templates::{TemplateManager, TemplateRenderer, TemplateSource, TemplateVars};

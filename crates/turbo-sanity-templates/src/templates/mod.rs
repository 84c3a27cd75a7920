//! Monorepo templates
//!
//! A template is either compiled into the binary or fetched from a git
//! remote. Either way its files are copied into the project directory and
//! the processed files receive the project's values.
//!
//! # Example
//!
//! ```no_run
//! use turbo_sanity_templates::templates::{TemplateManager, TemplateSource, TemplateVars};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let vars = TemplateVars::new("my-app", "My App", "abc123", "production");
//! TemplateManager::new()
//!     .scaffold(&TemplateSource::parse("default"), Utf8Path::new("my-app"), &vars)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod embedded;
mod renderer;

pub use embedded::{embedded_template_names, has_embedded_template, write_embedded_template};
pub use renderer::{TemplateRenderer, TemplateVars, PROCESSED_FILES};

use crate::error::{Error, Result};
use crate::git::{clone_repository, is_valid_repo_url, CloneOptions};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Where template files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded(String),
    Git(String),
}

impl TemplateSource {
    /// Repository URLs become [`TemplateSource::Git`], anything else names an embedded template
    pub fn parse(value: &str) -> Self {
        if is_valid_repo_url(value) {
            Self::Git(value.to_string())
        } else {
            Self::Embedded(value.to_string())
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded(name) => f.write_str(name),
            Self::Git(url) => f.write_str(url),
        }
    }
}

/// Copies templates into project directories
#[derive(Debug, Default)]
pub struct TemplateManager {
    renderer: TemplateRenderer,
}

impl TemplateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `source` into `target` and substitute the project values.
    ///
    /// Returns every file written.
    pub async fn scaffold(
        &self,
        source: &TemplateSource,
        target: &Utf8Path,
        vars: &TemplateVars,
    ) -> Result<Vec<Utf8PathBuf>> {
        info!("Scaffolding template {} into {}", source, target);

        let written = match source {
            TemplateSource::Embedded(name) => {
                if !has_embedded_template(name) {
                    return Err(Error::template_not_found(name));
                }
                fs::create_dir_all(target)?;
                write_embedded_template(name, target)?
            }
            TemplateSource::Git(url) => {
                let staging = tempfile::tempdir()?;
                let checkout = Utf8PathBuf::try_from(staging.path().join("template"))
                    .map_err(|e| Error::invalid_path(e.into_path_buf().display().to_string()))?;
                let options = CloneOptions { depth: Some(1) };
                clone_repository(url, &checkout, &options).await?;

                fs::create_dir_all(target)?;
                copy_tree(&checkout, target)?
            }
        };

        let processed = self.renderer.process_files(target, vars)?;
        debug!("Substituted values in {} files", processed.len());

        Ok(written)
    }
}

/// Copy `source` into `target`, leaving out any `.git` directory
pub fn copy_tree(source: &Utf8Path, target: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut written = Vec::new();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source.as_std_path())
            .ok()
            .and_then(Utf8Path::from_path)
            .ok_or_else(|| Error::invalid_path(entry.path().display().to_string()))?;
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            written.push(dest);
        }
    }

    Ok(written)
}

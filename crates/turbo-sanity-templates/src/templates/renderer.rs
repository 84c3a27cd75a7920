//! Placeholder substitution in scaffolded files.
//!
//! Handles:
//! - `{{PROJECT_NAME}}`, `{{DISPLAY_NAME}}`, `{{PROJECT_ID}}`, `{{DATASET_NAME}}`
//! - The literal sample values `your-project-id` and `production`
//!
//! Only the files in [`PROCESSED_FILES`] are rewritten.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use regex::{Captures, Regex};
use std::fs;
use std::sync::LazyLock;
use tracing::debug;

/// Files (relative to the project root) that receive substitution
pub const PROCESSED_FILES: &[&str] = &[
    "package.json",
    "apps/web/package.json",
    "apps/studio/package.json",
    "apps/studio/sanity.config.ts",
    "README.md",
];

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(PROJECT_NAME|DISPLAY_NAME|PROJECT_ID|DATASET_NAME)\}\}|your-project-id|production")
        .expect("token regex is valid")
});

/// Values substituted into template files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    /// npm-style name, taken from the target directory
    pub project_name: String,
    pub display_name: String,
    pub project_id: String,
    pub dataset_name: String,
}

impl TemplateVars {
    pub fn new(
        project_name: impl Into<String>,
        display_name: impl Into<String>,
        project_id: impl Into<String>,
        dataset_name: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            display_name: display_name.into(),
            project_id: project_id.into(),
            dataset_name: dataset_name.into(),
        }
    }
}

/// Template renderer
#[derive(Debug, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Replace every token in a single pass; substituted values are not rescanned
    pub fn render_string(&self, template: &str, vars: &TemplateVars) -> String {
        TOKEN_RE
            .replace_all(template, |caps: &Captures| {
                let value = match caps.get(1).map(|m| m.as_str()) {
                    Some("PROJECT_NAME") => &vars.project_name,
                    Some("DISPLAY_NAME") => &vars.display_name,
                    Some("PROJECT_ID") => &vars.project_id,
                    Some(_) => &vars.dataset_name,
                    None if &caps[0] == "your-project-id" => &vars.project_id,
                    None => &vars.dataset_name,
                };
                value.clone()
            })
            .into_owned()
    }

    /// Rewrite the processed files that exist under `project_dir`
    pub fn process_files(
        &self,
        project_dir: &Utf8Path,
        vars: &TemplateVars,
    ) -> Result<Vec<Utf8PathBuf>> {
        let mut processed = Vec::new();

        for relative in PROCESSED_FILES {
            let path = project_dir.join(relative);
            if !path.is_file() {
                debug!("Skipping missing template file {}", path);
                continue;
            }

            let content = fs::read_to_string(&path)?;
            fs::write(&path, self.render_string(&content, vars))?;
            processed.push(path);
        }

        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> TemplateVars {
        TemplateVars::new("my-app", "My App", "abc123", "staging")
    }

    #[test]
    fn test_render_string_replaces_all_tokens() {
        let renderer = TemplateRenderer::new();
        let template = "{{PROJECT_NAME}} / {{DISPLAY_NAME}} / {{PROJECT_ID}} / {{DATASET_NAME}}";

        assert_eq!(
            renderer.render_string(template, &vars()),
            "my-app / My App / abc123 / staging"
        );
    }

    #[test]
    fn test_render_string_replaces_sample_values() {
        let renderer = TemplateRenderer::new();
        let template = "projectId: 'your-project-id', dataset: 'production', alt: 'production'";

        assert_eq!(
            renderer.render_string(template, &vars()),
            "projectId: 'abc123', dataset: 'staging', alt: 'staging'"
        );
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let renderer = TemplateRenderer::new();
        let vars = TemplateVars::new("production-site", "production", "p1", "dev");

        assert_eq!(
            renderer.render_string("{{PROJECT_NAME}} {{DISPLAY_NAME}} production", &vars),
            "production-site production dev"
        );
    }

    #[test]
    fn test_process_files_only_touches_listed_files() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
        fs::write(root.join("package.json"), r#"{"name": "{{PROJECT_NAME}}"}"#).unwrap();
        fs::write(root.join("notes.txt"), "{{PROJECT_NAME}}").unwrap();

        let processed = TemplateRenderer::new()
            .process_files(&root, &vars())
            .unwrap();

        assert_eq!(processed, vec![root.join("package.json")]);
        assert_eq!(
            fs::read_to_string(root.join("package.json")).unwrap(),
            r#"{"name": "my-app"}"#
        );
        assert_eq!(
            fs::read_to_string(root.join("notes.txt")).unwrap(),
            "{{PROJECT_NAME}}"
        );
    }
}

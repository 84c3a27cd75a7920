//! Name rules applied to operator input

use regex::Regex;
use std::sync::LazyLock;

/// Longest accepted project display name
pub const MAX_PROJECT_NAME_LEN: usize = 80;

/// Longest accepted organization name
pub const MAX_ORGANIZATION_NAME_LEN: usize = 100;

static DATASET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("dataset regex is valid"));

const DATASET_NAME_RULE: &str =
    "Dataset name can only contain lowercase letters, numbers, hyphens, and underscores";

pub fn validate_project_name(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if input.chars().count() > MAX_PROJECT_NAME_LEN {
        return Err(format!(
            "Project name cannot be longer than {} characters",
            MAX_PROJECT_NAME_LEN
        ));
    }
    Ok(())
}

pub fn validate_organization_name(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("Organization name cannot be empty".to_string());
    }
    if input.chars().count() > MAX_ORGANIZATION_NAME_LEN {
        return Err(format!(
            "Organization name cannot be longer than {} characters",
            MAX_ORGANIZATION_NAME_LEN
        ));
    }
    Ok(())
}

pub fn validate_dataset_name(input: &str) -> Result<(), String> {
    if DATASET_NAME_RE.is_match(input) {
        Ok(())
    } else {
        Err(DATASET_NAME_RULE.to_string())
    }
}

/// Dataset pattern check plus uniqueness against `existing`
pub fn validate_new_dataset_name(input: &str, existing: &[String]) -> Result<(), String> {
    validate_dataset_name(input)?;
    if existing.iter().any(|name| name == input) {
        return Err("Dataset name already exists".to_string());
    }
    Ok(())
}

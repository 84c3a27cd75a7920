//! Target directory naming and inspection

use crate::error::{Error, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

/// Directory suggested when none is given
pub const DEFAULT_PROJECT_DIRECTORY: &str = "my-turbo-sanity-app";

const MAX_PACKAGE_NAME_LEN: usize = 214;

const BLOCKED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

static URL_SAFE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._-]+$").expect("package name regex is valid"));

/// npm package-name rules, applied to the project directory name
pub fn validate_package_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("name length must be greater than zero".to_string());
    }
    if name.trim() != name {
        return Err("name cannot contain leading or trailing spaces".to_string());
    }
    if name.starts_with('.') {
        return Err("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        return Err("name cannot start with an underscore".to_string());
    }
    if BLOCKED_NAMES.contains(&name) {
        return Err(format!("{} is not a valid package name", name));
    }
    if name.len() > MAX_PACKAGE_NAME_LEN {
        return Err(format!(
            "name cannot contain more than {} characters",
            MAX_PACKAGE_NAME_LEN
        ));
    }
    if name.to_lowercase() != name {
        return Err("name cannot contain capital letters".to_string());
    }
    if name.contains(['~', '\'', '!', '(', ')', '*']) {
        return Err("name cannot contain special characters (\"~'!()*\")".to_string());
    }
    if !URL_SAFE_RE.is_match(name) {
        return Err("name can only contain URL-friendly characters".to_string());
    }
    Ok(())
}

/// What is at a target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Missing,
    Empty,
    NonEmpty,
}

/// Inspect `path`; a regular file there is an error
pub fn inspect_directory(path: &Utf8Path) -> Result<DirectoryState> {
    if !path.exists() {
        return Ok(DirectoryState::Missing);
    }
    if !path.is_dir() {
        return Err(Error::invalid_path(format!("{} is not a directory", path)));
    }

    let mut entries = fs::read_dir(path)?;
    Ok(if entries.next().is_some() {
        DirectoryState::NonEmpty
    } else {
        DirectoryState::Empty
    })
}

/// Join `dir` onto `base` and fold `.` and `..` components lexically
pub fn resolve_directory(base: &Utf8Path, dir: &Utf8Path) -> Utf8PathBuf {
    let mut resolved = Utf8PathBuf::new();
    for component in base.join(dir).components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_str()),
        }
    }
    resolved
}

/// `dir` resolved against the current working directory
pub fn absolute_directory(dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| Error::invalid_path(p.display().to_string()))?;
    Ok(resolve_directory(&cwd, dir))
}

/// Package name derived from the target directory.
///
/// Relative paths are resolved first, so `.` names the current directory.
pub fn project_name(dir: &Utf8Path) -> Result<String> {
    let resolved = absolute_directory(dir)?;
    let name = resolved
        .file_name()
        .ok_or_else(|| Error::invalid_path(dir.as_str()))?;
    validate_package_name(name).map_err(|reason| Error::invalid_project_name(name, reason))?;
    Ok(name.to_string())
}

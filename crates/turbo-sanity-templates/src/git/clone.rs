//! Repository cloning

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Options for cloning a repository
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Shallow clone with specified depth
    pub depth: Option<u32>,
}

/// Clone a repository
///
/// # Errors
/// Returns error if:
/// - Invalid repository URL
/// - Destination already exists
/// - git is not installed
/// - Clone operation fails
pub async fn clone_repository(
    url: &str,
    destination: &Utf8Path,
    options: &CloneOptions,
) -> Result<Utf8PathBuf> {
    info!("Cloning repository: {} -> {}", url, destination);

    if !is_valid_repo_url(url) {
        return Err(Error::invalid_repo_url(url));
    }

    if destination.exists() {
        return Err(Error::clone_failed(format!(
            "destination {} already exists",
            destination
        )));
    }

    which::which("git").map_err(|_| Error::command_not_found("git"))?;

    let args = clone_args(url, destination, options);
    debug!("Running: git {}", args.join(" "));
    let output = Command::new("git").args(&args).output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::clone_failed(stderr.trim()));
    }

    info!("Repository cloned successfully");
    Ok(destination.to_path_buf())
}

fn clone_args(url: &str, destination: &Utf8Path, options: &CloneOptions) -> Vec<String> {
    let mut args = vec!["clone".to_string()];
    if let Some(depth) = options.depth {
        args.push("--depth".to_string());
        args.push(depth.to_string());
    }
    args.push(url.to_string());
    args.push(destination.to_string());
    args
}

/// Whether `url` looks like a git remote rather than a template name
pub fn is_valid_repo_url(url: &str) -> bool {
    url.starts_with("https://")
        || url.starts_with("http://")
        || url.starts_with("git@")
        || url.ends_with(".git")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_repo_url() {
        assert!(is_valid_repo_url("https://github.com/user/repo.git"));
        assert!(is_valid_repo_url("git@github.com:user/repo.git"));
        assert!(is_valid_repo_url("http://example.com/repo"));
        assert!(is_valid_repo_url("file:///srv/templates/turbo.git"));
        assert!(!is_valid_repo_url("default"));
        assert!(!is_valid_repo_url(""));
    }

    #[test]
    fn test_clone_args() {
        let url = "https://github.com/user/repo.git";
        let dest = Utf8Path::new("/tmp/staging/template");

        assert_eq!(
            clone_args(url, dest, &CloneOptions { depth: Some(1) }),
            ["clone", "--depth", "1", url, "/tmp/staging/template"]
        );
        assert_eq!(
            clone_args(url, dest, &CloneOptions::default()),
            ["clone", url, "/tmp/staging/template"]
        );
    }

    #[tokio::test]
    async fn test_clone_rejects_invalid_url() {
        let err = clone_repository("default", Utf8Path::new("/tmp/x"), &CloneOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRepoUrl { .. }));
    }

    #[tokio::test]
    async fn test_clone_rejects_existing_destination() {
        let temp = tempfile::tempdir().unwrap();
        let dest = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();

        let err = clone_repository(
            "https://github.com/user/repo.git",
            &dest,
            &CloneOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::CloneFailed { .. }));
    }
}

//! Error types for turbo-sanity-templates

use thiserror::Error;

/// Result type alias using turbo-sanity-templates's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Template not found
    #[error("Template \"{template}\" not found")]
    TemplateNotFound { template: String },

    /// Invalid repository URL
    #[error("Invalid repository URL: {url}")]
    InvalidRepoUrl { url: String },

    /// Clone failed
    #[error("Failed to clone template repository: {message}")]
    CloneFailed { message: String },

    /// Invalid project directory name
    #[error("Invalid project name \"{name}\": {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Target directory has content and overwriting was not confirmed
    #[error("Directory {path} already exists and is not empty")]
    DirectoryNotEmpty { path: String },

    /// Unknown package manager
    #[error("Unknown package manager: {name}. Available: npm, yarn, pnpm")]
    UnknownPackageManager { name: String },

    /// Dependency installation failed
    #[error("{package_manager} install failed: {stderr}")]
    InstallFailed {
        package_manager: String,
        stderr: String,
    },

    /// Required command not found
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// Invalid path
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Directory walk error
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a template not found error
    pub fn template_not_found(template: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
        }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a directory not empty error
    pub fn directory_not_empty(path: impl Into<String>) -> Self {
        Self::DirectoryNotEmpty { path: path.into() }
    }

    /// Create an unknown package manager error
    pub fn unknown_package_manager(name: impl Into<String>) -> Self {
        Self::UnknownPackageManager { name: name.into() }
    }

    /// Create an install failed error
    pub fn install_failed(package_manager: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::InstallFailed {
            package_manager: package_manager.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}

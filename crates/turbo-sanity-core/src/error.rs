//! Error types for turbo-sanity-core

use std::fmt;
use thiserror::Error;

/// Result type alias using turbo-sanity-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A remote resource created during a provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedResource {
    Organization { id: String },
    Project { id: String },
    Dataset { project_id: String, name: String },
}

impl fmt::Display for CreatedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organization { id } => write!(f, "organization {}", id),
            Self::Project { id } => write!(f, "project {}", id),
            Self::Dataset { project_id, name } => {
                write!(f, "dataset {} in project {}", name, project_id)
            }
        }
    }
}

/// Provisioning error types
#[derive(Error, Debug)]
pub enum Error {
    /// No usable credential and interactive login is not allowed
    #[error("Authentication required. Please run `sanity login` first when using --yes flag")]
    AuthRequired,

    /// The login flow finished but no credential appeared in time
    #[error("Timed out after {waited_secs}s waiting for a credential to be written by the login flow")]
    AuthTimeout { waited_secs: u64 },

    /// Login failed or the new credential was rejected
    #[error("Authentication failed: {message}")]
    AuthInvalid { message: String },

    /// Explicitly requested project is missing or inaccessible
    #[error("Project {project_id} not found or you don't have access to it")]
    ProjectNotFound { project_id: String },

    /// Non-interactive run with no existing projects
    #[error("No projects found. Please create a project first or remove --yes flag")]
    NoProjects,

    /// Listing projects or organizations failed
    #[error("Failed to fetch projects: {message}")]
    ProjectFetch { message: String },

    /// Project creation failed
    #[error("Failed to create project: {message}")]
    ProjectCreate { message: String },

    /// Requested organization not in the accessible set
    #[error("Organization {organization} not found")]
    OrganizationNotFound { organization: String },

    /// Organization creation failed
    #[error("Failed to create organization: {message}")]
    OrganizationCreate { message: String },

    /// Listing datasets failed
    #[error("Failed to fetch datasets: {message}")]
    DatasetFetch { message: String },

    /// Dataset creation failed
    #[error("Failed to create dataset {dataset}: {message}")]
    DatasetCreate { dataset: String, message: String },

    /// Dataset name rejected by validation
    #[error("Invalid dataset name '{name}': {reason}")]
    InvalidDatasetName { name: String, reason: String },

    /// A later stage failed after earlier stages created remote resources
    #[error("{source} (already created: {})", format_created(.created))]
    PartiallyProvisioned {
        created: Vec<CreatedResource>,
        #[source]
        source: Box<Error>,
    },

    /// Non-success response from the provisioning API
    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Interactive prompt failed (e.g. terminal closed)
    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

fn format_created(created: &[CreatedResource]) -> String {
    created
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Create an auth timeout error
    pub fn auth_timeout(waited_secs: u64) -> Self {
        Self::AuthTimeout { waited_secs }
    }

    /// Create an auth invalid error
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::AuthInvalid {
            message: message.into(),
        }
    }

    /// Create a project not found error
    pub fn project_not_found(project_id: impl Into<String>) -> Self {
        Self::ProjectNotFound {
            project_id: project_id.into(),
        }
    }

    /// Create a project fetch error
    pub fn project_fetch(message: impl Into<String>) -> Self {
        Self::ProjectFetch {
            message: message.into(),
        }
    }

    /// Create a project create error
    pub fn project_create(message: impl Into<String>) -> Self {
        Self::ProjectCreate {
            message: message.into(),
        }
    }

    /// Create an organization not found error
    pub fn organization_not_found(organization: impl Into<String>) -> Self {
        Self::OrganizationNotFound {
            organization: organization.into(),
        }
    }

    /// Create an organization create error
    pub fn organization_create(message: impl Into<String>) -> Self {
        Self::OrganizationCreate {
            message: message.into(),
        }
    }

    /// Create a dataset fetch error
    pub fn dataset_fetch(message: impl Into<String>) -> Self {
        Self::DatasetFetch {
            message: message.into(),
        }
    }

    /// Create a dataset create error
    pub fn dataset_create(dataset: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DatasetCreate {
            dataset: dataset.into(),
            message: message.into(),
        }
    }

    /// Create an invalid dataset name error
    pub fn invalid_dataset_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDatasetName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Wrap a stage error with the resources that were already created.
    ///
    /// Returns the error untouched when nothing was created.
    pub fn partially_provisioned(created: Vec<CreatedResource>, source: Error) -> Self {
        if created.is_empty() {
            return source;
        }
        Self::PartiallyProvisioned {
            created,
            source: Box::new(source),
        }
    }

    /// The stage error underneath any partial-provisioning wrapper
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::PartiallyProvisioned { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Message suitable for embedding in a wrapping error.
    ///
    /// API errors contribute only the server's `message` so wrapped errors
    /// read like the remote error text.
    pub fn remote_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_uses_api_message_verbatim() {
        let err = Error::Api {
            status: 403,
            message: "Insufficient permissions".to_string(),
        };
        assert_eq!(err.remote_message(), "Insufficient permissions");

        let wrapped = Error::project_create(err.remote_message());
        assert_eq!(
            wrapped.to_string(),
            "Failed to create project: Insufficient permissions"
        );
    }

    #[test]
    fn test_partially_provisioned_lists_created_resources() {
        let err = Error::partially_provisioned(
            vec![
                CreatedResource::Organization {
                    id: "org_1".to_string(),
                },
                CreatedResource::Project {
                    id: "proj_1".to_string(),
                },
            ],
            Error::dataset_fetch("boom"),
        );

        let msg = err.to_string();
        assert!(msg.starts_with("Failed to fetch datasets: boom"));
        assert!(msg.contains("organization org_1, project proj_1"));
        assert!(matches!(err.root_cause(), Error::DatasetFetch { .. }));
    }

    #[test]
    fn test_partially_provisioned_without_created_is_passthrough() {
        let err = Error::partially_provisioned(vec![], Error::NoProjects);
        assert!(matches!(err, Error::NoProjects));
    }

    #[test]
    fn test_created_resource_display() {
        let ds = CreatedResource::Dataset {
            project_id: "p1".to_string(),
            name: "production".to_string(),
        };
        assert_eq!(ds.to_string(), "dataset production in project p1");
    }
}

//! Domain types shared by the provisioning flow

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset name created when the operator takes the defaults
pub const DEFAULT_DATASET_NAME: &str = "production";

/// Authenticated identity returned by `GET /users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Account-level grouping that owns projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Organization {
    /// Whether `key` names this organization by id or slug
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.slug.as_deref() == Some(key)
    }
}

/// Remote project container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub display_name: String,
    /// ISO-8601 timestamp as returned by the API; compared as a string
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// Sort projects most recent first.
///
/// Creation timestamps are compared as strings, descending, which orders
/// ISO-8601 values chronologically.
pub fn sort_by_recency(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Dataset access mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclMode {
    #[default]
    Public,
    Private,
}

impl AclMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for AclMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named content store scoped to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub name: String,
    #[serde(default)]
    pub acl_mode: AclMode,
}

/// Body of `POST /projects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub display_name: String,
    pub organization_id: String,
}

/// Operator choices that steer provisioning (from CLI flags)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Non-interactive: never prompt, pick defaults or fail
    pub yes: bool,
    /// Explicit project id
    pub project: Option<String>,
    /// Explicit dataset name
    pub dataset: Option<String>,
    /// Explicit organization id or slug
    pub organization: Option<String>,
}

/// Outcome of project resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    pub project_id: String,
    pub display_name: String,
    /// True when the operator had no projects before this run
    pub is_first_project: bool,
    /// True when the project was created during this run
    pub created: bool,
    /// Id of an organization created while resolving the project
    pub created_organization: Option<String>,
}

/// Outcome of organization resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrganization {
    pub id: String,
    pub created: bool,
}

/// Outcome of dataset resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDataset {
    pub dataset_name: String,
    pub created: bool,
}

/// Terminal output of provisioning, consumed by the template writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningResult {
    pub project_id: String,
    pub display_name: String,
    pub dataset_name: String,
    pub is_first_project: bool,
}

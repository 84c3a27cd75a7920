//! Configuration loading and management

mod hierarchical_loader;

pub use hierarchical_loader::HierarchicalConfigLoader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Resolved scaffolding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub prompts: PromptConfig,
    pub defaults: DefaultsConfig,
}

/// Provisioning API endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub version: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ApiConfig {
    /// Base URL all endpoint paths are appended to
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }
}

/// Credential discovery and login settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Credential files in priority order; `~/` expands to the home directory
    pub credential_paths: Vec<String>,
    /// Environment variable consulted before any credential file
    #[serde(default)]
    pub token_env: Option<String>,
    /// argv of the interactive login subprocess
    pub login_command: Vec<String>,
    pub wait_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl AuthConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Credential paths with `~/` expanded against `home`
    pub fn expanded_credential_paths(&self, home: &std::path::Path) -> Vec<PathBuf> {
        self.credential_paths
            .iter()
            .map(|p| match p.strip_prefix("~/") {
                Some(rest) => home.join(rest),
                None => PathBuf::from(p),
            })
            .collect()
    }
}

/// Prompt behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Apply the first-time name validation to every "create new" prompt
    pub strict_name_validation: bool,
}

/// Defaults for the scaffold itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub template: String,
    pub package_manager: String,
}

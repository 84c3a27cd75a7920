//! Locally persisted credentials
//!
//! The credential is written by an external login flow; this crate only
//! reads it. `CredentialStore` is the seam the auth bootstrapper depends on,
//! so tests can swap the filesystem for [`InMemoryCredentialStore`].

use crate::config::AuthConfig;
use crate::error::Result;
use crate::utils::get_home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Bearer token plus the user it belongs to
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub auth_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Credential {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            user_id: None,
        }
    }
}

// Never print the token
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("auth_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Read access to the persisted credential
pub trait CredentialStore: Send + Sync {
    /// Current credential, `None` when nothing usable is stored
    fn load(&self) -> Result<Option<Credential>>;

    /// Credential written by the login flow, ignoring sources a login cannot replace
    fn load_persisted(&self) -> Result<Option<Credential>> {
        self.load()
    }
}

/// Credential store backed by well-known config files
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    paths: Vec<PathBuf>,
    token_env: Option<String>,
}

impl FileCredentialStore {
    /// Store reading the given paths in priority order
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            token_env: None,
        }
    }

    /// Build from the auth section of the configuration
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let home = get_home_dir()?;
        Ok(Self {
            paths: config.expanded_credential_paths(&home),
            token_env: config.token_env.clone(),
        })
    }

    /// Consult this environment variable before any file
    pub fn with_token_env(mut self, var: impl Into<String>) -> Self {
        self.token_env = Some(var.into());
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn token_from_env(&self) -> Option<Credential> {
        let var = self.token_env.as_ref()?;
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => {
                debug!("Using credential from ${}", var);
                Some(Credential::new(token.trim()))
            }
            _ => None,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        if let Some(credential) = self.token_from_env() {
            return Ok(Some(credential));
        }
        self.load_persisted()
    }

    fn load_persisted(&self) -> Result<Option<Credential>> {
        let Some(path) = self.paths.iter().find(|p| p.is_file()) else {
            debug!("No credential file found");
            return Ok(None);
        };

        debug!("Reading credential from {}", path.display());
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        match serde_json::from_str::<Credential>(&content) {
            Ok(credential) if !credential.auth_token.trim().is_empty() => Ok(Some(credential)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("Ignoring malformed credential file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }
}

/// Shared in-memory credential store
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    inner: Arc<Mutex<Option<Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(Credential::new(token));
        store
    }

    pub fn set(&self, credential: Credential) {
        *self.inner.lock().unwrap() = Some(credential);
    }

    pub fn clear(&self) {
        *self.inner.lock().unwrap() = None;
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.inner.lock().unwrap().clone())
    }
}

/// Bounds for [`wait_for_credential`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up once this much time has passed
    pub deadline: Duration,
    /// Pause between reads of the store
    pub poll_interval: Duration,
}

impl WaitOptions {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            deadline: config.wait_timeout(),
            poll_interval: config.poll_interval(),
        }
    }
}

/// Poll `store` until a persisted credential other than `previous` appears.
///
/// Only [`CredentialStore::load_persisted`] is consulted, so an environment
/// token that was just rejected cannot mask the file a login wrote.
///
/// Returns `Ok(None)` when the deadline passes first. The wait is cancelled
/// by dropping the returned future.
pub async fn wait_for_credential(
    store: &dyn CredentialStore,
    previous: Option<&str>,
    options: WaitOptions,
) -> Result<Option<Credential>> {
    let started = Instant::now();

    loop {
        if let Some(credential) = store.load_persisted()? {
            if previous != Some(credential.auth_token.as_str()) {
                return Ok(Some(credential));
            }
        }

        let elapsed = started.elapsed();
        if elapsed >= options.deadline {
            debug!("Credential wait expired after {:?}", elapsed);
            return Ok(None);
        }

        tokio::time::sleep(options.poll_interval.min(options.deadline - elapsed)).await;
    }
}

//! Authentication bootstrap
//!
//! Makes sure a validated credential backs the API client before any
//! project or dataset call is made:
//! - A stored credential is checked with `whoami` and used if accepted
//! - Non-interactive runs fail instead of starting a login
//! - Otherwise the external login flow runs, then the credential store is
//!   polled until a new token appears or the deadline passes

use crate::observer::{NoOpObserver, ProvisionObserver};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};
use turbo_sanity_core::config::AuthConfig;
use turbo_sanity_core::types::{ProvisionOptions, User};
use turbo_sanity_core::{
    wait_for_credential, CredentialStore, Error, ProvisioningApi, Result, WaitOptions,
};

/// External interactive login (expected to persist a new credential)
#[async_trait]
pub trait LoginFlow: Send + Sync {
    async fn login(&self) -> Result<()>;
}

/// Login flow that runs a command with the operator's terminal attached
#[derive(Debug, Clone)]
pub struct CommandLogin {
    argv: Vec<String>,
}

impl CommandLogin {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.login_command.clone())
    }

    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

#[async_trait]
impl LoginFlow for CommandLogin {
    async fn login(&self) -> Result<()> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| Error::auth_invalid("No login command configured"))?;

        info!("Running login command: {}", self.command_line());

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::auth_invalid(format!("Failed to start `{}`: {}", program, e)))?;

        if !status.success() {
            return Err(Error::auth_invalid(format!(
                "`{}` exited with {}",
                self.command_line(),
                status
            )));
        }

        Ok(())
    }
}

/// Resolves the operator's identity, logging in when needed
pub struct Authenticator<'a> {
    api: &'a dyn ProvisioningApi,
    store: &'a dyn CredentialStore,
    login: &'a dyn LoginFlow,
    wait: WaitOptions,
    observer: &'a dyn ProvisionObserver,
}

impl<'a> Authenticator<'a> {
    pub fn new(
        api: &'a dyn ProvisioningApi,
        store: &'a dyn CredentialStore,
        login: &'a dyn LoginFlow,
        wait: WaitOptions,
    ) -> Self {
        Self {
            api,
            store,
            login,
            wait,
            observer: &NoOpObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProvisionObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Return the authenticated user; on success the API client is authorized
    pub async fn ensure_authenticated(&self, options: &ProvisionOptions) -> Result<User> {
        let stored = self.store.load()?;

        if let Some(credential) = &stored {
            match self.api.whoami(credential).await {
                Ok(user) => {
                    info!("Authenticated as {}", user.email);
                    self.api.authorize(credential);
                    return Ok(user);
                }
                Err(e) => warn!("Stored authentication token is invalid: {}", e),
            }
        } else {
            debug!("No stored credential");
        }

        if options.yes {
            return Err(Error::AuthRequired);
        }

        self.observer.on_login_required();
        self.login.login().await?;

        let previous = stored.as_ref().map(|c| c.auth_token.as_str());
        let credential = wait_for_credential(self.store, previous, self.wait)
            .await?
            .ok_or_else(|| Error::auth_timeout(self.wait.deadline.as_secs()))?;

        let user = self
            .api
            .whoami(&credential)
            .await
            .map_err(|e| Error::auth_invalid(e.remote_message()))?;

        info!("Authenticated as {}", user.email);
        self.api.authorize(&credential);
        Ok(user)
    }
}

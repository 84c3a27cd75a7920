//! Provisioning orchestration
//!
//! Runs authentication, project resolution and dataset resolution in order.
//! Any stage failure ends the run. When earlier stages already created
//! remote resources the error is wrapped in
//! [`Error::PartiallyProvisioned`] so the caller can report them.

use crate::auth::{Authenticator, LoginFlow};
use crate::dataset::DatasetResolver;
use crate::observer::{NoOpObserver, ProvisionObserver, Stage};
use crate::project::ProjectResolver;
use crate::prompt::Prompter;
use std::time::Duration;
use tracing::{info, warn};
use turbo_sanity_core::types::{ProvisionOptions, ProvisioningResult};
use turbo_sanity_core::{
    CreatedResource, CredentialStore, Error, ProvisioningApi, Result, ScaffoldConfig, WaitOptions,
};

/// Tunables for a provisioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionSettings {
    pub wait: WaitOptions,
    /// Apply name validators to "create new" answers given after a list selection
    pub strict_name_validation: bool,
}

impl ProvisionSettings {
    pub fn from_config(config: &ScaffoldConfig) -> Self {
        Self {
            wait: WaitOptions::from_config(&config.auth),
            strict_name_validation: config.prompts.strict_name_validation,
        }
    }
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self {
            wait: WaitOptions {
                deadline: Duration::from_secs(10),
                poll_interval: Duration::from_millis(250),
            },
            strict_name_validation: false,
        }
    }
}

pub struct Provisioner<'a> {
    api: &'a dyn ProvisioningApi,
    store: &'a dyn CredentialStore,
    login: &'a dyn LoginFlow,
    prompter: &'a dyn Prompter,
    observer: &'a dyn ProvisionObserver,
    settings: ProvisionSettings,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        api: &'a dyn ProvisioningApi,
        store: &'a dyn CredentialStore,
        login: &'a dyn LoginFlow,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            api,
            store,
            login,
            prompter,
            observer: &NoOpObserver,
            settings: ProvisionSettings::default(),
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProvisionObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_settings(mut self, settings: ProvisionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn run(&self, options: &ProvisionOptions) -> Result<ProvisioningResult> {
        self.observer.on_stage_start(Stage::Authenticate);
        let user = Authenticator::new(self.api, self.store, self.login, self.settings.wait)
            .with_observer(self.observer)
            .ensure_authenticated(options)
            .await?;
        self.observer.on_authenticated(&user);

        self.observer.on_stage_start(Stage::Project);
        let project = ProjectResolver::new(self.api, self.prompter)
            .strict_names(self.settings.strict_name_validation)
            .with_observer(self.observer)
            .resolve(&user, options)
            .await?;

        let mut created = Vec::new();
        if let Some(id) = &project.created_organization {
            created.push(CreatedResource::Organization { id: id.clone() });
        }
        if project.created {
            created.push(CreatedResource::Project {
                id: project.project_id.clone(),
            });
        }

        self.observer.on_stage_start(Stage::Dataset);
        let dataset = match DatasetResolver::new(self.api, self.prompter)
            .with_observer(self.observer)
            .resolve(&project.project_id, options)
            .await
        {
            Ok(dataset) => dataset,
            Err(e) => {
                for resource in &created {
                    warn!("Left in place after failure: {}", resource);
                }
                return Err(Error::partially_provisioned(created, e));
            }
        };

        info!(
            "Provisioned project {} with dataset {}",
            project.project_id, dataset.dataset_name
        );

        Ok(ProvisioningResult {
            project_id: project.project_id,
            display_name: project.display_name,
            dataset_name: dataset.dataset_name,
            is_first_project: project.is_first_project,
        })
    }
}

//! Dataset resolution within a chosen project

use crate::observer::{NoOpObserver, ProvisionObserver};
use crate::prompt::{Prompter, Validator};
use crate::validation::{validate_dataset_name, validate_new_dataset_name};
use tracing::{debug, info};
use turbo_sanity_core::types::{
    AclMode, Dataset, ProvisionOptions, ResolvedDataset, DEFAULT_DATASET_NAME,
};
use turbo_sanity_core::{CreatedResource, Error, ProvisioningApi, Result};

pub const CREATE_NEW_DATASET: &str = "🆕 Create new dataset";
pub const USE_DEFAULT_DATASET: &str =
    "Use default dataset configuration? (public dataset named \"production\")";

pub struct DatasetResolver<'a> {
    api: &'a dyn ProvisioningApi,
    prompter: &'a dyn Prompter,
    observer: &'a dyn ProvisionObserver,
}

impl<'a> DatasetResolver<'a> {
    pub fn new(api: &'a dyn ProvisioningApi, prompter: &'a dyn Prompter) -> Self {
        Self {
            api,
            prompter,
            observer: &NoOpObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProvisionObserver) -> Self {
        self.observer = observer;
        self
    }

    pub async fn resolve(
        &self,
        project_id: &str,
        options: &ProvisionOptions,
    ) -> Result<ResolvedDataset> {
        let datasets = self.list(project_id).await?;

        if let Some(name) = options.dataset.as_deref() {
            if datasets.iter().any(|d| d.name == name) {
                debug!("Dataset {} already exists", name);
                return Ok(existing(name));
            }
            validate_dataset_name(name)
                .map_err(|reason| Error::invalid_dataset_name(name, reason))?;
            return self.create(project_id, name).await;
        }

        if options.yes {
            return match datasets.first() {
                Some(first) => Ok(existing(&first.name)),
                None => self.create(project_id, DEFAULT_DATASET_NAME).await,
            };
        }

        if datasets.is_empty() {
            let name = if self.prompter.confirm(USE_DEFAULT_DATASET, true)? {
                DEFAULT_DATASET_NAME.to_string()
            } else {
                let validate: Validator<'_> = &validate_dataset_name;
                let name = self
                    .prompter
                    .text("Dataset name:", Some(DEFAULT_DATASET_NAME), Some(validate))?;
                validate_dataset_name(&name)
                    .map_err(|reason| Error::invalid_dataset_name(&name, reason))?;
                name
            };
            return self.create(project_id, &name).await;
        }

        let names: Vec<String> = datasets.into_iter().map(|d| d.name).collect();
        let mut items = vec![CREATE_NEW_DATASET.to_string()];
        items.extend(names.iter().cloned());

        let index = self.prompter.select("Select dataset to use:", &items)?;
        if index > 0 {
            return names
                .get(index - 1)
                .map(|name| existing(name))
                .ok_or_else(|| Error::prompt(format!("Selection {} is out of range", index)));
        }

        let unique = |input: &str| validate_new_dataset_name(input, &names);
        let validate: Validator<'_> = &unique;
        let name = self
            .prompter
            .text("Dataset name:", Some(DEFAULT_DATASET_NAME), Some(validate))?;
        validate_new_dataset_name(&name, &names)
            .map_err(|reason| Error::invalid_dataset_name(&name, reason))?;
        self.create(project_id, &name).await
    }

    async fn list(&self, project_id: &str) -> Result<Vec<Dataset>> {
        self.api
            .list_datasets(project_id)
            .await
            .map_err(|e| Error::dataset_fetch(e.remote_message()))
    }

    async fn create(&self, project_id: &str, name: &str) -> Result<ResolvedDataset> {
        self.observer.on_creating(&format!("dataset \"{}\"", name));

        self.api
            .create_dataset(project_id, name, AclMode::Public)
            .await
            .map_err(|e| Error::dataset_create(name, e.remote_message()))?;

        info!("Created dataset {} in project {}", name, project_id);
        self.observer.on_created(&CreatedResource::Dataset {
            project_id: project_id.to_string(),
            name: name.to_string(),
        });

        Ok(ResolvedDataset {
            dataset_name: name.to_string(),
            created: true,
        })
    }
}

fn existing(name: &str) -> ResolvedDataset {
    ResolvedDataset {
        dataset_name: name.to_string(),
        created: false,
    }
}

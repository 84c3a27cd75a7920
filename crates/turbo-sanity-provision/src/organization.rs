//! Organization selection for new projects

use crate::observer::{NoOpObserver, ProvisionObserver};
use crate::prompt::{Prompter, Validator};
use crate::validation::validate_organization_name;
use tracing::{debug, info};
use turbo_sanity_core::types::{Organization, ProvisionOptions, ResolvedOrganization};
use turbo_sanity_core::{CreatedResource, Error, ProvisioningApi, Result};

pub const CREATE_NEW_ORGANIZATION: &str = "🆕 Create new organization";

/// Picks or creates the organization that owns a new project
pub struct OrganizationResolver<'a> {
    api: &'a dyn ProvisioningApi,
    prompter: &'a dyn Prompter,
    strict_names: bool,
    observer: &'a dyn ProvisionObserver,
}

impl<'a> OrganizationResolver<'a> {
    pub fn new(api: &'a dyn ProvisioningApi, prompter: &'a dyn Prompter) -> Self {
        Self {
            api,
            prompter,
            strict_names: false,
            observer: &NoOpObserver,
        }
    }

    /// Validate names typed after choosing "create new" from the list
    pub fn strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn ProvisionObserver) -> Self {
        self.observer = observer;
        self
    }

    pub async fn resolve(
        &self,
        organizations: &[Organization],
        options: &ProvisionOptions,
    ) -> Result<ResolvedOrganization> {
        if let Some(key) = options.organization.as_deref() {
            return organizations
                .iter()
                .find(|org| org.matches(key))
                .map(existing)
                .ok_or_else(|| Error::organization_not_found(key));
        }

        let always: Validator<'_> = &validate_organization_name;

        match organizations {
            [] => {
                debug!("No organizations, creating one");
                let name = self.prompter.text("Organization name:", None, Some(always))?;
                self.create(&name).await
            }
            [only] => {
                debug!("Using only organization {}", only.id);
                Ok(existing(only))
            }
            _ => {
                let mut items: Vec<String> = organizations
                    .iter()
                    .map(|org| format!("{} [{}]", org.name, org.id))
                    .collect();
                items.push(CREATE_NEW_ORGANIZATION.to_string());

                let index = self.prompter.select("Select organization:", &items)?;
                if let Some(org) = organizations.get(index) {
                    return Ok(existing(org));
                }

                let validate = self.strict_names.then_some(always);
                let name = self.prompter.text("Organization name:", None, validate)?;
                self.create(&name).await
            }
        }
    }

    async fn create(&self, name: &str) -> Result<ResolvedOrganization> {
        self.observer
            .on_creating(&format!("organization \"{}\"", name));

        let org = self
            .api
            .create_organization(name)
            .await
            .map_err(|e| Error::organization_create(e.remote_message()))?;

        info!("Created organization {} ({})", org.name, org.id);
        self.observer.on_created(&CreatedResource::Organization {
            id: org.id.clone(),
        });

        Ok(ResolvedOrganization {
            id: org.id,
            created: true,
        })
    }
}

fn existing(org: &Organization) -> ResolvedOrganization {
    ResolvedOrganization {
        id: org.id.clone(),
        created: false,
    }
}

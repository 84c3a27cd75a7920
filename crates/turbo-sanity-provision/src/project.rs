//! Project resolution
//!
//! An explicit `--project` id is looked up directly. Otherwise the operator's
//! projects and organizations are fetched concurrently, sorted newest first,
//! and the operator picks one or creates a new project.

use crate::observer::{NoOpObserver, ProvisionObserver};
use crate::organization::OrganizationResolver;
use crate::prompt::{Prompter, Validator};
use crate::validation::validate_project_name;
use tracing::{debug, info, warn};
use turbo_sanity_core::types::{
    sort_by_recency, CreateProjectRequest, Organization, Project, ProvisionOptions,
    ResolvedProject, User,
};
use turbo_sanity_core::{CreatedResource, Error, ProvisioningApi, Result};

pub const CREATE_NEW_PROJECT: &str = "🆕 Create new project";
pub const DEFAULT_PROJECT_NAME: &str = "My Turbo Sanity Project";

pub struct ProjectResolver<'a> {
    api: &'a dyn ProvisioningApi,
    prompter: &'a dyn Prompter,
    strict_names: bool,
    observer: &'a dyn ProvisionObserver,
}

impl<'a> ProjectResolver<'a> {
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
        user: &User,
        options: &ProvisionOptions,
    ) -> Result<ResolvedProject> {
        if let Some(project_id) = options.project.as_deref() {
            return self.lookup(project_id).await;
        }

        debug!("Fetching projects and organizations for {}", user.email);
        let (mut projects, organizations) =
            futures::try_join!(self.api.list_projects(), self.api.list_organizations())
                .map_err(|e| Error::project_fetch(e.remote_message()))?;
        sort_by_recency(&mut projects);

        let is_first_project = projects.is_empty();

        if options.yes {
            let latest = projects.first().ok_or(Error::NoProjects)?;
            info!("Using most recent project {} ({})", latest.display_name, latest.id);
            return Ok(existing(latest));
        }

        let always: Validator<'_> = &validate_project_name;

        if is_first_project {
            let name = self
                .prompter
                .text("Project name:", Some(DEFAULT_PROJECT_NAME), Some(always))?;
            return self.create(&name, &organizations, options, true).await;
        }

        let mut items = vec![CREATE_NEW_PROJECT.to_string()];
        items.extend(
            projects
                .iter()
                .map(|p| format!("{} ({})", p.display_name, p.id)),
        );

        let index = self
            .prompter
            .select("Select a project or create a new one:", &items)?;

        if index == 0 {
            let validate = self.strict_names.then_some(always);
            let name = self
                .prompter
                .text("Project name:", Some(DEFAULT_PROJECT_NAME), validate)?;
            return self.create(&name, &organizations, options, false).await;
        }

        projects
            .get(index - 1)
            .map(existing)
            .ok_or_else(|| Error::prompt(format!("Selection {} is out of range", index)))
    }

    async fn lookup(&self, project_id: &str) -> Result<ResolvedProject> {
        let project = self.api.get_project(project_id).await.map_err(|e| {
            debug!("Project lookup failed: {}", e);
            Error::project_not_found(project_id)
        })?;

        Ok(ResolvedProject {
            project_id: project_id.to_string(),
            display_name: project.display_name,
            is_first_project: false,
            created: false,
            created_organization: None,
        })
    }

    async fn create(
        &self,
        name: &str,
        organizations: &[Organization],
        options: &ProvisionOptions,
        is_first_project: bool,
    ) -> Result<ResolvedProject> {
        let display_name = name.trim();

        let organization = OrganizationResolver::new(self.api, self.prompter)
            .strict_names(self.strict_names)
            .with_observer(self.observer)
            .resolve(organizations, options)
            .await?;
        let created_organization = organization.created.then(|| organization.id.clone());

        self.observer
            .on_creating(&format!("project \"{}\"", display_name));

        let request = CreateProjectRequest {
            display_name: display_name.to_string(),
            organization_id: organization.id,
        };

        match self.api.create_project(&request).await {
            Ok(project) => {
                info!("Created project {} ({})", project.display_name, project.id);
                self.observer.on_created(&CreatedResource::Project {
                    id: project.id.clone(),
                });
                Ok(ResolvedProject {
                    project_id: project.id,
                    display_name: project.display_name,
                    is_first_project,
                    created: true,
                    created_organization,
                })
            }
            Err(e) => {
                let error = Error::project_create(e.remote_message());
                let created: Vec<CreatedResource> = created_organization
                    .into_iter()
                    .map(|id| CreatedResource::Organization { id })
                    .collect();
                if !created.is_empty() {
                    warn!("Project creation failed after creating an organization");
                }
                Err(Error::partially_provisioned(created, error))
            }
        }
    }
}

fn existing(project: &Project) -> ResolvedProject {
    ResolvedProject {
        project_id: project.id.clone(),
        display_name: project.display_name.clone(),
        is_first_project: false,
        created: false,
        created_organization: None,
    }
}

//! Mock implementations for testing
//!
//! Provides in-memory stand-ins for the provisioning API, the operator
//! prompt and the login flow, all recording how they were used.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use turbo_sanity_core::types::{
    AclMode, CreateProjectRequest, Dataset, Organization, Project, User,
};
use turbo_sanity_core::{
    CreatedResource, Credential, Error, InMemoryCredentialStore, ProvisioningApi, Result,
};
use turbo_sanity_provision::{LoginFlow, ProvisionObserver, Prompter, Stage, Validator};

/// In-memory provisioning API
#[derive(Default)]
pub struct FakeApi {
    users: Mutex<HashMap<String, User>>,
    projects: Mutex<Vec<Project>>,
    organizations: Mutex<Vec<Organization>>,
    datasets: Mutex<HashMap<String, Vec<Dataset>>>,
    failures: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    authorized: Mutex<Option<String>>,
    created_projects: Mutex<Vec<CreateProjectRequest>>,
    next_project: AtomicUsize,
    next_organization: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as belonging to `user`
    pub fn with_user(self, token: &str, user: User) -> Self {
        self.users.lock().unwrap().insert(token.to_string(), user);
        self
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.projects.lock().unwrap() = projects;
        self
    }

    pub fn with_organizations(self, organizations: Vec<Organization>) -> Self {
        *self.organizations.lock().unwrap() = organizations;
        self
    }

    pub fn with_datasets(self, project_id: &str, datasets: Vec<Dataset>) -> Self {
        self.datasets
            .lock()
            .unwrap()
            .insert(project_id.to_string(), datasets);
        self
    }

    /// Make `operation` fail with an API error carrying `message`
    pub fn failing(self, operation: &str, message: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(operation.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    pub fn authorized_token(&self) -> Option<String> {
        self.authorized.lock().unwrap().clone()
    }

    pub fn dataset_names(&self, project_id: &str) -> Vec<String> {
        self.datasets
            .lock()
            .unwrap()
            .get(project_id)
            .map(|ds| ds.iter().map(|d| d.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn created_project_requests(&self) -> Vec<CreateProjectRequest> {
        self.created_projects.lock().unwrap().clone()
    }

    fn record(&self, operation: &str) -> Result<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.failures.lock().unwrap().get(operation) {
            Some(message) => Err(Error::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProvisioningApi for FakeApi {
    async fn whoami(&self, credential: &Credential) -> Result<User> {
        self.record("whoami")?;
        self.users
            .lock()
            .unwrap()
            .get(&credential.auth_token)
            .cloned()
            .ok_or(Error::Api {
                status: 401,
                message: "Unauthorized".to_string(),
            })
    }

    fn authorize(&self, credential: &Credential) {
        *self.authorized.lock().unwrap() = Some(credential.auth_token.clone());
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.record("get_project")?;
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or(Error::Api {
                status: 404,
                message: "Project not found".to_string(),
            })
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.record("list_projects")?;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.record("list_organizations")?;
        Ok(self.organizations.lock().unwrap().clone())
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project> {
        self.record("create_project")?;
        self.created_projects.lock().unwrap().push(request.clone());

        let n = self.next_project.fetch_add(1, Ordering::SeqCst) + 1;
        let project = Project {
            id: format!("proj_{}", n),
            display_name: request.display_name.clone(),
            created_at: "2099-01-01T00:00:00Z".to_string(),
            organization_id: Some(request.organization_id.clone()),
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn create_organization(&self, name: &str) -> Result<Organization> {
        self.record("create_organization")?;
        let n = self.next_organization.fetch_add(1, Ordering::SeqCst) + 1;
        let org = Organization {
            id: format!("org_{}", n),
            name: name.to_string(),
            slug: None,
        };
        self.organizations.lock().unwrap().push(org.clone());
        Ok(org)
    }

    async fn list_datasets(&self, project_id: &str) -> Result<Vec<Dataset>> {
        self.record("list_datasets")?;
        Ok(self
            .datasets
            .lock()
            .unwrap()
            .get(project_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_dataset(&self, project_id: &str, name: &str, acl_mode: AclMode) -> Result<()> {
        self.record("create_dataset")?;
        self.datasets
            .lock()
            .unwrap()
            .entry(project_id.to_string())
            .or_default()
            .push(Dataset {
                name: name.to_string(),
                acl_mode,
            });
        Ok(())
    }
}

/// One scripted operator answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Select(usize),
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A prompt the operator was shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub message: String,
    pub items: Vec<String>,
}

/// Prompter replaying scripted answers in order.
///
/// Text answers failing the validator are recorded as rejections and the
/// next answer is tried, the way a terminal prompt re-asks.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<PromptRecord>>,
    rejections: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        }
    }

    /// Prompter that fails the test on any prompt
    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    pub fn prompts(&self) -> Vec<PromptRecord> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn rejections(&self) -> Vec<String> {
        self.rejections.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn record(&self, message: &str, items: &[String]) {
        self.prompts.lock().unwrap().push(PromptRecord {
            message: message.to_string(),
            items: items.to_vec(),
        });
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::prompt(format!("No scripted answer for \"{}\"", message)))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(
        &self,
        message: &str,
        default: Option<&str>,
        validate: Option<Validator<'_>>,
    ) -> Result<String> {
        self.record(message, &[]);
        loop {
            let value = match self.next(message)? {
                Answer::Text(value) if value.is_empty() => {
                    default.map(str::to_string).unwrap_or_default()
                }
                Answer::Text(value) => value,
                other => panic!("expected text answer for \"{}\", got {:?}", message, other),
            };

            match validate.map(|v| v(&value)) {
                Some(Err(reason)) => self.rejections.lock().unwrap().push(reason),
                _ => return Ok(value),
            }
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        self.record(message, &[]);
        match self.next(message)? {
            Answer::Confirm(value) => Ok(value),
            other => panic!("expected confirm answer for \"{}\", got {:?}", message, other),
        }
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        self.record(message, items);
        match self.next(message)? {
            Answer::Select(index) => Ok(index),
            other => panic!("expected select answer for \"{}\", got {:?}", message, other),
        }
    }
}

/// Login flow that stores `token` (if any) when run
pub struct FakeLogin {
    store: InMemoryCredentialStore,
    token: Option<String>,
    fail_with: Option<String>,
    runs: AtomicUsize,
}

impl FakeLogin {
    pub fn writing(store: &InMemoryCredentialStore, token: &str) -> Self {
        Self {
            store: store.clone(),
            token: Some(token.to_string()),
            fail_with: None,
            runs: AtomicUsize::new(0),
        }
    }

    /// Login that completes without persisting anything
    pub fn writing_nothing(store: &InMemoryCredentialStore) -> Self {
        Self {
            store: store.clone(),
            token: None,
            fail_with: None,
            runs: AtomicUsize::new(0),
        }
    }

    pub fn failing(store: &InMemoryCredentialStore, message: &str) -> Self {
        Self {
            store: store.clone(),
            token: None,
            fail_with: Some(message.to_string()),
            runs: AtomicUsize::new(0),
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginFlow for FakeLogin {
    async fn login(&self) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(Error::auth_invalid(message.clone()));
        }
        if let Some(token) = &self.token {
            self.store.set(Credential::new(token.clone()));
        }
        Ok(())
    }
}

/// Observer recording every event as a short string
#[derive(Default, Clone)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProvisionObserver for RecordingObserver {
    fn on_stage_start(&self, stage: Stage) {
        self.push(format!("stage:{}", stage));
    }

    fn on_authenticated(&self, user: &User) {
        self.push(format!("authenticated:{}", user.email));
    }

    fn on_login_required(&self) {
        self.push("login".to_string());
    }

    fn on_created(&self, resource: &CreatedResource) {
        self.push(format!("created:{}", resource));
    }
}

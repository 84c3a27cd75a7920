//! Provisioning API client
//!
//! [`ProvisioningApi`] is the transport seam used by the resolvers.
//! [`SanityClient`] implements it over authenticated JSON/HTTP.

use crate::config::ApiConfig;
use crate::credentials::Credential;
use crate::error::{Error, Result};
use crate::types::{AclMode, CreateProjectRequest, Dataset, Organization, Project, User};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, trace};

/// Remote account/project/dataset operations
#[async_trait]
pub trait ProvisioningApi: Send + Sync {
    /// Identify the owner of `credential` without trusting it for later calls
    async fn whoami(&self, credential: &Credential) -> Result<User>;

    /// Use `credential` for every subsequent call
    fn authorize(&self, credential: &Credential);

    async fn get_project(&self, project_id: &str) -> Result<Project>;

    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn list_organizations(&self) -> Result<Vec<Organization>>;

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project>;

    async fn create_organization(&self, name: &str) -> Result<Organization>;

    async fn list_datasets(&self, project_id: &str) -> Result<Vec<Dataset>>;

    async fn create_dataset(&self, project_id: &str, name: &str, acl_mode: AclMode)
        -> Result<()>;
}

/// Error payload returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the Sanity management API
pub struct SanityClient {
    client: reqwest::Client,
    base_url: String,
    /// Bearer token set once authentication succeeds
    auth_token: RwLock<Option<String>>,
}

impl SanityClient {
    /// Create a client from API settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            auth_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as a single path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || Error::invalid_config(format!("invalid API base URL {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match self.auth_token.read().unwrap().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Turn non-success responses into `Error::Api`, surfacing the API's message verbatim
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    trace!("Error body: {}", body);

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        });

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ProvisioningApi for SanityClient {
    async fn whoami(&self, credential: &Credential) -> Result<User> {
        let url = self.endpoint(&["users", "me"])?;
        debug!("GET {}", url);
        let builder = self.client.get(url).bearer_auth(&credential.auth_token);
        self.send(builder).await
    }

    fn authorize(&self, credential: &Credential) {
        *self.auth_token.write().unwrap() = Some(credential.auth_token.clone());
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        let url = self.endpoint(&["projects", project_id])?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut url = self.endpoint(&["projects"])?;
        url.set_query(Some("includeMembers=false"));
        self.send(self.request(Method::GET, url)).await
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let url = self.endpoint(&["organizations"])?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project> {
        let url = self.endpoint(&["projects"])?;
        self.send(self.request(Method::POST, url).json(request)).await
    }

    async fn create_organization(&self, name: &str) -> Result<Organization> {
        let body = serde_json::json!({ "name": name });
        let url = self.endpoint(&["organizations"])?;
        self.send(self.request(Method::POST, url).json(&body)).await
    }

    async fn list_datasets(&self, project_id: &str) -> Result<Vec<Dataset>> {
        let url = self.endpoint(&["projects", project_id, "datasets"])?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn create_dataset(
        &self,
        project_id: &str,
        name: &str,
        acl_mode: AclMode,
    ) -> Result<()> {
        let body = serde_json::json!({ "aclMode": acl_mode });
        let url = self.endpoint(&["projects", project_id, "datasets", name])?;
        let builder = self.request(Method::PUT, url).json(&body);

        check_status(builder.send().await?).await?;
        Ok(())
    }
}

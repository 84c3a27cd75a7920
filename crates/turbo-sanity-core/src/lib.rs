//! # turbo-sanity-core
//!
//! Core library for create-turbo-sanity providing:
//! - Domain types for users, organizations, projects and datasets
//! - The provisioning error taxonomy
//! - Layered configuration (embedded defaults, user file, environment)
//! - Credential discovery and bounded waiting for a fresh login
//! - The provisioning API client

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod types;
pub mod utils;

pub use api::{ProvisioningApi, SanityClient};
pub use config::{HierarchicalConfigLoader, ScaffoldConfig};
pub use credentials::{
    wait_for_credential, Credential, CredentialStore, FileCredentialStore,
    InMemoryCredentialStore, WaitOptions,
};
pub use error::{CreatedResource, Error, Result};
pub use utils::get_home_dir;

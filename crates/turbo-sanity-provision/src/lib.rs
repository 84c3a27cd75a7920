//! # turbo-sanity-provision
//!
//! Interactive provisioning state machine for create-turbo-sanity:
//! - Authentication bootstrap with an external login flow
//! - Project resolution (existing, explicit, or newly created)
//! - Organization resolution for new projects
//! - Dataset resolution within the chosen project
//!
//! Terminal I/O stays behind [`Prompter`] and [`ProvisionObserver`].

pub mod auth;
pub mod dataset;
pub mod observer;
pub mod organization;
pub mod project;
pub mod prompt;
pub mod provisioner;
pub mod validation;

pub use auth::{Authenticator, CommandLogin, LoginFlow};
pub use dataset::DatasetResolver;
pub use observer::{NoOpObserver, ProvisionObserver, Stage};
pub use organization::OrganizationResolver;
pub use project::ProjectResolver;
pub use prompt::{Prompter, Validator};
pub use provisioner::{ProvisionSettings, Provisioner};

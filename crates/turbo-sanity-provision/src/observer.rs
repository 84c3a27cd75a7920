//! Progress reporting for provisioning runs
//!
//! The provisioning core does not print. Callers that want feedback
//! implement [`ProvisionObserver`]; every method has a no-op default.

use std::fmt;
use turbo_sanity_core::types::User;
use turbo_sanity_core::CreatedResource;

/// Provisioning stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticate,
    Project,
    Dataset,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticate => "authenticate",
            Self::Project => "project",
            Self::Dataset => "dataset",
        };
        f.write_str(name)
    }
}

/// Observer trait for provisioning events
pub trait ProvisionObserver: Send + Sync {
    /// Called before a stage starts
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called once the operator's identity is confirmed
    fn on_authenticated(&self, user: &User) {
        let _ = user;
    }

    /// Called when the login subprocess is about to run
    fn on_login_required(&self) {}

    /// Called before a remote create request is issued
    fn on_creating(&self, what: &str) {
        let _ = what;
    }

    /// Called after a remote resource was created
    fn on_created(&self, resource: &CreatedResource) {
        let _ = resource;
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ProvisionObserver for NoOpObserver {}

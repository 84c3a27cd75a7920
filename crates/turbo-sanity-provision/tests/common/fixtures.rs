//! Fixture builders

#![allow(dead_code)]

use std::time::Duration;
use turbo_sanity_core::types::{Dataset, Organization, Project, ProvisionOptions, User};
use turbo_sanity_core::WaitOptions;

pub const VALID_TOKEN: &str = "tok-valid";
pub const FRESH_TOKEN: &str = "tok-fresh";
pub const STALE_TOKEN: &str = "tok-stale";

pub fn user() -> User {
    User {
        id: "u_1".to_string(),
        email: "dev@example.com".to_string(),
        name: Some("Dev".to_string()),
    }
}

pub fn project(id: &str, display_name: &str, created_at: &str) -> Project {
    Project {
        id: id.to_string(),
        display_name: display_name.to_string(),
        created_at: created_at.to_string(),
        organization_id: None,
    }
}

pub fn organization(id: &str, name: &str) -> Organization {
    Organization {
        id: id.to_string(),
        name: name.to_string(),
        slug: None,
    }
}

pub fn dataset(name: &str) -> Dataset {
    Dataset {
        name: name.to_string(),
        acl_mode: Default::default(),
    }
}

/// Three projects out of creation order
pub fn three_projects() -> Vec<Project> {
    vec![
        project("p_old", "Old", "2023-01-01T00:00:00Z"),
        project("p_new", "Newest", "2024-06-01T00:00:00Z"),
        project("p_mid", "Middle", "2023-09-15T00:00:00Z"),
    ]
}

pub fn interactive() -> ProvisionOptions {
    ProvisionOptions::default()
}

pub fn non_interactive() -> ProvisionOptions {
    ProvisionOptions {
        yes: true,
        ..Default::default()
    }
}

/// Short bounds for tests running on paused time
pub fn quick_wait() -> WaitOptions {
    WaitOptions {
        deadline: Duration::from_secs(2),
        poll_interval: Duration::from_millis(50),
    }
}

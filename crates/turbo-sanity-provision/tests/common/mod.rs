//! Common test utilities for turbo-sanity-provision
//!
//! This module provides shared test infrastructure including:
//! - An in-memory provisioning API with call recording
//! - A scripted prompter that enforces validators
//! - A login flow that writes a credential on demand
//! - Fixture builders for users, projects and organizations

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

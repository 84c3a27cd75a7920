//! Git operations used to fetch remote templates
//!
//! # Example
//!
//! ```no_run
//! use turbo_sanity_templates::git::{clone_repository, CloneOptions};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = CloneOptions { depth: Some(1) };
//! clone_repository(
//!     "https://github.com/acme/turbo-sanity-template.git",
//!     Utf8Path::new("/tmp/template"),
//!     &options,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

mod clone;

pub use clone::{clone_repository, is_valid_repo_url, CloneOptions};

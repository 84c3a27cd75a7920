//! Operator prompt seam
//!
//! The resolvers never touch the terminal. They ask a [`Prompter`], which
//! the CLI implements with dialoguer and tests implement with scripted answers.

use turbo_sanity_core::Result;

/// Validation callback for free-text answers; `Err` carries the message shown to the operator
pub type Validator<'a> = &'a (dyn Fn(&str) -> std::result::Result<(), String> + Sync);

/// Blocking operator input
pub trait Prompter: Send + Sync {
    /// Ask for a string. Implementations must re-ask until `validate` passes.
    fn text(&self, message: &str, default: Option<&str>, validate: Option<Validator<'_>>)
        -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Ask the operator to pick one of `items`; returns its index
    fn select(&self, message: &str, items: &[String]) -> Result<usize>;
}

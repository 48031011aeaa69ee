//! Greeter error types

use thiserror::Error;

/// Errors raised by greeter operations
///
/// None of these are retried or recovered inside the crate; the first
/// failing call in a chain aborts the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GreetError {
    /// Language code outside the supported set
    #[error("Invalid language: {0:?}")]
    InvalidLanguage(String),

    /// `html_greeting` called with no UI injector attached
    #[error("No UI injector configured")]
    MissingUiCollaborator,

    /// `html_greeting` called with an empty selector
    #[error("Missing selector")]
    MissingSelector,
}

pub type Result<T> = std::result::Result<T, GreetError>;

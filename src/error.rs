//! # Errors
//!
//! Error type shared by every manager and remote API implementation.
//!
//! Provider failures are carried verbatim in [`Error::Remote`] together with the
//! provider error code. Describe-style operations use [`Error::is_not_found`] to
//! turn absence into an empty result; nothing else is classified here.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The provider rejected or failed a request
    #[error("{service} {operation} failed{}: {message}", code_suffix(.code))]
    Remote {
        service: &'static str,
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    /// The provider answered successfully but left out the resource the operation returns
    #[error("{service} {operation} response did not include {field}")]
    EmptyResponse {
        service: &'static str,
        operation: &'static str,
        field: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A parameter override was submitted without a value
    #[error("parameter {0} has no value to apply")]
    MissingParameterValue(String),
}

impl Error {
    /// Provider error code, when the failure came from the provider and carried one
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Remote { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether the provider reported that the addressed resource does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code().is_some_and(is_not_found_code)
    }
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

/// Provider error codes meaning "no such resource".
///
/// ElastiCache uses `*NotFound`/`*NotFoundFault` (e.g. `CacheSubnetGroupNotFoundFault`,
/// `CacheParameterGroupNotFound`), Secrets Manager uses `ResourceNotFoundException`
/// and EC2 uses dotted codes such as `InvalidGroup.NotFound`.
#[must_use]
pub fn is_not_found_code(code: &str) -> bool {
    code.contains("NotFound")
}

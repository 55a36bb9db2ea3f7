//! Configuration and trigger errors
//!
//! Typed errors for the configuration document and the account-creation
//! notification, so callers can tell a bad document from an AWS failure.

use thiserror::Error;

/// Configuration document errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document was empty or contained only `null`
    #[error("configuration document is empty")]
    Empty,

    /// The document was not valid YAML/JSON for the expected shape
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field failed validation
    #[error("invalid configuration: {0}")]
    Invalid(#[from] garde::Report),

    /// `update_account_password_policy` is set but no policy body was given
    #[error("update_account_password_policy is true but password_policy is missing")]
    MissingPasswordPolicy,

    /// Failed to read a configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from the account-creation notification
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Account creation did not succeed; the whole chain must stop
    #[error("AWS account is not in a SUCCEEDED state: {state}")]
    NotSucceeded { state: String },

    /// The notification carried no usable account id
    #[error("invalid account id in notification: '{0}'")]
    InvalidAccountId(String),

    /// The notification JSON did not have the expected shape
    #[error("failed to parse account creation notification: {0}")]
    Parse(#[from] serde_json::Error),
}

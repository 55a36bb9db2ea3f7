//! AWS error classification and handling
//!
//! Every adapter call converts the SDK error into an [`AwsError`] before
//! attaching context, so callers branch on the error kind (e.g. "dependency
//! still exists") rather than matching strings.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// AWS error categories for teardown and handler logic
#[derive(Debug, Clone, Error)]
pub enum AwsError {
    /// Resource was not found (safe to skip during teardown)
    #[error("Resource not found: {message}")]
    NotFound { code: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Resource still has dependent objects (e.g. a VPC with a leftover ENI)
    #[error("Resource has dependent objects: {message}")]
    DependencyViolation { message: String },

    /// The assumed role is not allowed to perform the call
    #[error("Access denied: {message}")]
    AccessDenied { code: String, message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Check if this is a dependency violation
    pub fn is_dependency_violation(&self) -> bool {
        matches!(self, AwsError::DependencyViolation { .. })
    }

    /// The provider error code, when one was returned
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { code, .. } | AwsError::AccessDenied { code, .. } => Some(code),
            AwsError::Throttled => Some("Throttling"),
            AwsError::DependencyViolation { .. } => Some("DependencyViolation"),
            AwsError::Sdk { code, .. } => code.as_deref(),
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        self.code().and_then(suggestion_for_code)
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidVpcID.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "InvalidEgressOnlyInternetGatewayId.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidNetworkAclID.NotFound",
    "InvalidVpcPeeringConnectionID.NotFound",
    "InvalidVpcEndpointId.NotFound",
    "InvalidGroup.NotFound",
    "InvalidVpnGatewayID.NotFound",
    "InvalidVpnConnectionID.NotFound",
    "NoSuchBucket",
    "NoSuchKey",
    "NoSuchEntity",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for dependency violations (resource still in use)
const DEPENDENCY_CODES: &[&str] = &["DependencyViolation"];

/// Known AWS error codes for authorization failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
    "AuthFailure",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if DEPENDENCY_CODES.contains(&c) => AwsError::DependencyViolation { message },
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied {
            code: c.to_string(),
            message,
        },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify any SDK operation error through its error metadata.
///
/// Transport failures carry no code; their message falls back to the full
/// error context so the cause is not lost.
pub fn classify_sdk_error<E>(err: &E) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match err.message() {
        Some(message) => classify_aws_error(err.code(), Some(message)),
        None => {
            let context = DisplayErrorContext(err).to_string();
            classify_aws_error(err.code(), Some(&context))
        }
    }
}

/// `map_err` adapter: convert an SDK error into an [`AwsError`]
pub fn sdk_error<E>(err: E) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    classify_sdk_error(&err)
}

/// Classify an error from an anyhow::Error by finding the [`AwsError`] in its chain.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<AwsError>() {
            return e.clone();
        }
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// Turn a "not found" failure into `Ok(None)`, keeping every other error.
pub fn ignore_not_found<T>(result: anyhow::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if classify_anyhow_error(&e).is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "AccessDenied",
        "Check that the cross-account role trusts the management account.",
    ),
    (
        "AccessDeniedException",
        "Check that the cross-account role trusts the management account.",
    ),
    (
        "UnauthorizedOperation",
        "The assumed role lacks EC2 permissions in this account.",
    ),
    (
        "AuthFailure",
        "The temporary credentials were rejected; the role session may have expired.",
    ),
    (
        "OptInRequired",
        "The region is not enabled for this account.",
    ),
    (
        "NoSuchKey",
        "Check the BUCKET and CONFIG_FILE settings.",
    ),
    (
        "NoSuchBucket",
        "Check the BUCKET setting.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Re-run the handler; every step is idempotent.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}

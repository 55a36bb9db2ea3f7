//! Cross-account role assumption
//!
//! Every handler invocation assumes the target account's role exactly once
//! and derives its per-region clients from the resulting credentials.

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::sdk_error;
use anyhow::{Context, Result};
use aws_sdk_sts::config::Credentials;
use std::time::SystemTime;
use tracing::{error, info};

/// Provider name recorded on credentials built from an `AssumeRole` response
const CREDENTIALS_PROVIDER: &str = "account-baseline-assume-role";

/// Calls STS `AssumeRole` with the management account's credentials
pub struct RoleAssumer {
    client: aws_sdk_sts::Client,
    session_name: String,
}

impl RoleAssumer {
    pub fn new(ctx: &AwsContext, session_name: impl Into<String>) -> Self {
        Self {
            client: ctx.sts_client(),
            session_name: session_name.into(),
        }
    }

    /// Assume `role_arn` and return static temporary credentials.
    ///
    /// Failure is fatal for the invocation; nothing else can run without
    /// access to the target account.
    pub async fn assume(&self, role_arn: &str) -> Result<Credentials> {
        let response = match self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(&self.session_name)
            .send()
            .await
            .map_err(sdk_error)
        {
            Ok(response) => response,
            Err(e) => {
                error!(critical = true, role_arn = %role_arn, error = %e, "Cannot assume role");
                return Err(e).with_context(|| format!("Failed to assume role {role_arn}"));
            }
        };

        let creds = response
            .credentials()
            .with_context(|| format!("AssumeRole for {role_arn} returned no credentials"))?;

        let expiry = SystemTime::try_from(*creds.expiration()).ok();

        info!(
            role_arn = %role_arn,
            session = %self.session_name,
            "Assumed cross-account role"
        );

        Ok(Credentials::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            Some(creds.session_token().to_string()),
            expiry,
            CREDENTIALS_PROVIDER,
        ))
    }
}

/// Temporary credentials in a target account, reusable across regions
#[derive(Clone)]
pub struct CrossAccountSession {
    credentials: Credentials,
    home_region: String,
}

impl CrossAccountSession {
    pub fn new(credentials: Credentials, home_region: impl Into<String>) -> Self {
        Self {
            credentials,
            home_region: home_region.into(),
        }
    }

    /// Region used for global services and region discovery
    pub fn home_region(&self) -> &str {
        &self.home_region
    }

    /// Configuration for `region`, signed with the session's credentials
    pub async fn context(&self, region: &str) -> AwsContext {
        AwsContext::with_credentials(region, self.credentials.clone()).await
    }

    /// Build a client of type `C` for `region`
    pub async fn client<C: FromAwsContext>(&self, region: &str) -> C {
        C::from_context(&self.context(region).await)
    }
}

impl std::fmt::Debug for CrossAccountSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossAccountSession")
            .field("home_region", &self.home_region)
            .finish_non_exhaustive()
    }
}

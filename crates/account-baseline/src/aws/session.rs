//! Seams between the handlers and AWS
//!
//! Handlers are written against [`Connector`], [`AccountSession`] and
//! [`ConfigStore`] so they can run against an in-memory account in tests.

use crate::aws::account::{CrossAccountSession, RoleAssumer};
use crate::aws::context::AwsContext;
use crate::aws::ec2::{Ec2Client, NetworkOperations, RegionalSettings};
use crate::aws::iam::IamClient;
use crate::aws::s3::S3Client;
use crate::aws::s3control::S3ControlClient;
use account_baseline_common::defaults::PREFERRED_REGION;
use account_baseline_common::{AccountId, PasswordPolicy, S3BlockPublicAccess, ordered_regions};
use anyhow::Result;

/// Obtains credentialed access to a target account.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session: AccountSession;

    /// Assume `role_arn`; called once per handler invocation
    async fn connect(&self, role_arn: &str) -> Result<Self::Session>;
}

/// Credentialed access to one target account.
#[allow(async_fn_in_trait)]
pub trait AccountSession {
    type Regional: NetworkOperations + RegionalSettings;

    /// Regions enabled for the account, in provider order
    async fn available_regions(&self) -> Result<Vec<String>>;

    /// Regions to operate in: the preferred region first, each exactly once
    async fn regions(&self) -> Result<Vec<String>> {
        Ok(ordered_regions(self.available_regions().await?))
    }

    /// EC2 access scoped to `region`
    async fn regional(&self, region: &str) -> Result<Self::Regional>;

    async fn update_password_policy(&self, policy: &PasswordPolicy) -> Result<()>;

    async fn put_s3_public_access_block(
        &self,
        account: &AccountId,
        settings: &S3BlockPublicAccess,
    ) -> Result<()>;
}

/// Object storage holding the configuration document.
#[allow(async_fn_in_trait)]
pub trait ConfigStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

/// [`Connector`] backed by STS in the management account
#[derive(Debug, Clone)]
pub struct AwsConnector {
    home: AwsContext,
    session_name: String,
}

impl AwsConnector {
    pub fn new(home: AwsContext, session_name: impl Into<String>) -> Self {
        Self {
            home,
            session_name: session_name.into(),
        }
    }
}

impl Connector for AwsConnector {
    type Session = CrossAccountSession;

    async fn connect(&self, role_arn: &str) -> Result<Self::Session> {
        let credentials = RoleAssumer::new(&self.home, self.session_name.clone())
            .assume(role_arn)
            .await?;
        Ok(CrossAccountSession::new(credentials, PREFERRED_REGION))
    }
}

impl AccountSession for CrossAccountSession {
    type Regional = Ec2Client;

    async fn available_regions(&self) -> Result<Vec<String>> {
        self.client::<Ec2Client>(self.home_region())
            .await
            .available_regions()
            .await
    }

    async fn regional(&self, region: &str) -> Result<Self::Regional> {
        Ok(self.client::<Ec2Client>(region).await)
    }

    async fn update_password_policy(&self, policy: &PasswordPolicy) -> Result<()> {
        self.client::<IamClient>(self.home_region())
            .await
            .update_account_password_policy(policy)
            .await
    }

    async fn put_s3_public_access_block(
        &self,
        account: &AccountId,
        settings: &S3BlockPublicAccess,
    ) -> Result<()> {
        self.client::<S3ControlClient>(self.home_region())
            .await
            .put_public_access_block(account, settings)
            .await
    }
}

impl ConfigStore for S3Client {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.get_object_bytes(bucket, key).await
    }
}

//! S3 object access for the configuration document

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::sdk_error;
use anyhow::{Context, Result};
use aws_sdk_s3::Client;
use tracing::debug;

/// S3 client in the management account
pub struct S3Client {
    client: Client,
}

impl FromAwsContext for S3Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.s3_client(),
        }
    }
}

impl S3Client {
    /// Download an object into memory.
    ///
    /// A missing key or bucket surfaces as [`AwsError::NotFound`](crate::aws::AwsError)
    /// in the error chain.
    pub async fn get_object_bytes(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        debug!(bucket = %bucket, key = %key, "Downloading object");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to get s3://{bucket}/{key}"))?;

        let body = response
            .body
            .collect()
            .await
            .with_context(|| format!("Failed to read body of s3://{bucket}/{key}"))?;

        Ok(body.into_bytes().to_vec())
    }
}

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{Result, StorageError};

/// A short-lived, read-only URL to a stored blob.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in_minutes: i64,
}

/// Object storage port for resume files. Uploads and deletes are plain,
/// retryable side effects; signing is stateless and does not verify that
/// the object exists.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `path`, returning the stored path.
    async fn upload(&self, path: &str, content_type: &str, data: Vec<u8>) -> Result<String>;

    async fn delete(&self, path: &str) -> Result<()>;

    async fn sign_temporary_url(&self, path: &str, ttl_minutes: i64) -> Result<SignedUrl>;
}

/// S3-backed blob store. Every remote call is bounded by `op_timeout` so a
/// hung upload cannot stall a request indefinitely.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    op_timeout: Duration,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, op_timeout: Duration) -> Self {
        Self {
            client,
            bucket,
            op_timeout,
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, path: &str, content_type: &str, data: Vec<u8>) -> Result<String> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .send();

        tokio::time::timeout(self.op_timeout, request)
            .await
            .map_err(|_| StorageError::Dependency(format!("upload of {path} timed out")))?
            .map_err(|e| StorageError::Dependency(aws_sdk_s3::Error::from(e).to_string()))?;

        tracing::info!("resume blob uploaded to {path}");
        Ok(path.to_string())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let request = self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send();

        tokio::time::timeout(self.op_timeout, request)
            .await
            .map_err(|_| StorageError::Dependency(format!("delete of {path} timed out")))?
            .map_err(|e| StorageError::Dependency(aws_sdk_s3::Error::from(e).to_string()))?;

        tracing::info!("resume blob {path} deleted");
        Ok(())
    }

    async fn sign_temporary_url(&self, path: &str, ttl_minutes: i64) -> Result<SignedUrl> {
        let expires_in = Duration::from_secs(ttl_minutes.max(1) as u64 * 60);
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Dependency(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(config)
            .await
            .map_err(|e| StorageError::Dependency(aws_sdk_s3::Error::from(e).to_string()))?;

        Ok(SignedUrl {
            url: presigned.uri().to_string(),
            expires_at: Utc::now() + chrono::Duration::minutes(ttl_minutes),
            expires_in_minutes: ttl_minutes,
        })
    }
}
